//! Stored records.
//!
//! Field names follow the snake_case keys the clients read from the tree.
//! Collections that the store may drop when empty are `#[serde(default)]`.

pub mod catalog;
pub mod entity;
pub mod game;
pub mod gamer;
pub mod group;
pub mod invitation;
pub mod player;
pub mod step;
pub mod step_result;
pub mod timestamp;

pub use catalog::{Ability, Character, Fate};
pub use entity::{Entity, EntityKind};
pub use game::{Game, GameStatus};
pub use gamer::Gamer;
pub use group::Group;
pub use invitation::{Invitation, InvitationKind, InvitationStatus};
pub use player::{Player, PlayerSummary};
pub use step::Step;
pub use step_result::{StepResult, Vote};
pub use timestamp::EpochMillis;
