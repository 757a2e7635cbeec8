//! Store path construction.
//!
//! All engine code builds paths through the helpers below so the layout the
//! clients depend on (`players/{bin}`, `games/{bin}/steps/{step}/result/{gamer}`,
//! ...) is defined in exactly one place.

use std::fmt;

/// A slash-separated location in the tree, without leading or trailing slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StorePath(String);

impl StorePath {
    /// A top-level collection such as `players`.
    pub fn root(collection: &str) -> Self {
        Self(collection.trim_matches('/').to_string())
    }

    /// Append one or more segments (a segment may itself contain slashes).
    pub fn child(&self, segment: impl AsRef<str>) -> Self {
        let segment = segment.as_ref().trim_matches('/');
        if segment.is_empty() {
            return self.clone();
        }
        if self.0.is_empty() {
            return Self(segment.to_string());
        }
        Self(format!("{}/{}", self.0, segment))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Non-empty segments in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for StorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const PLAYERS: &str = "players";
pub const GAMES: &str = "games";
pub const GAME_GROUPS: &str = "game_groups";
pub const STEPS: &str = "steps";
pub const CHARACTERS: &str = "characters";
pub const ABILITIES: &str = "abilities";

pub fn players() -> StorePath {
    StorePath::root(PLAYERS)
}

pub fn player(bin: &str) -> StorePath {
    players().child(bin)
}

pub fn player_invitations(player_bin: &str) -> StorePath {
    player(player_bin).child("invitations")
}

pub fn player_invitation(player_bin: &str, invitation_bin: &str) -> StorePath {
    player_invitations(player_bin).child(invitation_bin)
}

pub fn games() -> StorePath {
    StorePath::root(GAMES)
}

pub fn game(bin: &str) -> StorePath {
    games().child(bin)
}

pub fn game_steps(game_bin: &str) -> StorePath {
    game(game_bin).child("steps")
}

pub fn game_step(game_bin: &str, step_bin: &str) -> StorePath {
    game_steps(game_bin).child(step_bin)
}

/// Field key, relative to `games/{bin}`, of one gamer's transient results.
pub fn step_result_field(step_bin: &str, gamer_bin: &str) -> String {
    format!("steps/{step_bin}/result/{gamer_bin}")
}

pub fn step_result(game_bin: &str, step_bin: &str, gamer_bin: &str) -> StorePath {
    game(game_bin).child(step_result_field(step_bin, gamer_bin))
}

pub fn game_gamers(game_bin: &str) -> StorePath {
    game(game_bin).child("gamers")
}

pub fn game_gamer(game_bin: &str, gamer_bin: &str) -> StorePath {
    game_gamers(game_bin).child(gamer_bin)
}

pub fn gamer_fates(game_bin: &str, gamer_bin: &str) -> StorePath {
    game_gamer(game_bin, gamer_bin).child("fates")
}

pub fn game_character(game_bin: &str, character_bin: &str) -> StorePath {
    game(game_bin).child("characters").child(character_bin)
}

pub fn game_abilities(game_bin: &str) -> StorePath {
    game(game_bin).child("abilities")
}

pub fn groups() -> StorePath {
    StorePath::root(GAME_GROUPS)
}

pub fn group(bin: &str) -> StorePath {
    groups().child(bin)
}

pub fn group_members(group_bin: &str) -> StorePath {
    group(group_bin).child("members")
}

pub fn group_member(group_bin: &str, player_bin: &str) -> StorePath {
    group_members(group_bin).child(player_bin)
}

pub fn group_invitations(group_bin: &str) -> StorePath {
    group(group_bin).child("invitations")
}

pub fn steps() -> StorePath {
    StorePath::root(STEPS)
}

pub fn step(bin: &str) -> StorePath {
    steps().child(bin)
}

pub fn characters() -> StorePath {
    StorePath::root(CHARACTERS)
}

pub fn character(bin: &str) -> StorePath {
    characters().child(bin)
}

pub fn abilities() -> StorePath {
    StorePath::root(ABILITIES)
}

pub fn ability(bin: &str) -> StorePath {
    abilities().child(bin)
}
