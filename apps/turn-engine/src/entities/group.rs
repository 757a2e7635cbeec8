use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::invitation::Invitation;
use super::player::PlayerSummary;

/// A standing group of players, stored at `game_groups/{bin}`.
///
/// Members are keyed by player bin. Earlier clients wrote `members` as a JSON
/// list; that shape no longer decodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub bin: String,
    #[serde(default)]
    pub group_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<PlayerSummary>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub members: BTreeMap<String, PlayerSummary>,
    /// Maximum head count including the creator; zero means unlimited.
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub invitations: BTreeMap<String, Invitation>,
}
