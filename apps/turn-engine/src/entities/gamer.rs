use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::catalog::Fate;

/// A player's identity inside one game, stored at `games/{game}/gamers/{player}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gamer {
    /// Same as the owning player's bin.
    pub bin: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub character_id: String,
    #[serde(default)]
    pub is_alive: bool,
    /// Applied ability effects keyed by push key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub fates: BTreeMap<String, Fate>,
}

impl Gamer {
    pub fn new(
        bin: impl Into<String>,
        game_id: impl Into<String>,
        character_id: impl Into<String>,
    ) -> Self {
        Self {
            bin: bin.into(),
            game_id: game_id.into(),
            character_id: character_id.into(),
            is_alive: true,
            fates: BTreeMap::new(),
        }
    }
}
