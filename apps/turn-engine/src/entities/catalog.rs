use serde::{Deserialize, Serialize};

use super::timestamp::EpochMillis;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub bin: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A playable role. `abilities` holds references; only `bin` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub bin: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abilities: Vec<Ability>,
}

/// The effect of an applied ability on a gamer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fate {
    pub bin: String,
    pub ability_bin: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applied_at: Option<EpochMillis>,
}
