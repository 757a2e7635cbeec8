use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::invitation::Invitation;

/// A registered player profile, stored at `players/{bin}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub bin: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub privacy: String,
    /// Invitations keyed by invitation bin.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub invitations: BTreeMap<String, Invitation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<String>,
}

impl Player {
    pub fn new(bin: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            user_name: user_name.into(),
            status: "available".to_string(),
            photo: String::new(),
            privacy: "public".to_string(),
            invitations: BTreeMap::new(),
            group_ids: Vec::new(),
        }
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            bin: self.bin.clone(),
            user_name: self.user_name.clone(),
            status: self.status.clone(),
            photo: self.photo.clone(),
            privacy: self.privacy.clone(),
        }
    }
}

/// Profile fields copied wherever another record refers to a player
/// (group creator and members, game creator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub bin: String,
    #[serde(default)]
    pub user_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub photo: String,
    #[serde(default)]
    pub privacy: String,
}
