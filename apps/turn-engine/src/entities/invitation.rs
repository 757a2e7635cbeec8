use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    #[default]
    Created,
    Received,
    Accepted,
    Declined,
}

/// What the invitation grants entry to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationKind {
    Game,
    #[default]
    Group,
}

/// An invitation held in `players/{bin}/invitations/{bin}`.
///
/// `accepted` and `declined` are never both true, and once either is set the
/// invitation is terminal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub bin: String,
    #[serde(default)]
    pub game_group: String,
    #[serde(default)]
    pub creator_id: String,
    #[serde(default)]
    pub status: InvitationStatus,
    #[serde(rename = "invitation", default)]
    pub kind: InvitationKind,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub game_id: String,
    #[serde(default)]
    pub accepted: bool,
    #[serde(default)]
    pub declined: bool,
}

impl Invitation {
    pub fn is_terminal(&self) -> bool {
        self.accepted || self.declined
    }
}
