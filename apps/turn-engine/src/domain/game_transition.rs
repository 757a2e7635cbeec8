/// Edges reported by services so a delivery layer can notify clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    GameStarted,
    GameEnded,
    StepAdvanced { from: Option<String>, to: String },
    VoteRecorded { step_bin: String, gamer_id: String },
    ResultsArchived { moved: usize },
    GamerJoined { player_bin: String },
    GamerLeft { player_bin: String },
    MemberJoined { group_bin: String, player_bin: String },
    MemberLeft { group_bin: String, player_bin: String },
    InvitationAccepted { invitation_bin: String },
    InvitationDeclined { invitation_bin: String },
}
