use serde::{Deserialize, Serialize};

use super::timestamp::EpochMillis;

/// A vote or action cast by a gamer during a step. Immutable once recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    /// Gamer casting the vote.
    pub source: String,
    pub game_bin: String,
    pub step_bin: String,
    /// Payload, typically the bin of the gamer being voted for.
    #[serde(default)]
    pub choice: String,
}

/// One recorded vote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub bin: String,
    pub step_bin: String,
    pub game_bin: String,
    pub gamer_id: String,
    pub timestamp: EpochMillis,
    pub vote: Vote,
}
