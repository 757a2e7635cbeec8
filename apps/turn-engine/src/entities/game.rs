use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};

use super::catalog::{Ability, Character};
use super::gamer::Gamer;
use super::player::PlayerSummary;
use super::step::Step;
use super::step_result::StepResult;
use super::timestamp::EpochMillis;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    #[default]
    Waiting,
    Started,
    Ended,
}

/// A game session, stored at `games/{bin}`.
///
/// The game exclusively owns its steps (with their transient results), its
/// gamer roster and the archived `step_results` history.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub bin: String,
    #[serde(default)]
    pub is_daytime: bool,
    #[serde(default)]
    pub day_counter: u32,
    #[serde(default)]
    pub first_day_completed: bool,
    #[serde(default)]
    pub explanation_seen: bool,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub current_step: Option<String>,
    #[serde(default)]
    pub group_id: String,
    #[serde(default)]
    pub status: GameStatus,
    #[serde(default)]
    pub server_name: String,
    #[serde(default, rename = "server_ip")]
    pub server_address: String,
    #[serde(default)]
    pub server_port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<EpochMillis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<EpochMillis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<PlayerSummary>,
    /// Bins of invited players who have not declined.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub invited: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub gamers: BTreeMap<String, Gamer>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub steps: BTreeMap<String, Step>,
    /// Archived votes keyed by gamer bin; append-only.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub step_results: BTreeMap<String, Vec<StepResult>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub characters: BTreeMap<String, Character>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub abilities: Vec<Ability>,
}

impl Game {
    pub fn new(bin: impl Into<String>) -> Self {
        Self {
            bin: bin.into(),
            is_daytime: false,
            day_counter: 0,
            first_day_completed: false,
            explanation_seen: false,
            current_step: None,
            group_id: String::new(),
            status: GameStatus::Waiting,
            server_name: String::new(),
            server_address: String::new(),
            server_port: 0,
            start_time: None,
            end_time: None,
            creator: None,
            invited: Vec::new(),
            gamers: BTreeMap::new(),
            steps: BTreeMap::new(),
            step_results: BTreeMap::new(),
            characters: BTreeMap::new(),
            abilities: Vec::new(),
        }
    }

    /// Total number of archived results across all gamers.
    pub fn archived_count(&self) -> usize {
        self.step_results.values().map(Vec::len).sum()
    }
}
