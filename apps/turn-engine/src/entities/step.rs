use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, NoneAsEmptyString, PickFirst};

use super::catalog::Character;
use super::step_result::StepResult;
use super::timestamp::EpochMillis;

/// One phase of a game.
///
/// Scheduling fills `step_index`, `start_time` and `end_time`. `result` holds
/// the votes cast while this step is current and is emptied on archival.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub bin: String,
    #[serde(default)]
    pub step_type: String,
    /// Seconds; written as a decimal string, numbers are accepted on read.
    #[serde_as(as = "PickFirst<(DisplayFromStr, _)>")]
    #[serde(rename = "duration")]
    pub duration_secs: u64,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub step_index: usize,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub characters: BTreeMap<String, Character>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub sub_steps: BTreeMap<String, Step>,
    #[serde(default)]
    pub requires_vote: bool,
    #[serde(default)]
    pub vote_type: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed: Vec<String>,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub next_step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<EpochMillis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<EpochMillis>,
    /// Transient votes keyed by gamer bin, in cast order.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub result: BTreeMap<String, Vec<StepResult>>,
}

impl Step {
    pub fn new(bin: impl Into<String>, step_type: impl Into<String>, duration_secs: u64) -> Self {
        Self {
            bin: bin.into(),
            step_type: step_type.into(),
            duration_secs,
            command: String::new(),
            step_index: 0,
            characters: BTreeMap::new(),
            sub_steps: BTreeMap::new(),
            requires_vote: false,
            vote_type: String::new(),
            allowed: Vec::new(),
            next_step: None,
            start_time: None,
            end_time: None,
            result: BTreeMap::new(),
        }
    }

    pub fn with_next(mut self, next_step: impl Into<String>) -> Self {
        self.next_step = Some(next_step.into());
        self
    }

    pub fn requiring_vote(mut self, vote_type: impl Into<String>) -> Self {
        self.requires_vote = true;
        self.vote_type = vote_type.into();
        self
    }
}
