//! Contest metadata (`contest.list`) and standings (`contest.standings`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Party, Problem};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contest {
    pub id: i64,

    pub name: String,

    /// Scoring system, e.g. "CF", "ICPC", "IOI".
    #[serde(rename = "type")]
    pub kind: String,

    pub phase: ContestPhase,

    #[serde(default)]
    pub frozen: bool,

    pub duration_seconds: i64,

    /// Missing for contests without a fixed start.
    #[serde(default)]
    pub start_time_seconds: Option<i64>,

    #[serde(default)]
    pub relative_time_seconds: Option<i64>,
}

impl Contest {
    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time_seconds
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
    }
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContestPhase {
    Before,
    Coding,
    PendingSystemTest,
    SystemTest,
    Finished,
    #[serde(other)]
    Other,
}

/// Partial standings for a set of handles in one contest.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Standings {
    pub contest: Contest,

    pub problems: Vec<Problem>,

    pub rows: Vec<RanklistRow>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RanklistRow {
    pub party: Party,

    /// Zero for unofficial participants.
    pub rank: i64,

    pub points: f64,

    pub penalty: i64,

    #[serde(default)]
    pub successful_hack_count: i64,

    #[serde(default)]
    pub unsuccessful_hack_count: i64,

    #[serde(default)]
    pub problem_results: Vec<ProblemResult>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProblemResult {
    pub points: f64,

    #[serde(default)]
    pub penalty: Option<i64>,

    pub rejected_attempt_count: i64,

    #[serde(default)]
    pub best_submission_time_seconds: Option<i64>,
}
