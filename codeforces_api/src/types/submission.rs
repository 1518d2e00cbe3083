//! Submission-related types returned by `user.status`.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One judged attempt.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    /// Globally unique, monotonically increasing submission id.
    pub id: i64,

    #[serde(default)]
    pub contest_id: Option<i64>,

    pub creation_time_seconds: i64,

    /// Seconds since the author's contest start. Practice submissions carry
    /// `i32::MAX` here.
    pub relative_time_seconds: i64,

    pub problem: Problem,

    pub author: Party,

    #[serde(default)]
    pub programming_language: String,

    /// Absent while the submission is still queued.
    #[serde(default)]
    pub verdict: Option<Verdict>,

    #[serde(default)]
    pub testset: Option<String>,

    #[serde(default)]
    pub passed_test_count: i64,

    #[serde(default)]
    pub time_consumed_millis: i64,

    #[serde(default)]
    pub memory_consumed_bytes: i64,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Some(Verdict::Ok)
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.creation_time_seconds, 0)
    }
}

/// A problem reference. Either `contest_id` or `problemset_name` is set.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Problem {
    #[serde(default)]
    pub contest_id: Option<i64>,

    #[serde(default)]
    pub problemset_name: Option<String>,

    /// In-contest index, e.g. "A" or "B1".
    pub index: String,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub rating: Option<i64>,

    #[serde(default)]
    pub tags: Vec<String>,
}

impl Problem {
    /// Identity used to tell two submissions to the same problem apart
    /// from submissions to different ones.
    pub fn id(&self) -> ProblemId {
        match self.contest_id {
            Some(contest_id) => ProblemId::Contest {
                contest_id,
                index: self.index.clone(),
            },
            None => ProblemId::Problemset {
                name: self.problemset_name.clone().unwrap_or_default(),
                index: self.index.clone(),
            },
        }
    }
}

/// Composite problem key.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub enum ProblemId {
    Contest { contest_id: i64, index: String },
    Problemset { name: String, index: String },
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Contest { contest_id, index } => write!(f, "{}{}", contest_id, index),
            Self::Problemset { name, index } => write!(f, "{}/{}", name, index),
        }
    }
}

/// The team or single user credited with a submission.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(default)]
    pub contest_id: Option<i64>,

    pub members: Vec<PartyMember>,

    pub participant_type: ParticipantType,

    #[serde(default)]
    pub ghost: bool,

    #[serde(default)]
    pub room: Option<i64>,

    #[serde(default)]
    pub start_time_seconds: Option<i64>,
}

impl Party {
    /// Whether `handle` is one of the credited members.
    pub fn includes(&self, handle: &str) -> bool {
        self.members.iter().any(|m| m.handle == handle)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PartyMember {
    pub handle: String,
}

/// How a submission relates to its contest.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParticipantType {
    Contestant,
    Practice,
    Virtual,
    Manager,
    OutOfCompetition,
    #[serde(other)]
    Other,
}

impl ParticipantType {
    /// Timed participation: everything that counts as having taken part in a contest.
    pub fn is_participation(&self) -> bool {
        matches!(
            self,
            Self::Contestant | Self::Virtual | Self::OutOfCompetition
        )
    }
}

impl fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Contestant => "contestant",
            Self::Practice => "practice",
            Self::Virtual => "virtual",
            Self::Manager => "manager",
            Self::OutOfCompetition => "out of competition",
            Self::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Judged outcome of a submission.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Verdict {
    Failed,
    Ok,
    Partial,
    CompilationError,
    RuntimeError,
    WrongAnswer,
    PresentationError,
    TimeLimitExceeded,
    MemoryLimitExceeded,
    IdlenessLimitExceeded,
    SecurityViolated,
    Crashed,
    InputPreparationCrashed,
    Challenged,
    Skipped,
    Testing,
    Rejected,
    #[serde(other)]
    Other,
}

impl Verdict {
    /// Short label for the verdicts shown in histograms, `None` for the rest.
    pub fn short_label(&self) -> Option<&'static str> {
        match self {
            Self::Ok => Some("OK"),
            Self::WrongAnswer => Some("WA"),
            Self::TimeLimitExceeded => Some("TLE"),
            Self::MemoryLimitExceeded => Some("MLE"),
            Self::RuntimeError => Some("RE"),
            Self::IdlenessLimitExceeded => Some("ILE"),
            Self::CompilationError => Some("CE"),
            _ => None,
        }
    }
}
