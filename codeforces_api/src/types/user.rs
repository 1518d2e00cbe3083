//! Profile returned by `user.info`.

use serde::{Deserialize, Serialize};

/// A platform account. Unrated accounts omit the rating fields entirely,
/// so they default to zero / empty here.
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub handle: String,

    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub first_name: Option<String>,

    #[serde(default)]
    pub last_name: Option<String>,

    #[serde(default)]
    pub country: Option<String>,

    #[serde(default)]
    pub organization: Option<String>,

    #[serde(default)]
    pub contribution: i64,

    /// Current rank label, e.g. "expert".
    #[serde(default)]
    pub rank: String,

    #[serde(default)]
    pub rating: i64,

    #[serde(default)]
    pub max_rank: String,

    #[serde(default)]
    pub max_rating: i64,

    #[serde(default)]
    pub registration_time_seconds: i64,
}
