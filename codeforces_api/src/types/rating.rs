use serde::{Deserialize, Serialize};

/// One rated-contest result for a handle, as returned by `user.rating`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingChange {
    pub contest_id: i64,

    pub contest_name: String,

    pub handle: String,

    /// Place in the final standings.
    pub rank: i64,

    pub rating_update_time_seconds: i64,

    pub old_rating: i64,

    pub new_rating: i64,
}

impl RatingChange {
    /// Rating gained (or lost) in this contest.
    pub fn delta(&self) -> i64 {
        self.new_rating - self.old_rating
    }
}
