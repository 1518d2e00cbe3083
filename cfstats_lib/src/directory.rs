//! Read-only contest lookup used to place participations on the timeline.

use std::collections::HashMap;

use codeforces_api::types::Contest;

/// Maps a contest id to its metadata.
pub trait ContestDirectory {
    fn contest_by_id(&self, id: i64) -> Option<&Contest>;
}

/// Directory built once per session from `contest.list` (regular and gym).
#[derive(Default, Debug, Clone)]
pub struct ContestList {
    by_id: HashMap<i64, Contest>,
}

impl ContestList {
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl FromIterator<Contest> for ContestList {
    /// The first contest seen for an id wins.
    fn from_iter<I: IntoIterator<Item = Contest>>(iter: I) -> Self {
        let mut by_id = HashMap::new();
        for contest in iter {
            by_id.entry(contest.id).or_insert(contest);
        }
        Self { by_id }
    }
}

impl ContestDirectory for ContestList {
    fn contest_by_id(&self, id: i64) -> Option<&Contest> {
        self.by_id.get(&id)
    }
}
