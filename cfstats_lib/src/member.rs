//! The member aggregate: one person's history merged across handles.
//!
//! A `Member` starts from a single handle's fetched data. Other handles of
//! the same person are folded in with [`Member::merge`] and dropped again
//! with [`Member::remove`]. The four derived views are computed lazily and
//! cached until the next mutation.
//!
//! Ordering invariants, re-established after every mutation:
//! - submissions ascending by id,
//! - rating changes ascending by contest id,
//! - handles descending by current rating.

use std::cell::OnceCell;

use codeforces_api::types::{RatingChange, Submission, User};
use serde::Serialize;

use crate::directory::ContestDirectory;
use crate::stats::{self, Bucket, ParticipatedContest};

/// Everything fetched for one handle, plus the display name it belongs to.
#[derive(Clone, Debug)]
pub struct UserData {
    /// Display name; the identity key shared by all handles of one person.
    pub name: String,
    pub handle: String,
    pub email: Option<String>,
    pub rank: String,
    pub rating: i64,
    pub max_rank: String,
    pub max_rating: i64,
    pub submissions: Vec<Submission>,
    pub rating_changes: Vec<RatingChange>,
}

impl UserData {
    pub fn new(
        name: &str,
        user: User,
        submissions: Vec<Submission>,
        rating_changes: Vec<RatingChange>,
    ) -> Self {
        Self {
            name: name.to_string(),
            handle: user.handle,
            email: user.email,
            rank: user.rank,
            rating: user.rating,
            max_rank: user.max_rank,
            max_rating: user.max_rating,
            submissions,
            rating_changes,
        }
    }
}

/// Standing of one constituent handle.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct HandleRating {
    pub handle: String,
    pub rating: i64,
    pub rank: String,
    pub max_rating: i64,
    pub max_rank: String,
}

/// Derived views, each filled on first read. Replaced wholesale on mutation.
#[derive(Default, Clone, Debug)]
struct StatsCache {
    contests: OnceCell<Vec<ParticipatedContest>>,
    ac_problems: OnceCell<Vec<Submission>>,
    verdicts: OnceCell<Vec<Bucket>>,
    first_accept: OnceCell<Vec<Bucket>>,
}

/// One logical person across one or more handles.
///
/// Single-owner: mutation needs `&mut self`, and the cache uses
/// `OnceCell`, so a `Member` cannot be shared across threads.
#[derive(Clone, Debug)]
pub struct Member {
    name: String,
    handle: String,
    email: Option<String>,
    rank: String,
    rating: i64,
    max_rank: String,
    max_rating: i64,
    handles: Vec<HandleRating>,
    submissions: Vec<Submission>,
    rating_changes: Vec<RatingChange>,
    cache: StatsCache,
}

impl From<UserData> for Member {
    fn from(data: UserData) -> Self {
        Self::new(data)
    }
}

impl Member {
    /// Builds a member from a single handle's data. Submissions are sorted
    /// by id; rating changes are kept in the order given, which the API
    /// already returns by contest.
    pub fn new(data: UserData) -> Self {
        let mut submissions = data.submissions;
        submissions.sort_by_key(|s| s.id);
        let handles = vec![HandleRating {
            handle: data.handle.clone(),
            rating: data.rating,
            rank: data.rank.clone(),
            max_rating: data.max_rating,
            max_rank: data.max_rank.clone(),
        }];
        Self {
            name: data.name,
            handle: data.handle,
            email: data.email,
            rank: data.rank,
            rating: data.rating,
            max_rank: data.max_rank,
            max_rating: data.max_rating,
            handles,
            submissions,
            rating_changes: data.rating_changes,
            cache: StatsCache::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle with the highest current rating.
    pub fn handle(&self) -> &str {
        &self.handle
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn rank(&self) -> &str {
        &self.rank
    }

    pub fn rating(&self) -> i64 {
        self.rating
    }

    pub fn max_rank(&self) -> &str {
        &self.max_rank
    }

    pub fn max_rating(&self) -> i64 {
        self.max_rating
    }

    pub fn handles(&self) -> &[HandleRating] {
        &self.handles
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn rating_changes(&self) -> &[RatingChange] {
        &self.rating_changes
    }

    pub fn has_handle(&self, handle: &str) -> bool {
        self.handles.iter().any(|h| h.handle == handle)
    }

    fn invalidate(&mut self) {
        self.cache = StatsCache::default();
    }

    /// Absorbs `other`'s handles and history.
    ///
    /// Returns `false` and leaves the history untouched when the display
    /// names differ, or when `other` brings a handle this member already
    /// holds. The derived views are invalidated either way.
    pub fn merge(&mut self, other: &Member) -> bool {
        self.invalidate();

        if self.name != other.name {
            tracing::debug!(
                "Refusing to merge '{}' into '{}': display names differ",
                other.name,
                self.name
            );
            return false;
        }
        if let Some(dup) = other.handles.iter().find(|h| self.has_handle(&h.handle)) {
            tracing::warn!(
                "Refusing to merge into '{}': handle {} is already present",
                self.name,
                dup.handle
            );
            return false;
        }

        if other.rating > self.rating {
            self.rating = other.rating;
            self.rank = other.rank.clone();
            self.handle = other.handle.clone();
        }
        if other.max_rating > self.max_rating {
            self.max_rating = other.max_rating;
            self.max_rank = other.max_rank.clone();
        }

        self.submissions.extend(other.submissions.iter().cloned());
        self.rating_changes.extend(other.rating_changes.iter().cloned());
        self.submissions.sort_by_key(|s| s.id);
        self.rating_changes.sort_by_key(|c| c.contest_id);

        self.handles.extend(other.handles.iter().cloned());
        self.handles.sort_by(|a, b| b.rating.cmp(&a.rating));

        tracing::debug!(
            "Merged {} handle(s) into '{}': {} submissions, {} rating changes",
            other.handles.len(),
            self.name,
            self.submissions.len(),
            self.rating_changes.len()
        );
        true
    }

    /// Drops `handle` and everything credited to it.
    ///
    /// Unknown handles only clear the cache. The current and max rating
    /// fields are not re-derived from the remaining handles, so removing
    /// the top handle leaves them describing it.
    pub fn remove(&mut self, handle: &str) {
        self.invalidate();

        if let Some(pos) = self.handles.iter().position(|h| h.handle == handle) {
            self.handles.remove(pos);
        }
        self.submissions.retain(|s| !s.author.includes(handle));
        self.rating_changes.retain(|c| c.handle != handle);

        tracing::debug!(
            "Removed {} from '{}': {} handles left",
            handle,
            self.name,
            self.handles.len()
        );
    }

    /// Contests taken part in, ordered by start time.
    ///
    /// The directory is only consulted while no timeline is cached;
    /// a later call with a different directory returns the cached result.
    pub fn contests<D>(&self, directory: &D) -> &[ParticipatedContest]
    where
        D: ContestDirectory + ?Sized,
    {
        self.cache.contests.get_or_init(|| {
            tracing::trace!("Computing contest timeline for '{}'", self.name);
            stats::participation_timeline(&self.rating_changes, &self.submissions, directory)
        })
    }

    /// First accepted submission of every solved problem, by id.
    pub fn ac_problems(&self) -> &[Submission] {
        self.cache
            .ac_problems
            .get_or_init(|| stats::first_accepted(&self.submissions))
    }

    /// Submission counts for OK, WA, TLE, MLE, RE, ILE and CE, in that order.
    pub fn analyze_verdict(&self) -> &[Bucket] {
        self.cache
            .verdicts
            .get_or_init(|| stats::verdict_histogram(&self.submissions))
    }

    /// Solved problems bucketed by attempts needed: 1A, +1 .. +5, and more.
    pub fn analyze_1a(&self) -> &[Bucket] {
        self.cache
            .first_accept
            .get_or_init(|| stats::first_accept_histogram(&self.submissions))
    }
}
