//! Analytic passes over a member's history.
//!
//! Every function takes submissions already sorted by ascending id and
//! rating changes sorted by contest id, as `Member` keeps them. None of
//! them touch the network.

use std::collections::{HashMap, HashSet};

use codeforces_api::types::{ParticipantType, ProblemId, RatingChange, Submission, Verdict};
use serde::Serialize;

use crate::directory::ContestDirectory;

/// Labels of the verdict histogram, in output order.
pub const VERDICT_LABELS: [&str; 7] = ["OK", "WA", "TLE", "MLE", "RE", "ILE", "CE"];

/// Labels of the first-accept histogram, in output order.
pub const FIRST_ACCEPT_LABELS: [&str; 7] = ["1A", "+1", "+2", "+3", "+4", "+5", "+5 or more"];

/// One labelled count of a fixed-order histogram.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct Bucket {
    pub label: &'static str,
    pub count: usize,
}

/// A contest the member took part in.
#[derive(Serialize, Clone, Debug, PartialEq)]
pub struct ParticipatedContest {
    pub contest_id: i64,
    pub contest_name: String,
    pub participant_type: ParticipantType,
    pub start_time_seconds: i64,
    /// Only set for rated participations.
    pub rating_change: Option<i64>,
    pub new_rating: Option<i64>,
    pub rank: Option<i64>,
}

/// Builds the participation timeline, ordered by start time.
///
/// Rating changes seed the result as rated contestant entries. Submissions
/// made as contestant, virtual or out-of-competition then add one entry per
/// contest not already present; contests the directory does not know are
/// skipped. A rated contest missing from the directory falls back to the
/// rating update time as its start.
pub fn participation_timeline<D>(
    rating_changes: &[RatingChange],
    submissions: &[Submission],
    directory: &D,
) -> Vec<ParticipatedContest>
where
    D: ContestDirectory + ?Sized,
{
    let mut result: Vec<ParticipatedContest> = rating_changes
        .iter()
        .map(|change| {
            let start_time_seconds = directory
                .contest_by_id(change.contest_id)
                .and_then(|c| c.start_time_seconds)
                .unwrap_or(change.rating_update_time_seconds);
            ParticipatedContest {
                contest_id: change.contest_id,
                contest_name: change.contest_name.clone(),
                participant_type: ParticipantType::Contestant,
                start_time_seconds,
                rating_change: Some(change.delta()),
                new_rating: Some(change.new_rating),
                rank: Some(change.rank),
            }
        })
        .collect();

    let mut seen: HashSet<i64> = rating_changes.iter().map(|c| c.contest_id).collect();

    for sub in submissions {
        let participant_type = sub.author.participant_type;
        if !participant_type.is_participation() {
            continue;
        }
        let Some(contest_id) = sub.contest_id else {
            continue;
        };
        if seen.contains(&contest_id) {
            continue;
        }
        let Some(contest) = directory.contest_by_id(contest_id) else {
            continue;
        };
        seen.insert(contest_id);
        result.push(ParticipatedContest {
            contest_id,
            contest_name: contest.name.clone(),
            participant_type,
            start_time_seconds: sub.creation_time_seconds - sub.relative_time_seconds,
            rating_change: None,
            new_rating: None,
            rank: None,
        });
    }

    result.sort_by_key(|c| c.start_time_seconds);
    result
}

/// Keeps the first accepted submission of every distinct problem.
pub fn first_accepted(submissions: &[Submission]) -> Vec<Submission> {
    let mut solved: HashSet<ProblemId> = HashSet::new();
    submissions
        .iter()
        .filter(|sub| sub.is_accepted())
        .filter(|sub| solved.insert(sub.problem.id()))
        .cloned()
        .collect()
}

/// Counts submissions per recognized verdict. Other verdicts, and queued
/// submissions without one, are left out.
pub fn verdict_histogram(submissions: &[Submission]) -> Vec<Bucket> {
    let mut counts = [0usize; VERDICT_LABELS.len()];
    for sub in submissions {
        if let Some(slot) = sub.verdict.as_ref().and_then(verdict_slot) {
            counts[slot] += 1;
        }
    }
    buckets(&VERDICT_LABELS, &counts)
}

fn verdict_slot(verdict: &Verdict) -> Option<usize> {
    let label = verdict.short_label()?;
    VERDICT_LABELS.iter().position(|l| *l == label)
}

/// Buckets solved problems by how many attempts the first accept took.
///
/// Attempts are counted per problem up to and including the first "OK";
/// anything submitted after it is ignored. Unsolved problems are not counted.
pub fn first_accept_histogram(submissions: &[Submission]) -> Vec<Bucket> {
    #[derive(Default)]
    struct Attempts {
        count: usize,
        solved: bool,
    }

    let mut per_problem: HashMap<ProblemId, Attempts> = HashMap::new();
    for sub in submissions {
        let attempts = per_problem.entry(sub.problem.id()).or_default();
        if attempts.solved {
            continue;
        }
        attempts.count += 1;
        attempts.solved = sub.is_accepted();
    }

    let mut counts = [0usize; FIRST_ACCEPT_LABELS.len()];
    for attempts in per_problem.values().filter(|a| a.solved) {
        let slot = attempts.count.min(counts.len()) - 1;
        counts[slot] += 1;
    }
    buckets(&FIRST_ACCEPT_LABELS, &counts)
}

fn buckets(labels: &[&'static str], counts: &[usize]) -> Vec<Bucket> {
    labels
        .iter()
        .zip(counts)
        .map(|(label, count)| Bucket {
            label: *label,
            count: *count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::ContestList;
    use codeforces_api::types::{Contest, ContestPhase, Party, PartyMember, Problem};

    fn sub(id: i64, index: &str, verdict: Option<Verdict>) -> Submission {
        sub_in(id, 1, index, verdict, ParticipantType::Practice)
    }

    fn sub_in(
        id: i64,
        contest_id: i64,
        index: &str,
        verdict: Option<Verdict>,
        participant_type: ParticipantType,
    ) -> Submission {
        Submission {
            id,
            contest_id: Some(contest_id),
            creation_time_seconds: 1_000 + id,
            relative_time_seconds: 100,
            problem: Problem {
                contest_id: Some(contest_id),
                problemset_name: None,
                index: index.to_string(),
                name: format!("Problem {}", index),
                rating: None,
                tags: vec![],
            },
            author: Party {
                contest_id: Some(contest_id),
                members: vec![PartyMember {
                    handle: "alice_cf".to_string(),
                }],
                participant_type,
                ghost: false,
                room: None,
                start_time_seconds: None,
            },
            programming_language: "Rust 2021".to_string(),
            verdict,
            testset: None,
            passed_test_count: 0,
            time_consumed_millis: 0,
            memory_consumed_bytes: 0,
        }
    }

    fn change(contest_id: i64, old_rating: i64, new_rating: i64) -> RatingChange {
        RatingChange {
            contest_id,
            contest_name: format!("Round {}", contest_id),
            handle: "alice_cf".to_string(),
            rank: 100,
            rating_update_time_seconds: 5_000_000 + contest_id,
            old_rating,
            new_rating,
        }
    }

    fn contest(id: i64, start: i64) -> Contest {
        Contest {
            id,
            name: format!("Round {}", id),
            kind: "CF".to_string(),
            phase: ContestPhase::Finished,
            frozen: false,
            duration_seconds: 7200,
            start_time_seconds: Some(start),
            relative_time_seconds: None,
        }
    }

    fn counts(buckets: &[Bucket]) -> Vec<usize> {
        buckets.iter().map(|b| b.count).collect()
    }

    #[test]
    fn first_accepted_keeps_lowest_id() {
        let subs = vec![
            sub(1, "A", Some(Verdict::WrongAnswer)),
            sub(2, "A", Some(Verdict::Ok)),
            sub(3, "B", Some(Verdict::Ok)),
            sub(4, "A", Some(Verdict::Ok)),
        ];
        let ids: Vec<i64> = first_accepted(&subs).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn same_index_different_contest_is_distinct() {
        let subs = vec![
            sub_in(1, 10, "A", Some(Verdict::Ok), ParticipantType::Practice),
            sub_in(2, 11, "A", Some(Verdict::Ok), ParticipantType::Practice),
        ];
        assert_eq!(first_accepted(&subs).len(), 2);
    }

    #[test]
    fn verdict_histogram_fixed_order() {
        let subs = vec![
            sub(1, "A", Some(Verdict::CompilationError)),
            sub(2, "A", Some(Verdict::Ok)),
            sub(3, "B", Some(Verdict::TimeLimitExceeded)),
            sub(4, "B", Some(Verdict::TimeLimitExceeded)),
            sub(5, "C", Some(Verdict::Skipped)),
            sub(6, "C", None),
            sub(7, "C", Some(Verdict::Other)),
        ];
        let hist = verdict_histogram(&subs);
        let labels: Vec<&str> = hist.iter().map(|b| b.label).collect();
        assert_eq!(labels, VERDICT_LABELS.to_vec());
        assert_eq!(counts(&hist), vec![1, 0, 2, 0, 0, 0, 1]);
        assert_eq!(counts(&hist).iter().sum::<usize>(), 4);
    }

    #[test]
    fn verdict_histogram_empty() {
        assert_eq!(counts(&verdict_histogram(&[])), vec![0; 7]);
    }

    #[test]
    fn first_accept_buckets() {
        let mut subs = vec![
            // 1A
            sub(1, "A", Some(Verdict::Ok)),
            // +2, later resubmissions ignored
            sub(2, "B", Some(Verdict::WrongAnswer)),
            sub(3, "B", Some(Verdict::RuntimeError)),
            sub(4, "B", Some(Verdict::Ok)),
            sub(5, "B", Some(Verdict::WrongAnswer)),
            sub(6, "B", Some(Verdict::Ok)),
            // never solved
            sub(7, "C", Some(Verdict::WrongAnswer)),
        ];
        // +5 (six attempts) for D, and seven attempts for E
        let mut id = 100;
        for (index, tries) in [("D", 6), ("E", 7)] {
            for n in 1..=tries {
                let verdict = if n == tries {
                    Verdict::Ok
                } else {
                    Verdict::WrongAnswer
                };
                subs.push(sub(id, index, Some(verdict)));
                id += 1;
            }
        }
        let hist = first_accept_histogram(&subs);
        let labels: Vec<&str> = hist.iter().map(|b| b.label).collect();
        assert_eq!(labels, FIRST_ACCEPT_LABELS.to_vec());
        assert_eq!(counts(&hist), vec![1, 0, 1, 0, 0, 1, 1]);
    }

    #[test]
    fn queued_submission_counts_as_attempt() {
        let subs = vec![sub(1, "A", None), sub(2, "A", Some(Verdict::Ok))];
        assert_eq!(counts(&first_accept_histogram(&subs)), vec![0, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn timeline_rated_entries_carry_delta() {
        let directory: ContestList = vec![contest(10, 900), contest(20, 500)].into_iter().collect();
        let changes = vec![change(10, 1500, 1580), change(20, 1400, 1500)];
        let timeline = participation_timeline(&changes, &[], &directory);
        let ids: Vec<i64> = timeline.iter().map(|c| c.contest_id).collect();
        assert_eq!(ids, vec![20, 10]);
        assert_eq!(timeline[0].rating_change, Some(100));
        assert_eq!(timeline[1].rating_change, Some(80));
        assert_eq!(timeline[1].new_rating, Some(1580));
        assert_eq!(timeline[1].participant_type, ParticipantType::Contestant);
    }

    #[test]
    fn timeline_rated_contest_outside_directory_uses_update_time() {
        let directory = ContestList::default();
        let timeline = participation_timeline(&[change(10, 1500, 1580)], &[], &directory);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].start_time_seconds, 5_000_010);
    }

    #[test]
    fn timeline_submissions_fill_unrated_contests() {
        let directory: ContestList = vec![contest(10, 2000), contest(30, 100), contest(40, 50)]
            .into_iter()
            .collect();
        let changes = vec![change(10, 1500, 1580)];
        let subs = vec![
            // rated contest, already covered
            sub_in(1, 10, "A", Some(Verdict::Ok), ParticipantType::Contestant),
            // virtual participation, twice
            sub_in(2, 30, "A", Some(Verdict::Ok), ParticipantType::Virtual),
            sub_in(3, 30, "B", Some(Verdict::WrongAnswer), ParticipantType::Virtual),
            // practice never counts
            sub_in(4, 40, "A", Some(Verdict::Ok), ParticipantType::Practice),
            // unknown contest is skipped
            sub_in(5, 99, "A", Some(Verdict::Ok), ParticipantType::OutOfCompetition),
        ];
        let timeline = participation_timeline(&changes, &subs, &directory);
        assert_eq!(timeline.len(), 2);

        let virtual_entry = &timeline[0];
        assert_eq!(virtual_entry.contest_id, 30);
        assert_eq!(virtual_entry.participant_type, ParticipantType::Virtual);
        // creation 1002 - relative 100
        assert_eq!(virtual_entry.start_time_seconds, 902);
        assert_eq!(virtual_entry.rating_change, None);

        assert_eq!(timeline[1].contest_id, 10);
    }
}
