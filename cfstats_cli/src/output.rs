use anyhow::Result;
use cfstats_lib::types::{RanklistRow, Submission};
use cfstats_lib::{Bucket, HandleRating, ParticipatedContest};
use chrono::DateTime;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Self {
        match value {
            "json" => OutputFormat::Json,
            "csv" => OutputFormat::Csv,
            "markdown" | "md" => OutputFormat::Markdown,
            _ => OutputFormat::Table,
        }
    }
}

#[derive(Tabled, Serialize)]
pub struct HandleRow {
    #[tabled(rename = "Handle")]
    #[serde(rename = "Handle")]
    handle: String,
    #[tabled(rename = "Rating")]
    #[serde(rename = "Rating")]
    rating: i64,
    #[tabled(rename = "Rank")]
    #[serde(rename = "Rank")]
    rank: String,
    #[tabled(rename = "Max Rating")]
    #[serde(rename = "Max Rating")]
    max_rating: i64,
    #[tabled(rename = "Max Rank")]
    #[serde(rename = "Max Rank")]
    max_rank: String,
}

#[derive(Tabled, Serialize)]
pub struct ContestRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
    #[tabled(rename = "Contest")]
    #[serde(rename = "Contest")]
    contest: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    participant_type: String,
    #[tabled(rename = "Rank")]
    #[serde(rename = "Rank")]
    rank: String,
    #[tabled(rename = "Delta")]
    #[serde(rename = "Delta")]
    delta: String,
    #[tabled(rename = "New Rating")]
    #[serde(rename = "New Rating")]
    new_rating: String,
}

#[derive(Tabled, Serialize)]
pub struct SolvedRow {
    #[tabled(rename = "Problem")]
    #[serde(rename = "Problem")]
    problem: String,
    #[tabled(rename = "Name")]
    #[serde(rename = "Name")]
    name: String,
    #[tabled(rename = "Rating")]
    #[serde(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    date: String,
}

#[derive(Tabled, Serialize)]
pub struct BucketRow {
    #[tabled(rename = "Label")]
    #[serde(rename = "Label")]
    label: String,
    #[tabled(rename = "Count")]
    #[serde(rename = "Count")]
    count: usize,
    #[tabled(rename = "Share")]
    #[serde(rename = "Share")]
    share: String,
}

#[derive(Tabled, Serialize)]
pub struct StandingsRow {
    #[tabled(rename = "Rank")]
    #[serde(rename = "Rank")]
    rank: i64,
    #[tabled(rename = "Party")]
    #[serde(rename = "Party")]
    party: String,
    #[tabled(rename = "Type")]
    #[serde(rename = "Type")]
    participant_type: String,
    #[tabled(rename = "Points")]
    #[serde(rename = "Points")]
    points: String,
    #[tabled(rename = "Penalty")]
    #[serde(rename = "Penalty")]
    penalty: i64,
    #[tabled(rename = "Hacks")]
    #[serde(rename = "Hacks")]
    hacks: String,
}

// -- Row builders --

pub fn build_handle_rows(handles: &[HandleRating]) -> Vec<HandleRow> {
    handles
        .iter()
        .map(|h| HandleRow {
            handle: h.handle.clone(),
            rating: h.rating,
            rank: h.rank.clone(),
            max_rating: h.max_rating,
            max_rank: h.max_rank.clone(),
        })
        .collect()
}

pub fn build_contest_rows(contests: &[ParticipatedContest]) -> Vec<ContestRow> {
    contests
        .iter()
        .map(|c| ContestRow {
            date: format_date(c.start_time_seconds),
            contest: c.contest_name.clone(),
            participant_type: c.participant_type.to_string(),
            rank: format_optional(c.rank),
            delta: c.rating_change.map(format_delta).unwrap_or_else(|| "-".to_string()),
            new_rating: format_optional(c.new_rating),
        })
        .collect()
}

pub fn build_solved_rows(accepted: &[Submission]) -> Vec<SolvedRow> {
    accepted
        .iter()
        .map(|s| SolvedRow {
            problem: s.problem.id().to_string(),
            name: s.problem.name.clone(),
            rating: format_optional(s.problem.rating),
            date: format_date(s.creation_time_seconds),
        })
        .collect()
}

pub fn build_bucket_rows(buckets: &[Bucket]) -> Vec<BucketRow> {
    let total: usize = buckets.iter().map(|b| b.count).sum();
    buckets
        .iter()
        .map(|b| BucketRow {
            label: b.label.to_string(),
            count: b.count,
            share: format_share(b.count, total),
        })
        .collect()
}

pub fn build_standings_rows(rows: &[RanklistRow]) -> Vec<StandingsRow> {
    rows.iter()
        .map(|r| StandingsRow {
            rank: r.rank,
            party: r
                .party
                .members
                .iter()
                .map(|m| m.handle.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            participant_type: r.party.participant_type.to_string(),
            points: format!("{}", r.points),
            penalty: r.penalty,
            hacks: format!(
                "+{}:-{}",
                r.successful_hack_count, r.unsuccessful_hack_count
            ),
        })
        .collect()
}

// -- Printing --

/// Prints rows as a table, markdown table or CSV. JSON is handled by the
/// caller with [`print_json`], since it serializes the richer library types.
pub fn print_rows<T: Tabled + Serialize>(rows: Vec<T>, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table | OutputFormat::Json => println!("{}", Table::new(rows)),
        OutputFormat::Markdown => {
            let mut table = Table::new(rows);
            table.with(Style::markdown());
            println!("{}", table);
        }
        OutputFormat::Csv => {
            let mut wtr = csv::Writer::from_writer(std::io::stdout());
            for row in rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
    }
    Ok(())
}

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

fn format_date(seconds: i64) -> String {
    DateTime::from_timestamp(seconds, 0)
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "-".to_string())
}

fn format_delta(delta: i64) -> String {
    if delta > 0 {
        format!("+{}", delta)
    } else {
        delta.to_string()
    }
}

fn format_optional(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

fn format_share(count: usize, total: usize) -> String {
    if total == 0 {
        return "-".to_string();
    }
    format!("{:.1}%", count as f64 * 100.0 / total as f64)
}
