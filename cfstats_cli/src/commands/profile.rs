//! The `profile` subcommand: merged handles and headline numbers.

use anyhow::Result;
use cfstats_lib::{CachedClient, HandleRating};
use clap::Args;
use serde::Serialize;

use super::{load_member, MemberArgs};
use crate::output::{build_handle_rows, print_json, print_rows, OutputFormat};

#[derive(Args)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub member: MemberArgs,
}

#[derive(Serialize)]
struct ProfileSummary<'a> {
    name: &'a str,
    best_handle: &'a str,
    rating: i64,
    rank: &'a str,
    max_rating: i64,
    max_rank: &'a str,
    handles: &'a [HandleRating],
    submissions: usize,
    solved: usize,
    contests: usize,
}

pub async fn run(args: &ProfileArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let member = load_member(&args.member, client).await?;
    let directory = client.get_contest_directory().await?;

    let summary = ProfileSummary {
        name: member.name(),
        best_handle: member.handle(),
        rating: member.rating(),
        rank: member.rank(),
        max_rating: member.max_rating(),
        max_rank: member.max_rank(),
        handles: member.handles(),
        submissions: member.submissions().len(),
        solved: member.ac_problems().len(),
        contests: member.contests(&directory).len(),
    };

    match format {
        OutputFormat::Json => print_json(&summary),
        _ => {
            eprintln!(
                "{}: best {} ({}, max {}), {} submissions, {} solved, {} contests",
                summary.name,
                summary.best_handle,
                summary.rating,
                summary.max_rating,
                summary.submissions,
                summary.solved,
                summary.contests
            );
            print_rows(build_handle_rows(member.handles()), format)?;
        }
    }

    Ok(())
}
