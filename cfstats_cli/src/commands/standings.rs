//! The `standings` subcommand: where a group of handles placed in one contest.

use anyhow::{bail, Result};
use cfstats_lib::{validation, CachedClient};
use clap::Args;

use crate::output::{build_standings_rows, print_json, print_rows, OutputFormat};

#[derive(Args)]
pub struct StandingsArgs {
    /// Contest id (e.g. 1520)
    #[arg(long)]
    pub contest: i64,

    /// Handle to look up; repeat for several
    #[arg(long = "handle", required = true)]
    pub handles: Vec<String>,

    /// Include virtual and out-of-competition participants
    #[arg(long)]
    pub unofficial: bool,
}

pub async fn run(args: &StandingsArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    if args.contest <= 0 {
        bail!("Invalid --contest value: {}", args.contest);
    }
    let handles = validation::validate_handles(&args.handles)?;

    let standings = client
        .get_contest_standings(args.contest, &handles, args.unofficial)
        .await?;

    eprintln!(
        "{}: {} of {} handles ranked",
        standings.contest.name,
        standings.rows.len(),
        handles.len()
    );

    match format {
        OutputFormat::Json => print_json(&standings.rows),
        _ => print_rows(build_standings_rows(&standings.rows), format)?,
    }

    Ok(())
}
