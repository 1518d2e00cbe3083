use anyhow::Result;
use cfstats_lib::CachedClient;
use clap::Args;

use super::{load_member, MemberArgs};
use crate::output::{build_solved_rows, print_json, print_rows, OutputFormat};

#[derive(Args)]
pub struct SolvedArgs {
    #[command(flatten)]
    pub member: MemberArgs,

    /// Only show problems rated at least this high
    #[arg(long)]
    pub min_rating: Option<i64>,
}

pub async fn run(args: &SolvedArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let member = load_member(&args.member, client).await?;

    let solved: Vec<_> = member
        .ac_problems()
        .iter()
        .filter(|s| match args.min_rating {
            Some(min) => s.problem.rating.is_some_and(|r| r >= min),
            None => true,
        })
        .cloned()
        .collect();

    eprintln!("{} problems solved by {}", solved.len(), member.name());

    match format {
        OutputFormat::Json => print_json(&solved),
        _ => print_rows(build_solved_rows(&solved), format)?,
    }

    Ok(())
}
