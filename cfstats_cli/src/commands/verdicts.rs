use anyhow::Result;
use cfstats_lib::CachedClient;
use clap::Args;

use super::{load_member, MemberArgs};
use crate::output::{build_bucket_rows, print_json, print_rows, OutputFormat};

/// Arguments for the `verdicts` subcommand: submission counts per verdict.
#[derive(Args)]
pub struct VerdictsArgs {
    #[command(flatten)]
    pub member: MemberArgs,
}

pub async fn run(args: &VerdictsArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let member = load_member(&args.member, client).await?;
    let buckets = member.analyze_verdict();

    match format {
        OutputFormat::Json => print_json(&buckets),
        _ => print_rows(build_bucket_rows(buckets), format)?,
    }

    Ok(())
}
