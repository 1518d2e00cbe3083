use anyhow::Result;
use cfstats_lib::CachedClient;
use clap::Args;

use super::{load_member, MemberArgs};
use crate::output::{build_bucket_rows, print_json, print_rows, OutputFormat};

/// Arguments for the `attempts` subcommand: how many rejected tries came
/// before each problem's first accept.
#[derive(Args)]
pub struct AttemptsArgs {
    #[command(flatten)]
    pub member: MemberArgs,
}

pub async fn run(args: &AttemptsArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let member = load_member(&args.member, client).await?;
    let buckets = member.analyze_1a();

    match format {
        OutputFormat::Json => print_json(&buckets),
        _ => print_rows(build_bucket_rows(buckets), format)?,
    }

    Ok(())
}
