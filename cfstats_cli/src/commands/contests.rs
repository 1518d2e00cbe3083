use anyhow::Result;
use cfstats_lib::CachedClient;
use clap::Args;

use super::{load_member, MemberArgs};
use crate::output::{build_contest_rows, print_json, print_rows, OutputFormat};

#[derive(Args)]
pub struct ContestsArgs {
    #[command(flatten)]
    pub member: MemberArgs,

    /// Only show rated contests
    #[arg(long)]
    pub rated: bool,
}

pub async fn run(args: &ContestsArgs, client: &CachedClient, format: &OutputFormat) -> Result<()> {
    let member = load_member(&args.member, client).await?;
    let directory = client.get_contest_directory().await?;

    let contests: Vec<_> = member
        .contests(&directory)
        .iter()
        .filter(|c| !args.rated || c.rating_change.is_some())
        .cloned()
        .collect();

    eprintln!("{} contests for {}", contests.len(), member.name());

    match format {
        OutputFormat::Json => print_json(&contests),
        _ => print_rows(build_contest_rows(&contests), format)?,
    }

    Ok(())
}
