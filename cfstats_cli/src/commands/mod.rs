//! CLI subcommand implementations.

pub mod attempts;
pub mod contests;
pub mod profile;
pub mod solved;
pub mod standings;
pub mod verdicts;

use anyhow::{anyhow, bail, Result};
use cfstats_lib::{validation, CachedClient, Member};
use clap::Args;

/// Handle selection shared by every member-level subcommand.
#[derive(Args)]
pub struct MemberArgs {
    /// Codeforces handle; repeat to merge several accounts of one person
    #[arg(long = "handle", required = true)]
    pub handles: Vec<String>,

    /// Display name for the merged member (defaults to the first handle)
    #[arg(long)]
    pub name: Option<String>,

    /// Drop a handle's submissions and rating history after merging
    #[arg(long)]
    pub without: Vec<String>,
}

/// Fetches every handle into its own member, merges them into the first and
/// then applies `--without`.
pub async fn load_member(args: &MemberArgs, client: &CachedClient) -> Result<Member> {
    let handles = validation::validate_handles(&args.handles)?;
    let name = match args.name {
        Some(ref name) => validation::validate_display_name(name)?,
        None => handles[0].clone(),
    };

    let mut merged: Option<Member> = None;
    for handle in &handles {
        let member = Member::new(client.get_user(handle, &name).await?);
        match merged.as_mut() {
            Some(first) => {
                if !first.merge(&member) {
                    bail!("Could not merge handle '{}' into '{}'", handle, name);
                }
            }
            None => merged = Some(member),
        }
    }
    let mut member = merged.ok_or_else(|| anyhow!("No handles given"))?;

    for handle in &args.without {
        let handle = validation::validate_handle(handle)?;
        if !member.has_handle(&handle) {
            eprintln!("Warning: '{}' is not one of the merged handles", handle);
        }
        member.remove(&handle);
    }

    Ok(member)
}
