mod commands;
mod output;

use anyhow::Result;
use cfstats_lib::{CachedClient, ClientConfig};
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "cfstats")]
#[command(about = "Merge Codeforces handles and summarize their history")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the merged handles and headline numbers
    Profile(commands::profile::ProfileArgs),
    /// List contests taken part in, oldest first
    Contests(commands::contests::ContestsArgs),
    /// List distinct accepted problems
    Solved(commands::solved::SolvedArgs),
    /// Count submissions per verdict
    Verdicts(commands::verdicts::VerdictsArgs),
    /// Count rejected attempts before each first accept
    Attempts(commands::attempts::AttemptsArgs),
    /// Show the standings of some handles in one contest
    Standings(commands::standings::StandingsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("cfstats=info".parse()?)
                .add_directive("cfstats_lib=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = OutputFormat::parse(&cli.output);

    let client = CachedClient::new(ClientConfig::from_env());

    match &cli.command {
        Commands::Profile(args) => commands::profile::run(args, &client, &format).await?,
        Commands::Contests(args) => commands::contests::run(args, &client, &format).await?,
        Commands::Solved(args) => commands::solved::run(args, &client, &format).await?,
        Commands::Verdicts(args) => commands::verdicts::run(args, &client, &format).await?,
        Commands::Attempts(args) => commands::attempts::run(args, &client, &format).await?,
        Commands::Standings(args) => commands::standings::run(args, &client, &format).await?,
    }

    Ok(())
}
