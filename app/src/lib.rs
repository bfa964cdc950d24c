//! Route profiler library
//!
//! Loads a pool universe from disk, proposes candidate paths for one token
//! pair and prints the result as JSON.

pub mod commands;
pub mod dto;

use clap::Parser;

use commands::ProfileArgs;

/// Propose candidate swap paths for a token pair
#[derive(Debug, Parser)]
#[command(name = "route-profiler", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub profile: ProfileArgs,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}

/// Run the profiler
pub fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("route_proposer=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!(
        "Profiling {} -> {} over {}",
        cli.profile.token_in,
        cli.profile.token_out,
        cli.profile.pools.display()
    );

    let report = commands::run_profile(&cli.profile)?;
    if report.is_empty() {
        tracing::info!("No route found");
    }

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", json);

    Ok(())
}
