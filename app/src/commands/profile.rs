use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;
use pools::PoolRecord;
use router_core::{DecimalsPolicy, RouteConfig, TokenAddress};

use crate::dto::ProposalReport;

/// Arguments of a profiling run
#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Pools JSON file: a bare array or `{ "pools": [...] }`
    #[arg(long)]
    pub pools: PathBuf,

    /// Address of the token sold
    #[arg(long)]
    pub token_in: String,

    /// Address of the token bought
    #[arg(long)]
    pub token_out: String,

    /// Maximum pools per route; 1 disables hop routing [default: 4]
    #[arg(long)]
    pub max_pools: Option<usize>,

    /// Route configuration JSON file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Fill leg decimals from the pool records instead of the placeholder
    #[arg(long)]
    pub pool_decimals: bool,
}

/// Read pool records from a JSON file
pub fn load_pools(path: &Path) -> anyhow::Result<Vec<PoolRecord>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read pools file {}", path.display()))?;
    let records = pools::parse_records(&json)
        .with_context(|| format!("Invalid pools file {}", path.display()))?;
    tracing::debug!("Loaded {} pool records from {}", records.len(), path.display());
    Ok(records)
}

/// Build the request configuration from an optional file and CLI overrides
pub fn load_config(args: &ProfileArgs) -> anyhow::Result<RouteConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            RouteConfig::from_json_str(&json)
                .with_context(|| format!("Invalid config file {}", path.display()))?
        }
        None => RouteConfig::default(),
    };

    if let Some(max_pools) = args.max_pools {
        config = config.with_max_pools(max_pools);
    }
    if args.pool_decimals {
        config = config.with_decimals(DecimalsPolicy::FromPool);
    }

    config.validate()?;
    Ok(config)
}

/// Propose candidate paths for one token pair
pub fn profile_pools(
    records: Vec<PoolRecord>,
    token_in: TokenAddress,
    token_out: TokenAddress,
    config: &RouteConfig,
) -> anyhow::Result<ProposalReport> {
    if records.is_empty() {
        tracing::warn!("No pools supplied");
        return Ok(ProposalReport::empty(token_in, token_out));
    }

    let proposal = route_proposer::propose_paths(records, &token_in, &token_out, config)
        .with_context(|| format!("Failed to propose paths for {} -> {}", token_in, token_out))?;

    Ok(ProposalReport::new(token_in, token_out, proposal))
}

/// Load inputs and run one profile
pub fn run_profile(args: &ProfileArgs) -> anyhow::Result<ProposalReport> {
    let config = load_config(args)?;
    let records = load_pools(&args.pools)?;
    profile_pools(
        records,
        TokenAddress::new(args.token_in.clone()),
        TokenAddress::new(args.token_out.clone()),
        &config,
    )
}
