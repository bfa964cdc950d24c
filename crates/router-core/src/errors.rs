//! Error types for the route proposer
//!
//! Only structurally invalid input is an error. A token pair with no
//! connecting pools is a valid, empty outcome and never surfaces here.

use thiserror::Error;

/// Top-level errors returned by a routing request
#[derive(Debug, Error)]
pub enum Error {
    #[error("Pool error: {0}")]
    Pool(#[from] PoolError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Malformed pool records and pool-local lookups
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("Pool at index {index} has no id")]
    MissingId { index: usize },

    #[error("Pool {pool_id} has an empty token list")]
    MissingTokens { pool_id: String },

    #[error("Pool id {pool_id} appears more than once")]
    DuplicateId { pool_id: String },

    #[error("Pool {pool_id} lists token {token} without a token record")]
    MissingTokenRecord { pool_id: String, token: String },

    #[error("Weighted pool {pool_id} has no weight for token {token}")]
    MissingWeight { pool_id: String, token: String },

    #[error("Weighted pool {pool_id} has zero total weight")]
    ZeroTotalWeight { pool_id: String },

    #[error("Pool {pool_id} has a negative balance for {token}")]
    NegativeBalance { pool_id: String, token: String },

    #[error("Pool {pool_id} has a negative weight for {token}")]
    NegativeWeight { pool_id: String, token: String },

    #[error("Stable pool {pool_id} has a negative amplification parameter")]
    NegativeAmp { pool_id: String },

    #[error("Pool {pool_id} does not contain token {token}")]
    TokenNotInPool { pool_id: String, token: String },

    #[error("Failed to parse pool data: {0}")]
    Parse(String),
}

/// Invalid request configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("maxPools must be at least 1 (got {max_pools})")]
    InvalidMaxPools { max_pools: usize },

    #[error("Invalid disabled token list: {0}")]
    DisabledList(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Result type alias for routing operations
pub type Result<T> = std::result::Result<T, Error>;

impl PoolError {
    /// Get a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingId { .. } => "missing_id",
            Self::MissingTokens { .. } => "missing_tokens",
            Self::DuplicateId { .. } => "duplicate_id",
            Self::MissingTokenRecord { .. } => "missing_token_record",
            Self::MissingWeight { .. } => "missing_weight",
            Self::ZeroTotalWeight { .. } => "zero_total_weight",
            Self::NegativeBalance { .. } => "negative_balance",
            Self::NegativeWeight { .. } => "negative_weight",
            Self::NegativeAmp { .. } => "negative_amp",
            Self::TokenNotInPool { .. } => "token_not_in_pool",
            Self::Parse(_) => "pool_parse_error",
        }
    }

    /// True for errors that reject a pool universe before any routing work
    pub fn is_malformed_input(&self) -> bool {
        !matches!(self, Self::TokenNotInPool { .. })
    }
}

impl ConfigError {
    /// Get a stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidMaxPools { .. } => "invalid_max_pools",
            Self::DisabledList(_) => "invalid_disabled_list",
            Self::Parse(_) => "config_parse_error",
        }
    }
}

impl Error {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Pool(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
        }
    }
}
