//! Core type definitions for the route proposer

use serde::{Deserialize, Serialize};
use std::fmt;

/// Token address (hex-encoded, case as supplied by the data source)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAddress(pub String);

impl TokenAddress {
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Fully lowercased copy, used as the fallback form in token comparisons
    pub fn to_lowercase(&self) -> Self {
        Self(self.0.to_ascii_lowercase())
    }

    /// ASCII case-insensitive equality
    pub fn matches(&self, other: &TokenAddress) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TokenAddress {
    fn from(address: &str) -> Self {
        Self::new(address)
    }
}

impl From<String> for TokenAddress {
    fn from(address: String) -> Self {
        Self(address)
    }
}

/// Pool ID (unique within a routing request)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PoolId(pub String);

impl PoolId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The pool's liquidity-share token, which can be joined into or exited
    /// from as part of a hop.
    pub fn as_token(&self) -> TokenAddress {
        TokenAddress(self.0.clone())
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PoolId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for PoolId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Constants
pub mod constants {
    /// Decimals written into every swap leg when per-token decimals are not
    /// sourced from the pool record
    pub const PLACEHOLDER_DECIMALS: u8 = 18;

    /// Decimals of a pool's liquidity-share token
    pub const BPT_DECIMALS: u8 = 18;

    /// Default cap on pools per route; anything above 1 enables hop routing
    pub const DEFAULT_MAX_POOLS: usize = 4;
}
