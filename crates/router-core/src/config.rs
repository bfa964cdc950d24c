//! Configuration types for a routing request

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_MAX_POOLS;
use crate::{ConfigError, TokenAddress};

/// Built-in deny-list of tokens that must never be routed through
const DEFAULT_DISABLED_TOKENS_JSON: &str = include_str!("../data/disabled-tokens.json");

/// A single entry of a disabled-token list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledToken {
    pub address: TokenAddress,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u8>,
}

/// Disabled-token list in its JSON file shape (`{ "tokens": [...] }`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisabledTokenList {
    pub tokens: Vec<DisabledToken>,
}

impl DisabledTokenList {
    /// Parse the list embedded in the crate
    pub fn builtin() -> Result<Self, ConfigError> {
        serde_json::from_str(DEFAULT_DISABLED_TOKENS_JSON)
            .map_err(|e| ConfigError::DisabledList(e.to_string()))
    }
}

/// Which disabled-token list a request uses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum DisabledTokenPolicy {
    /// Use the built-in deny-list
    #[default]
    Default,
    /// Use the caller's list instead of the built-in one
    Override { tokens: Vec<DisabledToken> },
}

impl DisabledTokenPolicy {
    /// Override with a plain list of addresses
    pub fn override_with<I, T>(addresses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TokenAddress>,
    {
        Self::Override {
            tokens: addresses
                .into_iter()
                .map(|address| DisabledToken {
                    address: address.into(),
                    symbol: None,
                    decimals: None,
                })
                .collect(),
        }
    }

    /// Resolve the policy into the address set used for filtering
    pub fn resolve(&self) -> Result<DisabledTokens, ConfigError> {
        let tokens = match self {
            Self::Default => DisabledTokenList::builtin()?.tokens,
            Self::Override { tokens } => tokens.clone(),
        };
        Ok(DisabledTokens::from_addresses(
            tokens.into_iter().map(|t| t.address),
        ))
    }
}

/// Resolved disabled-token set, compared without regard to address case
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisabledTokens {
    addresses: HashSet<String>,
}

impl DisabledTokens {
    pub fn from_addresses<I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = TokenAddress>,
    {
        Self {
            addresses: addresses
                .into_iter()
                .map(|a| a.as_str().to_ascii_lowercase())
                .collect(),
        }
    }

    pub fn contains(&self, token: &TokenAddress) -> bool {
        self.addresses.contains(&token.as_str().to_ascii_lowercase())
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// Source of the decimals written into swap legs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DecimalsPolicy {
    /// Every leg carries the fixed placeholder on both sides
    #[default]
    Placeholder,
    /// Legs carry the per-token decimals found in the pool record
    FromPool,
}

/// Pool-type pre-filter applied at ingestion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolFilter {
    #[default]
    All,
    Weighted,
    Stable,
}

/// Routing request configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    /// Maximum pools a trade may be split across; hop routing needs more than 1
    #[serde(default = "default_max_pools")]
    pub max_pools: usize,

    #[serde(default)]
    pub disabled_tokens: DisabledTokenPolicy,

    #[serde(default)]
    pub decimals: DecimalsPolicy,

    #[serde(default)]
    pub pool_type_filter: PoolFilter,
}

fn default_max_pools() -> usize {
    DEFAULT_MAX_POOLS
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            max_pools: default_max_pools(),
            disabled_tokens: DisabledTokenPolicy::Default,
            decimals: DecimalsPolicy::Placeholder,
            pool_type_filter: PoolFilter::All,
        }
    }
}

impl RouteConfig {
    pub fn with_max_pools(mut self, max_pools: usize) -> Self {
        self.max_pools = max_pools;
        self
    }

    pub fn with_disabled_tokens(mut self, policy: DisabledTokenPolicy) -> Self {
        self.disabled_tokens = policy;
        self
    }

    pub fn with_decimals(mut self, decimals: DecimalsPolicy) -> Self {
        self.decimals = decimals;
        self
    }

    /// Hop classification is only attempted when more than one pool is allowed
    pub fn allows_hops(&self) -> bool {
        self.max_pools > 1
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pools == 0 {
            return Err(ConfigError::InvalidMaxPools {
                max_pools: self.max_pools,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
