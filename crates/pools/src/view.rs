//! Pool Views
//!
//! Closed dispatch over the supported pool curves. The variant is chosen once
//! at ingestion from `PoolRecord::kind`; every caller goes through the same
//! surface regardless of curve.

use indexmap::IndexSet;
use router_core::constants::BPT_DECIMALS;
use router_core::{PoolError, PoolId, TokenAddress};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::{PoolKind, PoolRecord};
use crate::stable::{StablePairData, StablePool};
use crate::weighted::{WeightedPairData, WeightedPool};

/// Which side of a trade, if any, is the pool's own share token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PairType {
    TokenToToken,
    /// Exit: the input is the pool's share token
    BptToToken,
    /// Join: the output is the pool's share token
    TokenToBpt,
}

impl PairType {
    pub fn classify(record: &PoolRecord, token_in: &TokenAddress, token_out: &TokenAddress) -> Self {
        if record.is_share_token(token_in) {
            Self::BptToToken
        } else if record.is_share_token(token_out) {
            Self::TokenToBpt
        } else {
            Self::TokenToToken
        }
    }
}

/// A validated pool of either curve type
#[derive(Debug, Clone)]
pub enum PoolView {
    Weighted(WeightedPool),
    Stable(StablePool),
}

impl PoolView {
    /// Validate a single record and build its view
    pub fn new(record: PoolRecord) -> Result<Self, PoolError> {
        record.validate(0)?;
        Ok(Self::from_validated(record))
    }

    /// Build the view for a record that already passed `PoolRecord::validate`
    pub(crate) fn from_validated(record: PoolRecord) -> Self {
        match record.kind() {
            PoolKind::Weighted => Self::Weighted(WeightedPool::new(record)),
            PoolKind::Stable => Self::Stable(StablePool::new(record)),
        }
    }

    pub fn record(&self) -> &PoolRecord {
        match self {
            Self::Weighted(pool) => pool.record(),
            Self::Stable(pool) => pool.record(),
        }
    }

    pub fn id(&self) -> &PoolId {
        &self.record().id
    }

    pub fn kind(&self) -> PoolKind {
        match self {
            Self::Weighted(_) => PoolKind::Weighted,
            Self::Stable(_) => PoolKind::Stable,
        }
    }

    pub fn tokens_list(&self) -> &[TokenAddress] {
        &self.record().tokens_list
    }

    /// Listed tokens followed by the pool's own share token
    pub fn token_set(&self) -> IndexSet<TokenAddress> {
        let mut set: IndexSet<TokenAddress> = self.tokens_list().iter().cloned().collect();
        set.insert(self.id().as_token());
        set
    }

    /// Decimals of `token` as recorded in this pool
    pub fn token_decimals(&self, token: &TokenAddress) -> Option<u8> {
        let record = self.record();
        if record.is_share_token(token) {
            return Some(BPT_DECIMALS);
        }
        record.find_token(token).map(|(_, t)| t.decimals)
    }

    /// Pair-specific state for trading `token_in` into `token_out`
    pub fn derive_trade_context(
        &self,
        token_in: &TokenAddress,
        token_out: &TokenAddress,
    ) -> Result<TradeContext, PoolError> {
        match self {
            Self::Weighted(pool) => pool
                .parse_pair_data(token_in, token_out)
                .map(TradeContext::Weighted),
            Self::Stable(pool) => pool
                .parse_pair_data(token_in, token_out)
                .map(TradeContext::Stable),
        }
    }
}

/// Derived pair data for one pool and one trade direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TradeContext {
    Weighted(WeightedPairData),
    Stable(StablePairData),
}

impl TradeContext {
    pub fn token_in(&self) -> &TokenAddress {
        match self {
            Self::Weighted(data) => &data.token_in,
            Self::Stable(data) => &data.token_in,
        }
    }

    pub fn token_out(&self) -> &TokenAddress {
        match self {
            Self::Weighted(data) => &data.token_out,
            Self::Stable(data) => &data.token_out,
        }
    }

    pub fn pair_type(&self) -> PairType {
        match self {
            Self::Weighted(data) => data.pair_type,
            Self::Stable(data) => data.pair_type,
        }
    }

    /// Liquidity measure comparable across curve types
    pub fn normalized_liquidity(&self) -> Decimal {
        match self {
            Self::Weighted(data) => data.normalized_liquidity(),
            Self::Stable(data) => data.normalized_liquidity(),
        }
    }
}
