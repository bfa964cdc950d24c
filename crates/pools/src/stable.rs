//! Stable Pools
//!
//! Pair data and normalized liquidity for amplified stable-swap pools.

use router_core::constants::BPT_DECIMALS;
use router_core::{PoolError, TokenAddress};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::PoolRecord;
use crate::view::PairType;

/// A validated stable pool
#[derive(Debug, Clone)]
pub struct StablePool {
    record: PoolRecord,
    amp: Decimal,
}

/// Pair-specific state of a stable pool for one trade direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StablePairData {
    pub pair_type: PairType,
    pub token_in: TokenAddress,
    pub token_out: TokenAddress,
    /// Position of each side in the pool's token records; `None` for the share token
    pub token_index_in: Option<usize>,
    pub token_index_out: Option<usize>,
    pub balance_in: Decimal,
    pub balance_out: Decimal,
    pub decimals_in: u8,
    pub decimals_out: u8,
    /// Balances of every token record, in record order
    pub all_balances: Vec<Decimal>,
    pub amp: Decimal,
    pub swap_fee: Decimal,
}

struct Side {
    index: Option<usize>,
    balance: Decimal,
    decimals: u8,
}

impl StablePool {
    /// Build from a record that already passed `PoolRecord::validate`
    pub(crate) fn new(record: PoolRecord) -> Self {
        let amp = record.amp.unwrap_or(Decimal::ZERO);
        Self { record, amp }
    }

    pub fn record(&self) -> &PoolRecord {
        &self.record
    }

    fn side(&self, token: &TokenAddress, is_share: bool) -> Result<Side, PoolError> {
        if is_share {
            return Ok(Side {
                index: None,
                balance: self.record.total_shares,
                decimals: BPT_DECIMALS,
            });
        }

        let (index, t) = self
            .record
            .find_token(token)
            .ok_or_else(|| PoolError::TokenNotInPool {
                pool_id: self.record.id.to_string(),
                token: token.to_string(),
            })?;

        Ok(Side {
            index: Some(index),
            balance: t.balance,
            decimals: t.decimals,
        })
    }

    pub fn parse_pair_data(
        &self,
        token_in: &TokenAddress,
        token_out: &TokenAddress,
    ) -> Result<StablePairData, PoolError> {
        let pair_type = PairType::classify(&self.record, token_in, token_out);
        let input = self.side(token_in, pair_type == PairType::BptToToken)?;
        let output = self.side(token_out, pair_type == PairType::TokenToBpt)?;

        Ok(StablePairData {
            pair_type,
            token_in: token_in.clone(),
            token_out: token_out.clone(),
            token_index_in: input.index,
            token_index_out: output.index,
            balance_in: input.balance,
            balance_out: output.balance,
            decimals_in: input.decimals,
            decimals_out: output.decimals,
            all_balances: self.record.tokens.iter().map(|t| t.balance).collect(),
            amp: self.amp,
            swap_fee: self.record.swap_fee,
        })
    }
}

impl StablePairData {
    /// `balance_out * amp`, saturating at `Decimal::MAX`
    pub fn normalized_liquidity(&self) -> Decimal {
        self.balance_out
            .checked_mul(self.amp)
            .unwrap_or(Decimal::MAX)
    }
}
