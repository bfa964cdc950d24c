//! Weighted Pools
//!
//! Pair data and normalized liquidity for weighted constant-product pools.

use router_core::constants::BPT_DECIMALS;
use router_core::{PoolError, TokenAddress};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::PoolRecord;
use crate::view::PairType;

/// A validated weighted pool
#[derive(Debug, Clone)]
pub struct WeightedPool {
    record: PoolRecord,
    total_weight: Decimal,
}

/// Pair-specific state of a weighted pool for one trade direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeightedPairData {
    pub pair_type: PairType,
    pub token_in: TokenAddress,
    pub token_out: TokenAddress,
    pub balance_in: Decimal,
    pub balance_out: Decimal,
    /// Normalized weight (token weight / total weight)
    pub weight_in: Decimal,
    pub weight_out: Decimal,
    pub decimals_in: u8,
    pub decimals_out: u8,
    pub swap_fee: Decimal,
}

struct Side {
    balance: Decimal,
    weight: Decimal,
    decimals: u8,
}

impl WeightedPool {
    /// Build from a record that already passed `PoolRecord::validate`
    pub(crate) fn new(record: PoolRecord) -> Self {
        let total_weight = record.effective_total_weight();
        Self {
            record,
            total_weight,
        }
    }

    pub fn record(&self) -> &PoolRecord {
        &self.record
    }

    pub fn total_weight(&self) -> Decimal {
        self.total_weight
    }

    fn side(&self, token: &TokenAddress, is_share: bool) -> Result<Side, PoolError> {
        // Joining or exiting: the share token stands in with unit weight
        if is_share {
            return Ok(Side {
                balance: self.record.total_shares,
                weight: Decimal::ONE,
                decimals: BPT_DECIMALS,
            });
        }

        let (_, t) = self
            .record
            .find_token(token)
            .ok_or_else(|| PoolError::TokenNotInPool {
                pool_id: self.record.id.to_string(),
                token: token.to_string(),
            })?;
        let weight = t
            .weight
            .and_then(|w| w.checked_div(self.total_weight))
            .unwrap_or(Decimal::ZERO);

        Ok(Side {
            balance: t.balance,
            weight,
            decimals: t.decimals,
        })
    }

    pub fn parse_pair_data(
        &self,
        token_in: &TokenAddress,
        token_out: &TokenAddress,
    ) -> Result<WeightedPairData, PoolError> {
        let pair_type = PairType::classify(&self.record, token_in, token_out);
        let input = self.side(token_in, pair_type == PairType::BptToToken)?;
        let output = self.side(token_out, pair_type == PairType::TokenToBpt)?;

        Ok(WeightedPairData {
            pair_type,
            token_in: token_in.clone(),
            token_out: token_out.clone(),
            balance_in: input.balance,
            balance_out: output.balance,
            weight_in: input.weight,
            weight_out: output.weight,
            decimals_in: input.decimals,
            decimals_out: output.decimals,
            swap_fee: self.record.swap_fee,
        })
    }
}

impl WeightedPairData {
    /// `balance_out * weight_in / (weight_in + weight_out)`
    pub fn normalized_liquidity(&self) -> Decimal {
        let weight_sum = self.weight_in + self.weight_out;
        if weight_sum.is_zero() {
            return Decimal::ZERO;
        }
        self.balance_out
            .checked_mul(self.weight_in)
            .and_then(|v| v.checked_div(weight_sum))
            .unwrap_or(Decimal::MAX)
    }
}
