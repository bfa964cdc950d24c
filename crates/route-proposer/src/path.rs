//! Candidate paths
//!
//! A path is one or two pool-local swap legs connecting tokenIn to tokenOut.
//! Direct paths are identified by their pool id, multihop paths by the two
//! pool ids concatenated in hop order.

use pools::PoolView;
use router_core::constants::PLACEHOLDER_DECIMALS;
use router_core::{DecimalsPolicy, PoolId, TokenAddress};
use serde::{Deserialize, Serialize};

/// One pool-local swap step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leg {
    pub pool_id: PoolId,
    pub token_in: TokenAddress,
    pub token_out: TokenAddress,
    pub token_in_decimals: u8,
    pub token_out_decimals: u8,
}

/// A candidate route for the downstream optimizer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidatePath {
    pub id: String,
    pub legs: Vec<Leg>,
}

impl Leg {
    pub fn new(
        pool: &PoolView,
        token_in: &TokenAddress,
        token_out: &TokenAddress,
        decimals: DecimalsPolicy,
    ) -> Self {
        let (token_in_decimals, token_out_decimals) = match decimals {
            DecimalsPolicy::Placeholder => (PLACEHOLDER_DECIMALS, PLACEHOLDER_DECIMALS),
            DecimalsPolicy::FromPool => (
                pool.token_decimals(token_in).unwrap_or(PLACEHOLDER_DECIMALS),
                pool.token_decimals(token_out).unwrap_or(PLACEHOLDER_DECIMALS),
            ),
        };

        Self {
            pool_id: pool.id().clone(),
            token_in: token_in.clone(),
            token_out: token_out.clone(),
            token_in_decimals,
            token_out_decimals,
        }
    }
}

impl CandidatePath {
    pub fn is_direct(&self) -> bool {
        self.legs.len() == 1
    }

    /// Intermediate token of a multihop path
    pub fn hop_token(&self) -> Option<&TokenAddress> {
        match self.legs.as_slice() {
            [first, _] => Some(&first.token_out),
            _ => None,
        }
    }

    pub fn pool_ids(&self) -> impl Iterator<Item = &PoolId> {
        self.legs.iter().map(|leg| &leg.pool_id)
    }
}

/// Single-leg path through `pool`
pub fn direct_path(
    pool: &PoolView,
    token_in: &TokenAddress,
    token_out: &TokenAddress,
    decimals: DecimalsPolicy,
) -> CandidatePath {
    CandidatePath {
        id: pool.id().to_string(),
        legs: vec![Leg::new(pool, token_in, token_out, decimals)],
    }
}

/// Two-leg path tokenIn -> hop through `first`, then hop -> tokenOut through `second`
pub fn multihop_path(
    first: &PoolView,
    second: &PoolView,
    token_in: &TokenAddress,
    hop_token: &TokenAddress,
    token_out: &TokenAddress,
    decimals: DecimalsPolicy,
) -> CandidatePath {
    CandidatePath {
        id: format!("{}{}", first.id(), second.id()),
        legs: vec![
            Leg::new(first, token_in, hop_token, decimals),
            Leg::new(second, hop_token, token_out, decimals),
        ],
    }
}
