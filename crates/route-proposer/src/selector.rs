//! Best-hop-pool selection
//!
//! For every hop token the most liquid Hop-In pool (tokenIn -> hop) and the
//! most liquid Hop-Out pool (hop -> tokenOut) are chosen. Ties go to the pool
//! scanned last, and the first candidate wins even at zero liquidity, so a
//! side only comes back empty when it has no candidate at all.

use pools::TradeContext;
use router_core::TokenAddress;
use rust_decimal::Decimal;

use crate::classifier::{ClassifiedPool, ClassifiedPoolSet, PoolRole};
use crate::normalizer::contains_token;

/// A pool chosen for one side of a hop
#[derive(Debug, Clone)]
pub struct SelectedPool<'a> {
    pub pool: &'a ClassifiedPool,
    pub liquidity: Decimal,
    pub trade_context: TradeContext,
}

/// Both sides selected for one hop token
#[derive(Debug, Clone)]
pub struct HopSelection<'a> {
    pub hop_token: TokenAddress,
    pub hop_in: SelectedPool<'a>,
    pub hop_out: SelectedPool<'a>,
}

/// Scan pools with `role` that hold `hop_token` and keep the most liquid one
/// for trading `from` into `to`.
pub fn select_best_pool<'a>(
    classified: &'a ClassifiedPoolSet,
    role: PoolRole,
    hop_token: &TokenAddress,
    from: &TokenAddress,
    to: &TokenAddress,
) -> Option<SelectedPool<'a>> {
    let mut best: Option<SelectedPool<'a>> = None;

    let candidates = classified
        .values()
        .filter(|pool| pool.role() == role && contains_token(pool.token_set(), hop_token));

    for pool in candidates {
        let trade_context = match pool.view().derive_trade_context(from, to) {
            Ok(context) => context,
            Err(e) if e.is_malformed_input() => {
                tracing::warn!("Skipping hop candidate {}: {}", pool.id(), e);
                continue;
            }
            Err(e) => {
                tracing::debug!("Skipping hop candidate {}: {}", pool.id(), e);
                continue;
            }
        };
        let liquidity = trade_context.normalized_liquidity();

        let best_liquidity = best.as_ref().map_or(Decimal::ZERO, |b| b.liquidity);
        if liquidity >= best_liquidity {
            best = Some(SelectedPool {
                pool,
                liquidity,
                trade_context,
            });
        }
    }

    best
}

/// Select both sides for every hop token, skipping tokens missing a side
pub fn select_hops<'a>(
    token_in: &TokenAddress,
    token_out: &TokenAddress,
    hop_tokens: &[TokenAddress],
    classified: &'a ClassifiedPoolSet,
) -> Vec<HopSelection<'a>> {
    hop_tokens
        .iter()
        .filter_map(|hop| {
            let hop_in = select_best_pool(classified, PoolRole::HopIn, hop, token_in, hop);
            let hop_out = select_best_pool(classified, PoolRole::HopOut, hop, hop, token_out);

            match (hop_in, hop_out) {
                (Some(hop_in), Some(hop_out)) => {
                    tracing::debug!(
                        "Hop {}: in via {} ({}), out via {} ({})",
                        hop,
                        hop_in.pool.id(),
                        hop_in.liquidity,
                        hop_out.pool.id(),
                        hop_out.liquidity
                    );
                    Some(HopSelection {
                        hop_token: hop.clone(),
                        hop_in,
                        hop_out,
                    })
                }
                (hop_in, hop_out) => {
                    tracing::debug!(
                        "Skipping hop {}: hop-in {}, hop-out {}",
                        hop,
                        if hop_in.is_some() { "found" } else { "missing" },
                        if hop_out.is_some() { "found" } else { "missing" }
                    );
                    None
                }
            }
        })
        .collect()
}
