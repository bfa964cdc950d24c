//! Path building
//!
//! Turns the classified pools and hop tokens into the candidate path list and
//! the set of pools those paths actually use.

use router_core::{DecimalsPolicy, TokenAddress};

use crate::classifier::{ClassifiedPoolSet, PoolRole};
use crate::path::{direct_path, multihop_path, CandidatePath};
use crate::selector::select_hops;

/// Build direct paths for every Direct pool, then one multihop path per hop
/// token with both sides available.
///
/// Direct paths come first and appear exactly once however many hop tokens
/// there are. The used pools follow input order. A pool selected for several
/// hops keeps the trade context of the last one.
pub fn build_paths(
    token_in: &TokenAddress,
    token_out: &TokenAddress,
    hop_tokens: &[TokenAddress],
    classified: &ClassifiedPoolSet,
    decimals: DecimalsPolicy,
) -> (ClassifiedPoolSet, Vec<CandidatePath>) {
    let mut used_pools = ClassifiedPoolSet::new();
    let mut paths = Vec::new();

    for pool in classified.values().filter(|p| p.role() == PoolRole::Direct) {
        paths.push(direct_path(pool.view(), token_in, token_out, decimals));
        used_pools.insert(pool.id().clone(), pool.clone());
    }

    if hop_tokens.is_empty() {
        return (used_pools, paths);
    }

    for selection in select_hops(token_in, token_out, hop_tokens, classified) {
        let first = selection.hop_in.pool;
        let second = selection.hop_out.pool;

        paths.push(multihop_path(
            first.view(),
            second.view(),
            token_in,
            &selection.hop_token,
            token_out,
            decimals,
        ));

        used_pools.insert(
            first.id().clone(),
            first.clone().with_trade_context(selection.hop_in.trade_context),
        );
        used_pools.insert(
            second.id().clone(),
            second.clone().with_trade_context(selection.hop_out.trade_context),
        );
    }

    used_pools.sort_by(|a, _, b, _| {
        classified
            .get_index_of(a)
            .cmp(&classified.get_index_of(b))
    });

    (used_pools, paths)
}
