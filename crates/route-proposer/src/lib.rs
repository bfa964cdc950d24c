//! Route proposer: candidate path construction for AMM swap routing
//!
//! Given a pool universe and a token pair, classifies pools by their relevance
//! to the trade and builds the direct and one-hop candidate paths a downstream
//! optimizer costs and splits a trade across.
//!
//! Pipeline: ingest (fail fast on malformed records) -> normalize token sets ->
//! classify -> resolve hop tokens -> select best hop pools -> build paths.

pub mod builder;
pub mod classifier;
pub mod hop_tokens;
pub mod normalizer;
pub mod path;
pub mod selector;

// Re-exports
pub use builder::build_paths;
pub use classifier::{
    classify_all, classify_pool, ClassifiedPool, ClassifiedPoolSet, Classification, PoolRole,
};
pub use hop_tokens::resolve_hop_tokens;
pub use normalizer::{contains_pair, contains_token, normalize_token_set, TokenSet};
pub use path::{direct_path, multihop_path, CandidatePath, Leg};
pub use selector::{select_best_pool, select_hops, HopSelection, SelectedPool};

use pools::PoolRecord;
use router_core::{Result, RouteConfig, TokenAddress};

/// Candidate paths and the pools they use
#[derive(Debug, Clone, Default)]
pub struct RouteProposal {
    /// Pools used by at least one path, in input order
    pub used_pools: ClassifiedPoolSet,
    pub paths: Vec<CandidatePath>,
    pub hop_tokens: Vec<TokenAddress>,
}

impl RouteProposal {
    /// No route between the two tokens
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn direct_paths(&self) -> impl Iterator<Item = &CandidatePath> {
        self.paths.iter().filter(|p| p.is_direct())
    }

    pub fn multihop_paths(&self) -> impl Iterator<Item = &CandidatePath> {
        self.paths.iter().filter(|p| !p.is_direct())
    }
}

/// Build every candidate path from `token_in` to `token_out`.
///
/// Malformed pool records and invalid configuration are errors. A pair with no
/// connecting pools is an empty proposal.
pub fn propose_paths(
    records: Vec<PoolRecord>,
    token_in: &TokenAddress,
    token_out: &TokenAddress,
    config: &RouteConfig,
) -> Result<RouteProposal> {
    config.validate()?;
    let views = pools::ingest(records, config.pool_type_filter)?;
    let disabled = config.disabled_tokens.resolve()?;

    let classification = classify_all(views, token_in, token_out, config.max_pools, &disabled);

    let hop_tokens = if config.allows_hops() {
        resolve_hop_tokens(
            &classification.paired_with_token_in,
            &classification.paired_with_token_out,
        )
    } else {
        Vec::new()
    };

    let (used_pools, paths) = build_paths(
        token_in,
        token_out,
        &hop_tokens,
        &classification.pools,
        config.decimals,
    );

    if paths.is_empty() {
        tracing::info!("No candidate paths for {} -> {}", token_in, token_out);
    } else {
        tracing::info!(
            "Proposed {} paths for {} -> {} using {} pools ({} hop tokens)",
            paths.len(),
            token_in,
            token_out,
            used_pools.len(),
            hop_tokens.len()
        );
    }

    Ok(RouteProposal {
        used_pools,
        paths,
        hop_tokens,
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pools::{PoolView, TokenRecord};
    use router_core::{DecimalsPolicy, DisabledTokenPolicy, PoolFilter, PoolId};
    use rust_decimal::Decimal;

    fn token(address: &str, balance: i64, weight: Option<i64>) -> TokenRecord {
        TokenRecord {
            address: TokenAddress::new(address),
            balance: Decimal::from(balance),
            decimals: 18,
            weight: weight.map(Decimal::from),
        }
    }

    fn record(id: &str, amp: Option<i64>, tokens: Vec<TokenRecord>) -> PoolRecord {
        PoolRecord {
            id: PoolId::new(id),
            address: None,
            swap_fee: Decimal::new(3, 3),
            total_weight: None,
            total_shares: Decimal::from(1_000),
            amp: amp.map(Decimal::from),
            tokens_list: tokens.iter().map(|t| t.address.clone()).collect(),
            tokens,
        }
    }

    /// Equal-weight pool, every balance set
    pub(crate) fn weighted_record(id: &str, tokens: &[(&str, i64)]) -> PoolRecord {
        record(
            id,
            None,
            tokens.iter().map(|(a, b)| token(a, *b, Some(1))).collect(),
        )
    }

    pub(crate) fn stable_record(id: &str, amp: i64, tokens: &[(&str, i64)]) -> PoolRecord {
        record(
            id,
            Some(amp),
            tokens.iter().map(|(a, b)| token(a, *b, None)).collect(),
        )
    }

    fn view(record: PoolRecord) -> PoolView {
        PoolView::new(record).unwrap()
    }

    pub(crate) fn weighted_pool(id: &str, tokens: &[&str]) -> PoolView {
        let balances: Vec<(&str, i64)> = tokens.iter().map(|t| (*t, 1_000)).collect();
        view(weighted_record(id, &balances))
    }

    pub(crate) fn pool_with_balances(id: &str, tokens: &[(&str, i64)]) -> PoolView {
        view(weighted_record(id, tokens))
    }

    pub(crate) fn stable_pool(id: &str, amp: i64, tokens: &[(&str, i64)]) -> PoolView {
        view(stable_record(id, amp, tokens))
    }

    pub(crate) fn pool_with_decimals(id: &str, tokens: &[(&str, u8)]) -> PoolView {
        let mut record = weighted_record(
            id,
            &tokens.iter().map(|(a, _)| (*a, 1_000)).collect::<Vec<_>>(),
        );
        for (t, (_, decimals)) in record.tokens.iter_mut().zip(tokens) {
            t.decimals = *decimals;
        }
        view(record)
    }

    fn no_disabled(max_pools: usize) -> RouteConfig {
        RouteConfig::default()
            .with_max_pools(max_pools)
            .with_disabled_tokens(DisabledTokenPolicy::override_with(Vec::<String>::new()))
    }

    fn propose(records: Vec<PoolRecord>, config: &RouteConfig) -> RouteProposal {
        propose_paths(records, &"X".into(), &"Y".into(), config).unwrap()
    }

    fn two_hop_universe() -> Vec<PoolRecord> {
        vec![
            weighted_record("PoolA", &[("X", 1_000), ("H", 1_000)]),
            weighted_record("PoolB", &[("H", 1_000), ("Y", 1_000)]),
        ]
    }

    #[test]
    fn test_single_direct_pool() {
        let proposal = propose(
            vec![weighted_record("PoolA", &[("X", 1_000), ("Y", 1_000)])],
            &no_disabled(4),
        );

        assert_eq!(proposal.used_pools.len(), 1);
        assert_eq!(proposal.used_pools[0].role(), PoolRole::Direct);
        assert!(proposal.hop_tokens.is_empty());
        assert_eq!(
            proposal.paths,
            vec![CandidatePath {
                id: "PoolA".to_string(),
                legs: vec![Leg {
                    pool_id: PoolId::new("PoolA"),
                    token_in: "X".into(),
                    token_out: "Y".into(),
                    token_in_decimals: 18,
                    token_out_decimals: 18,
                }],
            }]
        );
    }

    #[test]
    fn test_one_hop_route() {
        let proposal = propose(two_hop_universe(), &no_disabled(4));

        assert_eq!(proposal.hop_tokens, vec![TokenAddress::new("H")]);
        assert_eq!(proposal.used_pools.len(), 2);
        assert_eq!(
            proposal.used_pools[&PoolId::new("PoolA")].role(),
            PoolRole::HopIn
        );
        assert_eq!(
            proposal.used_pools[&PoolId::new("PoolB")].role(),
            PoolRole::HopOut
        );

        assert_eq!(proposal.paths.len(), 1);
        let path = &proposal.paths[0];
        assert_eq!(path.id, "PoolAPoolB");
        assert_eq!(path.legs[0].pool_id.as_str(), "PoolA");
        assert_eq!(path.legs[0].token_in.as_str(), "X");
        assert_eq!(path.legs[0].token_out.as_str(), "H");
        assert_eq!(path.legs[1].pool_id.as_str(), "PoolB");
        assert_eq!(path.legs[1].token_in.as_str(), "H");
        assert_eq!(path.legs[1].token_out.as_str(), "Y");
    }

    #[test]
    fn test_single_pool_limit_yields_no_route() {
        let proposal = propose(two_hop_universe(), &no_disabled(1));

        assert!(proposal.is_empty());
        assert!(proposal.used_pools.is_empty());
        assert!(proposal.hop_tokens.is_empty());
    }

    #[test]
    fn test_disabled_hop_token_yields_no_route() {
        let config = RouteConfig::default()
            .with_disabled_tokens(DisabledTokenPolicy::override_with(["H"]));
        let proposal = propose(two_hop_universe(), &config);

        assert!(proposal.is_empty());
        assert!(proposal.hop_tokens.is_empty());
        assert!(proposal.used_pools.is_empty());
    }

    #[test]
    fn test_tie_break_prefers_later_pool() {
        let proposal = propose(
            vec![
                weighted_record("PoolA1", &[("X", 1_000), ("H", 500)]),
                weighted_record("PoolA2", &[("X", 1_000), ("H", 500)]),
                weighted_record("PoolB", &[("H", 1_000), ("Y", 1_000)]),
            ],
            &no_disabled(4),
        );

        assert_eq!(proposal.paths.len(), 1);
        assert_eq!(proposal.paths[0].id, "PoolA2PoolB");
        assert!(!proposal
            .used_pools
            .contains_key(&PoolId::new("PoolA1")));
    }

    #[test]
    fn test_direct_paths_appear_once() {
        let proposal = propose(
            vec![
                weighted_record("Direct", &[("X", 1_000), ("Y", 1_000)]),
                weighted_record("PoolA", &[("X", 1_000), ("H1", 1_000), ("H2", 1_000), ("H3", 1_000)]),
                weighted_record("PoolB", &[("H1", 1_000), ("H2", 1_000), ("H3", 1_000), ("Y", 1_000)]),
            ],
            &no_disabled(4),
        );

        assert_eq!(proposal.hop_tokens.len(), 3);
        assert_eq!(proposal.direct_paths().count(), 1);
        assert_eq!(proposal.multihop_paths().count(), 3);
        assert_eq!(proposal.paths[0].id, "Direct");

        let hops: Vec<&str> = proposal
            .multihop_paths()
            .filter_map(|p| p.hop_token())
            .map(|t| t.as_str())
            .collect();
        assert_eq!(hops, vec!["H1", "H2", "H3"]);
    }

    #[test]
    fn test_pool_share_token_as_hop() {
        // PoolC holds PoolA's share token, so X -> PoolA (join) -> Y is a route
        let proposal = propose(
            vec![
                weighted_record("PoolA", &[("X", 1_000), ("H1", 1_000), ("H2", 1_000)]),
                weighted_record("PoolB", &[("H1", 1_000), ("Y", 1_000)]),
                weighted_record("PoolC", &[("PoolA", 1_000), ("Y", 1_000)]),
            ],
            &no_disabled(4),
        );

        assert_eq!(
            proposal.hop_tokens,
            vec![TokenAddress::new("H1"), TokenAddress::new("PoolA")]
        );
        let ids: Vec<&str> = proposal.paths.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["PoolAPoolB", "PoolAPoolC"]);

        for path in &proposal.paths {
            for id in path.pool_ids() {
                assert!(proposal.used_pools.contains_key(id));
            }
        }

        let join = proposal.used_pools[&PoolId::new("PoolA")]
            .trade_context()
            .unwrap();
        assert_eq!(join.pair_type(), pools::PairType::TokenToBpt);
    }

    #[test]
    fn test_zero_liquidity_hop_pool_still_used() {
        let proposal = propose(
            vec![
                weighted_record("Fresh", &[("X", 0), ("H", 0)]),
                weighted_record("PoolB", &[("H", 1_000), ("Y", 1_000)]),
            ],
            &no_disabled(4),
        );
        assert_eq!(proposal.paths.len(), 1);
        assert_eq!(proposal.paths[0].id, "FreshPoolB");
    }

    #[test]
    fn test_stable_and_weighted_pools_mix() {
        let proposal = propose(
            vec![
                stable_record("StableA", 100, &[("X", 1_000), ("H", 1_000)]),
                weighted_record("PoolA", &[("X", 1_000), ("H", 1_000)]),
                weighted_record("PoolB", &[("H", 1_000), ("Y", 1_000)]),
            ],
            &no_disabled(4),
        );

        // 1_000 * 100 beats 1_000 * 0.5
        assert_eq!(proposal.paths[0].id, "StableAPoolB");
        let context = proposal.used_pools[&PoolId::new("StableA")]
            .trade_context()
            .unwrap();
        assert_eq!(context.normalized_liquidity(), Decimal::from(100_000));
    }

    #[test]
    fn test_unknown_tokens_yield_empty_proposal() {
        let proposal = propose_paths(
            two_hop_universe(),
            &"Q".into(),
            &"Z".into(),
            &no_disabled(4),
        )
        .unwrap();
        assert!(proposal.is_empty());
        assert!(proposal.used_pools.is_empty());
    }

    #[test]
    fn test_malformed_record_rejected() {
        let mut broken = weighted_record("PoolB", &[("H", 1_000), ("Y", 1_000)]);
        broken.tokens_list.clear();
        let universe = vec![
            weighted_record("PoolA", &[("X", 1_000), ("Y", 1_000)]),
            broken,
        ];

        let err = propose_paths(universe, &"X".into(), &"Y".into(), &no_disabled(4)).unwrap_err();
        assert_eq!(err.error_code(), "missing_tokens");
    }

    #[test]
    fn test_invalid_config_rejected() {
        let err = propose_paths(
            two_hop_universe(),
            &"X".into(),
            &"Y".into(),
            &no_disabled(0),
        )
        .unwrap_err();
        assert_eq!(err.error_code(), "invalid_max_pools");
    }

    #[test]
    fn test_builtin_disabled_list_applies() {
        let disabled = "0xa7DE087329BFcda5639247F96140f9DAbe3DeED1";
        let proposal = propose(
            vec![
                weighted_record("PoolA", &[("X", 1_000), (disabled, 1_000)]),
                weighted_record("PoolB", &[(disabled, 1_000), ("Y", 1_000)]),
            ],
            &RouteConfig::default(),
        );
        assert!(proposal.is_empty());
    }

    #[test]
    fn test_pool_filter_and_decimals_policy() {
        let mut config = no_disabled(4).with_decimals(DecimalsPolicy::FromPool);
        config.pool_type_filter = PoolFilter::Stable;

        let mut stable = stable_record("StableD", 50, &[("X", 1_000), ("Y", 1_000)]);
        stable.tokens[1].decimals = 6;
        let proposal = propose(
            vec![
                weighted_record("WeightedD", &[("X", 1_000), ("Y", 1_000)]),
                stable,
            ],
            &config,
        );

        assert_eq!(proposal.paths.len(), 1);
        assert_eq!(proposal.paths[0].id, "StableD");
        assert_eq!(proposal.paths[0].legs[0].token_in_decimals, 18);
        assert_eq!(proposal.paths[0].legs[0].token_out_decimals, 6);
    }
}
