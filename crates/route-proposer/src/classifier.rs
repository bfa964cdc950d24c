//! Pool classification
//!
//! Each pool gets at most one role relative to the requested trade. Pools
//! holding both sides are Direct and never considered for hops; pools holding
//! exactly one side become Hop-In or Hop-Out when hops are allowed. Everything
//! else is dropped.

use indexmap::IndexMap;
use pools::{PoolView, TradeContext};
use router_core::{DisabledTokens, PoolId, TokenAddress};
use serde::{Deserialize, Serialize};

use crate::normalizer::{contains_pair, contains_token, normalize_token_set, TokenSet};

/// Role a pool plays for one request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PoolRole {
    /// Holds both tokenIn and tokenOut
    Direct,
    /// Holds tokenIn but not tokenOut
    HopIn,
    /// Holds tokenOut but not tokenIn
    HopOut,
}

impl PoolRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Direct => "direct",
            Self::HopIn => "hopIn",
            Self::HopOut => "hopOut",
        }
    }
}

/// A pool paired with the role it was given for this request.
///
/// Only the classifier creates these, so the role is fixed once assigned.
#[derive(Debug, Clone)]
pub struct ClassifiedPool {
    view: PoolView,
    role: PoolRole,
    token_set: TokenSet,
    trade_context: Option<TradeContext>,
}

impl ClassifiedPool {
    pub fn id(&self) -> &PoolId {
        self.view.id()
    }

    pub fn view(&self) -> &PoolView {
        &self.view
    }

    pub fn role(&self) -> PoolRole {
        self.role
    }

    /// Normalized token set the role was decided on
    pub fn token_set(&self) -> &TokenSet {
        &self.token_set
    }

    /// Pair data derived for the trade this pool was classified or selected for
    pub fn trade_context(&self) -> Option<&TradeContext> {
        self.trade_context.as_ref()
    }

    pub(crate) fn with_trade_context(mut self, context: TradeContext) -> Self {
        self.trade_context = Some(context);
        self
    }
}

/// Classified pools keyed by id, in input order
pub type ClassifiedPoolSet = IndexMap<PoolId, ClassifiedPool>;

/// Output of classifying a whole pool universe
#[derive(Debug, Clone, Default)]
pub struct Classification {
    pub pools: ClassifiedPoolSet,
    /// Tokens reachable from tokenIn through some Hop-In pool
    pub paired_with_token_in: TokenSet,
    /// Tokens reachable from tokenOut through some Hop-Out pool
    pub paired_with_token_out: TokenSet,
}

/// Classify one pool; `None` means Excluded
pub fn classify_pool(
    view: PoolView,
    token_in: &TokenAddress,
    token_out: &TokenAddress,
    allow_hops: bool,
    disabled: &DisabledTokens,
) -> Option<ClassifiedPool> {
    let token_set = normalize_token_set(&view, disabled);

    if contains_pair(&token_set, token_in, token_out) {
        // Direct pools get their pair data up front
        return match view.derive_trade_context(token_in, token_out) {
            Ok(context) => Some(ClassifiedPool {
                view,
                role: PoolRole::Direct,
                token_set,
                trade_context: Some(context),
            }),
            Err(e) => {
                if e.is_malformed_input() {
                    tracing::warn!("Skipping direct pool {}: {}", view.id(), e);
                } else {
                    tracing::debug!("Skipping direct pool {}: {}", view.id(), e);
                }
                None
            }
        };
    }

    if !allow_hops {
        return None;
    }

    let has_in = contains_token(&token_set, token_in);
    let has_out = contains_token(&token_set, token_out);
    let role = match (has_in, has_out) {
        (true, false) => PoolRole::HopIn,
        (false, true) => PoolRole::HopOut,
        _ => return None,
    };

    Some(ClassifiedPool {
        view,
        role,
        token_set,
        trade_context: None,
    })
}

/// Classify every pool and collect the tokens pairable with each side
pub fn classify_all<I>(
    views: I,
    token_in: &TokenAddress,
    token_out: &TokenAddress,
    max_pools: usize,
    disabled: &DisabledTokens,
) -> Classification
where
    I: IntoIterator<Item = PoolView>,
{
    let allow_hops = max_pools > 1;

    let classification = views
        .into_iter()
        .filter_map(|view| classify_pool(view, token_in, token_out, allow_hops, disabled))
        .fold(Classification::default(), |mut acc, pool| {
            match pool.role {
                PoolRole::HopIn => acc
                    .paired_with_token_in
                    .extend(pool.token_set.iter().cloned()),
                PoolRole::HopOut => acc
                    .paired_with_token_out
                    .extend(pool.token_set.iter().cloned()),
                PoolRole::Direct => {}
            }
            acc.pools.insert(pool.id().clone(), pool);
            acc
        });

    tracing::debug!(
        "Classified {} pools for {} -> {} ({} paired with in, {} paired with out)",
        classification.pools.len(),
        token_in,
        token_out,
        classification.paired_with_token_in.len(),
        classification.paired_with_token_out.len()
    );

    classification
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::weighted_pool;

    fn classify(views: Vec<PoolView>, max_pools: usize, disabled: &DisabledTokens) -> Classification {
        classify_all(views, &"0xin".into(), &"0xout".into(), max_pools, disabled)
    }

    #[test]
    fn test_direct_pool_gets_trade_context() {
        let pool = classify_pool(
            weighted_pool("0xd", &["0xin", "0xout"]),
            &"0xin".into(),
            &"0xout".into(),
            true,
            &DisabledTokens::default(),
        )
        .unwrap();

        assert_eq!(pool.role(), PoolRole::Direct);
        let context = pool.trade_context().unwrap();
        assert_eq!(context.token_in().as_str(), "0xin");
        assert_eq!(context.token_out().as_str(), "0xout");
    }

    #[test]
    fn test_direct_takes_precedence_over_hops() {
        let result = classify(
            vec![weighted_pool("0xd", &["0xin", "0xh", "0xout"])],
            4,
            &DisabledTokens::default(),
        );

        assert_eq!(result.pools.len(), 1);
        assert_eq!(result.pools[0].role(), PoolRole::Direct);
        assert!(result.paired_with_token_in.is_empty());
        assert!(result.paired_with_token_out.is_empty());
    }

    #[test]
    fn test_hop_roles_and_paired_tokens() {
        let result = classify(
            vec![
                weighted_pool("0xa", &["0xin", "0xh"]),
                weighted_pool("0xb", &["0xh", "0xout"]),
                weighted_pool("0xc", &["0xother", "0xh"]),
            ],
            4,
            &DisabledTokens::default(),
        );

        assert_eq!(result.pools.len(), 2);
        assert_eq!(result.pools[&PoolId::new("0xa")].role(), PoolRole::HopIn);
        assert_eq!(result.pools[&PoolId::new("0xb")].role(), PoolRole::HopOut);
        assert!(!result.pools.contains_key(&PoolId::new("0xc")));

        let paired_in: Vec<&str> = result.paired_with_token_in.iter().map(|t| t.as_str()).collect();
        assert_eq!(paired_in, vec!["0xin", "0xh", "0xa"]);
        let paired_out: Vec<&str> = result.paired_with_token_out.iter().map(|t| t.as_str()).collect();
        assert_eq!(paired_out, vec!["0xh", "0xout", "0xb"]);

        assert!(result.pools.values().all(|p| p.trade_context().is_none()));
    }

    #[test]
    fn test_single_pool_limit_skips_hops() {
        let result = classify(
            vec![
                weighted_pool("0xa", &["0xin", "0xh"]),
                weighted_pool("0xb", &["0xh", "0xout"]),
                weighted_pool("0xd", &["0xin", "0xout"]),
            ],
            1,
            &DisabledTokens::default(),
        );

        assert_eq!(result.pools.len(), 1);
        assert_eq!(result.pools.values().filter(|p| p.role() == PoolRole::Direct).count(), 1);
        assert!(result.paired_with_token_in.is_empty());
    }

    #[test]
    fn test_disabled_token_breaks_direct_match() {
        let disabled = DisabledTokens::from_addresses([TokenAddress::new("0xOUT")]);
        let result = classify(vec![weighted_pool("0xd", &["0xin", "0xout"])], 4, &disabled);

        // 0xout is gone from the set, so only tokenIn remains
        assert_eq!(result.pools[0].role(), PoolRole::HopIn);
        assert!(!result.paired_with_token_in.contains(&TokenAddress::new("0xout")));
    }

    #[test]
    fn test_unknown_tokens_yield_empty_classification() {
        let result = classify(
            vec![weighted_pool("0xa", &["0xx", "0xy"])],
            4,
            &DisabledTokens::default(),
        );
        assert!(result.pools.is_empty());
    }

    #[test]
    fn test_checksummed_request_matches_lowercase_pool() {
        let pool = classify_pool(
            weighted_pool("0xd", &["0xabc", "0xdef"]),
            &"0xABC".into(),
            &"0xDEF".into(),
            true,
            &DisabledTokens::default(),
        )
        .unwrap();
        assert_eq!(pool.role(), PoolRole::Direct);
    }

    #[test]
    fn test_share_token_counts_as_pool_token() {
        // tokenOut is the pool's own share token: joining is a direct trade
        let pool = classify_pool(
            weighted_pool("0xout", &["0xin", "0xb"]),
            &"0xin".into(),
            &"0xout".into(),
            true,
            &DisabledTokens::default(),
        )
        .unwrap();
        assert_eq!(pool.role(), PoolRole::Direct);
        assert_eq!(
            pool.trade_context().unwrap().pair_type(),
            pools::PairType::TokenToBpt
        );
    }
}
