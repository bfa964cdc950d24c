//! Token-set normalization
//!
//! The tradable token set of a pool: its listed tokens plus its own share
//! token, minus every disabled token.

use indexmap::IndexSet;
use pools::PoolView;
use router_core::{DisabledTokens, TokenAddress};

/// Insertion-ordered set of token addresses
pub type TokenSet = IndexSet<TokenAddress>;

/// Build the effective token set of `view` for one request
pub fn normalize_token_set(view: &PoolView, disabled: &DisabledTokens) -> TokenSet {
    view.token_set()
        .into_iter()
        .filter(|token| !disabled.contains(token))
        .collect()
}

/// Exact match, falling back to the fully lowercased address
pub fn contains_token(set: &TokenSet, token: &TokenAddress) -> bool {
    set.contains(token) || set.contains(&token.to_lowercase())
}

/// Both tokens present, either both as given or both lowercased
pub fn contains_pair(set: &TokenSet, token_in: &TokenAddress, token_out: &TokenAddress) -> bool {
    (set.contains(token_in) && set.contains(token_out))
        || (set.contains(&token_in.to_lowercase()) && set.contains(&token_out.to_lowercase()))
}
