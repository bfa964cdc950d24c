//! Hop-token resolution

use router_core::TokenAddress;

use crate::normalizer::TokenSet;

/// Tokens pairable with both tokenIn and tokenOut.
///
/// Order follows `paired_with_token_in`, which is the order the hop paths are
/// emitted in.
pub fn resolve_hop_tokens(
    paired_with_token_in: &TokenSet,
    paired_with_token_out: &TokenSet,
) -> Vec<TokenAddress> {
    paired_with_token_in
        .intersection(paired_with_token_out)
        .cloned()
        .collect()
}
