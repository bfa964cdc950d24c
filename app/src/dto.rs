//! Report types printed by the profiler

use route_proposer::{CandidatePath, ClassifiedPool, RouteProposal};
use router_core::TokenAddress;
use serde::{Deserialize, Serialize};

/// A pool used by at least one candidate path
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsedPoolDto {
    pub id: String,
    pub kind: String,
    pub role: String,
}

impl From<&ClassifiedPool> for UsedPoolDto {
    fn from(pool: &ClassifiedPool) -> Self {
        Self {
            id: pool.id().to_string(),
            kind: pool.view().kind().to_string(),
            role: pool.role().as_str().to_string(),
        }
    }
}

/// Candidate paths for one token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalReport {
    pub token_in: TokenAddress,
    pub token_out: TokenAddress,
    /// Taken from the first path; absent when there is no route
    pub token_in_decimals: Option<u8>,
    pub token_out_decimals: Option<u8>,
    pub hop_tokens: Vec<TokenAddress>,
    pub used_pools: Vec<UsedPoolDto>,
    pub paths: Vec<CandidatePath>,
}

impl ProposalReport {
    pub fn new(token_in: TokenAddress, token_out: TokenAddress, proposal: RouteProposal) -> Self {
        let (token_in_decimals, token_out_decimals) = match proposal.paths.first() {
            Some(path) => (
                path.legs
                    .iter()
                    .find(|leg| leg.token_in.matches(&token_in))
                    .map(|leg| leg.token_in_decimals),
                path.legs
                    .iter()
                    .find(|leg| leg.token_out.matches(&token_out))
                    .map(|leg| leg.token_out_decimals),
            ),
            None => (None, None),
        };

        Self {
            token_in_decimals,
            token_out_decimals,
            hop_tokens: proposal.hop_tokens,
            used_pools: proposal.used_pools.values().map(Into::into).collect(),
            paths: proposal.paths,
            token_in,
            token_out,
        }
    }

    /// Report for a pair with no route
    pub fn empty(token_in: TokenAddress, token_out: TokenAddress) -> Self {
        Self::new(token_in, token_out, RouteProposal::default())
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
