//! Pool data for the swap router
//!
//! Raw pool records in the subgraph shape, fail-fast validation of a pool
//! universe, and the weighted / stable views that derive pair data and
//! normalized liquidity for a trade direction.

pub mod record;
pub mod stable;
pub mod view;
pub mod weighted;

// Re-exports
pub use record::{ingest, parse_records, PoolKind, PoolRecord, TokenRecord};
pub use stable::{StablePairData, StablePool};
pub use view::{PairType, PoolView, TradeContext};
pub use weighted::{WeightedPairData, WeightedPool};
