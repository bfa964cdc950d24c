//! router-core: Shared types, errors, and request configuration
//!
//! Token and pool identifiers, the error taxonomy, and the routing request
//! configuration used by every crate in the workspace.

pub mod config;
pub mod errors;
pub mod types;

pub use config::*;
pub use errors::*;
pub use types::*;
