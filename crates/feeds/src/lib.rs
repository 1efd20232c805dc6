//! Balance feeds from the chain's JSON-RPC node.
//!
//! ## Architecture
//!
//! - `rpc` - `suix_getBalance` client and response parsing
//! - `fetcher` - `BalanceFetcher` contract consumed by the monitor loop
//! - `error` - `FeedError` covering every fetch failure mode

pub mod error;
pub mod fetcher;
pub mod rpc;

pub use error::*;
pub use fetcher::*;
pub use rpc::*;
