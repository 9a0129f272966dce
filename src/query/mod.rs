//! Query cache, polling scheduler, and the market data service actor
//!
//! The framework-style declarative cache of the original dashboard is
//! reimplemented explicitly: a keyed cache map with reference counting,
//! one poll timer per subscribed view, and a publish step that marks
//! dependent views stale after a successful mutation.

pub mod cache;
pub mod key;
pub mod scheduler;
pub mod service;

pub use cache::{CacheEntry, QueryCache, ViewData};
pub use key::ViewKey;
pub use service::{start_market_data_service, MarketDataHandle, MarketDataService};
