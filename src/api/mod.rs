//! Typed HTTP client for the stock-trading demo backend

pub mod client;
pub mod error;
pub mod types;

pub use client::MarketApi;
pub use error::{ApiError, ApiResult};
