//! In-process query cache with explicit lifecycle
//!
//! One entry per view key, last-writer-wins on refetch. Reference
//! counting tracks how many active consumers watch a key; releasing the
//! last watcher evicts the entry so nothing serves data for a view
//! nobody is looking at.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::api::types::{Holding, PortfolioSummary, Stock, Trade};

use super::key::ViewKey;

/// Typed payload of a cached view
#[derive(Debug, Clone)]
pub enum ViewData {
    Stocks(Vec<Stock>),
    Stock(Stock),
    Portfolio(Vec<Holding>),
    PortfolioSummary(PortfolioSummary),
    Trades(Vec<Trade>),
}

impl ViewData {
    pub fn into_stocks(self) -> Option<Vec<Stock>> {
        match self {
            ViewData::Stocks(stocks) => Some(stocks),
            _ => None,
        }
    }

    pub fn into_stock(self) -> Option<Stock> {
        match self {
            ViewData::Stock(stock) => Some(stock),
            _ => None,
        }
    }

    pub fn into_portfolio(self) -> Option<Vec<Holding>> {
        match self {
            ViewData::Portfolio(holdings) => Some(holdings),
            _ => None,
        }
    }

    pub fn into_summary(self) -> Option<PortfolioSummary> {
        match self {
            ViewData::PortfolioSummary(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn into_trades(self) -> Option<Vec<Trade>> {
        match self {
            ViewData::Trades(trades) => Some(trades),
            _ => None,
        }
    }
}

/// A cached view value with freshness bookkeeping
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub data: ViewData,
    pub fetched_at: DateTime<Utc>,
    /// A stale entry must be refetched before it is trusted again
    pub stale: bool,
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: DashMap<ViewKey, CacheEntry>,
    watchers: DashMap<ViewKey, usize>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a consumer for a key; returns the new watcher count
    pub fn retain(&self, key: &ViewKey) -> usize {
        let mut count = self.watchers.entry(key.clone()).or_insert(0);
        *count += 1;
        *count
    }

    /// Drop a consumer for a key; the last release evicts the entry.
    /// Returns the remaining watcher count.
    pub fn release(&self, key: &ViewKey) -> usize {
        let remaining = match self.watchers.get_mut(key) {
            Some(mut count) => {
                *count = count.saturating_sub(1);
                *count
            }
            None => 0,
        };
        if remaining == 0 {
            self.watchers.remove(key);
            self.entries.remove(key);
        }
        remaining
    }

    pub fn is_active(&self, key: &ViewKey) -> bool {
        self.watchers.get(key).map(|count| *count > 0).unwrap_or(false)
    }

    pub fn watcher_count(&self, key: &ViewKey) -> usize {
        self.watchers.get(key).map(|count| *count).unwrap_or(0)
    }

    /// Store a fresh value, last-writer-wins
    pub fn store(&self, key: ViewKey, data: ViewData) {
        self.entries.insert(
            key,
            CacheEntry {
                data,
                fetched_at: Utc::now(),
                stale: false,
            },
        );
    }

    /// Store only if the key still has watchers; a refetch that lands
    /// after its view was released is discarded
    pub fn store_if_active(&self, key: &ViewKey, data: ViewData) -> bool {
        if !self.is_active(key) {
            return false;
        }
        self.store(key.clone(), data);
        true
    }

    /// Mark an entry stale without dropping its value
    pub fn mark_stale(&self, key: &ViewKey) {
        if let Some(mut entry) = self.entries.get_mut(key) {
            entry.stale = true;
        }
    }

    pub fn snapshot(&self, key: &ViewKey) -> Option<CacheEntry> {
        self.entries.get(key).map(|entry| entry.clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
