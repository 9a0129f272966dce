//! Per-view polling timers
//!
//! Each subscribed view gets its own timer task: tick, refetch, write
//! the cache. A forced refresh (after a dependent mutation) supersedes
//! the timer's next tick instead of waiting for it. Timers for distinct
//! views run independently; there is no ordering between them.
//!
//! Stopping a timer is cooperative: an in-flight request is never
//! aborted, but its result is discarded once the view has no watchers.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::api::{ApiResult, MarketApi};

use super::cache::{QueryCache, ViewData};
use super::key::ViewKey;

struct PollTask {
    refresh: Arc<Notify>,
    cancel: Arc<Notify>,
}

/// Owns one poll task per subscribed view key
pub struct ViewScheduler {
    interval: Duration,
    tasks: HashMap<ViewKey, PollTask>,
}

impl ViewScheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            tasks: HashMap::new(),
        }
    }

    /// Spawn the poll task for a key. The first tick fires immediately,
    /// so subscribing implies an initial fetch.
    pub fn start(&mut self, key: ViewKey, api: MarketApi, cache: Arc<QueryCache>) {
        if self.tasks.contains_key(&key) {
            return;
        }
        debug!("starting poll timer for {} every {:?}", key, self.interval);
        let refresh = Arc::new(Notify::new());
        let cancel = Arc::new(Notify::new());
        tokio::spawn(poll_view(
            key.clone(),
            api,
            cache,
            self.interval,
            refresh.clone(),
            cancel.clone(),
        ));
        self.tasks.insert(key, PollTask { refresh, cancel });
    }

    /// Force an immediate refetch for a running poll task
    pub fn trigger(&self, key: &ViewKey) -> bool {
        match self.tasks.get(key) {
            Some(task) => {
                task.refresh.notify_one();
                true
            }
            None => false,
        }
    }

    /// Stop the poll task for a key, if any
    pub fn stop(&mut self, key: &ViewKey) {
        if let Some(task) = self.tasks.remove(key) {
            debug!("stopping poll timer for {}", key);
            task.cancel.notify_one();
        }
    }

    pub fn stop_all(&mut self) {
        for (key, task) in self.tasks.drain() {
            debug!("stopping poll timer for {}", key);
            task.cancel.notify_one();
        }
    }

    pub fn is_running(&self, key: &ViewKey) -> bool {
        self.tasks.contains_key(key)
    }
}

async fn poll_view(
    key: ViewKey,
    api: MarketApi,
    cache: Arc<QueryCache>,
    interval: Duration,
    refresh: Arc<Notify>,
    cancel: Arc<Notify>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = refresh.notified() => {
                debug!("forced refresh for {}", key);
                // the forced fetch replaces the pending tick
                ticker.reset();
            }
            _ = cancel.notified() => break,
        }

        match fetch_view(&api, &key).await {
            Ok(data) => {
                if !cache.store_if_active(&key, data) {
                    debug!("view {} released mid-flight, result discarded", key);
                }
            }
            // Errors are surfaced, not retried; the next tick refetches
            Err(e) => warn!("refresh failed for {}: {}", key, e),
        }
    }

    debug!("poll timer for {} stopped", key);
}

/// Fetch the backing data for a view key
pub async fn fetch_view(api: &MarketApi, key: &ViewKey) -> ApiResult<ViewData> {
    match key {
        ViewKey::Stocks => Ok(ViewData::Stocks(api.list_stocks().await?)),
        ViewKey::Stock(symbol) => Ok(ViewData::Stock(api.get_stock(symbol).await?)),
        ViewKey::Portfolio(user) => Ok(ViewData::Portfolio(api.get_portfolio(user).await?)),
        ViewKey::PortfolioSummary(user) => Ok(ViewData::PortfolioSummary(
            api.get_portfolio_summary(user).await?,
        )),
        ViewKey::Trades(user) => Ok(ViewData::Trades(api.list_trades(user).await?)),
    }
}
