//! Market data service actor with channel-based communication
//!
//! The service owns the query cache and the per-view poll timers and is
//! the only writer of subscription state. Reads and subscriptions are
//! commands over an mpsc channel with oneshot replies; fetches run on
//! their own tasks so a slow endpoint never blocks the actor.

use anyhow::{anyhow, Result};
use tokio::sync::{mpsc, oneshot};
use tracing::info;

use crate::api::types::{Holding, PortfolioSummary, Stock, Trade, TradeRequest};
use crate::api::{ApiResult, MarketApi};

use super::cache::{CacheEntry, QueryCache, ViewData};
use super::key::ViewKey;
use super::scheduler::{fetch_view, ViewScheduler};

use std::sync::Arc;
use std::time::Duration;

/// Market data service commands
#[derive(Debug)]
pub enum ServiceCommand {
    /// Retain a view; the first watcher starts its poll timer
    Subscribe {
        key: ViewKey,
        response: oneshot::Sender<()>,
    },
    /// Release a view; the last watcher stops the timer and evicts
    Release {
        key: ViewKey,
        response: oneshot::Sender<()>,
    },
    /// Current cached value and staleness, if any
    Snapshot {
        key: ViewKey,
        response: oneshot::Sender<Option<CacheEntry>>,
    },
    /// One-shot fetch through the API, cache updated on success
    Fetch {
        key: ViewKey,
        response: oneshot::Sender<ApiResult<ViewData>>,
    },
    /// Force an immediate refetch for a subscribed view
    Refresh {
        key: ViewKey,
        response: oneshot::Sender<bool>,
    },
    /// Execute a trade and invalidate dependent views on success
    SubmitTrade {
        request: TradeRequest,
        response: oneshot::Sender<ApiResult<Trade>>,
    },
}

/// Market data service actor
pub struct MarketDataService {
    api: MarketApi,
    cache: Arc<QueryCache>,
    scheduler: ViewScheduler,
    command_rx: mpsc::Receiver<ServiceCommand>,
}

impl MarketDataService {
    pub fn new(
        api: MarketApi,
        poll_interval: Duration,
        command_rx: mpsc::Receiver<ServiceCommand>,
    ) -> Self {
        Self {
            api,
            cache: Arc::new(QueryCache::new()),
            scheduler: ViewScheduler::new(poll_interval),
            command_rx,
        }
    }

    /// Run the actor until every handle is dropped
    pub async fn run(mut self) {
        info!("Starting market data service against {}", self.api.base_url());

        while let Some(command) = self.command_rx.recv().await {
            self.handle_command(command).await;
        }

        self.scheduler.stop_all();
        info!("Market data service stopped");
    }

    async fn handle_command(&mut self, command: ServiceCommand) {
        match command {
            ServiceCommand::Subscribe { key, response } => {
                let count = self.cache.retain(&key);
                if count == 1 {
                    self.scheduler
                        .start(key.clone(), self.api.clone(), self.cache.clone());
                }
                let _ = response.send(());
            }

            ServiceCommand::Release { key, response } => {
                let remaining = self.cache.release(&key);
                if remaining == 0 {
                    self.scheduler.stop(&key);
                }
                let _ = response.send(());
            }

            ServiceCommand::Snapshot { key, response } => {
                let _ = response.send(self.cache.snapshot(&key));
            }

            ServiceCommand::Fetch { key, response } => {
                // concurrent with other commands and poll timers
                let api = self.api.clone();
                let cache = self.cache.clone();
                tokio::spawn(async move {
                    let result = fetch_view(&api, &key).await;
                    if let Ok(data) = &result {
                        cache.store(key.clone(), data.clone());
                    }
                    let _ = response.send(result);
                });
            }

            ServiceCommand::Refresh { key, response } => {
                let _ = response.send(self.scheduler.trigger(&key));
            }

            ServiceCommand::SubmitTrade { request, response } => {
                let result = self.submit_trade(request).await;
                let _ = response.send(result);
            }
        }
    }

    /// Execute a trade; on success every dependent read view is marked
    /// stale and, where subscribed, refetched immediately. The publish
    /// step runs before the trade result is returned, so no dependent
    /// view can be read fresh-but-stale afterwards.
    async fn submit_trade(&mut self, request: TradeRequest) -> ApiResult<Trade> {
        info!(
            "Submitting {} {} x{} for {}",
            request.trade_type, request.stock_symbol, request.quantity, request.user_id
        );

        let trade = self.api.execute_trade(&request).await?;
        info!(trade_id = trade.id, status = %trade.status, "Trade accepted");

        for key in ViewKey::trade_dependents(&request.user_id) {
            self.cache.mark_stale(&key);
            if self.cache.is_active(&key) {
                self.scheduler.trigger(&key);
            }
        }

        Ok(trade)
    }
}

/// Handle for talking to a running market data service
#[derive(Clone)]
pub struct MarketDataHandle {
    sender: mpsc::Sender<ServiceCommand>,
}

impl MarketDataHandle {
    pub fn new(sender: mpsc::Sender<ServiceCommand>) -> Self {
        Self { sender }
    }

    pub async fn subscribe(&self, key: ViewKey) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ServiceCommand::Subscribe { key, response: tx })
            .await?;
        Ok(rx.await?)
    }

    pub async fn release(&self, key: ViewKey) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ServiceCommand::Release { key, response: tx })
            .await?;
        Ok(rx.await?)
    }

    pub async fn snapshot(&self, key: ViewKey) -> Result<Option<CacheEntry>> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ServiceCommand::Snapshot { key, response: tx })
            .await?;
        Ok(rx.await?)
    }

    pub async fn fetch(&self, key: ViewKey) -> Result<ViewData> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ServiceCommand::Fetch { key, response: tx })
            .await?;
        Ok(rx.await??)
    }

    pub async fn refresh(&self, key: ViewKey) -> Result<bool> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ServiceCommand::Refresh { key, response: tx })
            .await?;
        Ok(rx.await?)
    }

    pub async fn submit_trade(&self, request: TradeRequest) -> Result<Trade> {
        let (tx, rx) = oneshot::channel();
        self.sender
            .send(ServiceCommand::SubmitTrade {
                request,
                response: tx,
            })
            .await?;
        Ok(rx.await??)
    }

    // ---- typed one-shot reads ----

    pub async fn stocks(&self) -> Result<Vec<Stock>> {
        self.fetch(ViewKey::Stocks)
            .await?
            .into_stocks()
            .ok_or_else(|| anyhow!("unexpected payload for stocks view"))
    }

    pub async fn stock(&self, symbol: &str) -> Result<Stock> {
        self.fetch(ViewKey::Stock(symbol.to_string()))
            .await?
            .into_stock()
            .ok_or_else(|| anyhow!("unexpected payload for stock view"))
    }

    pub async fn portfolio(&self, user_id: &str) -> Result<Vec<Holding>> {
        self.fetch(ViewKey::Portfolio(user_id.to_string()))
            .await?
            .into_portfolio()
            .ok_or_else(|| anyhow!("unexpected payload for portfolio view"))
    }

    pub async fn portfolio_summary(&self, user_id: &str) -> Result<PortfolioSummary> {
        self.fetch(ViewKey::PortfolioSummary(user_id.to_string()))
            .await?
            .into_summary()
            .ok_or_else(|| anyhow!("unexpected payload for portfolio summary view"))
    }

    pub async fn trades(&self, user_id: &str) -> Result<Vec<Trade>> {
        self.fetch(ViewKey::Trades(user_id.to_string()))
            .await?
            .into_trades()
            .ok_or_else(|| anyhow!("unexpected payload for trades view"))
    }
}

/// Start the market data service and return a handle to it
pub fn start_market_data_service(api: MarketApi, poll_interval: Duration) -> MarketDataHandle {
    let (command_tx, command_rx) = mpsc::channel(100);
    let handle = MarketDataHandle::new(command_tx);

    let service = MarketDataService::new(api, poll_interval, command_rx);
    tokio::spawn(async move {
        service.run().await;
    });

    handle
}
