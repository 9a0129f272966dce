use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Args, ValueEnum};
use futures::future::try_join_all;
use owo_colors::OwoColorize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::api::MarketApi;
use crate::config::AppConfig;
use crate::display;
use crate::query::{CacheEntry, ViewData, ViewKey};
use crate::query::start_market_data_service;
use crate::views::TradeFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WatchView {
    Stocks,
    Portfolio,
    Trades,
    #[default]
    All,
}

#[derive(Args, Clone)]
pub struct WatchArgs {
    /// Which view(s) to keep on screen
    #[arg(long, value_enum, default_value = "all")]
    pub view: WatchView,
}

pub struct WatchCommand {
    args: WatchArgs,
}

impl WatchCommand {
    pub fn new(args: WatchArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        let api = MarketApi::with_timeout(&config.api_url, config.request_timeout())?;
        let service = start_market_data_service(api, config.poll_interval());

        let keys = self.keys(&config.user_id);
        try_join_all(keys.iter().cloned().map(|key| service.subscribe(key))).await?;
        info!("Watching {} views", keys.len());

        let running = Arc::new(AtomicBool::new(true));
        {
            let running = running.clone();
            ctrlc::set_handler(move || running.store(false, Ordering::SeqCst))?;
        }

        // Repaint whenever any subscribed view lands a newer fetch
        let mut last_paint: Option<DateTime<Utc>> = None;
        while running.load(Ordering::SeqCst) {
            let mut entries = Vec::new();
            let mut newest: Option<DateTime<Utc>> = None;

            for key in &keys {
                if let Some(entry) = service.snapshot(key.clone()).await? {
                    newest = Some(match newest {
                        Some(t) => t.max(entry.fetched_at),
                        None => entry.fetched_at,
                    });
                    entries.push(entry);
                }
            }

            if newest.is_some() && newest != last_paint {
                paint(config, &entries);
                last_paint = newest;
            }

            tokio::time::sleep(Duration::from_millis(500)).await;
        }

        // Releasing drops the poll timers and evicts the cache entries
        for key in keys {
            service.release(key).await?;
        }
        println!("\nStopped.");
        Ok(())
    }

    fn keys(&self, user_id: &str) -> Vec<ViewKey> {
        match self.args.view {
            WatchView::Stocks => vec![ViewKey::Stocks],
            WatchView::Portfolio => vec![
                ViewKey::Portfolio(user_id.to_string()),
                ViewKey::PortfolioSummary(user_id.to_string()),
            ],
            WatchView::Trades => vec![ViewKey::Trades(user_id.to_string())],
            WatchView::All => vec![
                ViewKey::Stocks,
                ViewKey::Portfolio(user_id.to_string()),
                ViewKey::PortfolioSummary(user_id.to_string()),
                ViewKey::Trades(user_id.to_string()),
            ],
        }
    }
}

fn paint(config: &AppConfig, entries: &[CacheEntry]) {
    // Clear screen and move the cursor home
    print!("\x1B[2J\x1B[1;1H");

    println!("{}", "STOCK TRADING DASHBOARD".bright_white().bold());
    println!(
        "user: {}   backend: {}   refresh: {}s   {}",
        config.user_id.bright_cyan(),
        config.api_url,
        config.poll_interval_secs,
        "Ctrl-C to exit".bright_black()
    );
    println!();

    let summary = entries
        .iter()
        .find_map(|entry| entry.data.clone().into_summary());

    for entry in entries {
        match &entry.data {
            ViewData::Stocks(stocks) => {
                let refs: Vec<_> = stocks.iter().collect();
                display::render_stocks(&refs, "");
            }
            ViewData::Portfolio(holdings) => {
                display::render_portfolio(holdings, summary.as_ref());
            }
            ViewData::Trades(trades) => {
                let refs: Vec<_> = trades.iter().collect();
                display::render_trades(&refs, TradeFilter::All);
            }
            // the summary is folded into the portfolio section above
            ViewData::PortfolioSummary(_) | ViewData::Stock(_) => continue,
        }
        if entry.stale {
            println!("{}", "(refreshing...)".bright_black());
        }
        println!();
    }
}
