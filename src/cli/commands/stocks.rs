use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::api::MarketApi;
use crate::config::AppConfig;
use crate::display;
use crate::query::start_market_data_service;
use crate::views::filter_stocks;

#[derive(Args, Clone)]
pub struct StocksArgs {
    /// Filter by symbol or company name substring (case-insensitive)
    #[arg(long, default_value = "")]
    pub search: String,
}

pub struct StocksCommand {
    args: StocksArgs,
}

impl StocksCommand {
    pub fn new(args: StocksArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        let api = MarketApi::with_timeout(&config.api_url, config.request_timeout())?;
        let service = start_market_data_service(api, config.poll_interval());

        let stocks = service.stocks().await?;
        info!("Fetched {} stocks", stocks.len());

        let filtered = filter_stocks(&stocks, &self.args.search);
        display::render_stocks(&filtered, &self.args.search);
        Ok(())
    }
}
