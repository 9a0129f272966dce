use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::api::MarketApi;
use crate::config::AppConfig;
use crate::display;
use crate::query::start_market_data_service;
use crate::views::TradeFilter;

#[derive(Args, Clone)]
pub struct TradesArgs {
    /// Filter by trade type or status
    #[arg(long, value_enum, default_value = "all")]
    pub filter: TradeFilter,

    /// Restrict the log to a single stock
    #[arg(long)]
    pub symbol: Option<String>,
}

pub struct TradesCommand {
    args: TradesArgs,
}

impl TradesCommand {
    pub fn new(args: TradesArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        let api = MarketApi::with_timeout(&config.api_url, config.request_timeout())?;

        let trades = match &self.args.symbol {
            Some(symbol) => {
                api.list_stock_trades(&config.user_id, &symbol.to_uppercase())
                    .await?
            }
            None => {
                let service = start_market_data_service(api, config.poll_interval());
                service.trades(&config.user_id).await?
            }
        };
        info!("Fetched {} trades for {}", trades.len(), config.user_id);

        let filtered = self.args.filter.apply(&trades);
        display::render_trades(&filtered, self.args.filter);
        Ok(())
    }
}
