use anyhow::Result;
use clap::Args;
use rust_decimal::Decimal;
use tracing::info;

use crate::api::MarketApi;
use crate::config::AppConfig;
use crate::display::format_usd;

#[derive(Args, Clone)]
pub struct SetPriceArgs {
    /// Stock symbol (e.g. AAPL)
    pub symbol: String,

    /// New price in USD
    pub price: Decimal,
}

pub struct SetPriceCommand {
    args: SetPriceArgs,
}

impl SetPriceCommand {
    pub fn new(args: SetPriceArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        let api = MarketApi::with_timeout(&config.api_url, config.request_timeout())?;
        let symbol = self.args.symbol.to_uppercase();

        api.update_stock_price(&symbol, self.args.price).await?;
        info!("Price override for {} accepted", symbol);

        let stock = api.get_stock(&symbol).await?;
        println!(
            "{} ({}) now quoted at {}",
            stock.symbol,
            stock.company_name,
            format_usd(stock.current_price)
        );
        Ok(())
    }
}
