use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::api::MarketApi;
use crate::config::AppConfig;
use crate::display;
use crate::query::start_market_data_service;

#[derive(Args, Clone)]
pub struct PortfolioArgs {
    /// Show a single holding instead of the full portfolio
    #[arg(long)]
    pub symbol: Option<String>,
}

pub struct PortfolioCommand {
    args: PortfolioArgs,
}

impl PortfolioCommand {
    pub fn new(args: PortfolioArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        let api = MarketApi::with_timeout(&config.api_url, config.request_timeout())?;
        let service = start_market_data_service(api.clone(), config.poll_interval());

        if let Some(symbol) = &self.args.symbol {
            let holding = api
                .get_holding(&config.user_id, &symbol.to_uppercase())
                .await?;
            display::render_portfolio(std::slice::from_ref(&holding), None);
            return Ok(());
        }

        let (holdings, summary) = tokio::try_join!(
            service.portfolio(&config.user_id),
            service.portfolio_summary(&config.user_id),
        )?;
        info!(
            "Fetched {} holdings for {}",
            holdings.len(),
            config.user_id
        );

        display::render_portfolio(&holdings, Some(&summary));
        Ok(())
    }
}
