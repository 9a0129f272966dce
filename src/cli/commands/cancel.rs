use anyhow::Result;
use clap::Args;
use tracing::{info, warn};

use crate::api::MarketApi;
use crate::config::AppConfig;
use crate::display;

#[derive(Args, Clone)]
pub struct CancelArgs {
    /// Trade id to cancel
    pub trade_id: i64,

    /// Confirm cancellation
    #[arg(long)]
    pub yes: bool,
}

pub struct CancelCommand {
    args: CancelArgs,
}

impl CancelCommand {
    pub fn new(args: CancelArgs) -> Self {
        Self { args }
    }

    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        if !self.args.yes {
            warn!("Cancellation confirmation required. Use --yes to confirm.");
            return Ok(());
        }

        let api = MarketApi::with_timeout(&config.api_url, config.request_timeout())?;

        info!("Cancelling trade {}", self.args.trade_id);
        api.cancel_trade(self.args.trade_id, &config.user_id).await?;

        // Show the trade's settled status after the cancel
        let trade = api.get_trade(self.args.trade_id).await?;
        display::render_trade_result(&trade);
        Ok(())
    }
}
