use anyhow::{anyhow, Result};
use clap::Args;
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::api::types::TradeType;
use crate::api::MarketApi;
use crate::config::AppConfig;
use crate::display;
use crate::query::start_market_data_service;
use crate::trade::{TicketState, TradeTicket};

#[derive(Args, Clone)]
pub struct OrderArgs {
    /// Stock symbol (e.g. AAPL)
    pub symbol: String,

    /// Number of shares (whole number, at most 10,000)
    pub quantity: Decimal,

    /// Confirm order placement
    #[arg(long)]
    pub yes: bool,

    /// Pre-check the order against the backend without executing it
    #[arg(long)]
    pub check: bool,
}

/// Shared implementation for the buy and sell subcommands; the only
/// difference is which trade endpoint the request routes to.
pub struct OrderCommand {
    args: OrderArgs,
    trade_type: TradeType,
}

impl OrderCommand {
    pub fn buy(args: OrderArgs) -> Self {
        Self {
            args,
            trade_type: TradeType::Buy,
        }
    }

    pub fn sell(args: OrderArgs) -> Self {
        Self {
            args,
            trade_type: TradeType::Sell,
        }
    }

    pub async fn execute(&self, config: &AppConfig) -> Result<()> {
        let api = MarketApi::with_timeout(&config.api_url, config.request_timeout())?;
        let service = start_market_data_service(api.clone(), config.poll_interval());

        let mut ticket = TradeTicket::new(
            &config.user_id,
            self.args.symbol.to_uppercase(),
            self.trade_type,
            self.args.quantity,
        );

        // Price the pending order off the live quote
        let stock = service.stock(ticket.symbol()).await?;
        display::render_order_summary(&stock, ticket.quantity(), ticket.order_total(&stock));

        // Client-side validation; nothing is sent when it fails
        let request = ticket.request()?;

        if self.trade_type == TradeType::Sell {
            let sufficient = api
                .check_sufficient_shares(&config.user_id, ticket.symbol(), request.quantity)
                .await?;
            if !sufficient {
                return Err(anyhow!(
                    "Insufficient shares: you do not hold {} x{}",
                    request.quantity,
                    ticket.symbol()
                ));
            }
        }

        if self.args.check {
            let valid = api.validate_trade(&request).await?;
            if valid {
                println!("Backend validation passed; order not executed (--check).");
            } else {
                println!("Backend validation rejected this order.");
            }
            return Ok(());
        }

        if !self.args.yes {
            warn!("Order confirmation required. Use --yes to confirm.");
            return Ok(());
        }

        info!(
            "Executing {} {} x{}",
            self.trade_type,
            ticket.symbol(),
            request.quantity
        );

        match ticket.submit(&service).await {
            TicketState::Succeeded(trade) => {
                display::render_trade_result(trade);
                Ok(())
            }
            TicketState::Failed(message) => Err(anyhow!("{}", message)),
            // submit always settles into Succeeded or Failed
            state => Err(anyhow!("unexpected ticket state: {:?}", state)),
        }
    }
}
