//! Trade ticket state machine
//!
//! `Idle -> Submitting -> {Succeeded, Failed}`. A ticket allows one
//! submission in flight; a failure keeps its message until the quantity
//! is edited or the ticket is resubmitted. The displayed order total is
//! quantity times the quoted price; the execution price is the server's.

use rust_decimal::Decimal;

use crate::api::types::{Stock, Trade, TradeRequest, TradeType};
use crate::api::ApiError;
use crate::query::MarketDataHandle;

use super::validate::validate_quantity;

#[derive(Debug, Clone)]
pub enum TicketState {
    Idle,
    Submitting,
    Succeeded(Trade),
    Failed(String),
}

impl TicketState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, TicketState::Submitting)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            TicketState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// One buy/sell form instance for a single stock
#[derive(Debug)]
pub struct TradeTicket {
    user_id: String,
    symbol: String,
    trade_type: TradeType,
    quantity: Decimal,
    state: TicketState,
}

impl TradeTicket {
    pub fn new(
        user_id: impl Into<String>,
        symbol: impl Into<String>,
        trade_type: TradeType,
        quantity: Decimal,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            symbol: symbol.into(),
            trade_type,
            quantity,
            state: TicketState::Idle,
        }
    }

    pub fn state(&self) -> &TicketState {
        &self.state
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn trade_type(&self) -> TradeType {
        self.trade_type
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// Editing the quantity clears a retained failure message
    pub fn set_quantity(&mut self, quantity: Decimal) {
        self.quantity = quantity;
        if matches!(self.state, TicketState::Failed(_)) {
            self.state = TicketState::Idle;
        }
    }

    /// Displayed order total before submission
    pub fn order_total(&self, stock: &Stock) -> Decimal {
        stock.current_price * self.quantity
    }

    /// Validate and build the wire request without sending it
    pub fn request(&self) -> Result<TradeRequest, ApiError> {
        let quantity = validate_quantity(self.quantity)?;
        Ok(TradeRequest {
            user_id: self.user_id.clone(),
            stock_symbol: self.symbol.clone(),
            trade_type: self.trade_type,
            quantity,
        })
    }

    /// Move to `Submitting` unless a submission is already in flight.
    /// Models the disabled submit control of the dashboard form.
    pub fn try_begin(&mut self) -> bool {
        if self.state.is_submitting() {
            return false;
        }
        self.state = TicketState::Submitting;
        true
    }

    /// Validate, submit through the service, and settle the state
    /// machine. Validation failures abort with no request sent.
    pub async fn submit(&mut self, service: &MarketDataHandle) -> &TicketState {
        if !self.try_begin() {
            return &self.state;
        }

        let request = match self.request() {
            Ok(request) => request,
            Err(e) => {
                self.state = TicketState::Failed(e.to_string());
                return &self.state;
            }
        };

        match service.submit_trade(request).await {
            Ok(trade) => self.state = TicketState::Succeeded(trade),
            Err(e) => self.state = TicketState::Failed(e.to_string()),
        }

        &self.state
    }
}
