//! Wire types mirrored from the backend REST API
//!
//! All entities are created and mutated by the backend; the client only
//! deserializes, caches, and displays them. Field names follow the
//! backend's camelCase JSON.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single listed instrument
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub symbol: String,
    pub company_name: String,
    pub current_price: Decimal,
    /// Day change, only present once the backend has two prices
    pub change_percentage: Option<Decimal>,
    pub last_updated: DateTime<Utc>,
    pub open_price: Option<Decimal>,
    pub high_price: Option<Decimal>,
    pub low_price: Option<Decimal>,
    pub volume: Option<u64>,
}

/// One portfolio row: the user's position in a single stock.
///
/// `total_value`, `total_cost`, `gain_loss` and the percentage are
/// computed server-side; the client displays them verbatim and never
/// recomputes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: i64,
    pub user_id: String,
    pub stock_symbol: String,
    pub quantity: u32,
    pub average_purchase_price: Decimal,
    pub current_price: Decimal,
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub gain_loss: Decimal,
    pub gain_loss_percentage: Decimal,
    pub last_updated: DateTime<Utc>,
}

/// Aggregate of all holdings for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: Decimal,
    pub total_cost: Decimal,
    pub total_gain_loss: Decimal,
    pub total_gain_loss_percentage: Decimal,
    pub total_positions: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeType {
    Buy,
    Sell,
}

impl fmt::Display for TradeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeType::Buy => write!(f, "BUY"),
            TradeType::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Pending,
    Executed,
    Failed,
    Cancelled,
}

impl fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeStatus::Pending => write!(f, "PENDING"),
            TradeStatus::Executed => write!(f, "EXECUTED"),
            TradeStatus::Failed => write!(f, "FAILED"),
            TradeStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// A single buy/sell execution record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: i64,
    pub user_id: String,
    pub stock_symbol: String,
    pub trade_type: TradeType,
    pub quantity: u32,
    /// Execution price per share, set by the backend
    pub price: Decimal,
    pub timestamp: DateTime<Utc>,
    pub status: TradeStatus,
    pub status_message: Option<String>,
    pub total_value: Decimal,
}

/// The only entity the client constructs and sends
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeRequest {
    pub user_id: String,
    pub stock_symbol: String,
    pub trade_type: TradeType,
    pub quantity: u32,
}

/// Body for the admin price override endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePriceRequest {
    pub new_price: Decimal,
}

/// Error payload shape returned by the backend on failures
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
}
