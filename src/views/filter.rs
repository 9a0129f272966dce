//! Trade history filter
//!
//! A single filter slot: either a trade-type filter or a status filter,
//! never both. The dashboard's "Completed" label selects executed
//! trades.

use clap::ValueEnum;

use crate::api::types::{Trade, TradeStatus, TradeType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TradeFilter {
    /// Everything, order preserved
    #[default]
    All,
    /// Buy orders only
    Buy,
    /// Sell orders only
    Sell,
    /// Trades still awaiting execution
    Pending,
    /// Executed trades
    Completed,
}

impl TradeFilter {
    pub fn matches(&self, trade: &Trade) -> bool {
        match self {
            TradeFilter::All => true,
            TradeFilter::Buy => trade.trade_type == TradeType::Buy,
            TradeFilter::Sell => trade.trade_type == TradeType::Sell,
            TradeFilter::Pending => trade.status == TradeStatus::Pending,
            TradeFilter::Completed => trade.status == TradeStatus::Executed,
        }
    }

    /// Apply the filter, preserving input order
    pub fn apply<'a>(&self, trades: &'a [Trade]) -> Vec<&'a Trade> {
        trades.iter().filter(|trade| self.matches(trade)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn trade(id: i64, trade_type: TradeType, status: TradeStatus) -> Trade {
        Trade {
            id,
            user_id: "u1".to_string(),
            stock_symbol: "AAPL".to_string(),
            trade_type,
            quantity: 10,
            price: dec!(150),
            timestamp: Utc::now(),
            status,
            status_message: None,
            total_value: dec!(1500),
        }
    }

    fn sample() -> Vec<Trade> {
        vec![
            trade(1, TradeType::Buy, TradeStatus::Executed),
            trade(2, TradeType::Sell, TradeStatus::Pending),
            trade(3, TradeType::Buy, TradeStatus::Pending),
            trade(4, TradeType::Sell, TradeStatus::Cancelled),
        ]
    }

    #[test]
    fn test_all_passes_everything_in_order() {
        let trades = sample();
        let ids: Vec<i64> = TradeFilter::All.apply(&trades).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_buy_matches_trade_type_only() {
        let trades = sample();
        let ids: Vec<i64> = TradeFilter::Buy.apply(&trades).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_pending_matches_status_only() {
        let trades = sample();
        let ids: Vec<i64> = TradeFilter::Pending
            .apply(&trades)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_completed_selects_executed() {
        let trades = sample();
        let ids: Vec<i64> = TradeFilter::Completed
            .apply(&trades)
            .iter()
            .map(|t| t.id)
            .collect();
        assert_eq!(ids, vec![1]);
    }
}
