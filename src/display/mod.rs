//! Terminal rendering for the three dashboard views
//!
//! Tables carry plain text so column widths stay stable; color is
//! applied to standalone header and summary lines only.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use owo_colors::OwoColorize;
use rust_decimal::Decimal;

use crate::api::types::{Holding, PortfolioSummary, Stock, Trade, TradeType};
use crate::views::TradeFilter;

/// Format a USD amount with thousands separators, e.g. `$1,500.00`
pub fn format_usd(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let sign = if rounded.is_sign_negative() { "-" } else { "" };
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let int_grouped: String = grouped.chars().rev().collect();

    format!("{}${}.{}", sign, int_grouped, frac_part)
}

/// Signed percentage, `--` when the backend has no value yet
pub fn format_percentage(value: Option<Decimal>) -> String {
    match value {
        Some(pct) => {
            let sign = if pct.is_sign_negative() { "" } else { "+" };
            format!("{}{:.2}%", sign, pct.round_dp(2))
        }
        None => "--".to_string(),
    }
}

fn base_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Market data view: filtered stock list
pub fn render_stocks(stocks: &[&Stock], search: &str) {
    println!("{}", "Market Data".bright_white().bold());

    if stocks.is_empty() {
        if search.is_empty() {
            println!("{}", "No stocks available.".bright_black());
        } else {
            println!(
                "{}",
                format!("No stocks found matching \"{}\"", search).bright_black()
            );
        }
        return;
    }

    let mut table = base_table();
    table.set_header(vec!["Symbol", "Company", "Price", "Change", "Volume", "Updated"]);
    for stock in stocks {
        table.add_row(vec![
            stock.symbol.clone(),
            stock.company_name.clone(),
            format_usd(stock.current_price),
            format_percentage(stock.change_percentage),
            stock
                .volume
                .map(|v| v.to_string())
                .unwrap_or_else(|| "--".to_string()),
            stock.last_updated.format("%H:%M:%S").to_string(),
        ]);
    }
    println!("{table}");
}

/// Portfolio view: summary cards plus the holdings table
pub fn render_portfolio(holdings: &[Holding], summary: Option<&PortfolioSummary>) {
    println!("{}", "Portfolio".bright_white().bold());

    if let Some(summary) = summary {
        let gain = format!(
            "{} ({})",
            format_usd(summary.total_gain_loss),
            format_percentage(Some(summary.total_gain_loss_percentage))
        );
        let gain_line = if summary.total_gain_loss.is_sign_negative() {
            format!("{}", gain.red())
        } else {
            format!("{}", gain.green())
        };
        println!(
            "Total Value: {}   Total Cost: {}   Gain/Loss: {}   Positions: {}",
            format_usd(summary.total_value).bright_cyan(),
            format_usd(summary.total_cost),
            gain_line,
            summary.total_positions
        );
    }

    if holdings.is_empty() {
        println!(
            "{}",
            "No holdings yet. Start trading to see your portfolio here.".bright_black()
        );
        return;
    }

    let mut table = base_table();
    table.set_header(vec![
        "Symbol",
        "Quantity",
        "Avg Price",
        "Current",
        "Value",
        "Gain/Loss",
        "Gain %",
    ]);
    for holding in holdings {
        table.add_row(vec![
            holding.stock_symbol.clone(),
            holding.quantity.to_string(),
            format_usd(holding.average_purchase_price),
            format_usd(holding.current_price),
            format_usd(holding.total_value),
            format_usd(holding.gain_loss),
            format_percentage(Some(holding.gain_loss_percentage)),
        ]);
    }
    println!("{table}");
}

/// Trade history view with footer counts for the filtered set
pub fn render_trades(trades: &[&Trade], filter: TradeFilter) {
    println!("{}", "Trade History".bright_white().bold());

    if trades.is_empty() {
        println!("{}", "No trades found for the selected filter.".bright_black());
        return;
    }

    let mut table = base_table();
    table.set_header(vec![
        "Id", "Type", "Symbol", "Quantity", "Price", "Total", "Status", "Time",
    ]);
    for trade in trades {
        table.add_row(vec![
            trade.id.to_string(),
            trade.trade_type.to_string(),
            trade.stock_symbol.clone(),
            trade.quantity.to_string(),
            format_usd(trade.price),
            format_usd(trade.total_value),
            trade.status.to_string(),
            trade.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }
    println!("{table}");

    let buys = trades
        .iter()
        .filter(|t| t.trade_type == TradeType::Buy)
        .count();
    let sells = trades
        .iter()
        .filter(|t| t.trade_type == TradeType::Sell)
        .count();
    println!(
        "Total Trades: {}   Buy Orders: {}   Sell Orders: {}   (filter: {:?})",
        trades.len(),
        buys,
        sells,
        filter
    );
}

/// Order summary shown before a trade is submitted
pub fn render_order_summary(stock: &Stock, quantity: Decimal, total: Decimal) {
    println!("{}", "Order Summary".bright_white().bold());
    println!("  {}  {}", stock.symbol.bright_cyan(), stock.company_name);
    println!("  Shares:          {}", quantity);
    println!("  Price per share: {}", format_usd(stock.current_price));
    println!("  Total:           {}", format_usd(total).bold());
}

/// Result line for an executed or cancelled trade
pub fn render_trade_result(trade: &Trade) {
    let status = trade.status.to_string();
    let status_colored = match trade.status {
        crate::api::types::TradeStatus::Executed => format!("{}", status.green()),
        crate::api::types::TradeStatus::Failed => format!("{}", status.red()),
        crate::api::types::TradeStatus::Cancelled => format!("{}", status.red()),
        crate::api::types::TradeStatus::Pending => format!("{}", status.yellow()),
    };
    println!(
        "Trade #{}: {} {} x{} at {} ({}) [{}]",
        trade.id,
        trade.trade_type,
        trade.stock_symbol,
        trade.quantity,
        format_usd(trade.price),
        format_usd(trade.total_value),
        status_colored
    );
    if let Some(message) = &trade.status_message {
        println!("  {}", message.bright_black());
    }
}
