//! Client-side stock search
//!
//! Filtering happens purely in memory on the cached stock list; the
//! backend's search endpoint is not involved.

use crate::api::types::Stock;

/// Case-insensitive substring match against symbol and company name.
/// An empty query passes everything.
pub fn matches_query(stock: &Stock, query: &str) -> bool {
    let needle = query.to_lowercase();
    stock.symbol.to_lowercase().contains(&needle)
        || stock.company_name.to_lowercase().contains(&needle)
}

/// Filter the cached stock list, preserving order
pub fn filter_stocks<'a>(stocks: &'a [Stock], query: &str) -> Vec<&'a Stock> {
    stocks
        .iter()
        .filter(|stock| matches_query(stock, query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal_macros::dec;

    fn stock(symbol: &str, name: &str) -> Stock {
        Stock {
            symbol: symbol.to_string(),
            company_name: name.to_string(),
            current_price: dec!(150),
            change_percentage: None,
            last_updated: Utc::now(),
            open_price: None,
            high_price: None,
            low_price: None,
            volume: None,
        }
    }

    #[test]
    fn test_matches_company_name_case_insensitive() {
        let stocks = vec![stock("AAPL", "Apple Inc")];
        let found = filter_stocks(&stocks, "apple");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].symbol, "AAPL");
    }

    #[test]
    fn test_matches_symbol_case_insensitive() {
        let stocks = vec![stock("AAPL", "Apple Inc"), stock("GOOG", "Alphabet Inc")];
        let found = filter_stocks(&stocks, "aapl");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].symbol, "AAPL");
    }

    #[test]
    fn test_no_match_returns_empty() {
        let stocks = vec![stock("AAPL", "Apple Inc")];
        assert!(filter_stocks(&stocks, "msft").is_empty());
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let stocks = vec![
            stock("AAPL", "Apple Inc"),
            stock("GOOG", "Alphabet Inc"),
            stock("MSFT", "Microsoft Corporation"),
        ];
        let found = filter_stocks(&stocks, "");
        let symbols: Vec<&str> = found.iter().map(|s| s.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["AAPL", "GOOG", "MSFT"]);
    }

    #[test]
    fn test_substring_matches_mid_word() {
        let stocks = vec![stock("MSFT", "Microsoft Corporation")];
        assert_eq!(filter_stocks(&stocks, "soft").len(), 1);
    }
}
