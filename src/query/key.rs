//! View identity for cache entries and poll timers

use std::fmt;

/// Identity of a cached read view.
///
/// Per-user views carry the user id so two users never share an entry,
/// mirroring the backend's per-user read endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewKey {
    /// Full market snapshot
    Stocks,
    /// Single instrument, keyed by symbol
    Stock(String),
    /// Holdings list for a user
    Portfolio(String),
    /// Aggregate summary for a user
    PortfolioSummary(String),
    /// Trade log for a user
    Trades(String),
}

impl ViewKey {
    /// Every read view a successful trade execution can affect.
    ///
    /// The executed trade changes holdings, the summary, the trade log,
    /// and (in the demo backend) the quoted price of the traded stock,
    /// so the whole stock list is included. Single-stock entries are
    /// priced fresh on demand and are not part of the set.
    pub fn trade_dependents(user_id: &str) -> [ViewKey; 4] {
        [
            ViewKey::Stocks,
            ViewKey::Portfolio(user_id.to_string()),
            ViewKey::PortfolioSummary(user_id.to_string()),
            ViewKey::Trades(user_id.to_string()),
        ]
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewKey::Stocks => write!(f, "stocks"),
            ViewKey::Stock(symbol) => write!(f, "stock:{}", symbol),
            ViewKey::Portfolio(user) => write!(f, "portfolio:{}", user),
            ViewKey::PortfolioSummary(user) => write!(f, "portfolio-summary:{}", user),
            ViewKey::Trades(user) => write!(f, "trades:{}", user),
        }
    }
}
