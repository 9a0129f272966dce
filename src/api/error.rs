//! Error taxonomy for the market data client

use reqwest::StatusCode;

/// Shown when a failed mutation response carries no usable message
pub const TRADE_FALLBACK_MESSAGE: &str = "An error occurred while executing the trade";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure before a response was received
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response; message comes from the payload when present
    #[error("{message}")]
    Server { status: StatusCode, message: String },

    /// Unknown symbol, holding, or trade id upstream
    #[error("{0} not found")]
    NotFound(String),

    /// Client-side pre-check failure; nothing was sent
    #[error("{0}")]
    Validation(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}
