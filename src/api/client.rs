//! REST client for the demo trading backend
//!
//! Thin typed wrapper over the backend's `/api` surface. Every read
//! returns the server's numbers untouched; the client never recomputes
//! valuations. No authentication headers are part of this contract.

use reqwest::{Client, Response, StatusCode};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::error::{ApiError, ApiResult, TRADE_FALLBACK_MESSAGE};
use super::types::*;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Typed client for the backend REST surface
#[derive(Debug, Clone)]
pub struct MarketApi {
    client: Client,
    base_url: String,
}

impl MarketApi {
    /// Create a client with the default request timeout
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ---- stocks ----

    /// Full market snapshot; no pagination
    pub async fn list_stocks(&self) -> ApiResult<Vec<Stock>> {
        self.get_json(format!("{}/stocks", self.base_url), None).await
    }

    /// Single instrument, used to price a pending order
    pub async fn get_stock(&self, symbol: &str) -> ApiResult<Stock> {
        self.get_json(
            format!("{}/stocks/{}", self.base_url, symbol),
            Some(format!("stock {}", symbol)),
        )
        .await
    }

    /// Server-side substring search
    pub async fn search_stocks(&self, query: &str) -> ApiResult<Vec<Stock>> {
        let url = format!("{}/stocks/search", self.base_url);
        debug!("GET {} query={}", url, query);
        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;
        let response = check_response(response, None, None).await?;
        Ok(response.json().await?)
    }

    /// Current price only
    pub async fn get_current_price(&self, symbol: &str) -> ApiResult<Decimal> {
        self.get_json(
            format!("{}/stocks/{}/price", self.base_url, symbol),
            Some(format!("stock {}", symbol)),
        )
        .await
    }

    /// Admin price override
    pub async fn update_stock_price(&self, symbol: &str, new_price: Decimal) -> ApiResult<()> {
        let url = format!("{}/stocks/{}/price", self.base_url, symbol);
        debug!("PUT {}", url);
        let response = self
            .client
            .put(&url)
            .json(&UpdatePriceRequest { new_price })
            .send()
            .await?;
        check_response(response, Some(format!("stock {}", symbol)), None).await?;
        Ok(())
    }

    // ---- portfolio ----

    pub async fn get_portfolio(&self, user_id: &str) -> ApiResult<Vec<Holding>> {
        self.get_json(format!("{}/portfolio/user/{}", self.base_url, user_id), None)
            .await
    }

    pub async fn get_holding(&self, user_id: &str, symbol: &str) -> ApiResult<Holding> {
        self.get_json(
            format!("{}/portfolio/user/{}/stock/{}", self.base_url, user_id, symbol),
            Some(format!("holding {}", symbol)),
        )
        .await
    }

    pub async fn get_portfolio_summary(&self, user_id: &str) -> ApiResult<PortfolioSummary> {
        self.get_json(
            format!("{}/portfolio/user/{}/summary", self.base_url, user_id),
            None,
        )
        .await
    }

    /// Whether the user holds at least `quantity` shares of `symbol`
    pub async fn check_sufficient_shares(
        &self,
        user_id: &str,
        symbol: &str,
        quantity: u32,
    ) -> ApiResult<bool> {
        self.get_json(
            format!(
                "{}/portfolio/user/{}/stock/{}/shares/{}/check",
                self.base_url, user_id, symbol, quantity
            ),
            None,
        )
        .await
    }

    // ---- trades ----

    pub async fn buy(&self, request: &TradeRequest) -> ApiResult<Trade> {
        self.post_json(format!("{}/trades/buy", self.base_url), request)
            .await
    }

    pub async fn sell(&self, request: &TradeRequest) -> ApiResult<Trade> {
        self.post_json(format!("{}/trades/sell", self.base_url), request)
            .await
    }

    /// Route to the buy or sell endpoint based on the request's trade type
    pub async fn execute_trade(&self, request: &TradeRequest) -> ApiResult<Trade> {
        match request.trade_type {
            TradeType::Buy => self.buy(request).await,
            TradeType::Sell => self.sell(request).await,
        }
    }

    /// Full trade log for a user
    pub async fn list_trades(&self, user_id: &str) -> ApiResult<Vec<Trade>> {
        self.get_json(format!("{}/trades/user/{}", self.base_url, user_id), None)
            .await
    }

    /// Trade log restricted to a single stock
    pub async fn list_stock_trades(&self, user_id: &str, symbol: &str) -> ApiResult<Vec<Trade>> {
        self.get_json(
            format!("{}/trades/user/{}/stock/{}", self.base_url, user_id, symbol),
            None,
        )
        .await
    }

    pub async fn get_trade(&self, trade_id: i64) -> ApiResult<Trade> {
        self.get_json(
            format!("{}/trades/{}", self.base_url, trade_id),
            Some(format!("trade {}", trade_id)),
        )
        .await
    }

    /// Cancel a pending trade
    pub async fn cancel_trade(&self, trade_id: i64, user_id: &str) -> ApiResult<()> {
        let url = format!("{}/trades/{}/cancel", self.base_url, trade_id);
        debug!("PUT {} userId={}", url, user_id);
        let response = self
            .client
            .put(&url)
            .query(&[("userId", user_id)])
            .send()
            .await?;
        check_response(
            response,
            Some(format!("trade {}", trade_id)),
            Some(TRADE_FALLBACK_MESSAGE),
        )
        .await?;
        Ok(())
    }

    /// Backend pre-check of a trade request without executing it
    pub async fn validate_trade(&self, request: &TradeRequest) -> ApiResult<bool> {
        self.post_json(format!("{}/trades/validate", self.base_url), request)
            .await
    }

    // ---- plumbing ----

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        not_found: Option<String>,
    ) -> ApiResult<T> {
        debug!("GET {}", url);
        let response = self.client.get(&url).send().await?;
        let response = check_response(response, not_found, None).await?;
        Ok(response.json().await?)
    }

    async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        url: String,
        body: &B,
    ) -> ApiResult<T> {
        debug!("POST {}", url);
        let response = self.client.post(&url).json(body).send().await?;
        let response = check_response(response, None, Some(TRADE_FALLBACK_MESSAGE)).await?;
        Ok(response.json().await?)
    }
}

/// Map a non-2xx response into the error taxonomy.
///
/// 404 becomes `NotFound` when the caller named the missing entity;
/// everything else becomes `Server` with the payload's `message` field
/// when present, else `fallback`, else the HTTP status text.
async fn check_response(
    response: Response,
    not_found: Option<String>,
    fallback: Option<&str>,
) -> ApiResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(what) = not_found {
            return Err(ApiError::NotFound(what));
        }
    }

    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ApiErrorBody>(&body).ok())
        .and_then(|body| body.message)
        .or_else(|| fallback.map(str::to_string))
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });

    debug!("API error - status: {}, message: {}", status, message);
    Err(ApiError::Server { status, message })
}
