//! Alpha Vantage provider.
//!
//! Covers the free REST endpoints used here: GLOBAL_QUOTE for the
//! latest trade, TIME_SERIES_DAILY for charting history, and
//! SYMBOL_SEARCH for ticker lookup. Alpha Vantage reports errors with
//! HTTP 200 and an error envelope in the body, so every response is
//! checked for the envelope before parsing.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::{Client, Url};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::errors::MarketDataError;
use crate::models::{HistoricalSeries, Quote, SymbolMatch};
use crate::provider::traits::QuoteProvider;

pub const DEFAULT_BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

// ================================================================
// Wire format
// ================================================================

#[derive(Debug, Deserialize)]
struct GlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<GlobalQuoteWire>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

/// Unknown symbols come back as `"Global Quote": {}`, so every field
/// is optional.
#[derive(Debug, Deserialize)]
struct GlobalQuoteWire {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "09. change")]
    change: Option<String>,
    #[serde(rename = "10. change percent")]
    change_percent: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailySeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyBarWire>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyBarWire {
    #[serde(rename = "4. close")]
    close: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "bestMatches")]
    best_matches: Option<Vec<BestMatchWire>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct BestMatchWire {
    #[serde(rename = "1. symbol")]
    symbol: String,
    #[serde(rename = "2. name")]
    name: String,
}

// ================================================================
// Response handling
// ================================================================

/// Maps the Alpha Vantage error envelope to a typed error.
///
/// "Error Message" means the request itself was bad (most commonly an
/// unknown symbol); "Note" and "Information" carry rate limit notices
/// on the free tier.
fn check_api_error(
    error_message: Option<String>,
    note: Option<String>,
    information: Option<String>,
) -> Result<(), MarketDataError> {
    if let Some(message) = error_message {
        if message.contains("Invalid API call") || message.contains("not found") {
            return Err(MarketDataError::SymbolNotFound(message));
        }
        return Err(MarketDataError::Provider {
            provider: PROVIDER_ID.to_string(),
            message,
        });
    }

    for notice in [note, information].into_iter().flatten() {
        if notice.contains("API call frequency") || notice.contains("rate limit") {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        warn!("Alpha Vantage notice: {}", notice);
    }

    Ok(())
}

fn quote_from_response(symbol: &str, resp: GlobalQuoteResponse) -> Result<Quote, MarketDataError> {
    check_api_error(resp.error_message, resp.note, resp.information)?;

    let wire = resp
        .global_quote
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    match (wire.symbol, wire.price, wire.change, wire.change_percent) {
        (Some(symbol), Some(price), Some(change), Some(change_percent)) => {
            Ok(Quote::new(symbol, price, change, change_percent))
        }
        _ => Err(MarketDataError::SymbolNotFound(symbol.to_string())),
    }
}

fn series_from_response(
    symbol: &str,
    resp: DailySeriesResponse,
) -> Result<HistoricalSeries, MarketDataError> {
    check_api_error(resp.error_message, resp.note, resp.information)?;

    let time_series = resp
        .time_series
        .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))?;

    let mut rows: Vec<(NaiveDate, String)> = time_series
        .into_iter()
        .filter_map(|(date, bar)| {
            match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
                Ok(parsed) => Some((parsed, bar.close)),
                Err(_) => {
                    warn!("Skipping unparseable trading day '{}' for {}", date, symbol);
                    None
                }
            }
        })
        .collect();
    rows.sort_by_key(|(date, _)| *date);

    let closes = rows
        .into_iter()
        .map(|(_, close)| parse_close(&close))
        .collect();
    Ok(HistoricalSeries::new(closes))
}

fn matches_from_response(resp: SearchResponse) -> Result<Vec<SymbolMatch>, MarketDataError> {
    check_api_error(resp.error_message, resp.note, resp.information)?;

    Ok(resp
        .best_matches
        .unwrap_or_default()
        .into_iter()
        .map(|m| SymbolMatch::new(m.symbol, m.name))
        .collect())
}

/// A close that fails to parse becomes zero so the series keeps one
/// point per trading day.
fn parse_close(value: &str) -> Decimal {
    Decimal::from_str(value.trim()).unwrap_or(Decimal::ZERO)
}

// ================================================================
// Provider
// ================================================================

pub struct AlphaVantageProvider {
    client: Client,
    api_key: String,
    base_url: String,
}

impl AlphaVantageProvider {
    pub fn new(api_key: String) -> Self {
        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        self
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        params: &[(&str, &str)],
    ) -> Result<T, MarketDataError> {
        let mut pairs: Vec<(&str, &str)> = params.to_vec();
        pairs.push(("apikey", &self.api_key));

        let url = Url::parse_with_params(&self.base_url, &pairs).map_err(|e| {
            MarketDataError::Provider {
                provider: PROVIDER_ID.to_string(),
                message: format!("Invalid request URL: {}", e),
            }
        })?;

        debug!(
            "Alpha Vantage request: {}",
            url.as_str().replace(&self.api_key, "***")
        );

        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                MarketDataError::Timeout {
                    provider: PROVIDER_ID.to_string(),
                }
            } else {
                MarketDataError::Network(e)
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }
        if !status.is_success() {
            return Err(MarketDataError::Provider {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        let body = response.text().await.map_err(MarketDataError::Network)?;
        serde_json::from_str::<T>(&body).map_err(|e| MarketDataError::Decode {
            provider: PROVIDER_ID.to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, MarketDataError> {
        let resp: GlobalQuoteResponse = self
            .fetch(&[("function", "GLOBAL_QUOTE"), ("symbol", symbol)])
            .await?;
        quote_from_response(symbol, resp)
    }

    async fn get_daily_series(&self, symbol: &str) -> Result<HistoricalSeries, MarketDataError> {
        let resp: DailySeriesResponse = self
            .fetch(&[
                ("function", "TIME_SERIES_DAILY"),
                ("symbol", symbol),
                ("outputsize", "compact"),
            ])
            .await?;
        series_from_response(symbol, resp)
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>, MarketDataError> {
        let resp: SearchResponse = self
            .fetch(&[("function", "SYMBOL_SEARCH"), ("keywords", query)])
            .await?;
        matches_from_response(resp)
    }
}

// ================================================================
// Tests
// ================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_global_quote() {
        let json = r#"{
            "Global Quote": {
                "01. symbol": "AAPL",
                "02. open": "190.0000",
                "03. high": "191.0500",
                "04. low": "188.1900",
                "05. price": "189.4100",
                "06. volume": "48087681",
                "07. latest trading day": "2024-05-10",
                "08. previous close": "190.6400",
                "09. change": "-1.2300",
                "10. change percent": "-0.6451%"
            }
        }"#;

        let resp: GlobalQuoteResponse = serde_json::from_str(json).unwrap();
        let quote = quote_from_response("AAPL", resp).unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.price, "189.4100");
        assert_eq!(quote.change, "-1.2300");
        assert_eq!(quote.change_percent, "-0.6451%");
        assert!(quote.is_decline());
    }

    #[test]
    fn test_empty_global_quote_is_symbol_not_found() {
        let json = r#"{"Global Quote": {}}"#;
        let resp: GlobalQuoteResponse = serde_json::from_str(json).unwrap();
        let err = quote_from_response("ZZZZ", resp).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_missing_global_quote_is_symbol_not_found() {
        let resp: GlobalQuoteResponse = serde_json::from_str("{}").unwrap();
        let err = quote_from_response("ZZZZ", resp).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_error_message_maps_to_symbol_not_found() {
        let err = check_api_error(
            Some("Invalid API call. Please retry or visit the documentation".to_string()),
            None,
            None,
        )
        .unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_note_maps_to_rate_limited() {
        let err = check_api_error(
            None,
            Some("Thank you for using Alpha Vantage! Our standard API call frequency is 25 requests per day".to_string()),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[test]
    fn test_information_rate_limit_maps_to_rate_limited() {
        let err = check_api_error(
            None,
            None,
            Some("You have hit your rate limit for today.".to_string()),
        )
        .unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited { .. }));
    }

    #[test]
    fn test_benign_notice_is_not_an_error() {
        let result = check_api_error(None, Some("Meta commentary only".to_string()), None);
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_daily_series_sorted_ascending() {
        let json = r#"{
            "Time Series (Daily)": {
                "2024-05-10": {"1. open": "190.00", "4. close": "189.41"},
                "2024-05-08": {"1. open": "186.00", "4. close": "186.99"},
                "2024-05-09": {"1. open": "187.00", "4. close": "188.01"}
            }
        }"#;

        let resp: DailySeriesResponse = serde_json::from_str(json).unwrap();
        let series = series_from_response("AAPL", resp).unwrap();
        assert_eq!(
            series.closes(),
            &[dec!(186.99), dec!(188.01), dec!(189.41)]
        );
        assert_eq!(series.latest(), Some(dec!(189.41)));
    }

    #[test]
    fn test_unparseable_close_becomes_zero() {
        let json = r#"{
            "Time Series (Daily)": {
                "2024-05-09": {"4. close": "none"},
                "2024-05-10": {"4. close": "189.41"}
            }
        }"#;

        let resp: DailySeriesResponse = serde_json::from_str(json).unwrap();
        let series = series_from_response("AAPL", resp).unwrap();
        assert_eq!(series.closes(), &[Decimal::ZERO, dec!(189.41)]);
    }

    #[test]
    fn test_missing_time_series_is_symbol_not_found() {
        let resp: DailySeriesResponse = serde_json::from_str("{}").unwrap();
        let err = series_from_response("ZZZZ", resp).unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound(_)));
    }

    #[test]
    fn test_parse_search_matches() {
        let json = r#"{
            "bestMatches": [
                {
                    "1. symbol": "AAPL",
                    "2. name": "Apple Inc",
                    "3. type": "Equity",
                    "4. region": "United States",
                    "8. currency": "USD",
                    "9. matchScore": "1.0000"
                },
                {
                    "1. symbol": "AAPL.LON",
                    "2. name": "Apple Inc CDR",
                    "3. type": "Equity",
                    "4. region": "United Kingdom",
                    "8. currency": "GBP",
                    "9. matchScore": "0.7143"
                }
            ]
        }"#;

        let resp: SearchResponse = serde_json::from_str(json).unwrap();
        let matches = matches_from_response(resp).unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].symbol, "AAPL");
        assert_eq!(matches[0].name, "Apple Inc");
        assert!(!matches[0].is_favorite);
    }

    #[test]
    fn test_search_without_matches_is_empty() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        let matches = matches_from_response(resp).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_parse_close() {
        assert_eq!(parse_close("189.41"), dec!(189.41));
        assert_eq!(parse_close(" 189.41 "), dec!(189.41));
        assert_eq!(parse_close("garbage"), Decimal::ZERO);
    }

    #[test]
    fn test_with_base_url() {
        let provider = AlphaVantageProvider::new("demo".to_string())
            .with_base_url("http://localhost:9999/query");
        assert_eq!(provider.base_url, "http://localhost:9999/query");
        assert_eq!(provider.id(), "ALPHA_VANTAGE");
    }
}
