//! Binance spot klines as a daily close source (crypto pairs).

// Std library crates
use std::error::Error;
use std::fmt;

// External crates
use anyhow::Result;
use async_trait::async_trait;
use binance_sdk::config::ConfigurationRestApi;
use binance_sdk::spot::{
    SpotRestApi,
    rest_api::{KlinesIntervalEnum, KlinesItemInner, KlinesParams, RestApi},
};
use binance_sdk::{errors, errors::ConnectorError as connection_error};

// Local crates
use crate::config::binance::{BINANCE, BinanceApiConfig};
use crate::data::{DailyCloseSource, MarketDataError};
use crate::domain::{DailyBar, Ticker};

const SIGNATURE: &str = "Binance";

// Binance answers an unknown symbol with error -1121 "Invalid symbol."
const INVALID_SYMBOL_MARKER: &str = "Invalid symbol";

// Custom error type for kline rows for better error messages.
#[derive(Debug)]
pub enum BNKlineError {
    InvalidLength,
    InvalidType(String),
}

impl fmt::Display for BNKlineError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BNKlineError::InvalidLength => write!(f, "Invalid length"),
            BNKlineError::InvalidType(field) => write!(f, "Invalid type: {}", field),
        }
    }
}

impl Error for BNKlineError {}

/*
Binance sends prices as strings inside a heterogeneous row. Returns Some(f64) only
if the item was the String variant and parsed cleanly; anything else is a gap.
*/
fn convert_kline_item_inner_enum_string_to_float(item: Option<KlinesItemInner>) -> Option<f64> {
    item.and_then(|inner| {
        if let KlinesItemInner::String(s) = inner {
            s.parse::<f64>().ok()
        } else {
            None
        }
    })
}

// Row layout: [open_time, open, high, low, close, volume, close_time, ...]
fn kline_row_to_bar(row: Vec<KlinesItemInner>) -> Result<DailyBar, BNKlineError> {
    let mut items = row.into_iter();
    let open_timestamp_ms = match items.next().ok_or(BNKlineError::InvalidLength)? {
        KlinesItemInner::Integer(a) => a,
        _ => return Err(BNKlineError::InvalidType("open_time".to_string())),
    };
    // Skip open, high, low
    let mut items = items.skip(3);
    let close_price = convert_kline_item_inner_enum_string_to_float(items.next());

    Ok(DailyBar::new(open_timestamp_ms, close_price))
}

fn convert_klines(data: Vec<Vec<KlinesItemInner>>) -> Result<Vec<DailyBar>, BNKlineError> {
    data.into_iter().map(kline_row_to_bar).collect()
}

fn configure_binance_client() -> Result<RestApi> {
    let config = BinanceApiConfig::default();
    let rest_conf = ConfigurationRestApi::builder()
        .timeout(config.timeout_ms)
        .retries(config.retries)
        .backoff(config.backoff_ms)
        .build()?;
    // Create the Spot REST API client
    Ok(SpotRestApi::production(rest_conf))
}

pub struct BinanceDailySource {
    rest_client: RestApi,
}

impl BinanceDailySource {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rest_client: configure_binance_client()?,
        })
    }
}

/// Map a failed klines call onto the market data taxonomy, logging the
/// connector's own classification on the way.
fn classify_connector_failure(ticker: &Ticker, e: &anyhow::Error) -> MarketDataError {
    let Some(conn_err) = e.downcast_ref::<errors::ConnectorError>() else {
        log::error!("An unexpected error occurred for {}: {:#}", ticker, e);
        return MarketDataError::provider(SIGNATURE, format!("{e:#}"));
    };

    match conn_err {
        connection_error::ConnectorClientError(msg) | connection_error::BadRequestError(msg)
            if msg.contains(INVALID_SYMBOL_MARKER) =>
        {
            return MarketDataError::TickerNotFound {
                ticker: ticker.clone(),
            };
        }
        connection_error::ConnectorClientError(msg) => {
            log::error!(
                "{} Client error: Check your request parameters. {}",
                ticker,
                msg
            );
        }
        connection_error::TooManyRequestsError(msg) => {
            log::error!(
                "{} Rate limit exceeded. Please wait and try again. {}",
                ticker,
                msg
            );
        }
        connection_error::RateLimitBanError(msg) => {
            log::error!(
                "{} IP address banned due to excessive rate limits. {}",
                ticker,
                msg
            );
        }
        errors::ConnectorError::ServerError { msg, status_code } => {
            log::error!(
                "{} Server error: {} (status code: {:?})",
                ticker,
                msg,
                status_code
            );
        }
        errors::ConnectorError::NetworkError(msg) => {
            log::error!(
                "{} Network error: Check your internet connection. {}",
                ticker,
                msg
            );
        }
        errors::ConnectorError::NotFoundError(msg) => {
            log::error!("{} Resource not found. {}", ticker, msg);
        }
        connection_error::BadRequestError(msg) => {
            log::error!(
                "{} Bad request: Verify your input parameters. {}",
                ticker,
                msg
            );
        }
        other => {
            log::error!("Unexpected ConnectionError variant: {:?}", other);
        }
    }
    MarketDataError::provider(SIGNATURE, conn_err.to_string())
}

#[async_trait]
impl DailyCloseSource for BinanceDailySource {
    fn signature(&self) -> &'static str {
        SIGNATURE
    }

    async fn daily_bars(&self, ticker: &Ticker) -> Result<Vec<DailyBar>, MarketDataError> {
        let params = KlinesParams::builder(ticker.query_symbol(), KlinesIntervalEnum::Interval1d)
            .limit(BINANCE.limits.daily_klines_limit)
            .build()
            .map_err(|e| MarketDataError::provider(SIGNATURE, e.to_string()))?;

        let response = self
            .rest_client
            .klines(params)
            .await
            .map_err(|e| classify_connector_failure(ticker, &e))?;
        let rows = response
            .data()
            .await
            .map_err(|e| MarketDataError::provider(SIGNATURE, e.to_string()))?;

        convert_klines(rows).map_err(|e| {
            MarketDataError::provider(SIGNATURE, format!("{} convert_klines failed: {}", ticker, e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(open_ms: i64, close: &str) -> Vec<KlinesItemInner> {
        vec![
            KlinesItemInner::Integer(open_ms),
            KlinesItemInner::String("1.0".to_string()),
            KlinesItemInner::String("2.0".to_string()),
            KlinesItemInner::String("0.5".to_string()),
            KlinesItemInner::String(close.to_string()),
            KlinesItemInner::String("1000.0".to_string()),
            KlinesItemInner::Integer(open_ms + 86_399_999),
        ]
    }

    #[test]
    fn test_convert_klines_reads_close() {
        let bars = convert_klines(vec![row(0, "42000.5"), row(86_400_000, "oops")]).unwrap();
        assert_eq!(bars[0], DailyBar::new(0, Some(42000.5)));
        assert_eq!(bars[1], DailyBar::new(86_400_000, None));
    }

    #[test]
    fn test_convert_klines_rejects_bad_rows() {
        assert!(matches!(
            kline_row_to_bar(vec![]),
            Err(BNKlineError::InvalidLength)
        ));
        assert!(matches!(
            kline_row_to_bar(vec![KlinesItemInner::String("0".to_string())]),
            Err(BNKlineError::InvalidType(_))
        ));
    }

    #[test]
    fn test_invalid_symbol_is_ticker_not_found() {
        let e = anyhow::Error::new(connection_error::BadRequestError(
            "Invalid symbol.".to_string(),
        ));
        let err = classify_connector_failure(&Ticker::new("NOTACOIN"), &e);
        assert!(matches!(err, MarketDataError::TickerNotFound { .. }));

        let e = anyhow::Error::new(connection_error::NetworkError("timed out".to_string()));
        let err = classify_connector_failure(&Ticker::new("BTCUSDT"), &e);
        assert!(!err.is_client_error());
    }
}
