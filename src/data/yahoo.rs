//! Yahoo Finance chart API client (daily bars for equities).

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::config::YAHOO;
use crate::data::{DailyCloseSource, MarketDataError};
use crate::domain::{DailyBar, Ticker};
use crate::utils::TimeUtils;

const SIGNATURE: &str = "Yahoo Finance";

// Only the parts of the chart payload we read. Everything else is ignored.
#[derive(Deserialize, Debug)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Deserialize, Debug)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize, Debug)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChartResult {
    // Absent when the symbol exists but has no bars in range
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Deserialize, Debug)]
struct Indicators {
    #[serde(default)]
    quote: Vec<Quote>,
}

#[derive(Deserialize, Debug)]
struct Quote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

pub struct YahooChartSource {
    client: Client,
    base_url: Url,
}

impl YahooChartSource {
    pub fn new() -> Result<Self> {
        Self::with_base_url(YAHOO.base_url)
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(YAHOO.user_agent)
            .timeout(Duration::from_millis(YAHOO.timeout_ms))
            .build()
            .context("Failed to create Yahoo HTTP client")?;
        let base_url =
            Url::parse(base_url).with_context(|| format!("Invalid Yahoo base URL: {base_url}"))?;
        Ok(Self { client, base_url })
    }

    fn chart_url(&self, ticker: &Ticker) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow!("Yahoo base URL cannot take a path: {}", self.base_url))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker.query_symbol().as_str()]);
        Ok(url)
    }
}

#[async_trait]
impl DailyCloseSource for YahooChartSource {
    fn signature(&self) -> &'static str {
        SIGNATURE
    }

    async fn daily_bars(&self, ticker: &Ticker) -> Result<Vec<DailyBar>, MarketDataError> {
        let url = self
            .chart_url(ticker)
            .map_err(|e| MarketDataError::provider(SIGNATURE, format!("{e:#}")))?;

        let response = self
            .client
            .get(url)
            .query(&[("range", YAHOO.range), ("interval", YAHOO.interval)])
            .send()
            .await
            .map_err(|e| {
                log::error!("{} Yahoo request failed: {}", ticker, e);
                MarketDataError::provider(SIGNATURE, e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MarketDataError::TickerNotFound {
                ticker: ticker.clone(),
            });
        }
        if !status.is_success() {
            log::error!("{} Yahoo returned {}", ticker, status);
            return Err(MarketDataError::provider(SIGNATURE, format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MarketDataError::provider(SIGNATURE, e.to_string()))?;
        parse_chart(ticker, &body)
    }
}

/// Turn a chart payload into daily bars. A result with no timestamps yields
/// no bars, which the window builder reports as an unknown ticker.
fn parse_chart(ticker: &Ticker, body: &str) -> Result<Vec<DailyBar>, MarketDataError> {
    let response: ChartResponse = serde_json::from_str(body).map_err(|e| {
        MarketDataError::provider(SIGNATURE, format!("unreadable chart payload: {e}"))
    })?;

    if let Some(error) = response.chart.error {
        if error.code == "Not Found" {
            return Err(MarketDataError::TickerNotFound {
                ticker: ticker.clone(),
            });
        }
        return Err(MarketDataError::provider(
            SIGNATURE,
            format!(
                "{}: {}",
                error.code,
                error.description.unwrap_or_default()
            ),
        ));
    }

    let Some(result) = response.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(Vec::new());
    };
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .map(|q| q.close)
        .unwrap_or_default();

    Ok(result
        .timestamp
        .iter()
        .enumerate()
        .map(|(i, &ts_sec)| {
            DailyBar::new(
                ts_sec * TimeUtils::MS_IN_S,
                closes.get(i).copied().flatten(),
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::extract::{Path, RawQuery, State};
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;

    // (symbol, raw query) of the last chart request the local server saw
    type SeenRequest = Arc<Mutex<Option<(String, String)>>>;

    const CHART_BODY: &str = r#"{"chart":{"result":[{
        "timestamp":[1700000000,1700086400,1700172800],
        "indicators":{"quote":[{"close":[189.5,190.0,190.25]}]}
    }],"error":null}}"#;

    async fn chart(
        State(seen): State<SeenRequest>,
        Path(symbol): Path<String>,
        RawQuery(query): RawQuery,
    ) -> Response {
        *seen.lock().unwrap() = Some((symbol.clone(), query.unwrap_or_default()));
        match symbol.as_str() {
            "MISSING" => StatusCode::NOT_FOUND.into_response(),
            "FLAKY" => StatusCode::BAD_GATEWAY.into_response(),
            _ => CHART_BODY.into_response(),
        }
    }

    async fn local_chart_api() -> (YahooChartSource, SeenRequest) {
        let seen = SeenRequest::default();
        let app = Router::new()
            .route("/v8/finance/chart/:symbol", get(chart))
            .with_state(Arc::clone(&seen));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        let source = YahooChartSource::with_base_url(&format!("http://{addr}")).unwrap();
        (source, seen)
    }

    #[tokio::test]
    async fn test_daily_bars_requests_three_months_of_daily_bars() {
        let (source, seen) = local_chart_api().await;
        let bars = source.daily_bars(&Ticker::new("aapl")).await.unwrap();

        assert_eq!(bars.len(), 3);
        assert_eq!(bars[2].close_price, Some(190.25));
        let (symbol, query) = seen.lock().unwrap().clone().unwrap();
        assert_eq!(symbol, "AAPL");
        assert_eq!(query, "range=3mo&interval=1d");
    }

    #[tokio::test]
    async fn test_daily_bars_http_404_is_ticker_not_found() {
        let (source, _) = local_chart_api().await;
        let err = source.daily_bars(&Ticker::new("missing")).await.unwrap_err();

        assert!(matches!(err, MarketDataError::TickerNotFound { .. }));
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "No data found for ticker symbol: missing");
    }

    #[tokio::test]
    async fn test_daily_bars_http_502_is_provider_failure() {
        let (source, _) = local_chart_api().await;
        let err = source.daily_bars(&Ticker::new("FLAKY")).await.unwrap_err();

        assert!(matches!(err, MarketDataError::Provider { .. }));
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("502"));
    }

    #[test]
    fn test_parse_chart_keeps_gaps() {
        let body = r#"{"chart":{"result":[{
            "meta":{"symbol":"AAPL","currency":"USD"},
            "timestamp":[1700000000,1700086400,1700172800],
            "indicators":{"quote":[{"close":[189.5,null,190.25],"open":[1,2,3]}]}
        }],"error":null}}"#;

        let bars = parse_chart(&Ticker::new("AAPL"), body).unwrap();
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0], DailyBar::new(1_700_000_000_000, Some(189.5)));
        assert_eq!(bars[1].close_price, None);
        assert_eq!(bars[2].close_price, Some(190.25));
    }

    #[test]
    fn test_parse_chart_not_found_error() {
        let body = r#"{"chart":{"result":null,"error":{
            "code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        let err = parse_chart(&Ticker::new("QQQQQ"), body).unwrap_err();
        assert!(matches!(err, MarketDataError::TickerNotFound { .. }));
    }

    #[test]
    fn test_parse_chart_other_error_is_provider_failure() {
        let body = r#"{"chart":{"result":null,"error":{"code":"Bad Request","description":"Invalid input"}}}"#;
        let err = parse_chart(&Ticker::new("AAPL"), body).unwrap_err();
        assert!(!err.is_client_error());
        assert!(err.to_string().contains("Bad Request"));
    }

    #[test]
    fn test_parse_chart_without_bars() {
        let body = r#"{"chart":{"result":[{"meta":{},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse_chart(&Ticker::new("AAPL"), body).unwrap().is_empty());

        let body = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(parse_chart(&Ticker::new("AAPL"), body).unwrap().is_empty());
    }

    #[test]
    fn test_parse_chart_garbage() {
        let err = parse_chart(&Ticker::new("AAPL"), "<html>").unwrap_err();
        assert!(matches!(err, MarketDataError::Provider { .. }));
    }

    #[test]
    fn test_chart_url_encodes_symbol() {
        let source = YahooChartSource::with_base_url("https://example.test/").unwrap();
        let url = source.chart_url(&Ticker::new("brk.b")).unwrap();
        assert_eq!(url.as_str(), "https://example.test/v8/finance/chart/BRK.B");

        let url = source.chart_url(&Ticker::new("A/B")).unwrap();
        assert_eq!(url.as_str(), "https://example.test/v8/finance/chart/A%2FB");
    }
}
