//! HTTP handlers

use std::sync::Arc;

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::{Prediction, Ticker};
use crate::server::{PredictError, PredictionContext, pipeline};

const INDEX_HTML: &str = include_str!("../../static/index.html");

#[derive(Deserialize, Debug, Default)]
pub struct PredictRequest {
    #[serde(default)]
    pub ticker: Option<Ticker>,
}

impl PredictRequest {
    /// Parse a request body. Only a JSON object is accepted.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Err(serde::de::Error::custom(format!(
                "expected a JSON object, got {value}"
            )));
        }
        serde_json::from_value(value)
    }
}

/// `application/json`, ignoring case and parameters such as `charset`.
fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|media_type| media_type.trim().eq_ignore_ascii_case("application/json"))
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn predict(
    State(ctx): State<Arc<PredictionContext>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Prediction>, PredictError> {
    if !is_json_content_type(&headers) {
        return Err(PredictError::UnsupportedMediaType);
    }

    let request = PredictRequest::from_body(&body)?;
    let ticker = request
        .ticker
        .unwrap_or_else(|| ctx.settings.default_ticker.clone());
    tracing::info!(ticker = %ticker, "Prediction requested");

    let prediction = pipeline::predict_next_close(&ctx, ticker).await?;
    Ok(Json(prediction))
}

pub async fn handle_404() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

pub async fn handle_405() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type(&with_content_type("application/json")));
        assert!(is_json_content_type(&with_content_type(
            "Application/JSON; charset=utf-8"
        )));
        assert!(!is_json_content_type(&with_content_type("text/plain")));
        assert!(!is_json_content_type(&with_content_type(
            "application/x-www-form-urlencoded"
        )));
        assert!(!is_json_content_type(&HeaderMap::new()));
    }

    #[test]
    fn test_request_body_parsing() {
        let req = PredictRequest::from_body(br#"{"ticker":"MSFT"}"#).unwrap();
        assert_eq!(req.ticker, Some(Ticker::new("MSFT")));

        assert_eq!(PredictRequest::from_body(b"{}").unwrap().ticker, None);
        assert_eq!(
            PredictRequest::from_body(br#"{"ticker":null,"extra":1}"#)
                .unwrap()
                .ticker,
            None
        );

        assert!(PredictRequest::from_body(b"").is_err());
        assert!(PredictRequest::from_body(b"not json").is_err());
        assert!(PredictRequest::from_body(br#"["MSFT"]"#).is_err());
        assert!(PredictRequest::from_body(br#"{"ticker":42}"#).is_err());
    }
}
