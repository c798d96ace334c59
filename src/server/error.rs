//! Error types for the prediction endpoint

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::data::MarketDataError;
use crate::model::ModelError;
use crate::preprocessing::ScalingError;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("Content-Type must be application/json")]
    UnsupportedMediaType,

    #[error(transparent)]
    Data(#[from] MarketDataError),

    #[error(transparent)]
    Scaling(#[from] ScalingError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("inference worker failed: {0}")]
    Worker(String),
}

impl PredictError {
    pub fn status(&self) -> StatusCode {
        match self {
            PredictError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            PredictError::Data(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(detail = %self, "Prediction failed");
            json!({
                "error": "An unexpected error occurred",
                "details": self.to_string(),
            })
        } else {
            tracing::warn!(status = status.as_u16(), detail = %self, "Prediction rejected");
            json!({ "error": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}
