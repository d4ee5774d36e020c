use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidParams(&'static str),

    #[error("Unsupported symbol")]
    UnsupportedSymbol(String),

    #[error("Insufficient historical data")]
    InsufficientData,

    #[error("upstream returned status {status} for {url}")]
    UpstreamStatus { status: u16, url: String },

    #[error("upstream returned no data for {0}")]
    UpstreamEmpty(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidParams(_) | Self::UnsupportedSymbol(_) => StatusCode::BAD_REQUEST,
            Self::InsufficientData => StatusCode::UNPROCESSABLE_ENTITY,
            Self::UpstreamStatus { .. } | Self::UpstreamEmpty(_) | Self::Http(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Config(_) | Self::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, status = status.as_u16(), "Request failed");
        }
        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
