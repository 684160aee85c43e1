use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use nsum_core::Error;
use serde_json::json;
use tracing::error;

/// Maps pipeline errors onto HTTP responses with a JSON `error` body.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self(error)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            Error::UnsupportedSource(_) | Error::InvalidArticle(_) => StatusCode::BAD_REQUEST,
            Error::Scraping(_) | Error::LanguageDetection(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
