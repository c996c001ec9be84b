// --- File: crates/rocketrides_common/src/http.rs ---
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{ConnectError, HttpStatusCode};

pub mod client;

/// JSON body returned for every failed API request: `{"error": "..."}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorBody {
    #[cfg_attr(feature = "openapi", schema(example = "No such account: 'acct_123'"))]
    pub error: String,
}

/// Builds an error response with the given status and message.
///
/// Unknown status codes fall back to 500.
pub fn error_response(status_code: u16, message: impl Into<String>) -> Response {
    let status = StatusCode::from_u16(status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = Json(ErrorBody {
        error: message.into(),
    });
    (status, body).into_response()
}

impl IntoResponse for ConnectError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.to_string())
    }
}
