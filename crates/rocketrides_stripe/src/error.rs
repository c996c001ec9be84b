// --- File: crates/rocketrides_stripe/src/error.rs ---
use axum::response::{IntoResponse, Response};
use rocketrides_common::{error_response, HttpStatusCode};
use thiserror::Error;

/// Stripe-specific error types.
///
/// Every variant is reported to the caller as a 500 with an `{"error"}` body.
/// [`StripeError::InvalidRequest`] is raised before Stripe is called and is
/// answered the same way as a Stripe rejection.
#[derive(Error, Debug)]
pub enum StripeError {
    /// Error occurred during a Stripe API request
    #[error("Stripe API request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Error returned by the Stripe API
    #[error("Stripe API returned an error: {message} (Status: {status_code})")]
    ApiError { status_code: u16, message: String },

    /// Error parsing Stripe API response
    #[error("Failed to parse Stripe API response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Stripe answered successfully but left out a field we need
    #[error("Stripe response missing {0}")]
    MissingField(&'static str),

    /// Missing or incomplete Stripe configuration
    #[error("Stripe configuration error: {0}")]
    ConfigError(String),

    /// The request to this service was rejected before reaching Stripe
    #[error("{0}")]
    InvalidRequest(String),
}

impl StripeError {
    /// Message sent to the API caller.
    ///
    /// Stripe's own error text is passed through verbatim.
    pub fn client_message(&self) -> String {
        match self {
            StripeError::ApiError { message, .. } => message.clone(),
            StripeError::RequestError(e) => e.to_string(),
            other => other.to_string(),
        }
    }
}

impl HttpStatusCode for StripeError {
    fn status_code(&self) -> u16 {
        match self {
            StripeError::RequestError(_) => 500,
            StripeError::ApiError { .. } => 500,
            StripeError::ParseError(_) => 500,
            StripeError::MissingField(_) => 500,
            StripeError::ConfigError(_) => 500,
            StripeError::InvalidRequest(_) => 500,
        }
    }
}

impl IntoResponse for StripeError {
    fn into_response(self) -> Response {
        error_response(self.status_code(), self.client_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    async fn body_of(err: StripeError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_api_error_is_500_with_verbatim_message() {
        let (status, body) = body_of(StripeError::ApiError {
            status_code: 404,
            message: "No such account: 'acct_nope'".to_string(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "No such account: 'acct_nope'");
    }

    #[tokio::test]
    async fn test_invalid_request_is_500_like_upstream_errors() {
        let err = StripeError::InvalidRequest("amount must be a positive integer".to_string());
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "amount must be a positive integer");
    }

    #[tokio::test]
    async fn test_missing_field_is_500() {
        let err = StripeError::MissingField("payment link url");
        let (status, body) = body_of(err).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Stripe response missing payment link url");
    }
}
