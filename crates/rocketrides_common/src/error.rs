// --- File: crates/rocketrides_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// Errors raised while wiring the application together.
///
/// Request-time failures against the payment provider have their own error
/// type in the Stripe crate; this one covers startup and infrastructure.
#[derive(Error, Debug)]
pub enum ConnectError {
    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for ConnectError {
    fn status_code(&self) -> u16 {
        match self {
            ConnectError::ConfigError(_) => 500,
            ConnectError::InternalError(_) => 500,
        }
    }
}

impl From<config::ConfigError> for ConnectError {
    fn from(err: config::ConfigError) -> Self {
        ConnectError::ConfigError(err.to_string())
    }
}

impl From<std::io::Error> for ConnectError {
    fn from(err: std::io::Error) -> Self {
        ConnectError::InternalError(err.to_string())
    }
}

pub fn config_error<T: fmt::Display>(message: T) -> ConnectError {
    ConnectError::ConfigError(message.to_string())
}
