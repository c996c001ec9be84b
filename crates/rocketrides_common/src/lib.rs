// --- File: crates/rocketrides_common/src/lib.rs ---

pub mod error; // Error handling
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Provider resources
pub mod services; // Service abstractions

pub use error::{config_error, ConnectError, HttpStatusCode};

pub use http::{client::create_client, error_response, ErrorBody};

pub use logging::{init, init_with_level, log_result};

pub use services::{BoxFuture, ConnectService};
