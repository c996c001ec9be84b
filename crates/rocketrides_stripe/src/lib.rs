// --- File: crates/rocketrides_stripe/src/lib.rs ---

pub mod client;
pub mod dashboard;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod routes;
pub mod service;

// Re-export for main backend
pub use client::StripeClient;
pub use error::StripeError;
pub use handlers::StripeState;
pub use logic::{
    application_fee_amount, CreatePaymentLinkRequest, CreatePaymentLinkResponse,
    DynConnectService,
};
pub use routes::{admin_routes, routes};

#[cfg(feature = "openapi")]
pub use doc::StripeApiDoc;
