// --- File: crates/rocketrides_stripe/src/routes.rs ---

use crate::dashboard::dashboard_handler;
use crate::handlers::{
    account_session_handler, create_account_handler, create_payment_link_handler,
    list_transactions_handler, StripeState,
};
use crate::logic::DynConnectService;
use axum::{
    routing::{get, post},
    Router,
};
use rocketrides_config::AppConfig;
use std::sync::Arc;

/// Creates the JSON API router. Paths are relative to `/api`.
pub fn routes(config: Arc<AppConfig>, service: Arc<DynConnectService>) -> Router {
    let stripe_state = Arc::new(StripeState { config, service });

    Router::new()
        .route("/account", post(create_account_handler))
        .route("/account_session", post(account_session_handler))
        .route("/create_payment_link", post(create_payment_link_handler))
        .route("/transactions", get(list_transactions_handler))
        .with_state(stripe_state)
}

/// Creates the server-rendered admin pages.
pub fn admin_routes(config: Arc<AppConfig>, service: Arc<DynConnectService>) -> Router {
    let stripe_state = Arc::new(StripeState { config, service });

    Router::new()
        .route("/admin/dashboard", get(dashboard_handler))
        .with_state(stripe_state)
}
