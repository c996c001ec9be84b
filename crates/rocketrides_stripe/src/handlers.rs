// --- File: crates/rocketrides_stripe/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    response::Json,
};
use rocketrides_common::log_result;
#[cfg(feature = "openapi")]
use rocketrides_common::ErrorBody;
use rocketrides_config::AppConfig;
use std::sync::Arc;

use crate::error::StripeError;
use crate::logic::{
    create_account, create_account_session, create_payment_link, list_transactions,
    AccountSessionRequest, AccountSessionResponse, CreateAccountResponse,
    CreatePaymentLinkRequest, CreatePaymentLinkResponse, DynConnectService, TransactionsQuery,
    TransactionsResponse,
};

// --- State for Stripe Handlers ---
#[derive(Clone)]
pub struct StripeState {
    pub config: Arc<AppConfig>,
    pub service: Arc<DynConnectService>,
}

/// Malformed or non-JSON bodies get the same `{error}` answer as any other failure.
fn invalid_body(rejection: JsonRejection) -> StripeError {
    StripeError::InvalidRequest(rejection.body_text())
}

/// Creates a new connected account for the onboarding flow.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/account", // Path relative to /api
    responses(
        (status = 200, description = "Connected account created", body = CreateAccountResponse),
        (status = 500, description = "Stripe API error or rejected input", body = ErrorBody)
    ),
    tag = "Connect"
))]
pub async fn create_account_handler(
    State(state): State<Arc<StripeState>>,
) -> Result<Json<CreateAccountResponse>, StripeError> {
    let result = create_account(
        state.service.as_ref(),
        &state.config.stripe.account_country,
    )
    .await;
    log_result(
        result,
        "Connected account created",
        "An error occurred when calling the Stripe API to create an account",
    )
    .map(Json)
}

/// Issues an account session secret for the embedded onboarding component.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/account_session", // Path relative to /api
    request_body = AccountSessionRequest,
    responses(
        (status = 200, description = "Account session created", body = AccountSessionResponse),
        (status = 500, description = "Stripe API error or rejected input", body = ErrorBody)
    ),
    tag = "Connect"
))]
pub async fn account_session_handler(
    State(state): State<Arc<StripeState>>,
    payload: Result<Json<AccountSessionRequest>, JsonRejection>,
) -> Result<Json<AccountSessionResponse>, StripeError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let result = create_account_session(state.service.as_ref(), request).await;
    log_result(
        result,
        "Account session created",
        "An error occurred when calling the Stripe API to create an account session",
    )
    .map(Json)
}

/// Creates a price and a payment link on the connected account.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/create_payment_link", // Path relative to /api
    request_body = CreatePaymentLinkRequest,
    responses(
        (status = 200, description = "Payment link created", body = CreatePaymentLinkResponse),
        (status = 500, description = "Stripe API error or rejected input", body = ErrorBody)
    ),
    tag = "Connect"
))]
pub async fn create_payment_link_handler(
    State(state): State<Arc<StripeState>>,
    payload: Result<Json<CreatePaymentLinkRequest>, JsonRejection>,
) -> Result<Json<CreatePaymentLinkResponse>, StripeError> {
    let Json(request) = payload.map_err(invalid_body)?;
    let result = create_payment_link(state.service.as_ref(), request).await;
    log_result(result, "Payment link created", "Error creating payment link").map(Json)
}

/// Lists recent balance transactions of a connected account.
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    get,
    path = "/transactions", // Path relative to /api
    params(TransactionsQuery),
    responses(
        (status = 200, description = "Balance transactions of the connected account", body = TransactionsResponse),
        (status = 500, description = "Stripe API error or rejected input", body = ErrorBody)
    ),
    tag = "Connect"
))]
pub async fn list_transactions_handler(
    State(state): State<Arc<StripeState>>,
    Query(query): Query<TransactionsQuery>,
) -> Result<Json<TransactionsResponse>, StripeError> {
    let result = list_transactions(state.service.as_ref(), query).await;
    log_result(result, "Transactions fetched", "Error fetching transactions").map(Json)
}
