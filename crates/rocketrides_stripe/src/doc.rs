// --- File: crates/rocketrides_stripe/src/doc.rs ---
#![cfg(feature = "openapi")]
use rocketrides_common::models::BalanceTransaction;
use rocketrides_common::ErrorBody;
use utoipa::OpenApi;

use crate::logic::{
    AccountSessionRequest, AccountSessionResponse, CreateAccountResponse,
    CreatePaymentLinkRequest, CreatePaymentLinkResponse, TransactionsQuery,
    TransactionsResponse,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::create_account_handler,
        crate::handlers::account_session_handler,
        crate::handlers::create_payment_link_handler,
        crate::handlers::list_transactions_handler
    ),
    components(
        schemas(
            AccountSessionRequest, AccountSessionResponse,
            CreatePaymentLinkRequest, CreatePaymentLinkResponse,
            CreateAccountResponse,
            TransactionsQuery, TransactionsResponse,
            BalanceTransaction,
            ErrorBody
        )
    ),
    tags(
        (name = "Connect", description = "Connected account onboarding, payment links and balance transactions")
    )
)]
pub struct StripeApiDoc;
