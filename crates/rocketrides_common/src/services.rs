// --- File: crates/rocketrides_common/src/services.rs ---
//! Service abstraction over the payment provider.
//!
//! Handlers depend on [`ConnectService`] rather than a concrete client, so the
//! provider client is built once at startup and injected, and tests can swap
//! in a fake.

use std::future::Future;
use std::pin::Pin;

use crate::models::{
    AccountSession, BalanceTransaction, ConnectedAccount, NewAccount, NewPaymentLink, NewPrice,
    PaymentLink, Price,
};

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// Operations this platform performs against the payment provider.
///
/// Every call taking an `account_id` runs on behalf of that connected account.
pub trait ConnectService: Send + Sync {
    /// Error type returned by provider operations.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Create a connected account.
    fn create_account(&self, account: NewAccount) -> BoxFuture<'_, ConnectedAccount, Self::Error>;

    /// Create an onboarding session for the embedded account-onboarding component.
    fn create_account_session(
        &self,
        account_id: &str,
    ) -> BoxFuture<'_, AccountSession, Self::Error>;

    /// Create a price (with an inline product) owned by the connected account.
    fn create_price(
        &self,
        account_id: &str,
        price: NewPrice,
    ) -> BoxFuture<'_, Price, Self::Error>;

    /// Create a payment link for a price owned by the connected account.
    fn create_payment_link(
        &self,
        account_id: &str,
        link: NewPaymentLink,
    ) -> BoxFuture<'_, PaymentLink, Self::Error>;

    /// List the most recent balance transactions of the connected account.
    fn list_balance_transactions(
        &self,
        account_id: &str,
        limit: u8,
    ) -> BoxFuture<'_, Vec<BalanceTransaction>, Self::Error>;
}
