use rocketrides_common::models::{
    AccountSession, BalanceTransaction, ConnectedAccount, NewAccount, NewPaymentLink, NewPrice,
    PaymentLink, Price,
};
use rocketrides_common::services::{BoxFuture, ConnectService};

use crate::client::StripeClient;
use crate::error::StripeError;

/// Stripe implementation of the provider service.
impl ConnectService for StripeClient {
    type Error = StripeError;

    fn create_account(&self, account: NewAccount) -> BoxFuture<'_, ConnectedAccount, Self::Error> {
        Box::pin(async move { StripeClient::create_account(self, &account).await })
    }

    fn create_account_session(
        &self,
        account_id: &str,
    ) -> BoxFuture<'_, AccountSession, Self::Error> {
        // Own the id so the future only borrows `self`.
        let account_id = account_id.to_string();
        Box::pin(async move { StripeClient::create_account_session(self, &account_id).await })
    }

    fn create_price(
        &self,
        account_id: &str,
        price: NewPrice,
    ) -> BoxFuture<'_, Price, Self::Error> {
        let account_id = account_id.to_string();
        Box::pin(async move { StripeClient::create_price(self, &account_id, &price).await })
    }

    fn create_payment_link(
        &self,
        account_id: &str,
        link: NewPaymentLink,
    ) -> BoxFuture<'_, PaymentLink, Self::Error> {
        let account_id = account_id.to_string();
        Box::pin(async move { StripeClient::create_payment_link(self, &account_id, &link).await })
    }

    fn list_balance_transactions(
        &self,
        account_id: &str,
        limit: u8,
    ) -> BoxFuture<'_, Vec<BalanceTransaction>, Self::Error> {
        let account_id = account_id.to_string();
        Box::pin(async move {
            StripeClient::list_balance_transactions(self, &account_id, limit).await
        })
    }
}
