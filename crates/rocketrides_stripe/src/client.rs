// --- File: crates/rocketrides_stripe/src/client.rs ---
use reqwest::{Client, RequestBuilder, Response};
use rocketrides_common::create_client;
use rocketrides_common::models::{
    AccountSession, BalanceTransaction, ConnectedAccount, ListObject, NewAccount, NewPaymentLink,
    NewPrice, PaymentLink, Price,
};
use rocketrides_config::StripeConfig;
use serde::de::DeserializeOwned;
use tracing::{debug, error};

use crate::error::StripeError;

/// Header that makes a platform request act on behalf of a connected account.
pub const STRIPE_ACCOUNT_HEADER: &str = "Stripe-Account";

type FormBody = Vec<(&'static str, String)>;

/// Thin client for the Stripe REST API.
///
/// Built once at startup and shared; cloning is cheap because the underlying
/// `reqwest::Client` is reference counted.
#[derive(Clone)]
pub struct StripeClient {
    http: Client,
    secret_key: String,
    api_base: String,
}

impl std::fmt::Debug for StripeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StripeClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl StripeClient {
    pub fn new(http: Client, secret_key: impl Into<String>, api_base: impl Into<String>) -> Self {
        Self {
            http,
            secret_key: secret_key.into(),
            api_base: api_base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Builds the client from configuration, resolving the secret key from the
    /// environment when the config does not carry it.
    pub fn from_config(config: &StripeConfig) -> Result<Self, StripeError> {
        let secret_key = config.resolve_secret_key().ok_or_else(|| {
            StripeError::ConfigError(
                "secret key missing: set STRIPE_SECRET_KEY or stripe.secret_key".to_string(),
            )
        })?;
        let http = create_client(config.request_timeout_secs, true).map_err(|e| {
            StripeError::ConfigError(format!("failed to build HTTP client: {}", e))
        })?;
        Ok(Self::new(http, secret_key, config.api_base.as_str()))
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/v1/{}", self.api_base, path)
    }

    fn authorized(&self, request: RequestBuilder, account_id: Option<&str>) -> RequestBuilder {
        let request = request.basic_auth(&self.secret_key, None::<&str>);
        match account_id {
            Some(account) => request.header(STRIPE_ACCOUNT_HEADER, account),
            None => request,
        }
    }

    async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        account_id: Option<&str>,
        form: &FormBody,
    ) -> Result<T, StripeError> {
        debug!(path, account = ?account_id, "POST to Stripe");
        let request = self.authorized(self.http.post(self.url(path)), account_id);
        let response = request.form(form).send().await?;
        parse_response(path, response).await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        account_id: Option<&str>,
        query: &[(&str, String)],
    ) -> Result<T, StripeError> {
        debug!(path, account = ?account_id, "GET from Stripe");
        let request = self.authorized(self.http.get(self.url(path)), account_id);
        let response = request.query(query).send().await?;
        parse_response(path, response).await
    }

    /// `POST /v1/accounts`: a platform-controlled account that onboards through
    /// the embedded component.
    pub async fn create_account(
        &self,
        account: &NewAccount,
    ) -> Result<ConnectedAccount, StripeError> {
        let form: FormBody = vec![
            ("controller[stripe_dashboard][type]", "none".to_string()),
            ("controller[fees][payer]", "application".to_string()),
            ("controller[losses][payments]", "application".to_string()),
            ("controller[requirements_collection]", "application".to_string()),
            ("capabilities[transfers][requested]", "true".to_string()),
            ("country", account.country.clone()),
        ];
        self.post_form("accounts", None, &form).await
    }

    /// `POST /v1/account_sessions` with only account onboarding enabled.
    pub async fn create_account_session(
        &self,
        account_id: &str,
    ) -> Result<AccountSession, StripeError> {
        let form: FormBody = vec![
            ("account", account_id.to_string()),
            ("components[account_onboarding][enabled]", "true".to_string()),
        ];
        self.post_form("account_sessions", None, &form).await
    }

    /// `POST /v1/prices` on behalf of `account_id`.
    pub async fn create_price(
        &self,
        account_id: &str,
        price: &NewPrice,
    ) -> Result<Price, StripeError> {
        let form: FormBody = vec![
            ("currency", price.currency.clone()),
            ("unit_amount", price.unit_amount.to_string()),
            ("product_data[name]", price.product_name.clone()),
        ];
        self.post_form("prices", Some(account_id), &form).await
    }

    /// `POST /v1/payment_links` on behalf of `account_id`.
    pub async fn create_payment_link(
        &self,
        account_id: &str,
        link: &NewPaymentLink,
    ) -> Result<PaymentLink, StripeError> {
        let form: FormBody = vec![
            ("line_items[0][price]", link.price_id.clone()),
            ("line_items[0][quantity]", link.quantity.to_string()),
            (
                "application_fee_amount",
                link.application_fee_amount.to_string(),
            ),
        ];
        self.post_form("payment_links", Some(account_id), &form).await
    }

    /// `GET /v1/balance_transactions` on behalf of `account_id`. Only the first
    /// page is fetched.
    pub async fn list_balance_transactions(
        &self,
        account_id: &str,
        limit: u8,
    ) -> Result<Vec<BalanceTransaction>, StripeError> {
        let query = [("limit", limit.to_string())];
        let list: ListObject<BalanceTransaction> = self
            .get("balance_transactions", Some(account_id), &query)
            .await?;
        Ok(list.data)
    }
}

async fn parse_response<T: DeserializeOwned>(
    path: &str,
    response: Response,
) -> Result<T, StripeError> {
    let status = response.status();
    let body_text = response.text().await?;

    if status.is_success() {
        Ok(serde_json::from_str(&body_text)?)
    } else {
        let message = extract_error_message(&body_text);
        error!(
            "[Stripe] {} failed with HTTP status {}: {}",
            path, status, message
        );
        Err(StripeError::ApiError {
            status_code: status.as_u16(),
            message,
        })
    }
}

/// Pulls `error.message` out of a Stripe error body, falling back to the raw
/// body when it is not the usual shape.
pub fn extract_error_message(body_text: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body_text)
        .ok()
        .and_then(|json_body| {
            json_body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| body_text.to_string())
}
