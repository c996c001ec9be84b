// --- File: crates/rocketrides_stripe/src/logic.rs ---
use rocketrides_common::models::{BalanceTransaction, NewAccount, NewPaymentLink, NewPrice};
use rocketrides_common::services::ConnectService;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::StripeError;

// Conditionally import ToSchema if openapi feature is enabled
#[cfg(feature = "openapi")]
use utoipa::{IntoParams, ToSchema};

/// The provider service as stored in handler state.
pub type DynConnectService = dyn ConnectService<Error = StripeError>;

/// Platform share of every payment link, in percent of the gross amount.
pub const APPLICATION_FEE_PERCENT: i64 = 10;
pub const DEFAULT_CURRENCY: &str = "usd";
pub const DEFAULT_DESCRIPTION: &str = "Custom Payment";
/// Stripe's maximum page size; no cursor is exposed beyond the first page.
pub const TRANSACTION_LIST_LIMIT: u8 = 100;

// --- Data Structures ---

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AccountSessionRequest {
    #[cfg_attr(feature = "openapi", schema(example = "acct_1PabcXYZ"))]
    pub account: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct AccountSessionResponse {
    #[cfg_attr(feature = "openapi", schema(example = "accs_secret__abc123"))]
    pub client_secret: String,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreateAccountResponse {
    #[cfg_attr(feature = "openapi", schema(example = "acct_1PabcXYZ"))]
    pub account: String,
}

/// Request from the onboarding page to create a payment link.
#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreatePaymentLinkRequest {
    #[serde(rename = "accountId")]
    #[cfg_attr(feature = "openapi", schema(example = "acct_1PabcXYZ"))]
    pub account_id: Option<String>,
    /// Gross amount in minor units.
    #[cfg_attr(feature = "openapi", schema(example = 2000))]
    pub amount: Option<i64>,
    #[cfg_attr(feature = "openapi", schema(example = "usd"))]
    pub currency: Option<String>,
    #[cfg_attr(feature = "openapi", schema(example = "Service Payment"))]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct CreatePaymentLinkResponse {
    #[serde(rename = "paymentLink")]
    #[cfg_attr(
        feature = "openapi",
        schema(example = "https://buy.stripe.com/test_6oE5lc0Zt1AB")
    )]
    pub payment_link: String,
}

#[derive(Deserialize, Debug, Default)]
#[cfg_attr(feature = "openapi", derive(IntoParams, ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct TransactionsQuery {
    #[serde(rename = "connectedAccountId")]
    #[cfg_attr(feature = "openapi", param(example = "acct_1PabcXYZ"))]
    pub connected_account_id: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct TransactionsResponse {
    pub transactions: Vec<BalanceTransaction>,
}

/// Validated inputs for the two Stripe calls behind a payment link.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentLinkPlan {
    pub account_id: String,
    pub price: NewPrice,
    pub application_fee_amount: i64,
}

impl CreatePaymentLinkRequest {
    /// Applies defaults and validates the request.
    pub fn into_plan(self) -> Result<PaymentLinkPlan, StripeError> {
        let account_id = require_account_id(self.account_id, "accountId")?;

        let amount = match self.amount {
            Some(amount) if amount > 0 => amount,
            _ => {
                return Err(StripeError::InvalidRequest(
                    "amount must be a positive integer number of minor currency units"
                        .to_string(),
                ))
            }
        };

        let currency = normalize_currency(self.currency)?;
        let product_name = self
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());

        Ok(PaymentLinkPlan {
            account_id,
            price: NewPrice {
                currency,
                unit_amount: amount,
                product_name,
            },
            application_fee_amount: application_fee_amount(amount),
        })
    }
}

/// Platform fee for a gross amount: 10%, rounded to the nearest minor unit
/// with halves rounding up.
pub fn application_fee_amount(amount: i64) -> i64 {
    let scaled = i128::from(amount) * i128::from(APPLICATION_FEE_PERCENT) + 50;
    scaled.div_euclid(100) as i64
}

/// Lowercases the currency code, defaulting to `usd` when absent or empty.
pub fn normalize_currency(currency: Option<String>) -> Result<String, StripeError> {
    let currency = match currency.as_deref().map(str::trim) {
        None | Some("") => return Ok(DEFAULT_CURRENCY.to_string()),
        Some(c) => c.to_ascii_lowercase(),
    };

    if currency.len() == 3 && currency.chars().all(|c| c.is_ascii_alphabetic()) {
        Ok(currency)
    } else {
        Err(StripeError::InvalidRequest(format!(
            "currency must be a three-letter ISO code, got '{}'",
            currency
        )))
    }
}

/// Trims and requires a connected-account id.
///
/// An empty id would turn on-behalf-of calls into calls on the platform
/// account itself.
pub fn require_account_id(value: Option<String>, field: &str) -> Result<String, StripeError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| StripeError::InvalidRequest(format!("{} is required", field)))
}

// --- Core Logic Functions ---

/// Creates a connected account in the configured country.
pub async fn create_account<S>(
    service: &S,
    country: &str,
) -> Result<CreateAccountResponse, StripeError>
where
    S: ConnectService<Error = StripeError> + ?Sized,
{
    let account = service
        .create_account(NewAccount {
            country: country.to_string(),
        })
        .await?;
    info!("[Stripe Logic] Created connected account {}", account.id);
    Ok(CreateAccountResponse { account: account.id })
}

/// Creates an onboarding session and returns its client secret.
pub async fn create_account_session<S>(
    service: &S,
    request: AccountSessionRequest,
) -> Result<AccountSessionResponse, StripeError>
where
    S: ConnectService<Error = StripeError> + ?Sized,
{
    let account_id = require_account_id(request.account, "account")?;
    let session = service.create_account_session(&account_id).await?;
    let client_secret = session
        .client_secret
        .filter(|secret| !secret.is_empty())
        .ok_or(StripeError::MissingField("account session client_secret"))?;
    Ok(AccountSessionResponse { client_secret })
}

/// Creates a price on the connected account, then a payment link for it that
/// carries the platform fee.
///
/// A failed price creation stops before any link exists. A failed link
/// creation leaves the price behind unused.
pub async fn create_payment_link<S>(
    service: &S,
    request: CreatePaymentLinkRequest,
) -> Result<CreatePaymentLinkResponse, StripeError>
where
    S: ConnectService<Error = StripeError> + ?Sized,
{
    let plan = request.into_plan()?;

    let price = service
        .create_price(&plan.account_id, plan.price.clone())
        .await?;
    info!(
        "[Stripe Logic] Created price {} ({} {}) on {}",
        price.id, plan.price.unit_amount, plan.price.currency, plan.account_id
    );

    let link = service
        .create_payment_link(
            &plan.account_id,
            NewPaymentLink {
                price_id: price.id,
                quantity: 1,
                application_fee_amount: plan.application_fee_amount,
            },
        )
        .await?;
    let url = link
        .url
        .ok_or(StripeError::MissingField("payment link url"))?;
    info!(
        "[Stripe Logic] Created payment link {} with application fee {}",
        link.id, plan.application_fee_amount
    );

    Ok(CreatePaymentLinkResponse { payment_link: url })
}

/// Lists the most recent balance transactions of a connected account.
pub async fn list_transactions<S>(
    service: &S,
    query: TransactionsQuery,
) -> Result<TransactionsResponse, StripeError>
where
    S: ConnectService<Error = StripeError> + ?Sized,
{
    let account_id = require_account_id(query.connected_account_id, "connectedAccountId")?;
    let transactions = service
        .list_balance_transactions(&account_id, TRANSACTION_LIST_LIMIT)
        .await?;
    info!(
        "[Stripe Logic] Fetched {} balance transactions for {}",
        transactions.len(),
        account_id
    );
    Ok(TransactionsResponse { transactions })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(amount: Option<i64>) -> CreatePaymentLinkRequest {
        CreatePaymentLinkRequest {
            account_id: Some("acct_123".to_string()),
            amount,
            currency: None,
            description: None,
        }
    }

    #[test]
    fn test_fee_is_ten_percent() {
        assert_eq!(application_fee_amount(2000), 200);
        assert_eq!(application_fee_amount(1000), 100);
        assert_eq!(application_fee_amount(1), 0);
    }

    #[test]
    fn test_fee_rounds_halves_up() {
        assert_eq!(application_fee_amount(5), 1);
        assert_eq!(application_fee_amount(4), 0);
        assert_eq!(application_fee_amount(15), 2);
        assert_eq!(application_fee_amount(1999), 200);
        assert_eq!(application_fee_amount(1994), 199);
    }

    #[test]
    fn test_fee_matches_float_rounding_over_a_range() {
        for amount in 1..5_000i64 {
            let expected = (amount as f64 / 10.0).round() as i64;
            assert_eq!(application_fee_amount(amount), expected, "amount {}", amount);
        }
    }

    #[test]
    fn test_defaults_applied() {
        let plan = request(Some(2000)).into_plan().unwrap();
        assert_eq!(plan.account_id, "acct_123");
        assert_eq!(plan.price.currency, "usd");
        assert_eq!(plan.price.product_name, "Custom Payment");
        assert_eq!(plan.price.unit_amount, 2000);
        assert_eq!(plan.application_fee_amount, 200);
    }

    #[test]
    fn test_empty_strings_fall_back_to_defaults() {
        let plan = CreatePaymentLinkRequest {
            currency: Some(String::new()),
            description: Some(String::new()),
            ..request(Some(500))
        }
        .into_plan()
        .unwrap();
        assert_eq!(plan.price.currency, "usd");
        assert_eq!(plan.price.product_name, "Custom Payment");
    }

    #[test]
    fn test_only_absent_or_empty_description_is_defaulted() {
        let plan = CreatePaymentLinkRequest {
            description: Some("  ".to_string()),
            ..request(Some(500))
        }
        .into_plan()
        .unwrap();
        assert_eq!(plan.price.product_name, "  ");
    }

    #[test]
    fn test_currency_is_case_insensitive() {
        let plan = CreatePaymentLinkRequest {
            currency: Some("EUR".to_string()),
            description: Some("Service Payment".to_string()),
            ..request(Some(2000))
        }
        .into_plan()
        .unwrap();
        assert_eq!(plan.price.currency, "eur");
        assert_eq!(plan.price.product_name, "Service Payment");
    }

    #[test]
    fn test_rejects_bad_currency() {
        for bad in ["dollars", "u$d", "us"] {
            let result = CreatePaymentLinkRequest {
                currency: Some(bad.to_string()),
                ..request(Some(2000))
            }
            .into_plan();
            assert!(
                matches!(result, Err(StripeError::InvalidRequest(_))),
                "currency {}",
                bad
            );
        }
    }

    #[test]
    fn test_rejects_non_positive_or_missing_amount() {
        for amount in [None, Some(0), Some(-100)] {
            let result = request(amount).into_plan();
            assert!(
                matches!(result, Err(StripeError::InvalidRequest(_))),
                "amount {:?}",
                amount
            );
        }
    }

    #[test]
    fn test_requires_account_id() {
        let result = CreatePaymentLinkRequest {
            account_id: Some("   ".to_string()),
            ..request(Some(2000))
        }
        .into_plan();
        match result {
            Err(StripeError::InvalidRequest(msg)) => assert_eq!(msg, "accountId is required"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_request_uses_camel_case_wire_names() {
        let request: CreatePaymentLinkRequest = serde_json::from_str(
            r#"{"accountId":"acct_9","amount":2000,"currency":"usd","description":"Ride"}"#,
        )
        .unwrap();
        assert_eq!(request.account_id.as_deref(), Some("acct_9"));
        assert_eq!(request.amount, Some(2000));

        let response = serde_json::to_value(CreatePaymentLinkResponse {
            payment_link: "https://buy.stripe.com/test_x".to_string(),
        })
        .unwrap();
        assert_eq!(
            response,
            serde_json::json!({ "paymentLink": "https://buy.stripe.com/test_x" })
        );
    }

    #[test]
    fn test_fractional_amount_does_not_deserialize() {
        let result =
            serde_json::from_str::<CreatePaymentLinkRequest>(r#"{"accountId":"a","amount":20.5}"#);
        assert!(result.is_err());
    }
}
