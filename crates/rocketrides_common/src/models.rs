// --- File: crates/rocketrides_common/src/models.rs ---

//! Payment provider resources as seen by this service.
//!
//! Every resource is created and owned by the provider; these are read-only
//! snapshots of its responses. Amounts are integers in minor currency units.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A connected (sub-merchant) account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectedAccount {
    pub id: String,
}

/// Parameters for creating a connected account.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    /// Two-letter country code of the account.
    pub country: String,
}

/// Short-lived session authorizing the embedded onboarding component.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountSession {
    pub account: Option<String>,
    pub client_secret: Option<String>,
    /// Unix timestamp after which the client secret is no longer valid.
    pub expires_at: Option<i64>,
}

/// Parameters for a one-off price with an inline product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPrice {
    /// Lowercase ISO currency code.
    pub currency: String,
    pub unit_amount: i64,
    pub product_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Price {
    pub id: String,
    pub currency: Option<String>,
    pub unit_amount: Option<i64>,
}

/// Parameters for a single-line-item payment link.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPaymentLink {
    pub price_id: String,
    pub quantity: u32,
    /// Platform fee collected at settlement, in minor units.
    pub application_fee_amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentLink {
    pub id: String,
    pub url: Option<String>,
}

/// A ledger entry on a connected account's balance.
///
/// Fields not modelled here are kept in `extra` so the record can be handed
/// back to clients unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct BalanceTransaction {
    #[cfg_attr(feature = "openapi", schema(example = "txn_1PabcXYZ"))]
    pub id: String,
    #[cfg_attr(feature = "openapi", schema(example = 2000))]
    pub amount: i64,
    #[cfg_attr(feature = "openapi", schema(example = 200))]
    pub fee: i64,
    #[cfg_attr(feature = "openapi", schema(example = 1800))]
    pub net: i64,
    #[cfg_attr(feature = "openapi", schema(example = "usd"))]
    pub currency: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Unix timestamp of creation.
    #[serde(default)]
    pub created: Option<i64>,
    #[serde(flatten)]
    #[cfg_attr(feature = "openapi", schema(value_type = Object))]
    pub extra: Map<String, Value>,
}

/// A page of results from a provider list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListObject<T> {
    pub object: String,
    pub data: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_transaction_keeps_unknown_fields() {
        let raw = serde_json::json!({
            "id": "txn_1",
            "object": "balance_transaction",
            "amount": 2000,
            "fee": 200,
            "net": 1800,
            "currency": "usd",
            "description": null,
            "created": 1718000000,
            "type": "payment",
            "status": "available"
        });
        let txn: BalanceTransaction = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(txn.amount, 2000);
        assert_eq!(txn.description, None);
        assert_eq!(txn.extra.get("type"), Some(&Value::from("payment")));

        let back = serde_json::to_value(&txn).unwrap();
        assert_eq!(back, raw);
    }

    #[test]
    fn test_list_object_with_empty_data() {
        let raw = r#"{"object":"list","data":[],"has_more":false,"url":"/v1/balance_transactions"}"#;
        let list: ListObject<BalanceTransaction> = serde_json::from_str(raw).unwrap();
        assert!(list.data.is_empty());
        assert!(!list.has_more);
    }
}
