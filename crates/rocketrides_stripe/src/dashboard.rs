//! Admin transaction dashboard.
//!
//! Server-rendered counterpart of the transaction table shown to platform
//! operators: one row per balance transaction of a connected account.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use rocketrides_common::models::BalanceTransaction;
use std::sync::Arc;
use tracing::error;

use crate::handlers::StripeState;
use crate::logic::{list_transactions, TransactionsQuery};

/// One display row of the transaction table.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub id: String,
    pub amount: String,
    pub fee: String,
    pub net: String,
    pub description: String,
    pub created: String,
}

impl From<&BalanceTransaction> for TransactionRow {
    fn from(tx: &BalanceTransaction) -> Self {
        let description = match tx.description.as_deref() {
            Some(d) if !d.is_empty() => d.to_string(),
            _ => "N/A".to_string(),
        };
        Self {
            id: tx.id.clone(),
            amount: format_amount(tx.amount, &tx.currency),
            fee: format_amount(tx.fee, &tx.currency),
            net: format_amount(tx.net, &tx.currency),
            description,
            created: tx.created.map(format_created).unwrap_or_default(),
        }
    }
}

/// Major units without trailing zeros: `2000` → `20`, `2050` → `20.5`.
pub fn format_minor_units(minor_units: i64) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    let (whole, cents) = (abs / 100, abs % 100);
    match cents {
        0 => format!("{}{}", sign, whole),
        c if c % 10 == 0 => format!("{}{}.{}", sign, whole, c / 10),
        c => format!("{}{}.{:02}", sign, whole, c),
    }
}

/// `2000, "usd"` → `20 USD`.
pub fn format_amount(minor_units: i64, currency: &str) -> String {
    format!(
        "{} {}",
        format_minor_units(minor_units),
        currency.to_uppercase()
    )
}

fn format_created(timestamp: i64) -> String {
    DateTime::<Utc>::from_timestamp(timestamp, 0)
        .map(|dt| dt.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_default()
}

#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub connected_account_id: String,
    pub rows: Vec<TransactionRow>,
    pub error: Option<String>,
}

/// Renders the transaction table for `?connectedAccountId=`.
///
/// # Endpoint
///
/// `GET /admin/dashboard`
///
/// Without an account id only the lookup form is shown.
pub async fn dashboard_handler(
    State(state): State<Arc<StripeState>>,
    Query(query): Query<TransactionsQuery>,
) -> Response {
    let connected_account_id = query
        .connected_account_id
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    if connected_account_id.is_empty() {
        return DashboardTemplate {
            connected_account_id,
            rows: Vec::new(),
            error: None,
        }
        .into_response();
    }

    let query = TransactionsQuery {
        connected_account_id: Some(connected_account_id.clone()),
    };
    match list_transactions(state.service.as_ref(), query).await {
        Ok(response) => DashboardTemplate {
            connected_account_id,
            rows: response.transactions.iter().map(TransactionRow::from).collect(),
            error: None,
        }
        .into_response(),
        Err(e) => {
            error!("Error rendering dashboard for {}: {}", connected_account_id, e);
            let page = DashboardTemplate {
                connected_account_id,
                rows: Vec::new(),
                error: Some(e.client_message()),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, page).into_response()
        }
    }
}
