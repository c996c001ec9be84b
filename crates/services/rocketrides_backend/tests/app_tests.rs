use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use rocketrides_backend::{build_app, build_service, WELCOME_MESSAGE};
use rocketrides_config::{AppConfig, StripeConfig};
use rocketrides_stripe::StripeClient;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app_against(server: &MockServer) -> Router {
    let config = Arc::new(AppConfig::default());
    let client = StripeClient::new(reqwest::Client::new(), "sk_test_123", server.uri());
    build_app(config, Arc::new(client))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_welcome_route() {
    let server = MockServer::start().await;
    let response = app_against(&server)
        .oneshot(Request::builder().uri("/api").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], WELCOME_MESSAGE.as_bytes());
}

#[tokio::test]
async fn test_payment_link_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/prices"))
        .and(header("Stripe-Account", "acct_123"))
        .and(body_string_contains("unit_amount=2000"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "price_1", "object": "price" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/payment_links"))
        .and(header("Stripe-Account", "acct_123"))
        .and(body_string_contains("line_items%5B0%5D%5Bprice%5D=price_1"))
        .and(body_string_contains("application_fee_amount=200"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "plink_1",
            "object": "payment_link",
            "url": "https://buy.stripe.com/test_abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/create_payment_link")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "accountId": "acct_123", "amount": 2000 }).to_string(),
        ))
        .unwrap();
    let response = app_against(&server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "paymentLink": "https://buy.stripe.com/test_abc" })
    );
}

#[tokio::test]
async fn test_stripe_rejection_surfaces_as_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/balance_transactions"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {
                "type": "invalid_request_error",
                "message": "The provided key does not have access to account 'acct_x'"
            }
        })))
        .mount(&server)
        .await;

    let response = app_against(&server)
        .oneshot(
            Request::builder()
                .uri("/api/transactions?connectedAccountId=acct_x")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "The provided key does not have access to account 'acct_x'" })
    );
}

#[tokio::test]
async fn test_unknown_route_is_404_without_static_dir() {
    let server = MockServer::start().await;
    let response = app_against(&server)
        .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_static_dir_is_served_as_fallback() {
    let server = MockServer::start().await;
    let mut config = AppConfig::default();
    config.server.static_dir = Some(concat!(env!("CARGO_MANIFEST_DIR"), "/tests").to_string());
    let client = StripeClient::new(reqwest::Client::new(), "sk_test_123", server.uri());
    let app = build_app(Arc::new(config), Arc::new(client));

    let response = app
        .oneshot(Request::builder().uri("/app_tests.rs").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[test]
fn test_build_service_with_configured_key() {
    let config = AppConfig {
        stripe: StripeConfig {
            secret_key: Some("sk_test_abc".to_string()),
            ..StripeConfig::default()
        },
        ..AppConfig::default()
    };
    assert!(build_service(&config).is_ok());
}
