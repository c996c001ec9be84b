// File: services/rocketrides_backend/src/lib.rs
use axum::{routing::get, Router};
use rocketrides_common::{config_error, ConnectError};
use rocketrides_config::AppConfig;
use rocketrides_stripe::{admin_routes, routes as stripe_routes, DynConnectService, StripeClient};
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::info;

pub const WELCOME_MESSAGE: &str = "Welcome to the Rocket Rides API!";

/// Builds the Stripe-backed service shared by every handler.
pub fn build_service(config: &AppConfig) -> Result<Arc<DynConnectService>, ConnectError> {
    let client = StripeClient::from_config(&config.stripe).map_err(config_error)?;
    info!("Stripe client ready for {}", client.api_base());
    Ok(Arc::new(client))
}

/// Assembles the full application router.
///
/// - `/api/*`: JSON endpoints
/// - `/admin/dashboard`: transaction table
/// - `/api/docs`: Swagger UI (`openapi` feature)
/// - anything else: `server.static_dir`, when configured
pub fn build_app(config: Arc<AppConfig>, service: Arc<DynConnectService>) -> Router {
    let api_router = Router::new()
        .route("/", get(|| async { WELCOME_MESSAGE }))
        .merge(stripe_routes(config.clone(), service.clone()));

    let mut app = Router::new()
        .nest("/api", api_router)
        .merge(admin_routes(config.clone(), service));

    // Conditionally add Swagger UI and JSON endpoint if openapi feature enabled
    #[cfg(feature = "openapi")]
    {
        use rocketrides_stripe::StripeApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Rocket Rides API",
                version = "0.1.0",
                description = "Stripe Connect onboarding and payment links",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            servers((url = "/api", description = "Main API Prefix")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(StripeApiDoc::openapi());
        info!("Adding Swagger UI at /api/docs");

        let swagger_ui = SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", openapi_doc);
        app = app.merge(swagger_ui);
    }

    if let Some(static_dir) = config.server.static_dir.as_deref() {
        info!("Serving static files from {}", static_dir);
        app = app.fallback_service(ServeDir::new(static_dir));
    }

    app.layer(TraceLayer::new_for_http())
}
