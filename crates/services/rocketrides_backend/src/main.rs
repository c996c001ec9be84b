// File: services/rocketrides_backend/src/main.rs
use rocketrides_backend::{build_app, build_service};
use rocketrides_common::{logging, ConnectError};
use rocketrides_config::load_config;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    logging::init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), ConnectError> {
    let config = Arc::new(load_config()?);
    let service = build_service(&config)?;
    let app = build_app(config.clone(), service);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Starting server at http://{}", addr);
    info!("API endpoints available at http://{}/api", addr);

    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
