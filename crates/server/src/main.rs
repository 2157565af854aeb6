use std::error::Error;

use server::auth::jwt::JwtKeys;
use server::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let _ = dotenvy::dotenv();

    let config = server::config::load_config();
    server::telemetry::init_logging(&config.features);
    server::health::record_start_time();

    let keys = match JwtKeys::from_env() {
        Ok(keys) => keys,
        Err(e) => {
            tracing::error!(error = %e, "refusing to start without a signing key");
            return Err(e.into());
        }
    };

    let state = AppState::seeded(keys);
    let counts = state.store.counts()?;
    tracing::info!(records = ?counts, "record store seeded");

    let router = server::openapi::api_router(state, &config.features, &config.server)
        .layer(tower_http::trace::TraceLayer::new_for_http())
        .layer(tower_http::request_id::PropagateRequestIdLayer::x_request_id())
        .layer(tower_http::request_id::SetRequestIdLayer::x_request_id(
            tower_http::request_id::MakeRequestUuid,
        ));

    let addr = server::config::bind_address(&config.server);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "permitflow listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shut down cleanly");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
    }
}
