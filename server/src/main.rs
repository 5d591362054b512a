#![recursion_limit = "256"]

mod config;
mod routes;
mod services;
mod state;

use std::sync::Arc;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let config = match config::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let spotify = services::spotify::SpotifyClient::new(config.spotify).expect("spotify client init failed");
    let state = state::AppState::new(Arc::new(spotify), config.cookie_secure);

    // Spawn background session sweep.
    let _prune = services::session::spawn_prune_task(state.sessions.clone());

    let app = routes::leptos_app(state).expect("leptos app init failed");
    let port = config.port;
    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind");

    tracing::info!(%port, "albumranker listening");
    axum::serve(listener, app).await.expect("server failed");
}
