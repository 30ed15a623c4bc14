//! tsunagi server entry point

use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tsunagi_core::GlobalIdCodec;
use tsunagi_graphql::HttpGraphqlClient;

use tsunagi_server::{
    auth::TokenIssuer,
    build_router,
    config::{ServerConfig, DEFAULT_TOKEN_SECRET},
    translation::Translator,
    AppState,
};

#[tokio::main]
async fn main() {
    // Config first so log.level can seed the filter
    let config_path = std::env::var("TSUNAGI_CONFIG").ok().or_else(|| {
        std::path::Path::new("config.yaml")
            .exists()
            .then(|| "config.yaml".to_string())
    });
    let loaded = ServerConfig::load(config_path.as_deref());
    let default_level = loaded
        .as_ref()
        .map(|c| c.log.level.clone())
        .unwrap_or_else(|_| "info".to_string());

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&default_level)),
        )
        .init();

    tracing::info!("Starting tsunagi server...");

    let config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        ServerConfig::default()
    });

    if config.token.secret == DEFAULT_TOKEN_SECRET {
        tracing::warn!("Backend tokens are signed with the default secret; set TSUNAGI_TOKEN_SECRET");
    }

    let graphql = HttpGraphqlClient::new(&config.backend.graphql_url, config.backend_timeout())
        .unwrap_or_else(|e| {
            tracing::error!("Failed to build GraphQL client: {}", e);
            std::process::exit(1);
        });
    tracing::info!("GraphQL backend: {}", graphql.endpoint());

    let bind_addr = config.bind_addr();

    let state = Arc::new(AppState {
        translator: Translator::new(Arc::new(graphql), TokenIssuer::new(&config.token)),
        id_codec: Arc::new(GlobalIdCodec),
        config,
    });

    let app = build_router(state);

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!("Failed to bind to {}: {}", bind_addr, e);
            std::process::exit(1);
        }
    };

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
    .unwrap_or_else(|e| {
        tracing::error!("Server error: {}", e);
    });

    tracing::info!("Server shut down gracefully");
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down..."),
    }
}
