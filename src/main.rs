//! Boots the three services: GraphQL (5051), REST CRUD (5052), messaging (5005).

use portfolio_backend::{
    api_routes, build_schema, common_routes, cors_layer, graphql_routes, messaging_routes,
    store, AppState, Config, MessagingState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "portfolio_backend=info".into()),
        )
        .init();

    let config = Config::from_env();
    let pool = store::connect(&config.database_url, config.db_pool_size)?;
    if let Err(error) = store::test_connection(&pool).await {
        tracing::error!(%error, "failed to connect to database; check configuration");
        return Err(error.into());
    }
    store::ensure_tables_present(&pool).await?;

    let state = AppState { pool: pool.clone() };
    let cors = cors_layer(&config.cors_origins);

    let rest = axum::Router::new()
        .merge(common_routes(state.clone()))
        .merge(api_routes(state))
        .layer(cors.clone())
        .layer(TraceLayer::new_for_http());

    let graphql = graphql_routes(build_schema())
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    let messaging = messaging_routes(MessagingState::new());

    let graphql_listener = TcpListener::bind(("0.0.0.0", config.graphql_port)).await?;
    let rest_listener = TcpListener::bind(("0.0.0.0", config.rest_port)).await?;
    let messaging_listener = TcpListener::bind(("0.0.0.0", config.messaging_port)).await?;

    tracing::info!(port = config.graphql_port, "GraphQL service listening");
    tracing::info!(port = config.rest_port, "REST API listening");
    tracing::info!(port = config.messaging_port, "messaging service listening");

    tokio::try_join!(
        axum::serve(graphql_listener, graphql).with_graceful_shutdown(shutdown_signal()),
        axum::serve(rest_listener, rest).with_graceful_shutdown(shutdown_signal()),
        axum::serve(messaging_listener, messaging).with_graceful_shutdown(shutdown_signal()),
    )?;

    pool.close().await;
    tracing::info!("database connections closed");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM so every server drains before the pool closes.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = tokio::signal::ctrl_c().await {
            tracing::error!(%error, "failed to install SIGINT handler");
            std::future::pending::<()>().await;
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::error!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
