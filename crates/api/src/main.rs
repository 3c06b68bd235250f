use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bloglist_api::config::ServerConfig;
use bloglist_api::router::build_app_router;
use bloglist_api::state::AppState;
use bloglist_db::DbPool;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "bloglist_api=debug,bloglist_db=debug,tower_http=debug";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ServerConfig::from_env();
    let pool = prepare_database().await;

    let addr = SocketAddr::new(
        config.host.parse().expect("HOST must be an IP address"),
        config.port,
    );
    let drain_timeout = Duration::from_secs(config.shutdown_timeout_secs);
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    let listener = TcpListener::bind(addr)
        .await
        .unwrap_or_else(|e| panic!("Cannot listen on {addr}: {e}"));
    tracing::info!(%addr, "bloglist API listening");

    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let server = tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                stop_rx.await.ok();
            })
            .await
    });

    shutdown_signal().await;
    stop_tx.send(()).ok();

    // Sessions live in Postgres, so nothing besides the pool needs flushing.
    match tokio::time::timeout(drain_timeout, server).await {
        Ok(Ok(Ok(()))) => tracing::info!("In-flight requests drained"),
        Ok(Ok(Err(e))) => tracing::error!(error = %e, "Server stopped with an error"),
        Ok(Err(e)) => tracing::error!(error = %e, "Server task panicked"),
        Err(_) => tracing::warn!(
            timeout_secs = drain_timeout.as_secs(),
            "Drain timeout elapsed, abandoning open connections"
        ),
    }

    pool.close().await;
    tracing::info!("Shutdown complete");
}

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Connect, verify and migrate. Any failure here aborts startup.
async fn prepare_database() -> DbPool {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = bloglist_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to Postgres");
    bloglist_db::health_check(&pool)
        .await
        .expect("Postgres did not answer the health query");
    bloglist_db::run_migrations(&pool)
        .await
        .expect("Failed to apply migrations");

    tracing::info!("Database ready");
    pool
}

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install SIGINT handler");
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

    let signal = tokio::select! {
        () = interrupt => "SIGINT",
        () = terminate => "SIGTERM",
    };
    tracing::info!(signal, "Shutting down");
}
