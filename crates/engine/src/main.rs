//! RPSSL Engine - Main entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method};
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rpssl_engine::api;
use rpssl_engine::app::App;
use rpssl_engine::infrastructure::{
    app_settings::AppSettings,
    clock::SystemClock,
    persistence::SqlitePlayResultRepo,
    ports::ClockPort,
    random_number_client::HttpRandomNumberClient,
    resilient_random::ResilientRandomNumberClient,
    retry::RetryPolicy,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment from repo root (the engine may be started from `crates/engine`).
    load_dotenv_from_repo_root();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rpssl_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting RPSSL Engine");

    // Create cancellation token for graceful shutdown
    let cancel_token = CancellationToken::new();
    setup_shutdown_signal(cancel_token.clone());

    // Load configuration
    let settings = AppSettings::from_env()?;
    tracing::info!("Configuration loaded");
    tracing::info!("  Random number service: {}", settings.random_service_url);
    tracing::info!("  Database: {}", settings.database_url);
    tracing::info!("  Latest results count: {}", settings.latest_results_count);

    let clock: Arc<dyn ClockPort> = Arc::new(SystemClock::new());

    // Scoreboard storage
    let play_results = Arc::new(
        SqlitePlayResultRepo::connect(&settings.database_url, clock, RetryPolicy::storage())
            .await?,
    );

    // Upstream random numbers, retried on transient failures
    let http_client = Arc::new(HttpRandomNumberClient::with_timeout(
        settings.random_service_url.as_str(),
        settings.http_timeout,
    ));
    let retry_policy = RetryPolicy::upstream();
    tracing::info!(
        "Random number client configured with retry: max_retries={}",
        retry_policy.max_retries
    );
    let random_numbers = Arc::new(ResilientRandomNumberClient::new(http_client, retry_policy));

    let addr = settings.socket_addr()?;
    let cors = build_cors_layer(&settings.cors_allowed_origins);

    let app = Arc::new(App::new(
        &settings,
        random_numbers,
        play_results,
        cancel_token.clone(),
    ));

    let mut router = api::http::routes()
        .with_state(app)
        .layer(TraceLayer::new_for_http());

    if let Some(cors) = cors {
        router = router.layer(cors);
    }

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            tracing::info!("HTTP server received shutdown signal");
        })
        .await?;

    tracing::info!("RPSSL Engine shutdown complete");
    Ok(())
}

/// Spawns a task that cancels `cancel_token` on SIGTERM/SIGINT
fn setup_shutdown_signal(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                tracing::info!("Received Ctrl+C, initiating graceful shutdown...");
            }
            _ = terminate => {
                tracing::info!("Received SIGTERM, initiating graceful shutdown...");
            }
        }

        cancel_token.cancel();
    });
}

fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

fn build_cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    if allowed_origins.is_empty() {
        return None;
    }

    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    if allowed_origins.iter().any(|origin| origin == "*") {
        cors = cors.allow_origin(Any);
    } else {
        let origins: Vec<HeaderValue> = allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        if origins.is_empty() {
            return None;
        }

        cors = cors.allow_origin(origins);
    }

    Some(cors)
}
