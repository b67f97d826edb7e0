mod chat_client;
mod config;
mod errors;
mod extract;
mod requests;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat_client::outbox::{ChatOutbox, RetryPolicy};
use crate::chat_client::HttpChatNotifier;
use crate::config::Config;
use crate::requests::workflow::RequestWorkflow;
use crate::routes::build_router;
use crate::state::AppState;

/// Delay before the first retry of a failed chat notification.
const CHAT_RETRY_BASE_DELAY: Duration = Duration::from_millis(500);
/// How long shutdown waits for queued chat notifications to go out.
const OUTBOX_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{crate_name}={level},tower_http={level}",
                crate_name = env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting {} v{}",
        config.service_name,
        env!("CARGO_PKG_VERSION")
    );

    // Chat outbox (disabled when CHAT_URL is unset)
    let (chat, outbox_handle) = match &config.chat_url {
        Some(url) => {
            let notifier = HttpChatNotifier::new(url, config.chat_timeout)
                .context("Failed to build chat HTTP client")?;
            let (outbox, handle) = ChatOutbox::spawn(
                Arc::new(notifier),
                config.chat_outbox_capacity,
                RetryPolicy {
                    max_attempts: config.chat_max_attempts,
                    base_delay: CHAT_RETRY_BASE_DELAY,
                },
            );
            info!(
                "Chat notifications enabled: {url} (timeout {}s, {} attempts)",
                config.chat_timeout.as_secs(),
                config.chat_max_attempts
            );
            (Some(outbox), Some(handle))
        }
        None => {
            warn!("CHAT_URL not set; confirmed requests will not open chat sessions");
            (None, None)
        }
    };

    let state = AppState {
        workflow: Arc::new(RequestWorkflow::new(chat)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("{} listening on {addr}", config.service_name);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router (and with it the last outbox sender) is gone; let the worker drain.
    if let Some(handle) = outbox_handle {
        match tokio::time::timeout(OUTBOX_DRAIN_TIMEOUT, handle).await {
            Ok(Ok(())) => info!("Chat outbox drained"),
            Ok(Err(e)) => error!("Chat outbox worker failed: {e}"),
            Err(_) => warn!("Chat outbox did not drain in time; pending notifications dropped"),
        }
    }

    info!("Shutdown complete");
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("Received SIGINT, shutting down"),
        () = terminate => info!("Received SIGTERM, shutting down"),
    }
}
