use std::time::Duration;

use anyhow::Context;
use tokio::signal;
use tokio::sync::watch;

use diff_monitor::config::Config;
use diff_monitor::init_tracing;
use diff_monitor::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    tracing::info!("Starting Diff Monitor runner...");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    let interval = config.runner_interval();

    // Initialize application state
    tracing::info!("Connecting to database...");
    let state = AppState::new(config)
        .await
        .context("Failed to initialize application state")?;
    tracing::info!("Database connection established");

    // Set up graceful shutdown
    let (shutdown_tx, mut shutdown_rx) = watch::channel(false);

    // Spawn shutdown signal handler
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, stopping runner...");
        let _ = shutdown_tx.send(true);
    });

    let runner = state.runner();

    // One invocation at a time; the next starts `interval` after the last finished
    tracing::info!(interval_secs = interval.as_secs(), "Runner started");
    loop {
        if *shutdown_rx.borrow() {
            tracing::info!("Shutdown requested, exiting runner loop");
            break;
        }

        match runner.run_once(&state.config.endpoints).await {
            Ok(summary) => {
                tracing::info!(
                    total = summary.total(),
                    with_diff = summary.with_diff,
                    failed = summary.failed,
                    "Run finished"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "Run aborted");
            }
        }

        tokio::select! {
            _ = tokio::time::sleep(interval.max(Duration::from_secs(1))) => {}
            _ = shutdown_rx.changed() => {}
        }
    }

    tracing::info!("Runner shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
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
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
