// Main entry point for the watcher daemon

use anyhow::{Context, Result};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use watcher::{
    Config, HttpFetcher, Notifier, ScanJob, ScanOptions, Scanner, TelegramNotifier,
    start_scheduler,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,watcher=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting extension update watcher");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        extensions = config.extension_ids.len(),
        window_days = config.check_days,
        check_time = %config.check_time.format("%H:%M"),
        "Configuration loaded"
    );

    let scanner = Scanner::new(
        HttpFetcher::new(),
        ScanOptions {
            window_days: config.check_days,
            min_delay_secs: config.min_delay_secs,
            max_delay_secs: config.max_delay_secs,
        },
    );
    let notifier: Arc<dyn Notifier> = Arc::new(TelegramNotifier::new(
        config.telegram_bot_token.clone(),
        config.telegram_chat_id.clone(),
    ));
    let job = Arc::new(ScanJob::new(scanner, notifier, config.extension_ids.clone()));

    // Scan once on startup
    job.trigger().await;

    // Then daily at the configured time
    let _scheduler = start_scheduler(job, config.check_time)
        .await
        .context("Failed to start scheduler")?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutting down");

    Ok(())
}
