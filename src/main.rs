mod alerts;
mod config;
mod errors;
mod funding;
mod types;

use anyhow::Result;
use tracing::{error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::alerts::TelegramClient;
use crate::config::Config;
use crate::funding::FundingMonitor;

#[tokio::main]
async fn main() -> Result<()> {
    // Load config
    let config = Config::from_env()?;

    // Setup logging
    let _subscriber = FmtSubscriber::builder()
        .with_max_level(match config.log_level.as_str() {
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        })
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .init();

    info!("╔═══════════════════════════════════════╗");
    info!("║      MEXC Funding Rate Monitor        ║");
    info!("╠═══════════════════════════════════════╣");
    info!("║ Symbol: {:29} ║", config.symbol);
    info!("║ Interval: {:25}s ║", config.poll_interval.as_secs());
    info!("║ Alert threshold: {:20.6} ║", config.alert_threshold);
    info!("╚═══════════════════════════════════════╝");

    let monitor = FundingMonitor::new(&config);
    let routine = TelegramClient::routine(&config);
    let alert = TelegramClient::alert(&config);

    tokio::select! {
        _ = run_poll_loop(&config, &monitor, &routine, &alert) => {}
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, exiting...");
        }
    }

    Ok(())
}

/// Poll-format-notify cycle on a fixed interval. The first tick fires
/// immediately; every fault is logged and the loop keeps going.
async fn run_poll_loop(
    config: &Config,
    monitor: &FundingMonitor,
    routine: &TelegramClient,
    alert: &TelegramClient,
) {
    let mut interval = tokio::time::interval(config.poll_interval);

    loop {
        interval.tick().await;

        let snapshot = match monitor.fetch_funding_rate().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                error!("Failed to fetch funding rate: {}", e);
                continue;
            }
        };

        info!(
            "{}: rate={:.6} min={:.6} max={:.6}, next settle {}",
            snapshot.symbol,
            snapshot.funding_rate,
            snapshot.min_funding_rate,
            snapshot.max_funding_rate,
            snapshot.next_settle_time
        );

        let message = snapshot.summary();

        // Routine channel always goes first
        match routine.send(&message).await {
            Ok(()) => info!("Message sent successfully"),
            Err(e) => warn!("Failed to send message: {}", e),
        }

        if snapshot.breaches(config.alert_threshold) {
            info!(
                "Funding rate below {:.6}, escalating to alert channel",
                config.alert_threshold
            );
            if let Err(e) = alert.send(&message).await {
                warn!("Failed to send alert message: {}", e);
            }
        }
    }
}
