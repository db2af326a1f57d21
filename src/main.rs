//! DEX Arbitrage Scanner - Main Entry Point
//!
//! Terminal monitor that periodically scans for cross-venue arbitrage
//! opportunities and appends them to JSONL files under output/.

use dex_arb_scanner::*;
use anyhow::Result;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::time;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize logging
    let _logging_guard = utils::setup_logging()?;
    utils::setup_output_directories()?;

    // Load configuration
    let config = CONFIG.clone();

    info!("🔎 DEX Arbitrage Scanner v0.3.0");
    info!("📋 Configuration:");
    info!("   Scan limit: {} tokens", config.scan_limit);
    info!("   Investment: ${}", config.investment_usd);
    info!("   Refresh interval: {}s", config.refresh_interval_secs);
    info!("   Cache TTL: {}s", config.cache_ttl_secs);
    info!("   Chunk size: {} ({}ms between chunks)", config.chunk_size, config.chunk_delay_ms);
    info!("   CoinMarketCap key: {}",
        if config.coinmarketcap_api_key.is_some() { "configured" } else { "absent (source skipped)" }
    );

    // Initialize components
    let resolver = Arc::new(PriceResolver::new(&config)?);
    let aggregator = OpportunityAggregator::new(&config, Arc::clone(&resolver));

    // Setup monitoring state
    let start_time = Instant::now();
    let mut state = MonitoringState::new();

    // Setup shutdown handler
    let (shutdown_tx, mut shutdown_rx) = tokio::sync::oneshot::channel();
    let shutdown_tx = Arc::new(tokio::sync::Mutex::new(Some(shutdown_tx)));

    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("\n📛 Received shutdown signal (Ctrl+C)...");
        if let Some(tx) = shutdown_tx.lock().await.take() {
            let _ = tx.send(());
        }
    });

    info!("\n🚀 Starting scan loop...\n");

    let mut interval = time::interval(Duration::from_secs(config.refresh_interval_secs));

    loop {
        tokio::select! {
            _ = interval.tick() => {
                run_scan_cycle(&aggregator, &config, &mut state).await;
            }
            _ = &mut shutdown_rx => {
                info!("Shutdown signal received, exiting scan loop...");
                break;
            }
        }

        if state.total_scans % 10 == 0 {
            utils::print_session_stats(
                start_time,
                state.total_scans,
                state.total_opportunities,
                state.total_potential_profit,
                state.synthetic_scans,
            );
        }
    }

    // Print final statistics
    print_final_statistics(start_time, &state);

    Ok(())
}

/// Monitoring state to track statistics
struct MonitoringState {
    total_scans: u64,
    total_opportunities: u64,
    total_potential_profit: rust_decimal::Decimal,
    synthetic_scans: u64,
    save_failures: u64,
}

impl MonitoringState {
    fn new() -> Self {
        Self {
            total_scans: 0,
            total_opportunities: 0,
            total_potential_profit: rust_decimal_macros::dec!(0),
            synthetic_scans: 0,
            save_failures: 0,
        }
    }
}

/// Run a single scan cycle
async fn run_scan_cycle(
    aggregator: &OpportunityAggregator,
    config: &Config,
    state: &mut MonitoringState,
) {
    let opportunities = aggregator.scan(config.scan_limit).await;
    state.total_scans += 1;

    if opportunities.iter().any(|o| o.synthetic) {
        state.synthetic_scans += 1;
        warn!("⚠️  Scan served from fallback data, treat profits as indicative only");
    }

    info!(
        "💹 Scan #{}: {} opportunities across top {} tokens",
        state.total_scans,
        opportunities.len(),
        config.scan_limit
    );

    for opp in &opportunities {
        state.total_opportunities += 1;
        state.total_potential_profit += opp.profit_usd;

        utils::print_opportunity(opp);

        if let Err(e) = storage::save_opportunity(opp) {
            state.save_failures += 1;
            error!("Failed to save opportunity: {}", e);
        }
    }
}

/// Print final statistics on shutdown
fn print_final_statistics(start_time: Instant, state: &MonitoringState) {
    info!("\n🛑 Shutting down gracefully...");
    info!("Final statistics:");
    info!("   Total runtime: {:?}", start_time.elapsed());
    info!("   Scans completed: {}", state.total_scans);
    info!("   Opportunities found: {}", state.total_opportunities);
    info!("   Total potential profit: ${:.2}", state.total_potential_profit);
    info!("   Scans on fallback data: {}", state.synthetic_scans);
    info!("   Save failures: {}", state.save_failures);
}
