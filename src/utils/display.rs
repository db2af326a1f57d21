//! Display and printing utilities

use std::time::Instant;
use tracing::{info, warn};
use crate::types::ArbitrageOpportunity;

pub fn print_opportunity(opp: &ArbitrageOpportunity) {
    info!("\n💰 ARBITRAGE OPPORTUNITY: {} ({})", opp.token.name, opp.token.symbol.to_uppercase());
    info!("   Buy on {} @ ${}", opp.source_venue, opp.buy_price);
    info!("   Sell on {} @ ${}", opp.target_venue, opp.sell_price);
    info!("   Investment: ${}", opp.investment_usd);
    info!("   Profit: ${:.2} ({:.3}%)", opp.profit_usd, opp.profit_pct);
    if opp.synthetic {
        warn!("   ⚠️  Derived from fallback data, not live prices");
    }
}

pub fn print_session_stats(
    start_time: Instant,
    total_scans: u64,
    total_opportunities: u64,
    total_potential_profit: rust_decimal::Decimal,
    synthetic_scans: u64,
) {
    let runtime = start_time.elapsed().as_secs() / 60;

    info!("\n📊 Session Statistics ({} minutes)", runtime);
    info!("   Scans completed: {}", total_scans);
    info!("   Opportunities found: {}", total_opportunities);
    info!("   Opportunities per scan: {:.1}",
        if total_scans > 0 {
            total_opportunities as f64 / total_scans as f64
        } else {
            0.0
        }
    );
    info!("   Total potential profit: ${:.2}", total_potential_profit);
    info!("   Scans served from fallback data: {}", synthetic_scans);
}
