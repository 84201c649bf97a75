//! Radar Server - opportunity snapshot endpoint
//!
//! Serves `GET /api/opportunities` backed by the DexScreener public API.
//!
//! Usage:
//!   cargo run --release --bin radar_server
//!
//! Environment variables:
//!   RADAR_BIND_ADDR - Listen address (default: 0.0.0.0:3000)
//!   DEXSCREENER_BASE_URL - Upstream API (default: https://api.dexscreener.com)
//!   RADAR_REQUEST_TIMEOUT_MS - Per-request timeout (default: 10000)
//!   RADAR_CACHE_TTL_SECS - Upstream cache TTL, 0 disables (default: 30)
//!   RUST_LOG - Logging level (optional, default: info)

use alphaflow::config::RadarConfig;
use alphaflow::radar::{CachedFeed, DexScreenerClient, RadarEngine};
use alphaflow::server::{radar_routes, serve};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    let config = RadarConfig::from_env();

    info!("🚀 Starting radar server...");
    info!("📊 Configuration:");
    info!("   ├─ Bind address: {}", config.bind_addr);
    info!("   ├─ Upstream: {}", config.dexscreener_base_url);
    info!("   ├─ Request timeout: {}ms", config.request_timeout_ms);
    info!("   ├─ Cache TTL: {}s", config.cache_ttl_secs);
    info!(
        "   └─ Limits: fan-out {}, radar {}, opportunities {}, wallet feed {}",
        config.fanout_limit, config.max_radar_tokens, config.max_opportunities, config.wallet_feed_size
    );

    let client = DexScreenerClient::new(&config.dexscreener_base_url, config.request_timeout())?;
    let feed = CachedFeed::new(client, config.cache_ttl());
    let engine = Arc::new(RadarEngine::new(feed, &config));

    let listener = TcpListener::bind(&config.bind_addr).await?;
    serve(listener, radar_routes(engine)).await?;

    info!("✅ Radar server stopped");
    Ok(())
}
