//! alphaflow - opportunity radar over DexScreener market data
//!
//! Fetches boosted tokens and their pair metadata, scores them, correlates
//! them with a tracked-wallet registry and serves a ranked snapshot over HTTP.

pub mod config;
pub mod radar;
pub mod server;

pub use config::RadarConfig;
pub use radar::{OpportunitySnapshot, RadarEngine};
