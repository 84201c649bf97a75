//! HTTP surface for the opportunity radar
//!
//! - `GET /api/opportunities` - fresh snapshot, always 200
//! - `GET /health` - liveness probe

use crate::radar::{MarketFeed, OpportunitySnapshot, RadarEngine};
use axum::{extract::State, routing::get, Json, Router};
use log::{error, info};
use serde::Serialize;
use std::sync::Arc;
use tokio::net::TcpListener;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

pub fn radar_routes<F>(engine: Arc<RadarEngine<F>>) -> Router
where
    F: MarketFeed + 'static,
{
    Router::new()
        .route("/api/opportunities", get(get_opportunities::<F>))
        .route("/health", get(health))
        .with_state(engine)
}

/// Build a snapshot; upstream failures only shrink the lists
async fn get_opportunities<F>(State(engine): State<Arc<RadarEngine<F>>>) -> Json<OpportunitySnapshot>
where
    F: MarketFeed + 'static,
{
    Json(engine.snapshot().await)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Serve until CTRL+C
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("🌐 Listening on http://{}", addr);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("⚠️  Received CTRL+C, shutting down..."),
        Err(err) => error!("❌ Failed to listen for CTRL+C: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RadarConfig;
    use crate::radar::dexscreener::{DexScreenerPair, FeedError, TokenBoost};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    struct DownFeed;

    #[async_trait]
    impl MarketFeed for DownFeed {
        async fn latest_boosts(&self) -> Result<Vec<TokenBoost>, FeedError> {
            Err(FeedError::Status(502))
        }

        async fn token_pairs(&self, _token_address: &str) -> Result<Vec<DexScreenerPair>, FeedError> {
            Err(FeedError::Status(502))
        }
    }

    fn app() -> Router {
        let engine = RadarEngine::new_with_timestamp_fn(
            DownFeed,
            &RadarConfig::default(),
            Box::new(|| 1_700_000_000_000),
        );
        radar_routes(Arc::new(engine))
    }

    #[tokio::test]
    async fn test_opportunities_responds_ok_when_upstream_is_down() {
        let response = app()
            .oneshot(Request::get("/api/opportunities").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(json["generatedAt"], 1_700_000_000_000i64);
        for field in ["opportunities", "walletFeed", "memeRadar", "alerts"] {
            assert_eq!(json[field], serde_json::json!([]), "{} should be empty", field);
        }
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], br#"{"status":"ok"}"#);
    }
}
