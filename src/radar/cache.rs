//! Short-lived upstream response cache
//!
//! Wraps any `MarketFeed` and serves successful responses for `ttl` before
//! asking upstream again. Failures are never cached. A zero TTL disables
//! caching entirely.

use super::dexscreener::{DexScreenerPair, FeedError, MarketFeed, TokenBoost};
use async_trait::async_trait;
use log::debug;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

type Stamped<T> = (Instant, T);

pub struct CachedFeed<F> {
    inner: F,
    ttl: Duration,
    boosts: RwLock<Option<Stamped<Vec<TokenBoost>>>>,
    pairs: RwLock<HashMap<String, Stamped<Vec<DexScreenerPair>>>>,
}

impl<F: MarketFeed> CachedFeed<F> {
    pub fn new(inner: F, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            boosts: RwLock::new(None),
            pairs: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }

    fn is_fresh(&self, stamped_at: Instant) -> bool {
        stamped_at.elapsed() < self.ttl
    }
}

#[async_trait]
impl<F: MarketFeed> MarketFeed for CachedFeed<F> {
    async fn latest_boosts(&self) -> Result<Vec<TokenBoost>, FeedError> {
        if self.ttl.is_zero() {
            return self.inner.latest_boosts().await;
        }

        if let Some((stamped_at, boosts)) = self.boosts.read().await.as_ref() {
            if self.is_fresh(*stamped_at) {
                debug!("Serving {} boosts from cache", boosts.len());
                return Ok(boosts.clone());
            }
        }

        let boosts = self.inner.latest_boosts().await?;
        *self.boosts.write().await = Some((Instant::now(), boosts.clone()));
        Ok(boosts)
    }

    async fn token_pairs(&self, token_address: &str) -> Result<Vec<DexScreenerPair>, FeedError> {
        if self.ttl.is_zero() {
            return self.inner.token_pairs(token_address).await;
        }

        if let Some((stamped_at, pairs)) = self.pairs.read().await.get(token_address) {
            if self.is_fresh(*stamped_at) {
                return Ok(pairs.clone());
            }
        }

        let pairs = self.inner.token_pairs(token_address).await?;

        let mut cache = self.pairs.write().await;
        // Evict expired entries so the map stays bounded by the active token set
        cache.retain(|_, (stamped_at, _)| stamped_at.elapsed() < self.ttl);
        cache.insert(token_address.to_string(), (Instant::now(), pairs.clone()));

        Ok(pairs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingFeed {
        boost_calls: AtomicUsize,
        pair_calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl MarketFeed for CountingFeed {
        async fn latest_boosts(&self) -> Result<Vec<TokenBoost>, FeedError> {
            self.boost_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FeedError::Timeout);
            }
            Ok(vec![TokenBoost {
                chain_id: "solana".to_string(),
                token_address: "abc".to_string(),
            }])
        }

        async fn token_pairs(&self, _token_address: &str) -> Result<Vec<DexScreenerPair>, FeedError> {
            self.pair_calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(FeedError::Status(500));
            }
            Ok(vec![DexScreenerPair::default()])
        }
    }

    #[tokio::test]
    async fn test_responses_served_from_cache_within_ttl() {
        let feed = CachedFeed::new(CountingFeed::default(), Duration::from_secs(30));

        for _ in 0..3 {
            assert_eq!(feed.latest_boosts().await.unwrap().len(), 1);
            assert_eq!(feed.token_pairs("abc").await.unwrap().len(), 1);
        }
        feed.token_pairs("def").await.unwrap();

        assert_eq!(feed.inner().boost_calls.load(Ordering::SeqCst), 1);
        assert_eq!(feed.inner().pair_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_expired_entries_are_refetched() {
        let feed = CachedFeed::new(CountingFeed::default(), Duration::from_millis(20));

        feed.latest_boosts().await.unwrap();
        tokio::time::sleep(Duration::from_millis(40)).await;
        feed.latest_boosts().await.unwrap();

        assert_eq!(feed.inner().boost_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_zero_ttl_and_failures_bypass_cache() {
        let passthrough = CachedFeed::new(CountingFeed::default(), Duration::ZERO);
        passthrough.latest_boosts().await.unwrap();
        passthrough.latest_boosts().await.unwrap();
        assert_eq!(passthrough.inner().boost_calls.load(Ordering::SeqCst), 2);

        let failing = CachedFeed::new(
            CountingFeed {
                fail: true,
                ..Default::default()
            },
            Duration::from_secs(30),
        );
        assert!(failing.token_pairs("abc").await.is_err());
        assert!(failing.token_pairs("abc").await.is_err());
        assert_eq!(failing.inner().pair_calls.load(Ordering::SeqCst), 2);
    }
}
