//! Time-boxed snapshot cache

use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use crate::types::TokenSnapshot;

struct CacheSlot {
    snapshot: TokenSnapshot,
    fetched_at: Instant,
}

/// Single-slot cache for the last successful full token-list fetch.
///
/// Writes are wholesale replacements, never merges. The lock keeps the
/// replace-wholesale property on a multi-threaded runtime; reads clone
/// the snapshot so no reference outlives the slot.
pub struct PriceCache {
    ttl: Duration,
    slot: RwLock<Option<CacheSlot>>,
}

impl PriceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Returns the cached snapshot if it is still within the TTL.
    pub async fn get(&self) -> Option<TokenSnapshot> {
        let guard = self.slot.read().await;
        match guard.as_ref() {
            Some(entry) if entry.fetched_at.elapsed() < self.ttl => {
                Some(entry.snapshot.clone())
            }
            _ => None,
        }
    }

    pub async fn set(&self, snapshot: TokenSnapshot) {
        let mut guard = self.slot.write().await;
        *guard = Some(CacheSlot {
            snapshot,
            fetched_at: Instant::now(),
        });
    }

    pub async fn invalidate(&self) {
        let mut guard = self.slot.write().await;
        *guard = None;
    }
}
