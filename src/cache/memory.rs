//! Shared in-process cache store.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use dashmap::DashMap;

use super::client::{CacheClient, CacheError};

struct Entry {
    value: Bytes,
    expires_at: Instant,
}

/// In-process [`CacheClient`] with TTL expiry.
///
/// Stands in for the external cache in single-node deployments and tests.
/// Expiry is stamped at write time; an entry past its deadline is treated as
/// absent and dropped by the next read that touches it.
#[derive(Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .iter()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn live(&self, key: &str) -> Option<Bytes> {
        let now = Instant::now();
        let expired = match self.entries.get(key) {
            Some(entry) if entry.expires_at > now => return Some(entry.value.clone()),
            Some(_) => true,
            None => false,
        };
        if expired {
            self.entries
                .remove_if(key, |_, entry| entry.expires_at <= now);
        }
        None
    }
}

#[async_trait]
impl CacheClient for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError> {
        Ok(self.live(key))
    }

    async fn get_multi(&self, keys: &[String]) -> Result<HashMap<String, Bytes>, CacheError> {
        let mut found = HashMap::with_capacity(keys.len());
        for key in keys {
            if let Some(value) = self.live(key) {
                found.insert(key.clone(), value);
            }
        }
        Ok(found)
    }

    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), CacheError> {
        self.entries.insert(
            key.to_string(),
            Entry {
                value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(10);

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let cache = MemoryCache::new();

        assert!(cache.get("comments.1").await.unwrap().is_none());

        cache
            .set("comments.1", Bytes::from_static(b"[]"), TTL)
            .await
            .unwrap();

        let value = cache.get("comments.1").await.unwrap().expect("live entry");
        assert_eq!(value, Bytes::from_static(b"[]"));
    }

    #[tokio::test]
    async fn expired_entry_is_absent() {
        let cache = MemoryCache::new();

        cache
            .set("comments.1.count", Bytes::from_static(b"5"), Duration::from_millis(5))
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;

        assert!(cache.get("comments.1.count").await.unwrap().is_none());
        assert!(cache.is_empty());
    }

    #[tokio::test]
    async fn get_multi_returns_only_present_keys() {
        let cache = MemoryCache::new();

        cache
            .set("comments.1.count", Bytes::from_static(b"2"), TTL)
            .await
            .unwrap();
        cache
            .set("comments.3.count", Bytes::from_static(b"0"), TTL)
            .await
            .unwrap();

        let keys = vec![
            "comments.1.count".to_string(),
            "comments.2.count".to_string(),
            "comments.3.count".to_string(),
        ];
        let found = cache.get_multi(&keys).await.unwrap();

        assert_eq!(found.len(), 2);
        assert_eq!(found["comments.1.count"], Bytes::from_static(b"2"));
        assert_eq!(found["comments.3.count"], Bytes::from_static(b"0"));
        assert!(!found.contains_key("comments.2.count"));
    }

    #[tokio::test]
    async fn set_overwrites_value_and_deadline() {
        let cache = MemoryCache::new();

        cache
            .set("comments.9", Bytes::from_static(b"old"), Duration::from_millis(5))
            .await
            .unwrap();
        cache
            .set("comments.9", Bytes::from_static(b"new"), TTL)
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(25)).await;

        let value = cache.get("comments.9").await.unwrap().expect("refreshed entry");
        assert_eq!(value, Bytes::from_static(b"new"));
    }
}
