//! Cache client seam.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache transport error: {message}")]
    Transport { message: String },
}

impl CacheError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }
}

/// Key-value cache with per-entry TTL.
///
/// The handle is a process-wide shared resource; concurrent requests use the
/// same instance and never assume exclusive access. An entry past its TTL is
/// reported as absent, whether or not the backend still stores it.
#[async_trait]
pub trait CacheClient: Send + Sync {
    /// Fetch a single entry. `Ok(None)` means absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Bytes>, CacheError>;

    /// Fetch many entries in one round trip. Absent keys are simply missing
    /// from the returned map; only transport failures error.
    async fn get_multi(&self, keys: &[String]) -> Result<HashMap<String, Bytes>, CacheError>;

    /// Store an entry that expires after `ttl`.
    async fn set(&self, key: &str, value: Bytes, ttl: Duration) -> Result<(), CacheError>;
}
