//! In-process cache store.

use super::CacheStore;
use consulta_core::ConsultaResult;
use async_trait::async_trait;
use parking_lot::Mutex;
use shaku::Component;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    /// `None` when the TTL overflows the clock; such entries never expire.
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.map_or(true, |at| now < at)
    }
}

/// Cache store held in process memory.
///
/// Expiry follows the tokio clock, so paused-time tests can advance past a
/// TTL deterministically. Expired entries are dropped lazily.
#[derive(Component, Default)]
#[shaku(interface = CacheStore)]
pub struct InMemoryCacheStore {
    #[shaku(default)]
    entries: Mutex<BTreeMap<String, Entry>>,
}

impl InMemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.lock().values().filter(|e| e.is_live(now)).count()
    }

    /// Returns true when no live entry is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, key: &str) -> ConsultaResult<Option<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        match entries.get(key) {
            Some(entry) if entry.is_live(now) => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> ConsultaResult<()> {
        let entry = Entry {
            value: value.to_string(),
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries.lock().insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete_all(&self, keys: &[String]) -> ConsultaResult<u64> {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let deleted = keys
            .iter()
            .filter_map(|key| entries.remove(key))
            .filter(|entry| entry.is_live(now))
            .count();

        Ok(deleted as u64)
    }

    async fn list_keys_by_prefix(&self, prefix: &str) -> ConsultaResult<Vec<String>> {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| entry.is_live(now));

        Ok(entries
            .range(prefix.to_string()..)
            .map(|(key, _)| key)
            .take_while(|key| key.starts_with(prefix))
            .cloned()
            .collect())
    }

    async fn is_connected(&self) -> bool {
        true
    }

    async fn close(&self) {
        self.entries.lock().clear();
    }
}

impl std::fmt::Debug for InMemoryCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCacheStore")
            .field("entries", &self.entries.lock().len())
            .finish()
    }
}
