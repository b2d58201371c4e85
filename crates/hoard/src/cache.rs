//! Cache: envelope table with lazy fill and newer-wins updates

use std::collections::HashMap;
use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use ahash::RandomState;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::config::CacheConfig;
use crate::envelope::Envelope;
use crate::error::{BoxError, Error, Result};
use crate::stats::CacheStats;

/// Lookup hook used to fill missing entries
type LookupFn<K, V> = Arc<dyn Fn(&K) -> Option<V> + Send + Sync>;

/// Thread-safe key/value cache storing values inside [`Envelope`]s
///
/// All entries sit behind a single reader/writer lock. Reads that miss may
/// call the lookup hook; the hook always runs with no cache lock held, so two
/// threads missing on the same key can both call it and the last write wins.
pub struct Cache<K, V> {
    /// Key -> shared envelope
    entries: RwLock<HashMap<K, Arc<Envelope<V>>, RandomState>>,

    /// Optional lazy-fill hook
    lookup: RwLock<Option<LookupFn<K, V>>>,

    /// Usage counters
    stats: CacheStats,

    record_stats: bool,
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash,
{
    /// Create an empty cache with no lookup hook
    pub fn new() -> Self {
        Self::with_config(CacheConfig::default())
    }

    /// Create an empty cache from `config`
    ///
    /// # Arguments
    /// * `config` - Construction options
    ///
    /// # Returns
    /// * `Cache<K, V>` - Empty cache with no lookup hook
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            entries: RwLock::new(HashMap::with_capacity_and_hasher(
                config.initial_capacity,
                RandomState::new(),
            )),
            lookup: RwLock::new(None),
            stats: CacheStats::new(),
            record_stats: config.record_stats,
        }
    }

    /// Create an empty cache that fills misses with `lookup`
    pub fn with_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&K) -> Option<V> + Send + Sync + 'static,
    {
        let cache = Self::new();
        cache.set_lookup(lookup);
        cache
    }

    /// Install or replace the lookup hook
    ///
    /// Entries already in the table are not touched.
    pub fn set_lookup<F>(&self, lookup: F)
    where
        F: Fn(&K) -> Option<V> + Send + Sync + 'static,
    {
        *self.lookup.write() = Some(Arc::new(lookup));
        debug!("lookup hook installed");
    }

    /// Remove the lookup hook; misses return `None` afterwards
    pub fn clear_lookup(&self) {
        *self.lookup.write() = None;
    }

    /// Whether a lookup hook is installed
    pub fn has_lookup(&self) -> bool {
        self.lookup.read().is_some()
    }

    /// Store `value` under `key`, stamped with the current time
    ///
    /// Any previous entry for `key` is replaced.
    pub fn upsert_value(&self, key: K, value: V) {
        self.upsert_envelope(key, Envelope::new(value));
    }

    /// Store an envelope under `key`, keeping its timestamp
    ///
    /// # Arguments
    /// * `key` - Entry key
    /// * `envelope` - Envelope to store, owned or already shared
    pub fn upsert_envelope(&self, key: K, envelope: impl Into<Arc<Envelope<V>>>) {
        let envelope = envelope.into();
        self.entries.write().insert(key, envelope);
        self.record(CacheStats::record_insert);
    }

    /// Store `candidate` only if it is newer than the current entry
    ///
    /// A missing entry counts as infinitely old. The current entry is read
    /// under the shared lock and the write happens under a separate exclusive
    /// lock, so a concurrent writer may land between the two.
    ///
    /// # Returns
    /// * `bool` - `true` if the candidate was stored
    pub fn update_if_newer(&self, key: K, candidate: impl Into<Arc<Envelope<V>>>) -> bool {
        let candidate = candidate.into();
        let current = self.entries.read().get(&key).cloned();

        match current {
            Some(current) if !candidate.is_newer_than(&*current) => {
                debug!(
                    candidate = ?candidate.created_at(),
                    current = ?current.created_at(),
                    "discarding stale candidate"
                );
                self.record(CacheStats::record_stale_rejection);
                false
            }
            _ => {
                self.upsert_envelope(key, candidate);
                true
            }
        }
    }

    /// Remove the entry for `key`
    ///
    /// # Returns
    /// * `Option<Arc<Envelope<V>>>` - The removed envelope, `None` if absent
    pub fn delete(&self, key: &K) -> Option<Arc<Envelope<V>>> {
        let removed = self.entries.write().remove(key);
        if removed.is_some() {
            self.record(CacheStats::record_delete);
        }
        removed
    }

    /// Whether `key` is in the table. Never calls the lookup hook.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Return every envelope whose value satisfies `predicate`
    ///
    /// The shared lock is held for the whole scan, so `predicate` must not
    /// write to this cache. Order is unspecified.
    pub fn search_envelopes<F>(&self, mut predicate: F) -> Vec<Arc<Envelope<V>>>
    where
        F: FnMut(&V) -> bool,
    {
        self.entries
            .read()
            .values()
            .filter(|envelope| predicate(envelope.value()))
            .cloned()
            .collect()
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the cache holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop all entries. The lookup hook and statistics are kept.
    pub fn clear(&self) {
        self.entries.write().clear();
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    fn record(&self, f: impl FnOnce(&CacheStats)) {
        if self.record_stats {
            f(&self.stats);
        }
    }

    fn find(&self, key: &K) -> Option<Arc<Envelope<V>>> {
        let found = self.entries.read().get(key).cloned();
        if found.is_some() {
            trace!("cache hit");
            self.record(CacheStats::record_hit);
        } else {
            trace!("cache miss");
            self.record(CacheStats::record_miss);
        }
        found
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Get the envelope for `key`, filling it from the lookup hook on a miss
    ///
    /// # Arguments
    /// * `key` - Key to read
    ///
    /// # Returns
    /// * `Option<Arc<Envelope<V>>>` - Stored or freshly filled envelope, `None`
    ///   if absent and the hook is unset or returned `None`
    pub fn get_envelope(&self, key: &K) -> Option<Arc<Envelope<V>>> {
        if let Some(envelope) = self.find(key) {
            return Some(envelope);
        }

        // Clone the hook out so it runs without any cache lock held
        let lookup = self.lookup.read().clone()?;
        match self.fill(key, |k| Ok::<_, Infallible>(lookup(k))) {
            Ok(envelope) => envelope,
            Err(never) => match never {},
        }
    }

    /// Like [`get_envelope`](Self::get_envelope) but fills a miss with the
    /// fallible `lookup` instead of the installed hook
    ///
    /// Nothing is stored when `lookup` fails.
    pub fn try_get_envelope_with<F, E>(&self, key: &K, lookup: F) -> Result<Option<Arc<Envelope<V>>>>
    where
        F: FnOnce(&K) -> std::result::Result<Option<V>, E>,
        E: Into<BoxError>,
    {
        if let Some(envelope) = self.find(key) {
            return Ok(Some(envelope));
        }

        self.fill(key, lookup).map_err(Error::lookup)
    }

    fn fill<F, E>(&self, key: &K, lookup: F) -> std::result::Result<Option<Arc<Envelope<V>>>, E>
    where
        F: FnOnce(&K) -> std::result::Result<Option<V>, E>,
    {
        let Some(value) = lookup(key)? else {
            return Ok(None);
        };

        let envelope = Arc::new(Envelope::new(value));
        self.upsert_envelope(key.clone(), Arc::clone(&envelope));
        self.record(CacheStats::record_lazy_fill);
        debug!("filled missing entry from lookup");

        Ok(Some(envelope))
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Get the value for `key`, filling it from the lookup hook on a miss
    pub fn get(&self, key: &K) -> Option<V> {
        self.get_envelope(key)
            .map(|envelope| envelope.value().clone())
    }

    /// Get the value for `key`, filling a miss with the fallible `lookup`
    pub fn try_get_with<F, E>(&self, key: &K, lookup: F) -> Result<Option<V>>
    where
        F: FnOnce(&K) -> std::result::Result<Option<V>, E>,
        E: Into<BoxError>,
    {
        Ok(self
            .try_get_envelope_with(key, lookup)?
            .map(|envelope| envelope.value().clone()))
    }
}

impl<K, V> Cache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Return every value satisfying `predicate`, in unspecified order
    pub fn search<F>(&self, predicate: F) -> Vec<V>
    where
        F: FnMut(&V) -> bool,
    {
        self.search_envelopes(predicate)
            .into_iter()
            .map(|envelope| envelope.value().clone())
            .collect()
    }
}

impl<K, V> Default for Cache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Cache<K, V>
where
    K: Eq + Hash,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("len", &self.len())
            .field("has_lookup", &self.has_lookup())
            .field("record_stats", &self.record_stats)
            .finish()
    }
}
