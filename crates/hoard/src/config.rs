//! Cache construction options

/// Options used when building a [`Cache`](crate::Cache)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of entries the table is pre-sized for. Not a capacity bound.
    pub initial_capacity: usize,

    /// Whether hit/miss/insert counters are maintained
    pub record_stats: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 0,
            record_stats: true,
        }
    }
}

impl CacheConfig {
    /// Pre-size the table for `capacity` entries
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Enable or disable statistics counters
    pub fn with_stats(mut self, enabled: bool) -> Self {
        self.record_stats = enabled;
        self
    }
}
