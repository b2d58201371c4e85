//! Envelope: a stored value paired with its creation timestamp

use chrono::{DateTime, Utc};

/// A cached value together with the time it was produced.
///
/// Envelopes are built once and never mutated after they are handed to a
/// [`Cache`](crate::Cache). Replacing a value means storing a new envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope<V> {
    value: V,
    created_at: Option<DateTime<Utc>>,
}

impl<V> Envelope<V> {
    /// Wrap a value and stamp it with the current wall-clock time
    pub fn new(value: V) -> Self {
        Self::unstamped(value).stamp_now()
    }

    /// Wrap a value with an explicit creation time
    ///
    /// # Arguments
    /// * `value` - Value to wrap
    /// * `created_at` - Creation time to record, e.g. from an external source
    ///   or a deterministic test clock
    pub fn with_timestamp(value: V, created_at: DateTime<Utc>) -> Self {
        Self::unstamped(value).stamp_at(created_at)
    }

    /// Wrap a value without a creation time
    ///
    /// An unstamped envelope compares as older than any stamped one.
    pub fn unstamped(value: V) -> Self {
        Self {
            value,
            created_at: None,
        }
    }

    /// Set the creation time to now
    pub fn stamp_now(self) -> Self {
        self.stamp_at(Utc::now())
    }

    /// Set the creation time to `created_at`
    pub fn stamp_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Borrow the wrapped value
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Unwrap the value, dropping the metadata
    pub fn into_value(self) -> V {
        self.value
    }

    /// Creation time, `None` if the envelope was never stamped
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Whether a creation time has been recorded
    pub fn is_stamped(&self) -> bool {
        self.created_at.is_some()
    }

    /// Whether this envelope was created strictly after `other`
    pub fn is_newer_than<U>(&self, other: &Envelope<U>) -> bool {
        // None sorts before Some, so unstamped is older than everything
        self.created_at > other.created_at
    }
}
