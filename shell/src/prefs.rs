//! Persisted preferences and cross-tab change notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Preferences live in a page-scoped key/value store shared by every tab of
//! the same origin (`localStorage` in the browser). A write in one tab is
//! reported to the others as a [`StorageChange`]; the writing tab never sees
//! its own change. The shell consumes those changes as ordinary events.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

/// Error returned by [`PreferenceStore::write`].
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The store could not be reached (disabled storage, private mode).
    #[error("preference storage is unavailable")]
    Unavailable,
    /// The store refused the write, typically a quota failure.
    #[error("write rejected for key {key}: {reason}")]
    Rejected { key: String, reason: String },
}

/// Synchronous, durable key/value storage.
///
/// Reading a missing key is not an error; callers apply their own defaults.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;
    fn write(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// A change written by another browsing context.
///
/// `key` is `None` when the other context cleared the whole store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageChange {
    pub key: Option<String>,
    pub value: Option<String>,
}

impl StorageChange {
    #[must_use]
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self { key: Some(key.into()), value }
    }

    /// A whole-store clear.
    #[must_use]
    pub fn cleared() -> Self {
        Self { key: None, value: None }
    }

    /// Whether this change may have touched `key`.
    #[must_use]
    pub fn concerns(&self, key: &str) -> bool {
        self.key.as_deref().map_or(true, |k| k == key)
    }
}

/// Write and log on failure. Local state is applied regardless.
pub fn write_or_warn<S: PreferenceStore + ?Sized>(store: &S, key: &str, value: &str) {
    if let Err(err) = store.write(key, value) {
        log::warn!("prefs: could not persist {key}={value}: {err}");
    }
}
