//! Persisted key/value capability and the user disable record.
//!
//! The only persistent state in the whole system is a single epoch-millisecond
//! timestamp under [`USER_DISABLE_KEY`](crate::ids::USER_DISABLE_KEY): the
//! instant until which the user has switched the theme off. Storage failures
//! never propagate past this module; they are logged and the system degrades
//! to "not disabled" / "write skipped".

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, warn};

use crate::clock::Clock;
use crate::ids::USER_DISABLE_KEY;

/// Error raised by a key/value backend.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend is not reachable at all (no storage in this context).
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    /// The backend rejected the operation (quota, security policy).
    #[error("storage backend rejected the operation: {0}")]
    Backend(String),
}

/// Minimal persisted key/value capability.
///
/// Implementors are expected to be plain string slots with last-write-wins
/// semantics; there are no concurrent writers.
pub trait KeyValueStore {
    /// Reads a value, `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes a key; removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store used by tests and headless integrations.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    poisoned: bool,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store whose every operation fails, for degradation tests.
    #[must_use]
    pub fn poisoned() -> Self {
        Self {
            entries: HashMap::new(),
            poisoned: true,
        }
    }

    /// Seeds a value directly, bypassing the failure switch.
    pub fn seed(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    /// Returns whether the store currently holds the key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    fn check(&self) -> Result<(), StoreError> {
        if self.poisoned {
            Err(StoreError::Unavailable("poisoned test store".to_owned()))
        } else {
            Ok(())
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.check()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.check()?;
        self.entries.remove(key);
        Ok(())
    }
}

/// Returns whether the user's disable record is still in effect.
///
/// Absent or unparsable records count as "not disabled"; an unparsable
/// record is also purged so it cannot linger. Read failures degrade to
/// "not disabled".
pub fn is_disabled(store: &mut impl KeyValueStore, clock: &impl Clock) -> bool {
    let raw = match store.get(USER_DISABLE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return false,
        Err(err) => {
            warn!(error = %err, "could not read disable record");
            return false;
        }
    };

    match raw.trim().parse::<i64>() {
        Ok(disabled_until) => clock.now_ms() < disabled_until,
        Err(_) => {
            debug!(value = %raw, "purging unparsable disable record");
            if let Err(err) = store.remove(USER_DISABLE_KEY) {
                warn!(error = %err, "could not purge disable record");
            }
            false
        }
    }
}

/// Disables the theme until the end of the current local day.
///
/// Write failures are logged and swallowed; the toggle still performs its
/// restoration either way.
pub fn disable_for_today(store: &mut impl KeyValueStore, clock: &impl Clock) {
    let until = clock.end_of_day_ms();
    if let Err(err) = store.set(USER_DISABLE_KEY, &until.to_string()) {
        warn!(error = %err, "could not persist disable record");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    #[test]
    fn absent_record_means_enabled() {
        let mut store = MemoryStore::new();
        assert!(!is_disabled(&mut store, &FixedClock::halloween()));
    }

    #[test]
    fn future_record_disables() {
        let mut store = MemoryStore::new();
        let clock = FixedClock::halloween();
        store.seed(USER_DISABLE_KEY, &(clock.now_ms + 1).to_string());
        assert!(is_disabled(&mut store, &clock));
    }

    #[test]
    fn expired_record_re_enables() {
        let mut store = MemoryStore::new();
        let clock = FixedClock::halloween();
        store.seed(USER_DISABLE_KEY, &(clock.now_ms - 1).to_string());
        assert!(!is_disabled(&mut store, &clock));
    }

    #[test]
    fn unparsable_record_is_purged() {
        let mut store = MemoryStore::new();
        store.seed(USER_DISABLE_KEY, "not-a-timestamp");
        assert!(!is_disabled(&mut store, &FixedClock::halloween()));
        assert!(!store.contains(USER_DISABLE_KEY));
    }

    #[test]
    fn read_failure_degrades_to_enabled() {
        let mut store = MemoryStore::poisoned();
        assert!(!is_disabled(&mut store, &FixedClock::halloween()));
    }

    #[test]
    fn disable_for_today_writes_end_of_day() {
        let mut store = MemoryStore::new();
        let clock = FixedClock::halloween();
        disable_for_today(&mut store, &clock);
        assert_eq!(
            store.get(USER_DISABLE_KEY).ok().flatten().as_deref(),
            Some(clock.end_of_day_ms.to_string().as_str())
        );
        assert!(is_disabled(&mut store, &clock));
    }

    #[test]
    fn disable_write_failure_is_swallowed() {
        let mut store = MemoryStore::poisoned();
        disable_for_today(&mut store, &FixedClock::halloween());
        assert!(!is_disabled(&mut store, &FixedClock::halloween()));
    }
}
