//! Memoization of network resolutions.
//!
//! [`IconCache`] maps a URL to the [`Resolution`] the network fallback
//! produced for it. Entries live as long as the cache unless an
//! [`Eviction`] capacity is configured.

use std::collections::{HashMap, VecDeque};
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::Resolution;

/// Eviction policy for an [`IconCache`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Eviction {
    /// Keep every entry for the lifetime of the cache.
    #[default]
    Never,
    /// Keep at most this many entries, dropping the oldest insertion first.
    Capacity(NonZeroUsize),
}

/// One cache entry. Initialized exactly once, even under concurrent lookups.
type Slot = Arc<OnceLock<Resolution>>;

#[derive(Debug, Default)]
struct Entries {
    slots: HashMap<String, Slot>,
    /// Insertion order, used for capacity eviction.
    order: VecDeque<String>,
}

/// Thread-safe URL → [`Resolution`] cache.
///
/// Concurrent lookups of the same URL are coalesced: the first caller runs
/// the resolution closure while later callers block on the same slot and
/// receive its result. Lookups of different URLs never wait on each other's
/// network work.
#[derive(Debug, Default)]
pub struct IconCache {
    entries: Mutex<Entries>,
    eviction: Eviction,
}

impl IconCache {
    /// Create an unbounded cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache with the given eviction policy.
    #[must_use]
    pub fn with_eviction(eviction: Eviction) -> Self {
        Self {
            entries: Mutex::default(),
            eviction,
        }
    }

    /// Eviction policy of this cache.
    #[must_use]
    pub fn eviction(&self) -> Eviction {
        self.eviction
    }

    /// Return the cached resolution for `url`, running `resolve` on a miss.
    pub fn get_or_resolve<F>(&self, url: &str, resolve: F) -> Resolution
    where
        F: FnOnce() -> Resolution,
    {
        let slot = self.slot(url);
        if let Some(hit) = slot.get() {
            tracing::debug!(url, "Icon cache hit");
            return hit.clone();
        }
        slot.get_or_init(|| {
            tracing::debug!(url, "Icon cache miss");
            resolve()
        })
        .clone()
    }

    /// Cached resolution for `url`, if one has completed.
    #[must_use]
    pub fn get(&self, url: &str) -> Option<Resolution> {
        self.lock()
            .slots
            .get(url)
            .and_then(|slot| slot.get().cloned())
    }

    /// Number of cached URLs, including lookups still in flight.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    /// Check if the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry.
    pub fn clear(&self) {
        let mut entries = self.lock();
        entries.slots.clear();
        entries.order.clear();
    }

    /// Get or insert the slot for `url`, evicting the oldest entry when full.
    fn slot(&self, url: &str) -> Slot {
        let mut entries = self.lock();
        if let Some(slot) = entries.slots.get(url) {
            return Arc::clone(slot);
        }

        if let Eviction::Capacity(capacity) = self.eviction {
            while entries.slots.len() >= capacity.get() {
                let Some(oldest) = entries.order.pop_front() else {
                    break;
                };
                entries.slots.remove(&oldest);
                tracing::debug!(url = %oldest, "Evicted icon cache entry");
            }
        }

        let slot = Slot::default();
        entries.slots.insert(url.to_owned(), Arc::clone(&slot));
        entries.order.push_back(url.to_owned());
        slot
    }

    fn lock(&self) -> MutexGuard<'_, Entries> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
