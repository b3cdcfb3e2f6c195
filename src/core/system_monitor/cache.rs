//! Fetch-if-stale cache slots.
//!
//! Each metric family owns one [`CacheSlot`]. A slot hands out immutable
//! `Arc` snapshots, so a reader never sees a half-written record, and it
//! serializes fetches so concurrent misses hit the source once.

use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::Result;

/// Time source for staleness checks
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall clock backed by [`Instant::now`]
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base: Instant,
    offset: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            base: Instant::now(),
            offset: Mutex::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.offset.lock() += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.base + *self.offset.lock()
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> Instant {
        (**self).now()
    }
}

/// How long a cached value stays valid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// Refetch once this much time has passed since the last successful fetch
    Every(Duration),
    /// Fetched successfully at most once per slot lifetime
    Forever,
}

impl Freshness {
    fn is_fresh(&self, fetched_at: Instant, now: Instant) -> bool {
        match self {
            Freshness::Forever => true,
            Freshness::Every(ttl) => now.saturating_duration_since(fetched_at) < *ttl,
        }
    }
}

struct Entry<T> {
    value: Arc<T>,
    fetched_at: Instant,
}

/// A single cached value with its own refresh policy
pub struct CacheSlot<T> {
    name: &'static str,
    freshness: Freshness,
    entry: RwLock<Option<Entry<T>>>,
    fetch_lock: Mutex<()>,
}

impl<T> CacheSlot<T> {
    pub fn new(name: &'static str, freshness: Freshness) -> Self {
        Self {
            name,
            freshness,
            entry: RwLock::new(None),
            fetch_lock: Mutex::new(()),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn freshness(&self) -> Freshness {
        self.freshness
    }

    /// Last stored value, regardless of age
    pub fn peek(&self) -> Option<Arc<T>> {
        self.entry.read().as_ref().map(|e| Arc::clone(&e.value))
    }

    /// When the stored value was fetched
    pub fn last_fetch(&self) -> Option<Instant> {
        self.entry.read().as_ref().map(|e| e.fetched_at)
    }

    fn fresh(&self, now: Instant) -> Option<Arc<T>> {
        let entry = self.entry.read();
        let entry = entry.as_ref()?;
        if self.freshness.is_fresh(entry.fetched_at, now) {
            Some(Arc::clone(&entry.value))
        } else {
            None
        }
    }

    /// Return the cached value if fresh, otherwise fetch and store a new one.
    ///
    /// A failed fetch is logged and the previous value (or `None`) is returned.
    pub fn get_or_refresh<F>(&self, clock: &dyn Clock, fetch: F) -> Option<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        self.get_or_refresh_with(clock, fetch, |_, value| Arc::new(value))
    }

    /// Like [`get_or_refresh`](Self::get_or_refresh), with `keep` choosing the
    /// instance to store from the previous value and the freshly fetched one.
    pub fn get_or_refresh_with<F, K>(&self, clock: &dyn Clock, fetch: F, keep: K) -> Option<Arc<T>>
    where
        F: FnOnce() -> Result<T>,
        K: FnOnce(Option<&Arc<T>>, T) -> Arc<T>,
    {
        if let Some(value) = self.fresh(clock.now()) {
            return Some(value);
        }

        let _guard = match self.fetch_lock.try_lock() {
            Some(guard) => guard,
            None => {
                if let Some(value) = self.peek() {
                    log::debug!("{}: fetch in flight, serving last value", self.name);
                    return Some(value);
                }
                self.fetch_lock.lock()
            }
        };

        // Another caller may have finished a fetch while we waited
        if let Some(value) = self.fresh(clock.now()) {
            return Some(value);
        }

        let previous = self.peek();
        match fetch() {
            Ok(value) => {
                let value = keep(previous.as_ref(), value);
                *self.entry.write() = Some(Entry {
                    value: Arc::clone(&value),
                    fetched_at: clock.now(),
                });
                Some(value)
            }
            Err(e) => {
                if previous.is_some() {
                    log::warn!("{}: fetch failed, serving previous value: {}", self.name, e);
                } else {
                    log::warn!("{}: fetch failed, no value available: {}", self.name, e);
                }
                previous
            }
        }
    }

    /// Store a value obtained elsewhere
    pub fn store(&self, clock: &dyn Clock, value: T) -> Arc<T> {
        let value = Arc::new(value);
        *self.entry.write() = Some(Entry {
            value: Arc::clone(&value),
            fetched_at: clock.now(),
        });
        value
    }
}
