//! TTL cache for fetched species data.
//!
//! The cache is an explicit component with an injected clock so tests can
//! control expiry; it is owned by whoever does the fetching, never module
//! state.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Duration;
use habitflow_core::{Species, Time};

/// Source of "now" for cache expiry.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Time;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Time {
        chrono::Utc::now()
    }
}

/// Species cache with a fixed time-to-live per entry.
pub struct SpeciesCache {
    entries: HashMap<u32, (Species, Time)>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl SpeciesCache {
    /// Default entry lifetime (30 minutes).
    pub const DEFAULT_TTL_MINUTES: i64 = 30;

    /// Cache with the default TTL on the system clock.
    pub fn new() -> Self {
        Self::with_clock(
            Duration::minutes(Self::DEFAULT_TTL_MINUTES),
            Arc::new(SystemClock),
        )
    }

    /// Cache with an explicit TTL and clock.
    pub fn with_clock(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    /// Fresh entry for `id`, if present and not expired.
    pub fn get(&self, id: u32) -> Option<&Species> {
        let (species, stored_at) = self.entries.get(&id)?;
        if self.clock.now() - *stored_at < self.ttl {
            Some(species)
        } else {
            None
        }
    }

    /// Entry for `id` even if expired. Used as a last resort when the
    /// external source is down.
    pub fn get_stale(&self, id: u32) -> Option<&Species> {
        self.entries.get(&id).map(|(species, _)| species)
    }

    /// Insert or refresh an entry.
    pub fn insert(&mut self, species: Species) {
        self.entries
            .insert(species.id, (species, self.clock.now()));
    }

    /// Number of stored entries, fresh or stale.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for SpeciesCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::species::fallback_species;
    use std::sync::Mutex;

    struct ManualClock(Mutex<Time>);

    impl ManualClock {
        fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(chrono::Utc::now())))
        }

        fn advance(&self, minutes: i64) {
            let mut now = self.0.lock().unwrap();
            *now += Duration::minutes(minutes);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Time {
            *self.0.lock().unwrap()
        }
    }

    #[test]
    fn entries_expire_after_ttl() {
        let clock = ManualClock::new();
        let mut cache = SpeciesCache::with_clock(Duration::minutes(30), clock.clone());

        cache.insert(fallback_species());
        assert!(cache.get(129).is_some());

        clock.advance(29);
        assert!(cache.get(129).is_some());

        clock.advance(2);
        assert!(cache.get(129).is_none(), "entry should have expired");
        assert!(cache.get_stale(129).is_some(), "stale entry remains readable");
    }

    #[test]
    fn insert_refreshes_expiry() {
        let clock = ManualClock::new();
        let mut cache = SpeciesCache::with_clock(Duration::minutes(30), clock.clone());

        cache.insert(fallback_species());
        clock.advance(25);
        cache.insert(fallback_species());
        clock.advance(25);

        assert!(cache.get(129).is_some(), "refreshed entry should still be fresh");
        assert_eq!(cache.len(), 1);
    }
}
