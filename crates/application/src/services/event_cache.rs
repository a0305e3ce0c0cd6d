//! Per-day event cache
//!
//! Fronts [`EventSourcePort::fetch_events_for_day`] with a short TTL. Concurrent
//! misses for the same day share one fetch. Failures are never cached and
//! there is no stale fallback: an expired day is always refetched.

use std::{collections::HashMap, fmt, sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use domain::{DateKey, EventRecord};
use futures::{
    FutureExt,
    future::{BoxFuture, Shared},
};
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::ports::{ClockPort, EventSourceError, EventSourcePort};

/// Default lifetime of a cached day (5 minutes)
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Events of one day, shared between the cache and its readers
pub type DayEvents = Arc<[EventRecord]>;

type FetchResult = Result<DayEvents, EventSourceError>;
type SharedFetch = Shared<BoxFuture<'static, FetchResult>>;

/// Cache statistics for monitoring
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from a fresh entry
    pub hits: u64,
    /// Lookups that needed the event source
    pub misses: u64,
    /// Fetches actually sent to the event source
    pub fetches: u64,
    /// Misses that joined a fetch already in flight
    pub coalesced: u64,
    /// Current number of entries, fresh or expired
    pub entries: u64,
}

impl CacheStats {
    /// Calculate the hit rate as a fraction (0.0 - 1.0)
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

struct CacheEntry {
    events: DayEvents,
    fetched_at: DateTime<Utc>,
}

struct InFlight {
    id: u64,
    fetch: SharedFetch,
}

#[derive(Default)]
struct CacheState {
    entries: HashMap<DateKey, CacheEntry>,
    in_flight: HashMap<DateKey, InFlight>,
    next_fetch_id: u64,
    stats: CacheStats,
}

/// TTL cache of events keyed by day
pub struct EventCache {
    source: Arc<dyn EventSourcePort>,
    clock: Arc<dyn ClockPort>,
    ttl: Duration,
    state: Arc<Mutex<CacheState>>,
}

impl fmt::Debug for EventCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventCache")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl EventCache {
    /// Create a cache with the default TTL
    pub fn new(source: Arc<dyn EventSourcePort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            source,
            clock,
            ttl: DEFAULT_TTL,
            state: Arc::new(Mutex::new(CacheState::default())),
        }
    }

    /// Override the entry lifetime
    #[must_use]
    pub const fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Events for a day, fetched at most once per TTL window
    ///
    /// # Errors
    ///
    /// Returns the event source's error when the fetch fails; nothing is stored.
    #[instrument(skip(self), fields(date = %date))]
    pub async fn get(&self, date: DateKey) -> Result<DayEvents, EventSourceError> {
        let fetch = {
            let mut state = self.state.lock();
            let now = self.clock.now();

            if let Some(entry) = state.entries.get(&date) {
                if is_fresh(entry.fetched_at, now, self.ttl) {
                    let events = Arc::clone(&entry.events);
                    state.stats.hits += 1;
                    debug!(events = events.len(), "Cache hit");
                    return Ok(events);
                }
                state.entries.remove(&date);
            }

            state.stats.misses += 1;
            if let Some(in_flight) = state.in_flight.get(&date) {
                let fetch = in_flight.fetch.clone();
                state.stats.coalesced += 1;
                debug!("Joining fetch already in flight");
                fetch
            } else {
                let id = state.next_fetch_id;
                state.next_fetch_id += 1;
                state.stats.fetches += 1;
                debug!(fetch_id = id, "Cache miss, fetching");
                let fetch = self.start_fetch(date, id);
                state.in_flight.insert(
                    date,
                    InFlight {
                        id,
                        fetch: fetch.clone(),
                    },
                );
                fetch
            }
        };

        fetch.await
    }

    fn start_fetch(&self, date: DateKey, id: u64) -> SharedFetch {
        let source = Arc::clone(&self.source);
        let clock = Arc::clone(&self.clock);
        let state = Arc::clone(&self.state);

        async move {
            let result = source
                .fetch_events_for_day(date)
                .await
                .map(|events| keep_day(date, events));

            let mut guard = state.lock();
            // Invalidation detaches a fetch; a detached fetch must not be stored
            let attached = guard.in_flight.get(&date).is_some_and(|f| f.id == id);
            if attached {
                guard.in_flight.remove(&date);
            }
            match &result {
                Ok(events) if attached => {
                    guard.entries.insert(
                        date,
                        CacheEntry {
                            events: Arc::clone(events),
                            fetched_at: clock.now(),
                        },
                    );
                },
                Ok(_) => debug!(date = %date, fetch_id = id, "Fetch detached, result not stored"),
                Err(e) => warn!(date = %date, error = %e, "Event fetch failed"),
            }
            drop(guard);
            result
        }
        .boxed()
        .shared()
    }

    /// Drop a day so the next `get` fetches again
    #[instrument(skip(self), fields(date = %date))]
    pub fn invalidate(&self, date: DateKey) {
        let mut state = self.state.lock();
        let had_entry = state.entries.remove(&date).is_some();
        let detached = state.in_flight.remove(&date).is_some();
        info!(had_entry, detached, "Invalidated cached day");
    }

    /// Drop every day
    pub fn invalidate_all(&self) {
        let mut state = self.state.lock();
        let entries = state.entries.len();
        state.entries.clear();
        state.in_flight.clear();
        info!(entries, "Invalidated all cached days");
    }

    /// Whether a day would be served without fetching
    #[must_use]
    pub fn contains_fresh(&self, date: DateKey) -> bool {
        let state = self.state.lock();
        let now = self.clock.now();
        state
            .entries
            .get(&date)
            .is_some_and(|entry| is_fresh(entry.fetched_at, now, self.ttl))
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let state = self.state.lock();
        CacheStats {
            entries: state.entries.len() as u64,
            ..state.stats
        }
    }
}

fn is_fresh(fetched_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    // A clock that moved backwards counts as fresh
    now.signed_duration_since(fetched_at)
        .to_std()
        .map_or(true, |age| age < ttl)
}

fn keep_day(date: DateKey, events: Vec<EventRecord>) -> DayEvents {
    let total = events.len();
    let kept: Vec<EventRecord> = events.into_iter().filter(|e| e.date_key == date).collect();
    if kept.len() != total {
        warn!(
            date = %date,
            dropped = total - kept.len(),
            "Event source returned events for other days"
        );
    }
    kept.into()
}
