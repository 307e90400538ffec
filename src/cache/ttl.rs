//! In-memory TTL cache with a background reaper
//!
//! Entries are stamped on insert and never checked on read. A tokio task
//! sweeps the map once per TTL period and drops anything older than the TTL,
//! so an entry can outlive its nominal expiry by up to one more period.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// A stored value and the moment it was inserted
#[derive(Debug, Clone)]
struct CacheEntry<V> {
    value: V,
    created_at: Instant,
}

type EntryMap<V> = Arc<RwLock<HashMap<String, CacheEntry<V>>>>;

/// Handle to the running reap task
#[derive(Debug)]
struct Reaper {
    /// Dropping or signalling this ends the loop after the current sweep
    shutdown_tx: mpsc::Sender<()>,
    task: JoinHandle<()>,
}

/// Key-value store whose entries are removed by a periodic sweep once they
/// are older than the cache's TTL
///
/// The reap task starts in [`TtlCache::new`] and lives until
/// [`stop_reap_loop`](TtlCache::stop_reap_loop), [`shutdown`](TtlCache::shutdown)
/// or the cache is dropped. Must be constructed inside a tokio runtime.
#[derive(Debug)]
pub struct TtlCache<V> {
    entries: EntryMap<V>,
    ttl: Duration,
    reaper: Mutex<Option<Reaper>>,
}

impl<V> TtlCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache and spawns its reap loop
    ///
    /// The reap period equals `ttl`. A zero TTL is swept every millisecond.
    pub fn new(ttl: Duration) -> Self {
        let entries: EntryMap<V> = Arc::new(RwLock::new(HashMap::new()));
        let reaper = spawn_reaper(Arc::clone(&entries), ttl);

        Self {
            entries,
            ttl,
            reaper: Mutex::new(Some(reaper)),
        }
    }

    /// Inserts or replaces the entry for `key`, resetting its age to zero
    pub fn add(&self, key: impl Into<String>, value: V) {
        let entry = CacheEntry {
            value,
            created_at: Instant::now(),
        };
        self.entries.write().insert(key.into(), entry);
    }

    /// Returns the stored value, if it has not been reaped yet
    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.read().get(key).map(|entry| entry.value.clone())
    }

    /// Stops future sweeps. A sweep already running finishes normally.
    ///
    /// Calling this more than once is a no-op.
    pub fn stop_reap_loop(&self) {
        if let Some(reaper) = self.reaper.lock().take() {
            // The loop also exits once the sender is gone; try_send only
            // wakes it sooner.
            let _ = reaper.shutdown_tx.try_send(());
            info!(ttl_ms = self.ttl.as_millis() as u64, "cache reap loop stopped");
        }
    }

    /// Stops the reap loop and waits for its task to finish
    pub async fn shutdown(&self) {
        let reaper = self.reaper.lock().take();
        if let Some(Reaper { shutdown_tx, task }) = reaper {
            let _ = shutdown_tx.send(()).await;
            drop(shutdown_tx);
            let _ = task.await;
            info!("cache reaper joined");
        }
    }

    /// Whether the background sweep is still scheduled
    pub fn is_reaping(&self) -> bool {
        self.reaper.lock().is_some()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn spawn_reaper<V>(entries: EntryMap<V>, ttl: Duration) -> Reaper
where
    V: Send + Sync + 'static,
{
    let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);
    let period = ttl.max(Duration::from_millis(1));

    // First sweep one full period after construction, not immediately
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let task = tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    // A late tick still measures ages against the real time
                    reap(&entries, ttl, Instant::now());
                }
                _ = shutdown_rx.recv() => {
                    break;
                }
            }
        }
    });

    info!(ttl_ms = ttl.as_millis() as u64, "cache reap loop started");
    Reaper { shutdown_tx, task }
}

/// Removes every entry whose age at `now` is strictly greater than `ttl`
fn reap<V>(entries: &RwLock<HashMap<String, CacheEntry<V>>>, ttl: Duration, now: Instant) {
    let mut entries = entries.write();
    let before = entries.len();
    entries.retain(|_, entry| now.duration_since(entry.created_at) <= ttl);

    let removed = before - entries.len();
    if removed > 0 {
        debug!(removed, remaining = entries.len(), "reaped expired cache entries");
    }
}
