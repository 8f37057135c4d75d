//! Versioned parameter-broadcast slot for central-to-worker transfer.
//!
//! The learner publishes a [`ParamSnapshot`] after each applied update;
//! workers fetch it between rollouts. Unlike a queue, the slot keeps only
//! the latest snapshot: a new publication overwrites the previous one, and
//! every worker reads its own clone, so one publication reaches any number
//! of workers.
//!
//! ```text
//! Memory invariant: slot holds <= 1 snapshot at all times
//! ```
//!
//! The slot itself never blocks for long: publishing swaps one value under
//! a write lock, fetching clones under a read lock. Round ordering (publish
//! before rollouts start, fetch before gradients are computed) is the
//! orchestration layer's responsibility.

use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use super::param_sync::ParamSnapshot;

/// Latest-value parameter container for cross-thread broadcast.
pub struct ParamSlot {
    latest: RwLock<Option<ParamSnapshot>>,
    /// Current snapshot version
    version: AtomicU64,
    /// Counter for total snapshots published
    published_count: AtomicUsize,
    /// Counter for snapshots fetched by workers
    fetched_count: AtomicUsize,
}

impl ParamSlot {
    /// Create a new empty slot.
    pub fn new() -> Self {
        Self {
            latest: RwLock::new(None),
            version: AtomicU64::new(0),
            published_count: AtomicUsize::new(0),
            fetched_count: AtomicUsize::new(0),
        }
    }

    /// Create a slot holding an initial snapshot at version 1.
    pub fn with_initial(snapshot: ParamSnapshot) -> Self {
        Self {
            latest: RwLock::new(Some(snapshot)),
            version: AtomicU64::new(1),
            published_count: AtomicUsize::new(1),
            fetched_count: AtomicUsize::new(0),
        }
    }

    /// Publish a snapshot, overwriting any previous one.
    ///
    /// Called by the learner side after an applied update. Returns the new
    /// version number.
    pub fn publish(&self, snapshot: ParamSnapshot) -> u64 {
        let mut guard = self.latest.write();
        *guard = Some(snapshot);
        let version = self.version.fetch_add(1, Ordering::Release) + 1;
        self.published_count.fetch_add(1, Ordering::Relaxed);
        version
    }

    /// Clone the latest snapshot together with its version.
    ///
    /// Called by worker threads between rollouts. Returns `None` when
    /// nothing has been published yet.
    pub fn fetch(&self) -> Option<(ParamSnapshot, u64)> {
        let guard = self.latest.read();
        guard.clone().map(|snapshot| {
            self.fetched_count.fetch_add(1, Ordering::Relaxed);
            (snapshot, self.version.load(Ordering::Acquire))
        })
    }

    /// Current snapshot version without fetching.
    pub fn version(&self) -> u64 {
        self.version.load(Ordering::Acquire)
    }

    /// Whether a snapshot has been published.
    pub fn has_snapshot(&self) -> bool {
        self.latest.read().is_some()
    }

    /// Get debug statistics: (published, fetched)
    pub fn stats(&self) -> (usize, usize) {
        (
            self.published_count.load(Ordering::Relaxed),
            self.fetched_count.load(Ordering::Relaxed),
        )
    }
}

impl Default for ParamSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Thread-safe shared parameter slot.
pub type SharedParamSlot = Arc<ParamSlot>;

/// Create a new shared parameter slot.
pub fn param_slot() -> SharedParamSlot {
    Arc::new(ParamSlot::new())
}

/// Create a shared parameter slot holding an initial snapshot.
pub fn param_slot_with(snapshot: ParamSnapshot) -> SharedParamSlot {
    Arc::new(ParamSlot::with_initial(snapshot))
}
