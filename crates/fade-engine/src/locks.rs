//! # Settlement Locks
//!
//! Per-(barber, period) serialization for settlement operations.
//!
//! ## Why A Keyed Lock Map?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              Concurrent Settlement Without Lost Updates                 │
//! │                                                                         │
//! │  recalculate(A, march) ──► lock (A, march) ──┐                         │
//! │  recalculate(A, march) ──► lock (A, march) ──┤ serialized              │
//! │  mark_paid(A, march)   ──► lock (A, march) ──┘                         │
//! │                                                                         │
//! │  recalculate(B, march) ──► lock (B, march) ──── runs in parallel       │
//! │                                                                         │
//! │  Two writers on the same key must not interleave their                 │
//! │  read-aggregate-write sequence; writers on different keys have no      │
//! │  reason to wait for each other.                                        │
//! │                                                                         │
//! │  Policy activation locks the barber alone (no period): it races       │
//! │  against other activations for the same barber, not against           │
//! │  settlements.                                                          │
//! │                                                                         │
//! │  Second line of defense: the storage layer's unique index plus the    │
//! │  paid-guarded conditional writes (fade-db). The lock prevents         │
//! │  interleaving; the guards make any breach harmless.                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::{Mutex, OwnedMutexGuard};

use fade_core::Period;

/// Key identifying one serialization domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct LockKey {
    barber_id: String,
    /// `None` for barber-wide operations (policy activation).
    period: Option<(NaiveDate, NaiveDate)>,
}

/// An async mutex per (barber, period), created on first use.
///
/// Entries are never evicted: the map is bounded by barbers × settled
/// periods, a few hundred entries in a busy year.
#[derive(Debug, Clone, Default)]
pub struct SettlementLocks {
    inner: Arc<Mutex<HashMap<LockKey, Arc<Mutex<()>>>>>,
}

impl SettlementLocks {
    /// Creates an empty lock map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for one barber's settlement period. Held for the
    /// duration of a recompute or payout.
    pub async fn lock_period(&self, barber_id: &str, period: &Period) -> OwnedMutexGuard<()> {
        self.lock(LockKey {
            barber_id: barber_id.to_string(),
            period: Some((period.start(), period.end())),
        })
        .await
    }

    /// Acquires the barber-wide lock used by policy activation.
    pub async fn lock_barber(&self, barber_id: &str) -> OwnedMutexGuard<()> {
        self.lock(LockKey {
            barber_id: barber_id.to_string(),
            period: None,
        })
        .await
    }

    async fn lock(&self, key: LockKey) -> OwnedMutexGuard<()> {
        let entry = {
            let mut map = self.inner.lock().await;
            Arc::clone(map.entry(key).or_default())
        };
        // The map mutex is released before waiting on the entry: a long
        // settlement on one key never blocks lookups for other keys
        entry.lock_owned().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
