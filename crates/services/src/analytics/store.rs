use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::debug;

use api::{FetchError, SessionDataSource};
use shot_core::model::{Plan, Session};

/// The latest known collection of sessions and plans.
///
/// Collection order is the collaborator's arrival order and is preserved
/// through every downstream stage; highlights tie-breaking depends on it.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub sessions: Vec<Session>,
    pub plans: Vec<Plan>,
}

impl Snapshot {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty() && self.plans.is_empty()
    }
}

#[derive(Default)]
struct StoreState {
    snapshot: Snapshot,
    applied_ticket: u64,
}

/// Owns the authoritative snapshot, refreshed wholesale from the remote
/// collaborator.
///
/// A refresh either fully replaces the snapshot or leaves it untouched on
/// failure. Concurrent refreshes are serialized by ticket: each fetch takes a
/// monotonically increasing ticket when it starts, and a completion whose
/// ticket is older than the last applied one is discarded, so a slow response
/// can never overwrite the snapshot of a later, faster one.
pub struct SessionStore {
    source: Arc<dyn SessionDataSource>,
    tickets: AtomicU64,
    state: Mutex<StoreState>,
}

impl SessionStore {
    #[must_use]
    pub fn new(source: Arc<dyn SessionDataSource>) -> Self {
        Self {
            source,
            tickets: AtomicU64::new(0),
            state: Mutex::new(StoreState::default()),
        }
    }

    /// Fetch a fresh snapshot, apply it and return it.
    ///
    /// # Errors
    ///
    /// Returns the `FetchError` from the collaborator; the prior snapshot is
    /// retained unchanged in that case.
    pub async fn refresh(&self) -> Result<Snapshot, FetchError> {
        let ticket = self.tickets.fetch_add(1, Ordering::Relaxed) + 1;
        let sessions = self.source.fetch_sessions().await?;
        let plans = self.source.fetch_plans().await?;
        let snapshot = Snapshot { sessions, plans };
        self.apply(ticket, snapshot.clone());
        Ok(snapshot)
    }

    /// Non-blocking read of the current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.state.lock().expect("store lock").snapshot.clone()
    }

    fn apply(&self, ticket: u64, snapshot: Snapshot) {
        let mut state = self.state.lock().expect("store lock");
        if ticket <= state.applied_ticket {
            debug!(ticket, applied = state.applied_ticket, "discarding stale snapshot");
            return;
        }
        state.snapshot = snapshot;
        state.applied_ticket = ticket;
    }
}
