use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use shot_core::model::{Plan, Session};

/// Errors surfaced by session/plan data sources.
///
/// A failed fetch is never fatal to analytics: callers keep their last good
/// snapshot and surface the failure as a notice.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FetchError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("unexpected status {0}")]
    Status(u16),

    #[error("response decode error: {0}")]
    Decode(String),

    #[error("unauthorized")]
    Unauthorized,
}

/// Read access to the remote session/plan collaborator.
///
/// Each call returns the full current collection; there is no incremental
/// patching in the contract.
#[async_trait]
pub trait SessionDataSource: Send + Sync {
    async fn fetch_sessions(&self) -> Result<Vec<Session>, FetchError>;

    async fn fetch_plans(&self) -> Result<Vec<Plan>, FetchError>;
}

/// In-memory data source for tests and offline development.
///
/// `set_sessions`/`set_plans` replace the served collections; `fail_next`
/// makes the following fetch return a connection error once.
#[derive(Clone, Default)]
pub struct InMemorySource {
    sessions: Arc<Mutex<Vec<Session>>>,
    plans: Arc<Mutex<Vec<Plan>>>,
    fail_next: Arc<Mutex<bool>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_sessions(&self, sessions: Vec<Session>) {
        *self.sessions.lock().expect("sessions lock") = sessions;
    }

    pub fn set_plans(&self, plans: Vec<Plan>) {
        *self.plans.lock().expect("plans lock") = plans;
    }

    /// Make the next `fetch_sessions` call fail with a connection error.
    pub fn fail_next(&self) {
        *self.fail_next.lock().expect("fail_next lock") = true;
    }

    fn take_failure(&self) -> bool {
        let mut flag = self.fail_next.lock().expect("fail_next lock");
        std::mem::take(&mut *flag)
    }
}

#[async_trait]
impl SessionDataSource for InMemorySource {
    async fn fetch_sessions(&self) -> Result<Vec<Session>, FetchError> {
        if self.take_failure() {
            return Err(FetchError::Connection("simulated outage".into()));
        }
        let guard = self
            .sessions
            .lock()
            .map_err(|e| FetchError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn fetch_plans(&self) -> Result<Vec<Plan>, FetchError> {
        let guard = self
            .plans
            .lock()
            .map_err(|e| FetchError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}
