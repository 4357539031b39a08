use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use crate::accuracy;
use crate::model::{PlanId, SessionId, ShotRecord, ShotSlot};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("session goals ({goals}) exceed attempts ({attempts})")]
    GoalsExceedAttempts { goals: u32, attempts: u32 },

    #[error("session token cannot be empty")]
    EmptyToken,
}

/// Lifecycle status of a recorded session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Completed,
}

/// One recorded training run with aggregate and per-shot attempt/goal counts.
///
/// Session-level totals are tracked by the recording collaborator
/// independently of the shot map, so they may legitimately differ from the
/// sum over `shots`. Aggregations use the session totals.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    id: SessionId,
    token: String,
    name: Option<String>,
    status: SessionStatus,
    plan_id: Option<PlanId>,
    started_at: DateTime<Utc>,
    duration_minutes: Option<u32>,
    total_attempts: u32,
    total_goals: u32,
    shots: BTreeMap<ShotSlot, ShotRecord>,
}

impl Session {
    /// Create a validated session.
    ///
    /// `token` is the externally generated display/correlation id used by the
    /// collaborator for rename and delete calls.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::GoalsExceedAttempts` when the session totals are
    /// inconsistent, or `SessionError::EmptyToken` for a blank token. Shot
    /// records validate their own counts on construction.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: SessionId,
        token: impl Into<String>,
        name: Option<String>,
        status: SessionStatus,
        plan_id: Option<PlanId>,
        started_at: DateTime<Utc>,
        duration_minutes: Option<u32>,
        total_attempts: u32,
        total_goals: u32,
        shots: BTreeMap<ShotSlot, ShotRecord>,
    ) -> Result<Self, SessionError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(SessionError::EmptyToken);
        }
        if total_goals > total_attempts {
            return Err(SessionError::GoalsExceedAttempts {
                goals: total_goals,
                attempts: total_attempts,
            });
        }

        Ok(Self {
            id,
            token,
            name,
            status,
            plan_id,
            started_at,
            duration_minutes,
            total_attempts,
            total_goals,
            shots,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    #[must_use]
    pub fn plan_id(&self) -> Option<PlanId> {
        self.plan_id
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn duration_minutes(&self) -> Option<u32> {
        self.duration_minutes
    }

    #[must_use]
    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    #[must_use]
    pub fn total_goals(&self) -> u32 {
        self.total_goals
    }

    /// Shot records keyed by slot, ordered ascending by slot number.
    #[must_use]
    pub fn shots(&self) -> &BTreeMap<ShotSlot, ShotRecord> {
        &self.shots
    }

    /// Session accuracy percentage from the collaborator-tracked totals.
    ///
    /// 0.0 when the session has no attempts.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        // Totals were validated on construction.
        accuracy::accuracy(self.total_goals, self.total_attempts).unwrap_or(0.0)
    }
}
