use chrono::{DateTime, Utc};
use thiserror::Error;
use url::Url;

use crate::model::PlanId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PlanError {
    #[error("plan name cannot be empty")]
    EmptyName,

    #[error("plan must define at least one shot")]
    NoShots,

    #[error("shot name cannot be empty")]
    EmptyShotName,
}

/// One named shot within a plan, optionally linking a tutorial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotDefinition {
    name: String,
    tutorial: Option<Url>,
}

impl ShotDefinition {
    /// # Errors
    ///
    /// Returns `PlanError::EmptyShotName` for a blank name.
    pub fn new(name: impl Into<String>, tutorial: Option<Url>) -> Result<Self, PlanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanError::EmptyShotName);
        }
        Ok(Self { name, tutorial })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn tutorial(&self) -> Option<&Url> {
        self.tutorial.as_ref()
    }
}

/// A named template of shot slots a session can be started against.
///
/// Preset plans ship with the system; custom plans are user-created. Many
/// sessions may reference one plan.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    id: PlanId,
    name: String,
    description: Option<String>,
    shots: Vec<ShotDefinition>,
    is_preset: bool,
    created_at: DateTime<Utc>,
}

impl Plan {
    /// Create a validated plan.
    ///
    /// # Errors
    ///
    /// Returns `PlanError::EmptyName` for a blank name or `PlanError::NoShots`
    /// when the shot list is empty.
    pub fn new(
        id: PlanId,
        name: impl Into<String>,
        description: Option<String>,
        shots: Vec<ShotDefinition>,
        is_preset: bool,
        created_at: DateTime<Utc>,
    ) -> Result<Self, PlanError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(PlanError::EmptyName);
        }
        if shots.is_empty() {
            return Err(PlanError::NoShots);
        }
        Ok(Self {
            id,
            name,
            description,
            shots,
            is_preset,
            created_at,
        })
    }

    #[must_use]
    pub fn id(&self) -> PlanId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Ordered shot definitions; slot numbers are 1-based positions here.
    #[must_use]
    pub fn shots(&self) -> &[ShotDefinition] {
        &self.shots
    }

    #[must_use]
    pub fn is_preset(&self) -> bool {
        self.is_preset
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
