use thiserror::Error;

use crate::accuracy;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ShotRecordError {
    #[error("shot goals ({goals}) exceed attempts ({attempts})")]
    GoalsExceedAttempts { goals: u32, attempts: u32 },
}

/// Attempt/goal counts for one shot slot within a session.
///
/// Created and updated exclusively by the recording collaborator; within one
/// poll cycle the analytics engine treats it as immutable input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShotRecord {
    attempts: u32,
    goals: u32,
    label: Option<String>,
}

impl ShotRecord {
    /// Create a validated shot record.
    ///
    /// # Errors
    ///
    /// Returns `ShotRecordError::GoalsExceedAttempts` when `goals > attempts`.
    pub fn new(attempts: u32, goals: u32, label: Option<String>) -> Result<Self, ShotRecordError> {
        if goals > attempts {
            return Err(ShotRecordError::GoalsExceedAttempts { goals, attempts });
        }
        Ok(Self {
            attempts,
            goals,
            label,
        })
    }

    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    #[must_use]
    pub fn goals(&self) -> u32 {
        self.goals
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Accuracy percentage for this shot, 0.0 when it was never attempted.
    #[must_use]
    pub fn accuracy(&self) -> f64 {
        // Counts were validated on construction.
        accuracy::accuracy(self.goals, self.attempts).unwrap_or(0.0)
    }

    /// Whether the shot was attempted at all this session.
    #[must_use]
    pub fn was_attempted(&self) -> bool {
        self.attempts > 0
    }
}
