use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccuracyError {
    #[error("goals ({goals}) exceed attempts ({attempts})")]
    InvalidInput { goals: u32, attempts: u32 },
}

/// Accuracy percentage in `[0, 100]`.
///
/// Zero attempts means 0%, never a division by zero.
///
/// # Errors
///
/// Returns `AccuracyError::InvalidInput` when `goals > attempts`, which
/// indicates corrupted upstream data.
pub fn accuracy(goals: u32, attempts: u32) -> Result<f64, AccuracyError> {
    if goals > attempts {
        return Err(AccuracyError::InvalidInput { goals, attempts });
    }
    if attempts == 0 {
        return Ok(0.0);
    }
    Ok(f64::from(goals) / f64::from(attempts) * 100.0)
}

/// Rounds a percentage to the nearest integer for chart labels.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn rounded(percent: f64) -> u32 {
    percent.round() as u32
}

/// Fine-grained severity classification for per-shot accuracy.
///
/// `None` is reserved for shots with no attempts, so "no data" stays
/// distinguishable from "0% with data".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeverityBand {
    High,
    Medium,
    Low,
    None,
}

impl SeverityBand {
    /// Classify a goal/attempt pair.
    ///
    /// # Errors
    ///
    /// Returns `AccuracyError::InvalidInput` when `goals > attempts`.
    pub fn from_counts(goals: u32, attempts: u32) -> Result<Self, AccuracyError> {
        if attempts == 0 {
            // Validate even though the band is None, so corrupt pairs
            // like (goals: 3, attempts: 0) are still rejected.
            accuracy(goals, attempts)?;
            return Ok(Self::None);
        }
        let pct = accuracy(goals, attempts)?;
        if pct >= 50.0 {
            Ok(Self::High)
        } else if pct >= 25.0 {
            Ok(Self::Medium)
        } else {
            Ok(Self::Low)
        }
    }
}

/// Coarse traffic-light classification for session list coloring.
///
/// Coexists with `SeverityBand`; the two schemes serve different views and
/// use different thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBand {
    Green,
    Orange,
    Red,
}

impl ColorBand {
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent >= 66.0 {
            Self::Green
        } else if percent >= 33.0 {
            Self::Orange
        } else {
            Self::Red
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_attempts_is_zero_percent() {
        assert_eq!(accuracy(0, 0).unwrap(), 0.0);
    }

    #[test]
    fn accuracy_is_ratio_of_goals_to_attempts() {
        assert_eq!(accuracy(2, 4).unwrap(), 50.0);
        assert_eq!(accuracy(10, 10).unwrap(), 100.0);
        assert_eq!(accuracy(0, 5).unwrap(), 0.0);
    }

    #[test]
    fn goals_over_attempts_is_invalid() {
        assert_eq!(
            accuracy(5, 4),
            Err(AccuracyError::InvalidInput {
                goals: 5,
                attempts: 4
            })
        );
    }

    #[test]
    fn rounded_is_half_up() {
        assert_eq!(rounded(49.5), 50);
        assert_eq!(rounded(66.4), 66);
        assert_eq!(rounded(100.0), 100);
    }

    #[test]
    fn severity_none_only_without_attempts() {
        assert_eq!(SeverityBand::from_counts(0, 0).unwrap(), SeverityBand::None);
        // 0% with data is Low, not None.
        assert_eq!(SeverityBand::from_counts(0, 3).unwrap(), SeverityBand::Low);
    }

    #[test]
    fn severity_thresholds() {
        assert_eq!(SeverityBand::from_counts(1, 2).unwrap(), SeverityBand::High);
        assert_eq!(SeverityBand::from_counts(1, 4).unwrap(), SeverityBand::Medium);
        assert_eq!(SeverityBand::from_counts(1, 5).unwrap(), SeverityBand::Low);
    }

    #[test]
    fn severity_rejects_corrupt_counts_even_without_attempts() {
        assert!(SeverityBand::from_counts(3, 0).is_err());
    }

    #[test]
    fn color_thresholds() {
        assert_eq!(ColorBand::from_percent(66.0), ColorBand::Green);
        assert_eq!(ColorBand::from_percent(65.9), ColorBand::Orange);
        assert_eq!(ColorBand::from_percent(33.0), ColorBand::Orange);
        assert_eq!(ColorBand::from_percent(32.9), ColorBand::Red);
        assert_eq!(ColorBand::from_percent(0.0), ColorBand::Red);
    }
}
