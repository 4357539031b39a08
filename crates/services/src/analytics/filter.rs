use chrono::{DateTime, Duration, Utc};

use shot_core::model::{PlanId, Session};

/// Inclusive date window for the analytics working set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl DateRange {
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Default window: the last 31 days through 2 days from now.
    ///
    /// The forward slack keeps sessions recorded in other timezones (or while
    /// the view is open) inside the window.
    #[must_use]
    pub fn default_window(now: DateTime<Utc>) -> Self {
        Self {
            start: now - Duration::days(31),
            end: now + Duration::days(2),
        }
    }

    #[must_use]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[must_use]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Both endpoints are inclusive.
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && at <= self.end
    }
}

/// Plan dimension of the working-set filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlanFilter {
    /// Sessions from every plan, including plan-less free sessions.
    #[default]
    All,
    /// Only sessions started against the given plan.
    Plan(PlanId),
}

impl PlanFilter {
    #[must_use]
    pub fn matches(&self, session: &Session) -> bool {
        match self {
            PlanFilter::All => true,
            PlanFilter::Plan(id) => session.plan_id() == Some(*id),
        }
    }
}

/// Narrow the full collection to the working set.
///
/// A session is included when its start timestamp falls inside `range` (when
/// one is set) and it matches the plan filter. Output preserves input order;
/// callers sort as needed for projection.
#[must_use]
pub fn filter_sessions(
    sessions: &[Session],
    range: Option<&DateRange>,
    plan: PlanFilter,
) -> Vec<Session> {
    sessions
        .iter()
        .filter(|session| range.is_none_or(|r| r.contains(session.started_at())))
        .filter(|session| plan.matches(session))
        .cloned()
        .collect()
}
