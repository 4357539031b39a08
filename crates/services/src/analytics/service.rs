use std::collections::HashSet;
use std::sync::Arc;

use shot_core::model::{Plan, Session, SessionId};
use shot_core::Clock;

use crate::error::AnalyticsError;
use super::chart::{self, ChartData, ChartMode};
use super::filter::{filter_sessions, DateRange, PlanFilter};
use super::highlights::{self, Highlights, RankedSession};
use super::selection::Selection;
use super::store::SessionStore;

/// The working set and the session ids currently included in analytics.
#[derive(Debug, Clone)]
pub struct FilteredSelection {
    /// Date/plan-filtered sessions in snapshot order.
    pub available: Vec<Session>,
    pub selected_ids: HashSet<SessionId>,
}

/// Plans split for the plan picker: presets first, custom plans newest-first.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    pub presets: Vec<Plan>,
    pub custom: Vec<Plan>,
}

/// Presentation-facing analytics facade.
///
/// Owns the time source, the session store handle and the selection state.
/// All methods are synchronous pure computations over the store snapshot; the
/// only asynchronous collaborator is the poll loop, which talks to the store
/// directly. The facade is meant to live on the hosting event loop: calls are
/// applied in delivery order, and a poll landing between two calls can never
/// clobber a manual exclusion (the selection controller guarantees that by
/// construction).
pub struct AnalyticsService {
    clock: Clock,
    store: Arc<SessionStore>,
    selection: Selection,
    date_range: Option<DateRange>,
    plan_filter: PlanFilter,
}

impl AnalyticsService {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<SessionStore>) -> Self {
        Self {
            clock,
            store,
            selection: Selection::new(),
            date_range: None,
            plan_filter: PlanFilter::All,
        }
    }

    /// The store handle, for wiring up a poll timer.
    #[must_use]
    pub fn store(&self) -> Arc<SessionStore> {
        Arc::clone(&self.store)
    }

    /// One manual refresh through the store.
    ///
    /// # Errors
    ///
    /// Returns `AnalyticsError::Fetch`; the prior snapshot stays in place.
    pub async fn refresh(&self) -> Result<(), AnalyticsError> {
        self.store.refresh().await?;
        Ok(())
    }

    /// Current working set and selection, reconciled against the latest
    /// snapshot.
    ///
    /// The default date window (last 31 days through 2 days ahead) is fixed
    /// on the first call that sees a non-empty snapshot and is not recomputed
    /// on later polls; until then no date constraint applies.
    pub fn filtered_and_selected(&mut self) -> FilteredSelection {
        let snapshot = self.store.snapshot();
        if self.date_range.is_none() && !snapshot.sessions.is_empty() {
            self.date_range = Some(DateRange::default_window(self.clock.now()));
        }

        let available = filter_sessions(
            &snapshot.sessions,
            self.date_range.as_ref(),
            self.plan_filter,
        );
        let selected_ids = self
            .selection
            .reconcile(available.iter().map(Session::id))
            .clone();

        FilteredSelection {
            available,
            selected_ids,
        }
    }

    #[must_use]
    pub fn date_range(&self) -> Option<DateRange> {
        self.date_range
    }

    pub fn set_date_range(&mut self, range: DateRange) {
        self.date_range = Some(range);
    }

    #[must_use]
    pub fn plan_filter(&self) -> PlanFilter {
        self.plan_filter
    }

    /// Switch the plan dimension of the filter.
    ///
    /// Manual exclusions are scoped to one plan-filter context, so changing
    /// the filter clears them; setting the same filter again is a no-op.
    pub fn set_plan_filter(&mut self, filter: PlanFilter) {
        if filter == self.plan_filter {
            return;
        }
        self.plan_filter = filter;
        self.selection.clear_manual_exclusions();
    }

    /// Check or uncheck one session in the selector.
    pub fn toggle_session(&mut self, id: SessionId, included: bool) {
        if included {
            self.selection.reselect(id);
        } else {
            self.selection.deselect(id);
        }
    }

    /// Select every session in the current working set.
    pub fn select_all(&mut self) {
        let working_set = self.filtered_and_selected();
        self.selection
            .select_all(working_set.available.iter().map(Session::id));
    }

    /// Empty the selection, excluding the whole working set so a background
    /// poll cannot silently re-select it.
    pub fn deselect_all(&mut self) {
        let working_set = self.filtered_and_selected();
        self.selection
            .deselect_all(working_set.available.iter().map(Session::id));
    }

    /// Chart-ready projection of the current selection.
    pub fn chart_data(&mut self, mode: ChartMode) -> ChartData {
        let working_set = self.filtered_and_selected();
        chart::project(&working_set.available, &working_set.selected_ids, mode)
    }

    /// Aggregate highlight stats over the current selection.
    ///
    /// Sessions are scanned in working-set (snapshot) order; see
    /// [`Highlights::collect`] for the tie-break consequences.
    pub fn highlights(&mut self) -> Highlights {
        let working_set = self.filtered_and_selected();
        Highlights::collect(
            working_set
                .available
                .iter()
                .filter(|session| working_set.selected_ids.contains(&session.id())),
        )
    }

    /// The best selected sessions by accuracy, for the home view ranking.
    pub fn top_sessions(&mut self, limit: usize) -> Vec<RankedSession> {
        let working_set = self.filtered_and_selected();
        highlights::top_sessions(&working_set.available, &working_set.selected_ids, limit)
    }

    /// Plans from the snapshot, split for the picker.
    #[must_use]
    pub fn plan_catalog(&self) -> PlanCatalog {
        let snapshot = self.store.snapshot();
        let mut presets = Vec::new();
        let mut custom = Vec::new();
        for plan in snapshot.plans {
            if plan.is_preset() {
                presets.push(plan);
            } else {
                custom.push(plan);
            }
        }
        custom.sort_by_key(|plan| std::cmp::Reverse(plan.created_at()));
        PlanCatalog { presets, custom }
    }
}
