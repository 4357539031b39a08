use std::collections::HashSet;

use shot_core::model::SessionId;

/// Tracks which sessions feed the analytics projections.
///
/// Two sets, kept disjoint: `selected` holds the sessions currently included;
/// `manually_excluded` holds sessions the user explicitly removed from an
/// automatically computed selection. Exclusions survive every poll-triggered
/// [`reconcile`](Self::reconcile) and are dropped only by an explicit user
/// action (re-selecting the session, or a plan-filter change clearing the
/// whole set).
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<SessionId>,
    manually_excluded: HashSet<SessionId>,
}

impl Selection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn selected(&self) -> &HashSet<SessionId> {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, id: SessionId) -> bool {
        self.selected.contains(&id)
    }

    #[must_use]
    pub fn manually_excluded(&self) -> &HashSet<SessionId> {
        &self.manually_excluded
    }

    /// Fold a freshly filtered working set into the selection.
    ///
    /// Previously selected sessions that survived the filter stay selected;
    /// sessions appearing for the first time are selected unless the user
    /// manually excluded them earlier; everything else drops out. Calling
    /// this twice with the same working set and no user action in between
    /// yields the same selection.
    pub fn reconcile<I>(&mut self, filtered: I) -> &HashSet<SessionId>
    where
        I: IntoIterator<Item = SessionId>,
    {
        let filtered: HashSet<SessionId> = filtered.into_iter().collect();

        let still_valid: HashSet<SessionId> =
            self.selected.intersection(&filtered).copied().collect();
        let newly_eligible = filtered
            .iter()
            .filter(|id| !self.selected.contains(id) && !self.manually_excluded.contains(id))
            .copied();

        let mut next = still_valid;
        next.extend(newly_eligible);
        self.selected = next;
        &self.selected
    }

    /// User unchecked a session: drop it and remember the exclusion.
    pub fn deselect(&mut self, id: SessionId) {
        self.selected.remove(&id);
        self.manually_excluded.insert(id);
    }

    /// User checked a session back on. Re-selection always wins over a
    /// previous exclusion.
    pub fn reselect(&mut self, id: SessionId) {
        self.manually_excluded.remove(&id);
        self.selected.insert(id);
    }

    /// Select exactly the given working set.
    ///
    /// The ids are also removed from the exclusion set (they are explicitly
    /// wanted now); exclusions for sessions outside the working set are kept.
    pub fn select_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = SessionId>,
    {
        let ids: HashSet<SessionId> = ids.into_iter().collect();
        for id in &ids {
            self.manually_excluded.remove(id);
        }
        self.selected = ids;
    }

    /// Clear the selection, marking the given working set as manually
    /// excluded so the next poll does not silently re-select it.
    pub fn deselect_all<I>(&mut self, ids: I)
    where
        I: IntoIterator<Item = SessionId>,
    {
        self.selected.clear();
        self.manually_excluded.extend(ids);
    }

    /// Forget all manual exclusions.
    ///
    /// Exclusions are scoped to one plan-filter context; the facade calls
    /// this when the plan filter changes.
    pub fn clear_manual_exclusions(&mut self) {
        self.manually_excluded.clear();
    }
}
