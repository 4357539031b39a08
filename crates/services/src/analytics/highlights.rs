use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};

use shot_core::accuracy;
use shot_core::model::{Session, SessionId};

/// Aggregate stats over the selected sessions.
///
/// Totals sum the session-level counters (the recording collaborator tracks
/// those independently of the per-shot records, which may not add up to
/// them). An empty selection is a defined state with all fields zeroed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Highlights {
    pub total_attempts: u64,
    pub total_goals: u64,
    /// Best session accuracy, rounded to the nearest integer percent.
    pub best_accuracy: u32,
    pub best_accuracy_date: Option<DateTime<Utc>>,
}

impl Highlights {
    /// Reduce the given sessions to totals and a best-accuracy record.
    ///
    /// The best-accuracy scan compares with strict `>`, so on ties the
    /// earliest-encountered session wins. Iteration order is the caller's
    /// order — for the analytics facade that is the filtered working set in
    /// snapshot (collaborator arrival) order, not chronological order.
    #[must_use]
    pub fn collect<'a, I>(sessions: I) -> Self
    where
        I: IntoIterator<Item = &'a Session>,
    {
        let mut totals = Self::default();
        let mut best_pct = 0.0_f64;
        let mut best_date: Option<DateTime<Utc>> = None;

        for session in sessions {
            totals.total_attempts += u64::from(session.total_attempts());
            totals.total_goals += u64::from(session.total_goals());

            // The scan starts at 0, so an all-zero selection keeps a None
            // date: 0% sessions never become the best record.
            let pct = session.accuracy();
            if pct > best_pct {
                best_pct = pct;
                best_date = Some(session.started_at());
            }
        }

        totals.best_accuracy = accuracy::rounded(best_pct);
        totals.best_accuracy_date = best_date;
        totals
    }
}

/// A session decorated with its accuracy for ranking views.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSession {
    pub session: Session,
    pub accuracy: f64,
}

/// The `limit` best selected sessions by accuracy, descending.
///
/// The sort is stable, so tied sessions keep their working-set order.
#[must_use]
pub fn top_sessions(
    sessions: &[Session],
    selected: &HashSet<SessionId>,
    limit: usize,
) -> Vec<RankedSession> {
    let mut ranked: Vec<RankedSession> = sessions
        .iter()
        .filter(|session| selected.contains(&session.id()))
        .map(|session| RankedSession {
            session: session.clone(),
            accuracy: session.accuracy(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.accuracy
            .partial_cmp(&a.accuracy)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shot_core::model::SessionStatus;
    use shot_core::time::fixed_now;
    use std::collections::BTreeMap;

    fn session(id: u64, days_ago: i64, attempts: u32, goals: u32) -> Session {
        Session::new(
            SessionId::new(id),
            format!("tok-{id}"),
            None,
            SessionStatus::Completed,
            None,
            fixed_now() - Duration::days(days_ago),
            None,
            attempts,
            goals,
            BTreeMap::new(),
        )
        .unwrap()
    }

    #[test]
    fn empty_selection_yields_zeroed_highlights() {
        let highlights = Highlights::collect(std::iter::empty::<&Session>());
        assert_eq!(highlights, Highlights::default());
        assert_eq!(highlights.best_accuracy_date, None);
    }

    #[test]
    fn totals_sum_session_level_counters() {
        let sessions = vec![session(1, 1, 10, 5), session(2, 2, 6, 3)];
        let highlights = Highlights::collect(sessions.iter());

        assert_eq!(highlights.total_attempts, 16);
        assert_eq!(highlights.total_goals, 8);
        assert_eq!(highlights.best_accuracy, 50);
    }

    #[test]
    fn best_accuracy_tracks_the_winning_session_date() {
        let sessions = vec![session(1, 3, 10, 2), session(2, 1, 10, 8)];
        let highlights = Highlights::collect(sessions.iter());

        assert_eq!(highlights.best_accuracy, 80);
        assert_eq!(
            highlights.best_accuracy_date,
            Some(fixed_now() - Duration::days(1))
        );
    }

    #[test]
    fn ties_keep_the_first_session_in_iteration_order() {
        // Both at 80%; the later-dated session is iterated first and must
        // win, pinning the documented iteration-order tie break.
        let newer = session(1, 1, 10, 8);
        let older = session(2, 5, 5, 4);
        let highlights = Highlights::collect([&newer, &older]);

        assert_eq!(highlights.best_accuracy, 80);
        assert_eq!(highlights.best_accuracy_date, Some(newer.started_at()));
    }

    #[test]
    fn zero_attempt_sessions_do_not_divide_by_zero() {
        let sessions = vec![session(1, 1, 0, 0), session(2, 2, 4, 0)];
        let highlights = Highlights::collect(sessions.iter());

        assert_eq!(highlights.total_attempts, 4);
        assert_eq!(highlights.best_accuracy, 0);
        // No session beat 0%, so there is no best record to date.
        assert_eq!(highlights.best_accuracy_date, None);
    }

    #[test]
    fn top_sessions_rank_descending_and_truncate() {
        let sessions = vec![
            session(1, 1, 10, 2),
            session(2, 2, 10, 9),
            session(3, 3, 10, 5),
            session(4, 4, 10, 7),
        ];
        let selected: HashSet<SessionId> = sessions.iter().map(Session::id).collect();

        let ranked = top_sessions(&sessions, &selected, 3);
        let ids: Vec<u64> = ranked.iter().map(|r| r.session.id().value()).collect();
        assert_eq!(ids, vec![2, 4, 3]);
    }

    #[test]
    fn top_sessions_tie_keeps_working_set_order() {
        let sessions = vec![session(1, 1, 10, 8), session(2, 2, 5, 4)];
        let selected: HashSet<SessionId> = sessions.iter().map(Session::id).collect();

        let ranked = top_sessions(&sessions, &selected, 5);
        let ids: Vec<u64> = ranked.iter().map(|r| r.session.id().value()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn top_sessions_only_rank_selected() {
        let sessions = vec![session(1, 1, 10, 9), session(2, 2, 10, 1)];
        let selected: HashSet<SessionId> = [SessionId::new(2)].into();

        let ranked = top_sessions(&sessions, &selected, 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].session.id(), SessionId::new(2));
    }
}
