use std::collections::{BTreeMap, BTreeSet, HashSet};

use shot_core::accuracy;
use shot_core::model::{Session, SessionId, ShotSlot};

/// Which projection of the selected sessions a chart consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartMode {
    /// Flat time-ordered sequence of per-shot points across all sessions.
    Overview,
    /// One row per session, keyed by shot slot.
    Breakdown,
}

/// How the presentation collaborator draws a projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartStyle {
    Line,
    Bar,
    Area,
}

/// Closed mode x style pair, dispatched once per render request.
///
/// Projection stays pure data; the style only matters to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartKind {
    pub mode: ChartMode,
    pub style: ChartStyle,
}

/// One per-shot data point of the overview projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverviewPoint {
    /// Compact axis label, e.g. `"Jan 5 S2"`.
    pub label: String,
    /// Tooltip label, e.g. `"Jan 5 - Shot 2"`.
    pub full_label: String,
    /// Accuracy percentage rounded to the nearest integer.
    pub accuracy: u32,
    /// 0-based position of the session among the selected sessions sorted by
    /// start time; drives color grouping in both chart modes.
    pub session_index: usize,
    pub session_id: SessionId,
    pub slot: ShotSlot,
}

/// One per-session row of the breakdown projection.
///
/// Slots the session never attempted are absent from `shots` (not zero), so
/// series rendering skips them instead of drawing a false 0%.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakdownRow {
    /// Ordinal label, e.g. `"Session 3"` (1-based).
    pub name: String,
    /// Short date label, e.g. `"1/5/2024"`.
    pub date: String,
    pub session_id: SessionId,
    pub shots: BTreeMap<ShotSlot, u32>,
}

/// Chart-ready data in the requested projection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartData {
    Overview(Vec<OverviewPoint>),
    Breakdown(Vec<BreakdownRow>),
}

impl ChartData {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Overview(points) => points.is_empty(),
            ChartData::Breakdown(rows) => rows.is_empty(),
        }
    }
}

/// Selected sessions in chart order: ascending by start time, working-set
/// order on equal timestamps (the sort is stable).
fn chart_order<'a>(sessions: &'a [Session], selected: &HashSet<SessionId>) -> Vec<&'a Session> {
    let mut picked: Vec<&Session> = sessions
        .iter()
        .filter(|session| selected.contains(&session.id()))
        .collect();
    picked.sort_by_key(|session| session.started_at());
    picked
}

/// Build the overview projection.
///
/// Shots with zero attempts are omitted, not zero-filled, so untried shots
/// never plot as 0%.
#[must_use]
pub fn overview_points(sessions: &[Session], selected: &HashSet<SessionId>) -> Vec<OverviewPoint> {
    let mut points = Vec::new();
    for (session_index, session) in chart_order(sessions, selected).iter().enumerate() {
        let date = session.started_at().format("%b %-d");
        for (slot, shot) in session.shots() {
            if !shot.was_attempted() {
                continue;
            }
            points.push(OverviewPoint {
                label: format!("{date} S{slot}"),
                full_label: format!("{date} - Shot {slot}"),
                accuracy: accuracy::rounded(shot.accuracy()),
                session_index,
                session_id: session.id(),
                slot: *slot,
            });
        }
    }
    points
}

/// Build the breakdown projection, one row per selected session.
#[must_use]
pub fn breakdown_rows(sessions: &[Session], selected: &HashSet<SessionId>) -> Vec<BreakdownRow> {
    chart_order(sessions, selected)
        .iter()
        .enumerate()
        .map(|(index, session)| {
            let shots = session
                .shots()
                .iter()
                .filter(|(_, shot)| shot.was_attempted())
                .map(|(slot, shot)| (*slot, accuracy::rounded(shot.accuracy())))
                .collect();
            BreakdownRow {
                name: format!("Session {}", index + 1),
                date: session.started_at().format("%-m/%-d/%Y").to_string(),
                session_id: session.id(),
                shots,
            }
        })
        .collect()
}

/// Sorted union of shot slots across breakdown rows, for series enumeration.
#[must_use]
pub fn breakdown_slots(rows: &[BreakdownRow]) -> Vec<ShotSlot> {
    let slots: BTreeSet<ShotSlot> = rows.iter().flat_map(|row| row.shots.keys().copied()).collect();
    slots.into_iter().collect()
}

/// Project the working set in the requested mode.
#[must_use]
pub fn project(sessions: &[Session], selected: &HashSet<SessionId>, mode: ChartMode) -> ChartData {
    match mode {
        ChartMode::Overview => ChartData::Overview(overview_points(sessions, selected)),
        ChartMode::Breakdown => ChartData::Breakdown(breakdown_rows(sessions, selected)),
    }
}

/// One point of the per-session sparkline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiniPoint {
    pub slot: ShotSlot,
    pub accuracy: u32,
}

/// Per-session mini series for the small session card graph.
///
/// Unlike the overview projection this includes unattempted slots at 0%, so
/// the sparkline always spans the whole plan.
#[must_use]
pub fn session_shot_series(session: &Session) -> Vec<MiniPoint> {
    session
        .shots()
        .iter()
        .map(|(slot, shot)| MiniPoint {
            slot: *slot,
            accuracy: accuracy::rounded(shot.accuracy()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shot_core::model::{SessionStatus, ShotRecord};
    use shot_core::time::fixed_now;

    fn session(id: u64, days_ago: i64, shots: &[(u32, u32, u32)]) -> Session {
        let shots = shots
            .iter()
            .map(|&(slot, attempts, goals)| {
                (
                    ShotSlot::new(slot),
                    ShotRecord::new(attempts, goals, None).unwrap(),
                )
            })
            .collect();
        Session::new(
            SessionId::new(id),
            format!("tok-{id}"),
            None,
            SessionStatus::Completed,
            None,
            fixed_now() - Duration::days(days_ago),
            None,
            10,
            5,
            shots,
        )
        .unwrap()
    }

    fn all(sessions: &[Session]) -> HashSet<SessionId> {
        sessions.iter().map(Session::id).collect()
    }

    #[test]
    fn overview_skips_zero_attempt_shots() {
        let sessions = vec![session(1, 1, &[(1, 4, 2), (2, 0, 0)])];
        let points = overview_points(&sessions, &all(&sessions));

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].slot, ShotSlot::new(1));
        assert_eq!(points[0].accuracy, 50);
    }

    #[test]
    fn overview_orders_sessions_by_start_then_slots_numerically() {
        // Session 2 started earlier; slots 10 and 2 must sort numerically.
        let sessions = vec![
            session(1, 1, &[(10, 2, 1), (2, 2, 2)]),
            session(2, 5, &[(1, 1, 1)]),
        ];
        let points = overview_points(&sessions, &all(&sessions));

        let order: Vec<(u64, u32)> = points
            .iter()
            .map(|p| (p.session_id.value(), p.slot.value()))
            .collect();
        assert_eq!(order, vec![(2, 1), (1, 2), (1, 10)]);
        assert_eq!(points[0].session_index, 0);
        assert_eq!(points[1].session_index, 1);
    }

    #[test]
    fn overview_labels_carry_date_and_slot() {
        // fixed_now is 2024-03-01; one day earlier is Feb 29 (leap year).
        let sessions = vec![session(1, 1, &[(3, 2, 1)])];
        let points = overview_points(&sessions, &all(&sessions));

        assert_eq!(points[0].label, "Feb 29 S3");
        assert_eq!(points[0].full_label, "Feb 29 - Shot 3");
    }

    #[test]
    fn overview_only_projects_selected_sessions() {
        let sessions = vec![
            session(1, 1, &[(1, 2, 1)]),
            session(2, 2, &[(1, 2, 1)]),
        ];
        let selected: HashSet<SessionId> = [SessionId::new(2)].into();

        let points = overview_points(&sessions, &selected);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].session_id, SessionId::new(2));
        // Ordinal is the position among selected sessions, not all sessions.
        assert_eq!(points[0].session_index, 0);
    }

    #[test]
    fn breakdown_rows_omit_unattempted_slots() {
        let sessions = vec![
            session(1, 2, &[(1, 4, 4), (2, 0, 0)]),
            session(2, 1, &[(1, 5, 1), (3, 2, 1)]),
        ];
        let rows = breakdown_rows(&sessions, &all(&sessions));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Session 1");
        assert_eq!(rows[0].date, "2/28/2024");
        assert_eq!(rows[0].shots.get(&ShotSlot::new(1)), Some(&100));
        assert!(!rows[0].shots.contains_key(&ShotSlot::new(2)));

        assert_eq!(rows[1].name, "Session 2");
        assert_eq!(rows[1].shots.get(&ShotSlot::new(1)), Some(&20));
        assert_eq!(rows[1].shots.get(&ShotSlot::new(3)), Some(&50));
    }

    #[test]
    fn breakdown_slots_union_is_sorted() {
        let sessions = vec![
            session(1, 2, &[(5, 1, 0), (1, 1, 0)]),
            session(2, 1, &[(3, 1, 0)]),
        ];
        let rows = breakdown_rows(&sessions, &all(&sessions));

        let slots: Vec<u32> = breakdown_slots(&rows).iter().map(ShotSlot::value).collect();
        assert_eq!(slots, vec![1, 3, 5]);
    }

    #[test]
    fn session_ordinal_is_stable_across_modes() {
        let sessions = vec![
            session(1, 1, &[(1, 2, 1)]),
            session(2, 3, &[(1, 2, 1)]),
            session(3, 2, &[(1, 2, 1)]),
        ];
        let selected = all(&sessions);

        let points = overview_points(&sessions, &selected);
        let rows = breakdown_rows(&sessions, &selected);

        // Same start-time ordering in both projections: ids 2, 3, 1.
        let overview_order: Vec<u64> = points.iter().map(|p| p.session_id.value()).collect();
        let breakdown_order: Vec<u64> = rows.iter().map(|r| r.session_id.value()).collect();
        assert_eq!(overview_order, vec![2, 3, 1]);
        assert_eq!(breakdown_order, vec![2, 3, 1]);
    }

    #[test]
    fn mini_series_zero_fills_unattempted_slots() {
        let session = session(1, 1, &[(1, 4, 2), (2, 0, 0)]);
        let series = session_shot_series(&session);

        assert_eq!(
            series,
            vec![
                MiniPoint {
                    slot: ShotSlot::new(1),
                    accuracy: 50
                },
                MiniPoint {
                    slot: ShotSlot::new(2),
                    accuracy: 0
                },
            ]
        );
    }

    #[test]
    fn empty_selection_projects_empty_data() {
        let sessions = vec![session(1, 1, &[(1, 2, 1)])];
        let selected = HashSet::new();

        assert!(project(&sessions, &selected, ChartMode::Overview).is_empty());
        assert!(project(&sessions, &selected, ChartMode::Breakdown).is_empty());
    }
}
