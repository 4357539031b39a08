#![forbid(unsafe_code)]

pub mod analytics;
pub mod error;

pub use shot_core::Clock;

pub use analytics::{
    breakdown_slots, color_for, session_shot_series, AnalyticsService, BreakdownRow, ChartData,
    ChartKind, ChartMode, ChartStyle, DateRange, FilteredSelection, Highlights, MiniPoint,
    OverviewPoint, PlanCatalog, PlanFilter, PollHandle, RankedSession, Selection, SessionStore,
    Snapshot, PALETTE, POLL_PERIOD,
};
pub use error::AnalyticsError;
