mod chart;
mod filter;
mod highlights;
mod palette;
mod poller;
mod selection;
mod service;
mod store;

// Public API of the analytics subsystem.
pub use crate::error::AnalyticsError;
pub use chart::{
    breakdown_slots, session_shot_series, BreakdownRow, ChartData, ChartKind, ChartMode,
    ChartStyle, MiniPoint, OverviewPoint,
};
pub use filter::{filter_sessions, DateRange, PlanFilter};
pub use highlights::{top_sessions, Highlights, RankedSession};
pub use palette::{color_for, PALETTE};
pub use poller::{PollHandle, POLL_PERIOD};
pub use selection::Selection;
pub use service::{AnalyticsService, FilteredSelection, PlanCatalog};
pub use store::{SessionStore, Snapshot};
