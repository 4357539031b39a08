/// Fixed chart palette.
///
/// Indexed by session ordinal so a session keeps its color across both chart
/// modes; indexing wraps instead of erroring when a selection outgrows the
/// palette.
pub const PALETTE: [&str; 20] = [
    "#a855f7", "#00d4ff", "#10b981", "#f59e0b", "#ef4444", "#8b5cf6", "#06b6d4", "#14b8a6",
    "#f97316", "#ec4899", "#3b82f6", "#84cc16", "#eab308", "#d946ef", "#f43f5e", "#22d3ee",
    "#a3e635", "#fb923c", "#6366f1", "#34d399",
];

#[must_use]
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
