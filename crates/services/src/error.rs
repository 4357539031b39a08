//! Shared error types for the services crate.

use thiserror::Error;

use api::FetchError;

/// Errors emitted by the analytics engine.
///
/// Fetch failures are recoverable: the store keeps its last good snapshot
/// and the caller surfaces the error as a non-fatal notice.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AnalyticsError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
