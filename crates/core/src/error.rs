use thiserror::Error;

use crate::accuracy::AccuracyError;
use crate::model::{PlanError, SessionError, ShotRecordError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Accuracy(#[from] AccuracyError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    ShotRecord(#[from] ShotRecordError),
    #[error(transparent)]
    Plan(#[from] PlanError),
}
