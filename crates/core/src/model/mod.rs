mod ids;
mod plan;
mod session;
mod shot;

pub use ids::{ParseIdError, PlanId, SessionId, ShotSlot};
pub use plan::{Plan, PlanError, ShotDefinition};
pub use session::{Session, SessionError, SessionStatus};
pub use shot::{ShotRecord, ShotRecordError};
