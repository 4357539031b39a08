#![forbid(unsafe_code)]

pub mod client;
pub mod records;
pub mod source;

pub use client::{ApiConfig, HttpSessionSource};
pub use records::{PlanRecord, RecordError, SessionRecord, ShotDefRecord, ShotRecordDto};
pub use source::{FetchError, InMemorySource, SessionDataSource};
