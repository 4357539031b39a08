#![forbid(unsafe_code)]

pub mod accuracy;
pub mod error;
pub mod model;
pub mod time;

pub use accuracy::{AccuracyError, ColorBand, SeverityBand};
pub use error::Error;
pub use time::Clock;
