//! Common types used across the application.

pub mod id;
pub mod month;
pub mod timestamp;

pub use id::*;
pub use month::{BillingMonth, MonthParseError};
pub use timestamp::parse_timestamp;
