pub mod action;
pub mod granularity;
pub mod record;

pub use action::Action;
pub use granularity::{Granularity, TimePrecision};
pub use record::{AttendanceRecord, HEADER, OPEN_SENTINEL};
