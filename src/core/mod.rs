pub mod ledger;
pub mod log;
pub mod period;
pub mod submit;

pub use ledger::{AttendanceLedger, CheckOut, LedgerConfig};
pub use period::{PeriodNamer, ensure_segment};
pub use submit::{Outcome, Submission, SubmitLogic};
