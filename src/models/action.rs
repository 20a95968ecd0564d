use serde::Serialize;

/// What a submission asks the ledger to do.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Action {
    CheckIn,
    CheckOut,
}

impl Action {
    /// Operation name written to the activity log.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::CheckIn => "check_in",
            Action::CheckOut => "check_out",
        }
    }
}
