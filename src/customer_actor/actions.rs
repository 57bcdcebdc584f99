use crate::domain::CheckInOutcome;

/// Custom actions for Customer entities.
#[derive(Debug, Clone)]
pub enum CustomerAction {
    /// Marks the visitor processed and stores what they were given.
    RecordCheckIn(CheckInOutcome),
}

/// Results from CustomerActions - variants match 1:1 with CustomerAction
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerActionResult {
    /// Whether the visitor was still pending before this check-in
    RecordCheckIn(bool),
}
