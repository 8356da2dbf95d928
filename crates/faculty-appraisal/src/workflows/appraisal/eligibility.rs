use chrono::{Months, NaiveDate};

use super::domain::AppraisalStatus;

/// Inclusive window in which a `New` appraisal may be evaluated: the last
/// calendar month of its cycle. Month subtraction day-clamps, so a cycle
/// ending 2024-03-31 opens its window on 2024-02-29.
pub fn evaluation_window(cycle_end: NaiveDate) -> (NaiveDate, NaiveDate) {
    let opens = cycle_end
        .checked_sub_months(Months::new(1))
        .unwrap_or(cycle_end);
    (opens, cycle_end)
}

/// Whether the "evaluate" action is enabled for an appraisal. Callers pass
/// the current wall-clock date at render time; the answer is never cached.
pub fn evaluate_enabled(status: AppraisalStatus, cycle_end: NaiveDate, today: NaiveDate) -> bool {
    match status {
        AppraisalStatus::Complete => false,
        AppraisalStatus::New => {
            let (opens, closes) = evaluation_window(cycle_end);
            today >= opens && today <= closes
        }
        AppraisalStatus::InProgress | AppraisalStatus::Sent => true,
    }
}
