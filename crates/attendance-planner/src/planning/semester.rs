use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Teaching days left between an evaluation date and the end of teaching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterWindow {
    pub today: NaiveDate,
    pub teaching_ends: NaiveDate,
}

impl SemesterWindow {
    pub fn new(today: NaiveDate, teaching_ends: NaiveDate) -> Self {
        Self {
            today,
            teaching_ends,
        }
    }

    pub fn days_remaining(&self) -> i64 {
        (self.teaching_ends - self.today).num_days().max(0)
    }

    /// Whole or partial weeks still to be taught.
    pub fn remaining_weeks(&self) -> u32 {
        let days = self.days_remaining();
        let weeks = (days + 6) / 7;
        u32::try_from(weeks).unwrap_or(u32::MAX)
    }

    pub fn projected_remaining(&self, weekly_classes: u32) -> u32 {
        weekly_classes.saturating_mul(self.remaining_weeks())
    }
}
