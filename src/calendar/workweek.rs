use chrono::{Datelike, NaiveDate};

use crate::domain::workweek::WorkweekConfig;
use crate::errors::LeaveError;

/// Classifies calendar dates against a validated workweek window.
#[derive(Debug, Clone, Copy)]
pub struct WorkweekCalendar {
    config: WorkweekConfig,
}

impl WorkweekCalendar {
    pub fn new(config: WorkweekConfig) -> Result<Self, LeaveError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WorkweekConfig {
        &self.config
    }

    pub fn is_working_day(&self, date: NaiveDate) -> bool {
        self.config
            .contains(date.weekday().num_days_from_sunday() as u8)
    }
}
