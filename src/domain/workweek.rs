use serde::{Deserialize, Serialize};

use crate::errors::LeaveError;

/// Inclusive window of working weekdays, indexed 0 (Sunday) through
/// 6 (Saturday). The window may wrap past Saturday, so a Friday-to-Tuesday
/// deployment is expressed as `start_day = 5, end_day = 2`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkweekConfig {
    pub start_day: u8,
    pub end_day: u8,
}

impl WorkweekConfig {
    pub fn new(start_day: u8, end_day: u8) -> Result<Self, LeaveError> {
        let config = Self { start_day, end_day };
        config.validate()?;
        Ok(config)
    }

    /// Monday through Friday.
    pub fn standard() -> Self {
        Self {
            start_day: 1,
            end_day: 5,
        }
    }

    /// Day indices are checked here, never at query time.
    pub fn validate(&self) -> Result<(), LeaveError> {
        for day in [self.start_day, self.end_day] {
            if day > 6 {
                return Err(LeaveError::InvalidWorkweek(day));
            }
        }
        Ok(())
    }

    /// Whether the Sunday-based weekday index falls inside the window.
    pub fn contains(&self, day: u8) -> bool {
        if self.start_day <= self.end_day {
            day >= self.start_day && day <= self.end_day
        } else {
            day >= self.start_day || day <= self.end_day
        }
    }
}

impl Default for WorkweekConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_day_index() {
        let err = WorkweekConfig::new(1, 7).expect_err("index 7 must be rejected");
        assert!(matches!(err, LeaveError::InvalidWorkweek(7)));
    }

    #[test]
    fn plain_window_contains_inner_days_only() {
        let config = WorkweekConfig::standard();
        assert!(config.contains(1));
        assert!(config.contains(5));
        assert!(!config.contains(0));
        assert!(!config.contains(6));
    }

    #[test]
    fn wrapping_window_spans_the_weekend() {
        let config = WorkweekConfig::new(5, 2).unwrap();
        for day in [5, 6, 0, 1, 2] {
            assert!(config.contains(day), "day {day} should be working");
        }
        for day in [3, 4] {
            assert!(!config.contains(day), "day {day} should be off");
        }
    }
}
