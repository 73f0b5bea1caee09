use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::holiday::Holiday;
use crate::errors::LeaveError;

/// Date-keyed holiday set. Holidays are unique per date; the calculator only
/// reads from the registry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HolidayRegistry {
    by_date: BTreeMap<NaiveDate, Holiday>,
}

impl HolidayRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from a holiday listing, rejecting duplicate dates.
    pub fn from_holidays(
        holidays: impl IntoIterator<Item = Holiday>,
    ) -> Result<Self, LeaveError> {
        let mut registry = Self::new();
        for holiday in holidays {
            registry.add(holiday)?;
        }
        Ok(registry)
    }

    pub fn add(&mut self, holiday: Holiday) -> Result<(), LeaveError> {
        if self.by_date.contains_key(&holiday.date) {
            return Err(LeaveError::DuplicateHoliday(holiday.date));
        }
        self.by_date.insert(holiday.date, holiday);
        Ok(())
    }

    pub fn get(&self, date: NaiveDate) -> Option<&Holiday> {
        self.by_date.get(&date)
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.by_date.contains_key(&date)
    }

    pub fn len(&self) -> usize {
        self.by_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_date.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Holiday> {
        self.by_date.values()
    }
}
