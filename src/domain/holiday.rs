use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::NamedEntity;

/// A named non-working date observed by the whole deployment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    pub category: HolidayCategory,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>, category: HolidayCategory) -> Self {
        Self {
            date,
            name: name.into(),
            category,
        }
    }
}

impl NamedEntity for Holiday {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Enumerates the supported holiday classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum HolidayCategory {
    Public,
    Religious,
    National,
}
