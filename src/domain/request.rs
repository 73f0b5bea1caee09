//! Leave request aggregate and the value types it carries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;
use crate::errors::LeaveError;

/// Inclusive calendar span, `start <= end`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, LeaveError> {
        if start > end {
            return Err(LeaveError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterates every calendar date inside the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |date| *date <= end)
    }

    pub fn num_days(&self) -> u32 {
        (self.end - self.start).num_days() as u32 + 1
    }

    /// Checks a request's range sequence: each range well-formed, ascending,
    /// and non-overlapping.
    pub fn validate_sequence(ranges: &[DateRange]) -> Result<(), LeaveError> {
        for range in ranges {
            if range.start > range.end {
                return Err(LeaveError::InvalidRange {
                    start: range.start,
                    end: range.end,
                });
            }
        }
        for pair in ranges.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(LeaveError::OverlappingRanges(pair[1].start));
            }
        }
        Ok(())
    }
}

/// Policy flags that shape how requested ranges are charged.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeavePolicy {
    pub exclude_holidays: bool,
    pub weekend_bridging: bool,
}

impl Default for LeavePolicy {
    fn default() -> Self {
        Self {
            exclude_holidays: true,
            weekend_bridging: true,
        }
    }
}

/// Outcome of charging a set of ranges. Frozen on the request once it leaves
/// Draft; recomputing it afterwards would silently shift an already-reserved
/// balance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DaysCalculation {
    pub workdays: u32,
    pub bridge_days: u32,
    pub excluded_holidays: u32,
    pub total_deducted: u32,
}

impl DaysCalculation {
    pub fn from_parts(workdays: u32, bridge_days: u32, excluded_holidays: u32) -> Self {
        Self {
            workdays,
            bridge_days,
            excluded_holidays,
            total_deducted: workdays + bridge_days,
        }
    }
}

/// Closed set of request states. Transitions happen only through
/// `RequestLifecycle`, never by assigning the field directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Draft,
    Pending,
    Approved,
    Rejected,
}

impl RequestStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type: String,
    #[serde(default)]
    pub ranges: Vec<DateRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub status: RequestStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_calculation: Option<DaysCalculation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approver_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_comments: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl LeaveRequest {
    /// Creates a new Draft request owned by `employee_id`.
    pub fn new(employee_id: Uuid, leave_type: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            employee_id,
            leave_type: leave_type.into(),
            ranges: Vec::new(),
            reason: None,
            status: RequestStatus::Draft,
            days_calculation: None,
            submitted_at: None,
            approver_id: None,
            approved_at: None,
            manager_comments: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_ranges(mut self, ranges: Vec<DateRange>) -> Self {
        self.ranges = ranges;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for LeaveRequest {
    fn id(&self) -> Uuid {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let err = DateRange::new(date(2024, 3, 5), date(2024, 3, 1))
            .expect_err("inverted range must fail");
        assert!(matches!(err, LeaveError::InvalidRange { .. }));
    }

    #[test]
    fn range_iterates_every_day_inclusive() {
        let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 4)).unwrap();
        let days: Vec<NaiveDate> = range.days().collect();
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], date(2024, 3, 1));
        assert_eq!(days[3], date(2024, 3, 4));
        assert_eq!(range.num_days(), 4);
    }

    #[test]
    fn sequence_rejects_overlap_and_disorder() {
        let first = DateRange::new(date(2024, 3, 1), date(2024, 3, 5)).unwrap();
        let touching = DateRange::new(date(2024, 3, 5), date(2024, 3, 8)).unwrap();
        let err = DateRange::validate_sequence(&[first, touching])
            .expect_err("shared boundary day must fail");
        assert!(matches!(err, LeaveError::OverlappingRanges(d) if d == date(2024, 3, 5)));

        let later = DateRange::new(date(2024, 3, 7), date(2024, 3, 8)).unwrap();
        let err = DateRange::validate_sequence(&[later, first])
            .expect_err("descending order must fail");
        assert!(matches!(err, LeaveError::OverlappingRanges(_)));

        DateRange::validate_sequence(&[first, later]).expect("disjoint ascending ranges pass");
    }

    #[test]
    fn calculation_totals_workdays_and_bridges() {
        let calc = DaysCalculation::from_parts(4, 1, 2);
        assert_eq!(calc.total_deducted, 5);
        assert_eq!(calc.excluded_holidays, 2);
    }
}
