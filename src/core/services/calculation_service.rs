//! Deduction arithmetic for requested leave ranges.

use chrono::Duration;

use crate::calendar::{HolidayRegistry, WorkweekCalendar};
use crate::domain::request::{DateRange, DaysCalculation, LeavePolicy};

/// Computes how many days a set of requested ranges deducts from a balance.
///
/// Pure and stateless: identical inputs always produce the identical
/// `DaysCalculation`. Callers are responsible for handing in an ordered,
/// non-overlapping range sequence; validation belongs to request submission.
pub struct CalculationService;

impl CalculationService {
    pub fn compute(
        ranges: &[DateRange],
        calendar: &WorkweekCalendar,
        holidays: &HolidayRegistry,
        policy: LeavePolicy,
    ) -> DaysCalculation {
        let mut workdays = 0u32;
        let mut excluded_holidays = 0u32;

        for range in ranges {
            for date in range.days() {
                if !calendar.is_working_day(date) {
                    continue;
                }
                if policy.exclude_holidays && holidays.is_holiday(date) {
                    excluded_holidays += 1;
                } else {
                    workdays += 1;
                }
            }
        }

        let mut bridge_days = 0u32;
        if policy.weekend_bridging && ranges.len() >= 2 {
            let mut sorted: Vec<&DateRange> = ranges.iter().collect();
            sorted.sort_by_key(|range| range.start);
            for pair in sorted.windows(2) {
                bridge_days += Self::bridged_gap(pair[0], pair[1], calendar, holidays, policy);
            }
        }

        DaysCalculation::from_parts(workdays, bridge_days, excluded_holidays)
    }

    /// Length of the gap strictly between two adjacent ranges, if the whole
    /// gap consists of days the employee would not have worked anyway. A
    /// single chargeable working day in the gap disables bridging for it.
    fn bridged_gap(
        earlier: &DateRange,
        later: &DateRange,
        calendar: &WorkweekCalendar,
        holidays: &HolidayRegistry,
        policy: LeavePolicy,
    ) -> u32 {
        let mut length = 0u32;
        let mut date = earlier.end + Duration::days(1);
        while date < later.start {
            let chargeable = calendar.is_working_day(date)
                && !(policy.exclude_holidays && holidays.is_holiday(date));
            if chargeable {
                return 0;
            }
            length += 1;
            date = date + Duration::days(1);
        }
        length
    }
}
