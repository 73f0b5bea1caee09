mod common;

use common::{date, draft_request, range, setup_test_env};
use leave_core::calendar::{HolidayRegistry, WorkweekCalendar};
use leave_core::core::services::{CalculationService, SummaryService};
use leave_core::domain::holiday::{Holiday, HolidayCategory};
use leave_core::domain::request::{DateRange, LeavePolicy};
use leave_core::domain::workweek::WorkweekConfig;

#[test]
fn bridging_charges_an_enclosed_holiday_gap() {
    let calendar = WorkweekCalendar::new(WorkweekConfig::standard()).unwrap();
    let holidays = HolidayRegistry::from_holidays([Holiday::new(
        date(2024, 7, 4),
        "Independence Day",
        HolidayCategory::Public,
    )])
    .unwrap();
    let ranges = [
        range(date(2024, 7, 1), date(2024, 7, 3)),
        DateRange::single(date(2024, 7, 5)),
    ];

    let calc = CalculationService::compute(&ranges, &calendar, &holidays, LeavePolicy::default());
    assert_eq!(calc.workdays, 4);
    assert_eq!(calc.excluded_holidays, 0);
    assert_eq!(calc.bridge_days, 1);
    assert_eq!(calc.total_deducted, 5);
}

#[test]
fn no_bridging_across_an_uncharged_workday() {
    let calendar = WorkweekCalendar::new(WorkweekConfig::standard()).unwrap();
    let holidays = HolidayRegistry::from_holidays([Holiday::new(
        date(2024, 7, 4),
        "Independence Day",
        HolidayCategory::Public,
    )])
    .unwrap();
    let ranges = [
        range(date(2024, 7, 1), date(2024, 7, 3)),
        DateRange::single(date(2024, 7, 8)),
    ];

    let calc = CalculationService::compute(&ranges, &calendar, &holidays, LeavePolicy::default());
    assert_eq!(calc.workdays, 4);
    assert_eq!(calc.bridge_days, 0);
    assert_eq!(calc.total_deducted, 4);
}

#[test]
fn wrapped_workweek_is_honored_by_the_calculator() {
    // Sunday-to-Thursday deployment: Friday and Saturday are off, so a
    // Sun..Thu range charges five days with no weekend inside it.
    let calendar = WorkweekCalendar::new(WorkweekConfig::new(0, 4).unwrap()).unwrap();
    let ranges = [range(date(2024, 7, 7), date(2024, 7, 11))];

    let calc = CalculationService::compute(
        &ranges,
        &calendar,
        &HolidayRegistry::new(),
        LeavePolicy::default(),
    );
    assert_eq!(calc.workdays, 5);
    assert_eq!(calc.total_deducted, 5);
}

#[test]
fn ledger_invariant_holds_across_a_mixed_sequence() {
    let env = setup_test_env();
    let ledger = env.lifecycle.ledger();
    let id = env.employee_id;

    ledger.reserve(id, "annual", 5).unwrap();
    ledger.reserve(id, "annual", 3).unwrap();
    ledger.commit(id, "annual", 5).unwrap();
    ledger.release(id, "annual", 3).unwrap();
    ledger.adjust_total(id, "annual", 12).unwrap();
    ledger.reserve(id, "annual", 7).unwrap();
    ledger.commit(id, "annual", 7).unwrap();

    let balance = ledger.balance(id, "annual").unwrap();
    balance.check().expect("counters stay consistent");
    assert_eq!(balance.used, 12);
    assert_eq!(balance.pending, 0);
    assert_eq!(balance.available(), 0);
}

#[test]
fn team_summary_counts_only_approved_requests() {
    let env = setup_test_env();

    let approved_id = draft_request(&env, vec![range(date(2024, 7, 1), date(2024, 7, 3))]);
    env.lifecycle.submit(approved_id, env.employee_id).unwrap();
    env.lifecycle
        .approve(approved_id, env.manager_id, None)
        .unwrap();

    let rejected_id = draft_request(&env, vec![DateRange::single(date(2024, 7, 8))]);
    env.lifecycle.submit(rejected_id, env.employee_id).unwrap();
    env.lifecycle
        .reject(rejected_id, env.manager_id, None)
        .unwrap();

    let still_pending = draft_request(&env, vec![DateRange::single(date(2024, 7, 9))]);
    env.lifecycle
        .submit(still_pending, env.employee_id)
        .unwrap();

    let summary =
        SummaryService::team_leave(env.store.as_ref(), env.store.as_ref(), env.manager_id).unwrap();
    assert_eq!(summary.total_requests, 1);
    assert_eq!(summary.total_days, 3);
    assert_eq!(summary.departments, 1);
    assert_eq!(summary.entries[0].request_id, approved_id);
    assert_eq!(summary.entries[0].employee_name, "Avery");
}
