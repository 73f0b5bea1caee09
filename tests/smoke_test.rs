mod common;

use common::{date, draft_request, range, setup_test_env};
use leave_core::domain::request::RequestStatus;
use leave_core::init;

#[test]
fn submit_and_approve_smoke() {
    init();

    let env = setup_test_env();
    let request_id = draft_request(&env, vec![range(date(2024, 9, 2), date(2024, 9, 6))]);

    let submitted = env.lifecycle.submit(request_id, env.employee_id).unwrap();
    assert_eq!(submitted.status, RequestStatus::Pending);
    assert_eq!(submitted.days_calculation.unwrap().total_deducted, 5);

    let approved = env
        .lifecycle
        .approve(request_id, env.manager_id, Some("ok".into()))
        .unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);

    let balance = env
        .lifecycle
        .ledger()
        .balance(env.employee_id, "annual")
        .unwrap();
    assert_eq!(balance.used, 5);
    assert_eq!(balance.available(), 15);
}
