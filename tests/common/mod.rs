use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use leave_core::config::{Settings, SettingsManager};
use leave_core::core::RequestLifecycle;
use leave_core::domain::employee::{Employee, LeaveBalance, Role};
use leave_core::domain::holiday::{Holiday, HolidayCategory};
use leave_core::domain::request::{DateRange, LeaveRequest};
use leave_core::storage::MemoryStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;
use uuid::Uuid;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// An isolated in-memory deployment: default settings, one holiday on
/// 2024-07-04, an admin, a manager, and one report with annual and sick
/// balances.
pub struct TestEnv {
    pub store: Arc<MemoryStore>,
    pub lifecycle: RequestLifecycle,
    pub admin_id: Uuid,
    pub manager_id: Uuid,
    pub employee_id: Uuid,
}

pub fn setup_test_env() -> TestEnv {
    let store = Arc::new(MemoryStore::new());
    store.set_settings(Settings::default());
    store.set_holidays(vec![Holiday::new(
        date(2024, 7, 4),
        "Independence Day",
        HolidayCategory::Public,
    )]);

    let admin_id = store.insert_employee(Employee::new("Root", "Operations", Role::Admin));
    let manager_id = store.insert_employee(Employee::new("Dana", "Engineering", Role::Manager));
    let employee = Employee::new("Avery", "Engineering", Role::Employee)
        .with_manager(manager_id)
        .with_balance("annual", LeaveBalance::with_total(20))
        .with_balance("sick", LeaveBalance::with_total(10));
    let employee_id = store.insert_employee(employee);

    let lifecycle = RequestLifecycle::new(
        store.clone(),
        store.clone(),
        store.clone(),
        store.clone(),
    );
    TestEnv {
        store,
        lifecycle,
        admin_id,
        manager_id,
        employee_id,
    }
}

/// Creates a settings manager backed by a unique temporary directory.
pub fn temp_settings_manager() -> SettingsManager {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    SettingsManager::with_base_dir(base).expect("create settings manager for temp dir")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn range(start: NaiveDate, end: NaiveDate) -> DateRange {
    DateRange::new(start, end).unwrap()
}

/// Inserts a Draft annual-leave request for the env's employee.
pub fn draft_request(env: &TestEnv, ranges: Vec<DateRange>) -> Uuid {
    let request = LeaveRequest::new(env.employee_id, "annual")
        .with_ranges(ranges)
        .with_reason("Family time");
    env.store.insert_request(request)
}
