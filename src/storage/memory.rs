//! In-memory reference backend implementing every store trait.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use crate::config::Settings;
use crate::domain::employee::Employee;
use crate::domain::holiday::Holiday;
use crate::domain::request::{LeaveRequest, RequestStatus};
use crate::errors::LeaveError;

use super::{EmployeeStore, HolidayStore, LeaveRequestStore, Result, SettingsStore};

/// Lock-protected hash maps standing in for a real database. Suitable for
/// tests, demos, and single-process deployments.
#[derive(Default)]
pub struct MemoryStore {
    employees: RwLock<HashMap<Uuid, Employee>>,
    requests: RwLock<HashMap<Uuid, LeaveRequest>>,
    holidays: RwLock<Vec<Holiday>>,
    settings: RwLock<Settings>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_employee(&self, employee: Employee) -> Uuid {
        let id = employee.id;
        write_guard(&self.employees).insert(id, employee);
        id
    }

    pub fn insert_request(&self, request: LeaveRequest) -> Uuid {
        let id = request.id;
        write_guard(&self.requests).insert(id, request);
        id
    }

    pub fn set_holidays(&self, holidays: Vec<Holiday>) {
        *write_guard(&self.holidays) = holidays;
    }

    pub fn add_holiday(&self, holiday: Holiday) {
        write_guard(&self.holidays).push(holiday);
    }

    pub fn set_settings(&self, settings: Settings) {
        *write_guard(&self.settings) = settings;
    }
}

impl EmployeeStore for MemoryStore {
    fn get(&self, id: Uuid) -> Result<Employee> {
        read_guard(&self.employees)
            .get(&id)
            .cloned()
            .ok_or(LeaveError::UnknownEmployee(id))
    }

    fn save(&self, employee: Employee) -> Result<()> {
        write_guard(&self.employees).insert(employee.id, employee);
        Ok(())
    }

    fn list_reports(&self, manager_id: Uuid) -> Result<Vec<Employee>> {
        let mut reports: Vec<Employee> = read_guard(&self.employees)
            .values()
            .filter(|employee| employee.manager_id == Some(manager_id))
            .cloned()
            .collect();
        reports.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(reports)
    }
}

impl LeaveRequestStore for MemoryStore {
    fn get(&self, id: Uuid) -> Result<LeaveRequest> {
        read_guard(&self.requests)
            .get(&id)
            .cloned()
            .ok_or(LeaveError::UnknownRequest(id))
    }

    fn save(&self, request: LeaveRequest) -> Result<()> {
        write_guard(&self.requests).insert(request.id, request);
        Ok(())
    }

    fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<LeaveRequest>> {
        let mut requests: Vec<LeaveRequest> = read_guard(&self.requests)
            .values()
            .filter(|request| request.employee_id == employee_id)
            .cloned()
            .collect();
        requests.sort_by_key(|request| request.created_at);
        Ok(requests)
    }

    fn list_pending_for_manager(&self, manager_id: Uuid) -> Result<Vec<LeaveRequest>> {
        let employees = read_guard(&self.employees);
        let mut requests: Vec<LeaveRequest> = read_guard(&self.requests)
            .values()
            .filter(|request| request.status == RequestStatus::Pending)
            .filter(|request| {
                employees
                    .get(&request.employee_id)
                    .is_some_and(|employee| employee.manager_id == Some(manager_id))
            })
            .cloned()
            .collect();
        requests.sort_by_key(|request| request.submitted_at);
        Ok(requests)
    }
}

impl HolidayStore for MemoryStore {
    fn list(&self) -> Result<Vec<Holiday>> {
        Ok(read_guard(&self.holidays).clone())
    }
}

impl SettingsStore for MemoryStore {
    fn get(&self) -> Result<Settings> {
        Ok(read_guard(&self.settings).clone())
    }
}

fn read_guard<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write_guard<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
