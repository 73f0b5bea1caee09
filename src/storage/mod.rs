pub mod memory;

use uuid::Uuid;

use crate::config::Settings;
use crate::domain::employee::Employee;
use crate::domain::holiday::Holiday;
use crate::domain::request::LeaveRequest;
use crate::errors::LeaveError;

pub type Result<T> = std::result::Result<T, LeaveError>;

/// Abstraction over the employee directory.
pub trait EmployeeStore: Send + Sync {
    fn get(&self, id: Uuid) -> Result<Employee>;
    fn save(&self, employee: Employee) -> Result<()>;
    /// Everyone reporting directly to `manager_id`.
    fn list_reports(&self, manager_id: Uuid) -> Result<Vec<Employee>>;
}

/// Abstraction over leave request persistence.
pub trait LeaveRequestStore: Send + Sync {
    fn get(&self, id: Uuid) -> Result<LeaveRequest>;
    fn save(&self, request: LeaveRequest) -> Result<()>;
    fn list_by_employee(&self, employee_id: Uuid) -> Result<Vec<LeaveRequest>>;
    fn list_pending_for_manager(&self, manager_id: Uuid) -> Result<Vec<LeaveRequest>>;
}

/// Read access to the deployment's holiday calendar.
pub trait HolidayStore: Send + Sync {
    fn list(&self) -> Result<Vec<Holiday>>;
}

/// Read access to the deployment's policy settings.
pub trait SettingsStore: Send + Sync {
    fn get(&self) -> Result<Settings>;
}

pub use memory::MemoryStore;
