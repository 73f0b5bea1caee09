pub mod common;
pub mod employee;
pub mod holiday;
pub mod request;
pub mod workweek;

pub use common::{Identifiable, NamedEntity};
pub use employee::{Employee, LeaveBalance, Role};
pub use holiday::{Holiday, HolidayCategory};
pub use request::{DateRange, DaysCalculation, LeavePolicy, LeaveRequest, RequestStatus};
pub use workweek::WorkweekConfig;
