//! State machine driving a leave request from Draft to resolution.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calendar::{HolidayRegistry, WorkweekCalendar};
use crate::core::balance_ledger::BalanceLedger;
use crate::core::services::CalculationService;
use crate::domain::employee::{Employee, Role};
use crate::domain::request::{DateRange, DaysCalculation, LeaveRequest, RequestStatus};
use crate::errors::LeaveError;
use crate::storage::{EmployeeStore, HolidayStore, LeaveRequestStore, SettingsStore};

enum Resolution {
    Approve,
    Reject,
}

/// Coordinates stores, calculator, and ledger for every request transition.
///
/// Draft requests belong to their employee; once submitted they are frozen
/// and only a manager or admin may resolve them. Approve and reject are a
/// compare-and-swap on the status under a per-request lock, so a concurrent
/// second resolution observes `StaleState` instead of double-charging.
pub struct RequestLifecycle {
    employees: Arc<dyn EmployeeStore>,
    requests: Arc<dyn LeaveRequestStore>,
    holidays: Arc<dyn HolidayStore>,
    settings: Arc<dyn SettingsStore>,
    ledger: BalanceLedger,
    locks: Mutex<HashMap<Uuid, Arc<Mutex<()>>>>,
}

impl RequestLifecycle {
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        requests: Arc<dyn LeaveRequestStore>,
        holidays: Arc<dyn HolidayStore>,
        settings: Arc<dyn SettingsStore>,
    ) -> Self {
        let ledger = BalanceLedger::new(Arc::clone(&employees));
        Self {
            employees,
            requests,
            holidays,
            settings,
            ledger,
            locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn ledger(&self) -> &BalanceLedger {
        &self.ledger
    }

    /// Submits a Draft request: validates the ranges, freezes the day
    /// calculation, and reserves the deduction. All-or-nothing: a failure at
    /// any step leaves the ledger and the request untouched.
    pub fn submit(&self, request_id: Uuid, actor_id: Uuid) -> Result<LeaveRequest, LeaveError> {
        let request_lock = self.request_lock(request_id);
        let _held = request_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut request = self.requests.get(request_id)?;
        Self::expect_status(&request, RequestStatus::Draft)?;
        if request.employee_id != actor_id {
            return Err(LeaveError::Unauthorized(
                "only the owning employee may submit a request".into(),
            ));
        }
        DateRange::validate_sequence(&request.ranges)?;

        let employee = self.employees.get(request.employee_id)?;
        let calculation = self.calculate(&request.ranges, &employee, &request.leave_type)?;
        self.ledger
            .reserve(request.employee_id, &request.leave_type, calculation.total_deducted)?;

        request.days_calculation = Some(calculation);
        request.status = RequestStatus::Pending;
        request.submitted_at = Some(Utc::now());
        request.touch();
        if let Err(err) = self.requests.save(request.clone()) {
            // Roll the reservation back so the failed submit charges nothing.
            if let Err(release_err) = self.ledger.release(
                request.employee_id,
                &request.leave_type,
                calculation.total_deducted,
            ) {
                warn!(%release_err, request = %request.id, "failed to roll back reservation");
            }
            return Err(err);
        }

        info!(
            request = %request.id,
            employee = %request.employee_id,
            days = calculation.total_deducted,
            "leave request submitted"
        );
        Ok(request)
    }

    /// Replaces the ranges and reason of a Draft request and refreshes its
    /// calculation preview. The preview is advisory; submission recomputes
    /// and freezes the final figure.
    pub fn edit(
        &self,
        request_id: Uuid,
        actor_id: Uuid,
        new_ranges: Vec<DateRange>,
        new_reason: Option<String>,
    ) -> Result<LeaveRequest, LeaveError> {
        let request_lock = self.request_lock(request_id);
        let _held = request_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut request = self.requests.get(request_id)?;
        Self::expect_status(&request, RequestStatus::Draft)?;
        if request.employee_id != actor_id {
            return Err(LeaveError::Unauthorized(
                "only the owning employee may edit a request".into(),
            ));
        }
        DateRange::validate_sequence(&new_ranges)?;

        let employee = self.employees.get(request.employee_id)?;
        let preview = self.calculate(&new_ranges, &employee, &request.leave_type)?;
        request.ranges = new_ranges;
        request.reason = new_reason;
        request.days_calculation = Some(preview);
        request.touch();
        self.requests.save(request.clone())?;

        debug!(request = %request.id, days = preview.total_deducted, "draft request edited");
        Ok(request)
    }

    /// Approves a Pending request, committing its reservation.
    pub fn approve(
        &self,
        request_id: Uuid,
        actor_id: Uuid,
        comment: Option<String>,
    ) -> Result<LeaveRequest, LeaveError> {
        self.resolve(request_id, actor_id, comment, Resolution::Approve)
    }

    /// Rejects a Pending request, releasing its reservation.
    pub fn reject(
        &self,
        request_id: Uuid,
        actor_id: Uuid,
        comment: Option<String>,
    ) -> Result<LeaveRequest, LeaveError> {
        self.resolve(request_id, actor_id, comment, Resolution::Reject)
    }

    fn resolve(
        &self,
        request_id: Uuid,
        actor_id: Uuid,
        comment: Option<String>,
        resolution: Resolution,
    ) -> Result<LeaveRequest, LeaveError> {
        let request_lock = self.request_lock(request_id);
        let _held = request_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut request = self.requests.get(request_id)?;
        Self::expect_status(&request, RequestStatus::Pending)?;
        let employee = self.employees.get(request.employee_id)?;
        self.authorize_resolver(&employee, actor_id)?;
        let calculation = request.days_calculation.ok_or_else(|| {
            LeaveError::InvariantViolation(format!(
                "pending request {} has no frozen calculation",
                request.id
            ))
        })?;

        match resolution {
            Resolution::Approve => {
                self.ledger.commit(
                    request.employee_id,
                    &request.leave_type,
                    calculation.total_deducted,
                )?;
                request.status = RequestStatus::Approved;
            }
            Resolution::Reject => {
                self.ledger.release(
                    request.employee_id,
                    &request.leave_type,
                    calculation.total_deducted,
                )?;
                request.status = RequestStatus::Rejected;
            }
        }
        request.approver_id = Some(actor_id);
        request.approved_at = Some(Utc::now());
        request.manager_comments = comment;
        request.touch();
        self.requests.save(request.clone())?;

        info!(
            request = %request.id,
            status = ?request.status,
            approver = %actor_id,
            "leave request resolved"
        );
        Ok(request)
    }

    fn calculate(
        &self,
        ranges: &[DateRange],
        employee: &Employee,
        leave_type: &str,
    ) -> Result<DaysCalculation, LeaveError> {
        let settings = self.settings.get()?;
        if settings.leave_type(leave_type).is_none() || employee.balance(leave_type).is_none() {
            return Err(LeaveError::UnknownLeaveType(leave_type.to_string()));
        }
        let calendar = WorkweekCalendar::new(settings.workweek)?;
        let registry = HolidayRegistry::from_holidays(self.holidays.list()?)?;
        Ok(CalculationService::compute(
            ranges,
            &calendar,
            &registry,
            settings.policy(),
        ))
    }

    /// Admins may resolve anything; managers only their direct reports.
    fn authorize_resolver(&self, employee: &Employee, actor_id: Uuid) -> Result<(), LeaveError> {
        let actor = self.employees.get(actor_id)?;
        match actor.role {
            Role::Admin => Ok(()),
            Role::Manager if employee.manager_id == Some(actor.id) => Ok(()),
            _ => Err(LeaveError::Unauthorized(format!(
                "{} may not resolve requests for {}",
                actor.name, employee.name
            ))),
        }
    }

    fn expect_status(request: &LeaveRequest, expected: RequestStatus) -> Result<(), LeaveError> {
        if request.status != expected {
            return Err(LeaveError::StaleState {
                expected,
                actual: request.status,
            });
        }
        Ok(())
    }

    fn request_lock(&self, request_id: Uuid) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(request_id).or_default().clone()
    }
}
