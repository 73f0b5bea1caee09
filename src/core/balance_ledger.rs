//! Reservation accounting over per-employee leave balances.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::warn;
use uuid::Uuid;

use crate::domain::employee::LeaveBalance;
use crate::errors::LeaveError;
use crate::storage::EmployeeStore;

type BalanceKey = (Uuid, String);

/// Applies reserve/commit/release/adjust operations to the employee store,
/// serialized per (employee, leave type) pair so concurrent submissions and
/// approvals never lose an update.
pub struct BalanceLedger {
    employees: Arc<dyn EmployeeStore>,
    locks: Mutex<HashMap<BalanceKey, Arc<Mutex<()>>>>,
}

impl BalanceLedger {
    pub fn new(employees: Arc<dyn EmployeeStore>) -> Self {
        Self {
            employees,
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Sets `days` aside as pending. Fails with `InsufficientBalance` when the
    /// balance cannot absorb the reservation, leaving it untouched.
    pub fn reserve(&self, employee_id: Uuid, leave_type: &str, days: u32) -> Result<(), LeaveError> {
        self.with_balance(employee_id, leave_type, false, |balance| {
            let available = balance.available();
            if available < days {
                return Err(LeaveError::InsufficientBalance {
                    requested: days,
                    available,
                });
            }
            balance.pending += days;
            Ok(())
        })
    }

    /// Converts a reservation into finalized usage.
    pub fn commit(&self, employee_id: Uuid, leave_type: &str, days: u32) -> Result<(), LeaveError> {
        self.with_balance(employee_id, leave_type, false, |balance| {
            if balance.pending < days {
                return Err(LeaveError::InvariantViolation(format!(
                    "commit of {days} days exceeds pending {}",
                    balance.pending
                )));
            }
            balance.used += days;
            balance.pending -= days;
            Ok(())
        })
    }

    /// Returns a reservation to the available pool.
    pub fn release(&self, employee_id: Uuid, leave_type: &str, days: u32) -> Result<(), LeaveError> {
        self.with_balance(employee_id, leave_type, false, |balance| {
            if balance.pending < days {
                return Err(LeaveError::InvariantViolation(format!(
                    "release of {days} days exceeds pending {}",
                    balance.pending
                )));
            }
            balance.pending -= days;
            Ok(())
        })
    }

    /// Administrative change to the yearly allowance. Provisions the balance
    /// when the employee has none for `leave_type` yet; never drops the total
    /// below what is already used or reserved.
    pub fn adjust_total(
        &self,
        employee_id: Uuid,
        leave_type: &str,
        new_total: u32,
    ) -> Result<(), LeaveError> {
        self.with_balance(employee_id, leave_type, true, |balance| {
            let committed = balance.used + balance.pending;
            if new_total < committed {
                return Err(LeaveError::InvalidAdjustment {
                    new_total,
                    committed,
                });
            }
            balance.total = new_total;
            Ok(())
        })
    }

    /// Snapshot of the current counters for one (employee, leave type) pair.
    pub fn balance(&self, employee_id: Uuid, leave_type: &str) -> Result<LeaveBalance, LeaveError> {
        let employee = self.employees.get(employee_id)?;
        employee
            .balance(leave_type)
            .copied()
            .ok_or_else(|| LeaveError::UnknownLeaveType(leave_type.to_string()))
    }

    fn with_balance<F>(
        &self,
        employee_id: Uuid,
        leave_type: &str,
        provision_missing: bool,
        op: F,
    ) -> Result<(), LeaveError>
    where
        F: FnOnce(&mut LeaveBalance) -> Result<(), LeaveError>,
    {
        let key_lock = self.key_lock(employee_id, leave_type);
        let _held = key_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut employee = self.employees.get(employee_id)?;
        let balance = if provision_missing {
            employee
                .balances
                .entry(leave_type.to_string())
                .or_default()
        } else {
            employee
                .balance_mut(leave_type)
                .ok_or_else(|| LeaveError::UnknownLeaveType(leave_type.to_string()))?
        };
        op(&mut *balance)
            .and_then(|()| balance.check())
            .map_err(|err| {
                if matches!(err, LeaveError::InvariantViolation(_)) {
                    warn!(%employee_id, leave_type, %err, "ledger invariant violated");
                }
                err
            })?;
        self.employees.save(employee)
    }

    fn key_lock(&self, employee_id: Uuid, leave_type: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks
            .entry((employee_id, leave_type.to_string()))
            .or_default()
            .clone()
    }
}
