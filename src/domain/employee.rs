use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Identifiable, NamedEntity};
use crate::errors::LeaveError;

/// Per-leave-type day counters. `used + pending` may never exceed `total`;
/// a violation is reported, never clamped.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LeaveBalance {
    pub total: u32,
    pub used: u32,
    pub pending: u32,
}

impl LeaveBalance {
    pub fn with_total(total: u32) -> Self {
        Self {
            total,
            used: 0,
            pending: 0,
        }
    }

    /// Days still open for new reservations.
    pub fn available(&self) -> u32 {
        self.total.saturating_sub(self.used + self.pending)
    }

    pub fn check(&self) -> Result<(), LeaveError> {
        if self.used + self.pending > self.total {
            return Err(LeaveError::InvariantViolation(format!(
                "used {} + pending {} exceeds total {}",
                self.used, self.pending, self.total
            )));
        }
        Ok(())
    }
}

/// Enumerates the supported actor roles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Employee,
    Manager,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub department: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<Uuid>,
    pub role: Role,
    #[serde(default)]
    pub balances: HashMap<String, LeaveBalance>,
}

impl Employee {
    pub fn new(name: impl Into<String>, department: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            department: department.into(),
            manager_id: None,
            role,
            balances: HashMap::new(),
        }
    }

    /// Links the employee to their direct manager.
    pub fn with_manager(mut self, manager_id: Uuid) -> Self {
        self.manager_id = Some(manager_id);
        self
    }

    pub fn with_balance(mut self, leave_type: impl Into<String>, balance: LeaveBalance) -> Self {
        self.balances.insert(leave_type.into(), balance);
        self
    }

    pub fn balance(&self, leave_type: &str) -> Option<&LeaveBalance> {
        self.balances.get(leave_type)
    }

    pub fn balance_mut(&mut self, leave_type: &str) -> Option<&mut LeaveBalance> {
        self.balances.get_mut(leave_type)
    }
}

impl Identifiable for Employee {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Employee {
    fn name(&self) -> &str {
        &self.name
    }
}
