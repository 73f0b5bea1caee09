//! Read-only aggregation of a team's approved leave.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::services::ServiceResult;
use crate::domain::request::{DateRange, RequestStatus};
use crate::storage::{EmployeeStore, LeaveRequestStore};

/// One approved request as it appears on a team overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamLeaveEntry {
    pub request_id: Uuid,
    pub employee_id: Uuid,
    pub employee_name: String,
    pub department: String,
    pub leave_type: String,
    pub ranges: Vec<DateRange>,
    pub days_deducted: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamLeaveSummary {
    pub manager_id: Uuid,
    pub entries: Vec<TeamLeaveEntry>,
    pub total_requests: usize,
    pub total_days: u32,
    pub departments: usize,
}

/// Produces summaries of approved leave across a manager's direct reports.
pub struct SummaryService;

impl SummaryService {
    pub fn team_leave(
        employees: &dyn EmployeeStore,
        requests: &dyn LeaveRequestStore,
        manager_id: Uuid,
    ) -> ServiceResult<TeamLeaveSummary> {
        let mut entries = Vec::new();
        for member in employees.list_reports(manager_id)? {
            for request in requests.list_by_employee(member.id)? {
                if request.status != RequestStatus::Approved {
                    continue;
                }
                let days_deducted = request
                    .days_calculation
                    .map(|calculation| calculation.total_deducted)
                    .unwrap_or(0);
                entries.push(TeamLeaveEntry {
                    request_id: request.id,
                    employee_id: member.id,
                    employee_name: member.name.clone(),
                    department: member.department.clone(),
                    leave_type: request.leave_type.clone(),
                    ranges: request.ranges.clone(),
                    days_deducted,
                });
            }
        }

        let total_days = entries.iter().map(|entry| entry.days_deducted).sum();
        let departments = entries
            .iter()
            .map(|entry| entry.department.as_str())
            .collect::<BTreeSet<_>>()
            .len();
        Ok(TeamLeaveSummary {
            manager_id,
            total_requests: entries.len(),
            total_days,
            departments,
            entries,
        })
    }
}
