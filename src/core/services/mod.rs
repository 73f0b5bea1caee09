pub mod calculation_service;
pub mod summary_service;

pub use calculation_service::CalculationService;
pub use summary_service::{SummaryService, TeamLeaveEntry, TeamLeaveSummary};

use crate::errors::LeaveError;

pub type ServiceResult<T> = Result<T, LeaveError>;
