use std::sync::Arc;

use hris_core::services::{AttendanceService, AuthService, EmployeeService};

/// Shared handler state. Services are stateless apart from their collaborators.
#[derive(Clone)]
pub struct AppState {
    pub employees: Arc<EmployeeService>,
    pub attendance: Arc<AttendanceService>,
    pub auth: Arc<AuthService>,
    pub service_name: String,
}
