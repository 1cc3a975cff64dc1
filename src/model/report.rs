use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::model::{attendance::AttendanceStatus, employee::Employee};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "total_employees": 12,
        "total_attendance_records": 240,
        "total_present_days": 220,
        "total_absent_days": 20,
        "current_month_present": 18,
        "current_month_absent": 2,
        "attendance_rate_percentage": 91.67
    })
)]
pub struct DashboardSummary {
    pub total_employees: i64,
    pub total_attendance_records: i64,
    pub total_present_days: i64,
    pub total_absent_days: i64,
    pub current_month_present: i64,
    pub current_month_absent: i64,
    pub attendance_rate_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReportFilters {
    /// Search term, or `All`.
    #[schema(example = "All")]
    pub employee_name: String,
    /// Month number, or `All`.
    #[schema(example = "1")]
    pub month: String,
    #[schema(example = 2024)]
    pub year: i32,
    /// Only present when a month was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = 31)]
    pub total_working_days_in_month: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ReportSummary {
    pub total_employees_in_report: usize,
    pub total_attendance_records: usize,
    pub overall_present: u64,
    pub overall_absent: u64,
    pub overall_attendance_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DailyStatus {
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct EmployeeReportSummary {
    pub employee_info: Employee,
    pub total_present: u64,
    pub total_absent: u64,
    pub attendance_rate: f64,
    pub attendance_records: Vec<DailyStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AttendanceDetail {
    pub id: u64,
    pub employee_id: u64,
    pub employee_name: String,
    pub employee_code: String,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct AttendanceReport {
    pub filters_applied: ReportFilters,
    pub summary: ReportSummary,
    pub employee_summary: Vec<EmployeeReportSummary>,
    pub detailed_attendance: Vec<AttendanceDetail>,
}
