use crate::model::{
    attendance::{Attendance, AttendanceStatus, NewAttendance},
    employee::{Employee, EmployeeAttendanceCounts, NewEmployee},
    report::{
        AttendanceDetail, AttendanceReport, DailyStatus, DashboardSummary, EmployeeReportSummary,
        ReportFilters, ReportSummary,
    },
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracking API",
        version = "1.0.0",
        description = r#"
## Employee Attendance Tracking

Stores employees and their daily attendance, one record per employee per day,
and reports on it.

### Key Features
- **Employees**: create, list and delete employees
- **Attendance**: mark an employee `PRESENT` or `ABSENT` for a day, list an employee's days
- **Dashboard**: headline totals and the current month's present/absent counts
- **HR report**: per-employee summaries filtered by name/code, month and year

### Errors
Every error is returned as `{"error": "<message>"}`.
"#,
    ),
    paths(
        crate::api::employee::list_employees,
        crate::api::employee::create_employee,
        crate::api::employee::delete_employee,
        crate::api::employee::employee_present_days,

        crate::api::attendance::create_attendance,
        crate::api::attendance::list_employee_attendance,

        crate::api::dashboard::dashboard_summary,
        crate::api::report::attendance_report
    ),
    components(
        schemas(
            Employee,
            NewEmployee,
            EmployeeAttendanceCounts,
            Attendance,
            AttendanceStatus,
            NewAttendance,
            DashboardSummary,
            AttendanceReport,
            ReportFilters,
            ReportSummary,
            EmployeeReportSummary,
            DailyStatus,
            AttendanceDetail
        )
    ),
    tags(
        (name = "Employee", description = "Employee directory APIs"),
        (name = "Attendance", description = "Attendance register APIs"),
        (name = "Reports", description = "Dashboard and HR reporting APIs"),
    )
)]
pub struct ApiDoc;
