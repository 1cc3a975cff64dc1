use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{debug, warn};
use utoipa::IntoParams;

use crate::{
    clock::Clock,
    error::ApiError,
    model::report::AttendanceReport,
    service::hr_report::{ReportParams, build_report},
    store::AttendanceStore,
};

/// Raw query string; validated by [`ReportParams::parse`].
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// Case-insensitive substring of the employee's name or code.
    pub employee_name: Option<String>,
    /// 1-12.
    pub month: Option<String>,
    /// Defaults to the current year.
    pub year: Option<String>,
}

/// HR attendance report
#[utoipa::path(
    get,
    path = "/api/hr/attendance-report",
    params(ReportQuery),
    responses(
        (status = 200, description = "Attendance grouped per employee", body = AttendanceReport),
        (status = 400, description = "Invalid month or year", body = Object, example = json!({
            "error": "Month must be between 1 and 12"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Reports"
)]
pub async fn attendance_report(
    store: web::Data<dyn AttendanceStore>,
    clock: web::Data<dyn Clock>,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, ApiError> {
    let params = ReportParams::parse(
        query.employee_name.as_deref(),
        query.month.as_deref(),
        query.year.as_deref(),
        clock.today(),
    )
    .inspect_err(|e| warn!(error = %e, ?query, "Rejected report query"))?;

    debug!(?params, "Building attendance report");
    let rows = store.attendance_with_employees(&params.filter()).await?;

    Ok(HttpResponse::Ok().json(build_report(&params, rows)))
}
