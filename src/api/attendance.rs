use actix_web::{HttpResponse, web};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    model::attendance::{Attendance, NewAttendance},
    store::AttendanceStore,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AttendanceListQuery {
    /// Exact day, `YYYY-MM-DD`.
    pub date: Option<String>,
}

/// Record attendance
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = NewAttendance,
    responses(
        (status = 201, description = "Attendance recorded", body = Attendance),
        (status = 400, description = "Duplicate record or unknown employee", body = Object, example = json!({
            "error": "Attendance for this employee on this date already exists."
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn create_attendance(
    store: web::Data<dyn AttendanceStore>,
    payload: web::Json<NewAttendance>,
) -> Result<HttpResponse, ApiError> {
    let record = store.create_attendance(payload.into_inner()).await?;

    info!(
        id = record.id,
        employee_id = record.employee_id,
        date = %record.date,
        status = %record.status,
        "Attendance recorded"
    );
    Ok(HttpResponse::Created().json(record))
}

/// Attendance of one employee
#[utoipa::path(
    get,
    path = "/api/attendance/employee/{employee_id}",
    params(
        ("employee_id", Path, description = "Internal employee id"),
        AttendanceListQuery
    ),
    responses(
        (status = 200, description = "Attendance records", body = [Attendance]),
        (status = 400, description = "Malformed date", body = Object, example = json!({
            "error": "Invalid date format, expected YYYY-MM-DD"
        })),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Attendance"
)]
pub async fn list_employee_attendance(
    store: web::Data<dyn AttendanceStore>,
    path: web::Path<u64>,
    query: web::Query<AttendanceListQuery>,
) -> Result<HttpResponse, ApiError> {
    let employee_id = path.into_inner();

    let date = match query.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        None => None,
        Some(raw) => Some(
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| ApiError::validation("Invalid date format, expected YYYY-MM-DD"))?,
        ),
    };

    if !store.employee_exists(employee_id).await? {
        return Err(ApiError::not_found("Employee not found"));
    }

    debug!(employee_id, ?date, "Listing attendance");
    let records = store.list_attendance(employee_id, date).await?;
    Ok(HttpResponse::Ok().json(records))
}
