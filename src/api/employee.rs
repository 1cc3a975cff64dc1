use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::{info, warn};
use utoipa::IntoParams;

use crate::{
    error::ApiError,
    model::employee::{Employee, EmployeeAttendanceCounts, NewEmployee},
    store::AttendanceStore,
};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EmployeeListQuery {
    /// Annotate each employee with present/absent totals.
    pub with_counts: Option<bool>,
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(EmployeeListQuery),
    responses(
        (status = 200, description = "All employees", body = [Employee]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn list_employees(
    store: web::Data<dyn AttendanceStore>,
    query: web::Query<EmployeeListQuery>,
) -> Result<HttpResponse, ApiError> {
    if query.with_counts.unwrap_or(false) {
        let counted = store.employee_attendance_counts().await?;
        return Ok(HttpResponse::Ok().json(counted));
    }

    let employees = store.list_employees().await?;
    Ok(HttpResponse::Ok().json(employees))
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = NewEmployee,
    responses(
        (status = 201, description = "Employee created", body = Employee),
        (status = 400, description = "Invalid payload or duplicate employee_id", body = Object, example = json!({
            "error": "Employee with this employee_id already exists."
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn create_employee(
    store: web::Data<dyn AttendanceStore>,
    payload: web::Json<NewEmployee>,
) -> Result<HttpResponse, ApiError> {
    let payload = payload.into_inner();

    if let Err(message) = payload.validate() {
        warn!(employee_code = %payload.employee_code, %message, "Rejected employee payload");
        return Err(ApiError::Validation(message));
    }

    let employee = store.create_employee(payload).await?;
    info!(id = employee.id, employee_code = %employee.employee_code, "Employee created");

    Ok(HttpResponse::Created().json(employee))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Internal employee id")
    ),
    responses(
        (status = 204, description = "Employee and their attendance deleted"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "error": "Employee not found"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn delete_employee(
    store: web::Data<dyn AttendanceStore>,
    path: web::Path<u64>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if !store.delete_employee(id).await? {
        return Err(ApiError::not_found("Employee not found"));
    }

    info!(id, "Employee deleted");
    Ok(HttpResponse::NoContent().finish())
}

/// Present/absent totals per employee
#[utoipa::path(
    get,
    path = "/api/employees/present-days",
    responses(
        (status = 200, description = "Every employee with their totals", body = [EmployeeAttendanceCounts]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
pub async fn employee_present_days(
    store: web::Data<dyn AttendanceStore>,
) -> Result<HttpResponse, ApiError> {
    let counted = store.employee_attendance_counts().await?;
    Ok(HttpResponse::Ok().json(counted))
}
