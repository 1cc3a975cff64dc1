use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};
use utoipa::ToSchema;

use crate::model::employee::Employee;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr, ToSchema,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee": 1,
        "date": "2024-01-05",
        "status": "PRESENT"
    })
)]
pub struct Attendance {
    pub id: u64,
    /// Internal id of the owning employee.
    #[serde(rename = "employee")]
    pub employee_id: u64,
    #[schema(value_type = String, format = "date")]
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewAttendance {
    #[serde(rename = "employee")]
    #[schema(example = 1)]
    pub employee_id: u64,
    #[schema(example = "2024-01-05", value_type = String, format = "date")]
    pub date: NaiveDate,
    #[schema(example = "PRESENT")]
    pub status: AttendanceStatus,
}

/// An attendance record loaded together with its employee.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceWithEmployee {
    pub attendance: Attendance,
    pub employee: Employee,
}
