use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "employee_id": "EMP-001",
        "full_name": "John Doe",
        "email": "john.doe@company.com",
        "department": "Engineering"
    })
)]
pub struct Employee {
    #[schema(example = 1)]
    pub id: u64,

    /// External employee code. Stored as `employee_code`, exposed as `employee_id`.
    #[serde(rename = "employee_id")]
    #[schema(example = "EMP-001")]
    pub employee_code: String,

    #[schema(example = "John Doe")]
    pub full_name: String,

    #[schema(example = "john.doe@company.com")]
    pub email: String,

    #[schema(example = "Engineering")]
    pub department: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct NewEmployee {
    #[serde(rename = "employee_id")]
    #[schema(example = "EMP-001", value_type = String)]
    pub employee_code: String,
    #[schema(example = "John Doe", value_type = String)]
    pub full_name: String,
    #[schema(example = "john@email.com", format = "email", value_type = String)]
    pub email: String,
    #[schema(example = "Engineering", value_type = String)]
    pub department: String,
}

impl NewEmployee {
    /// Returns the first problem with the payload, if any.
    pub fn validate(&self) -> Result<(), String> {
        if self.employee_code.trim().is_empty() {
            return Err("employee_id must not be blank".to_string());
        }
        if self.full_name.trim().is_empty() {
            return Err("full_name must not be blank".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err("Enter a valid email address.".to_string());
        }
        Ok(())
    }
}

/// An employee annotated with its present/absent tallies.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct EmployeeAttendanceCounts {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub employee: Employee,
    #[schema(example = 18)]
    pub total_present_days: i64,
    #[schema(example = 2)]
    pub total_absent_days: i64,
}
