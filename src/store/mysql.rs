use std::str::FromStr;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use tracing::debug;

use super::{
    AttendanceFilter, AttendanceStore, DashboardCounts, DateRange, StoreError, StoreResult,
};
use crate::model::{
    attendance::{Attendance, AttendanceStatus, AttendanceWithEmployee, NewAttendance},
    employee::{Employee, EmployeeAttendanceCounts, NewEmployee},
};

pub struct MySqlStore {
    pool: MySqlPool,
}

impl MySqlStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AttendanceRow {
    id: u64,
    employee_id: u64,
    date: NaiveDate,
    status: String,
}

#[derive(sqlx::FromRow)]
struct JoinedRow {
    attendance_id: u64,
    date: NaiveDate,
    status: String,
    employee_id: u64,
    employee_code: String,
    full_name: String,
    email: String,
    department: String,
}

fn parse_status(raw: &str) -> StoreResult<AttendanceStatus> {
    AttendanceStatus::from_str(raw)
        .map_err(|_| StoreError::CorruptRow(format!("unknown attendance status {raw:?}")))
}

impl TryFrom<AttendanceRow> for Attendance {
    type Error = StoreError;

    fn try_from(row: AttendanceRow) -> StoreResult<Self> {
        Ok(Attendance {
            id: row.id,
            employee_id: row.employee_id,
            date: row.date,
            status: parse_status(&row.status)?,
        })
    }
}

impl TryFrom<JoinedRow> for AttendanceWithEmployee {
    type Error = StoreError;

    fn try_from(row: JoinedRow) -> StoreResult<Self> {
        Ok(AttendanceWithEmployee {
            attendance: Attendance {
                id: row.attendance_id,
                employee_id: row.employee_id,
                date: row.date,
                status: parse_status(&row.status)?,
            },
            employee: Employee {
                id: row.employee_id,
                employee_code: row.employee_code,
                full_name: row.full_name,
                email: row.email,
                department: row.department,
            },
        })
    }
}

/// Escapes `LIKE` metacharacters so user input only ever matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation())
}

#[async_trait]
impl AttendanceStore for MySqlStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(
            r#"
            SELECT id, employee_code, full_name, email, department
            FROM employees
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    async fn employee_exists(&self, id: u64) -> StoreResult<bool> {
        let found = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM employees WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(found > 0)
    }

    async fn create_employee(&self, input: NewEmployee) -> StoreResult<Employee> {
        let result = sqlx::query(
            r#"
            INSERT INTO employees (employee_code, full_name, email, department)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&input.employee_code)
        .bind(&input.full_name)
        .bind(&input.email)
        .bind(&input.department)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateEmployeeCode
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(Employee {
            id: result.last_insert_id(),
            employee_code: input.employee_code,
            full_name: input.full_name,
            email: input.email,
            department: input.department,
        })
    }

    async fn delete_employee(&self, id: u64) -> StoreResult<bool> {
        // attendance rows go with it through ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn create_attendance(&self, input: NewAttendance) -> StoreResult<Attendance> {
        let result = sqlx::query(
            r#"
            INSERT INTO attendance (employee_id, date, status)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(input.employee_id)
        .bind(input.date)
        .bind(input.status.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                StoreError::DuplicateAttendance
            } else if is_foreign_key_violation(&e) {
                StoreError::EmployeeNotFound(input.employee_id)
            } else {
                StoreError::Database(e)
            }
        })?;

        Ok(Attendance {
            id: result.last_insert_id(),
            employee_id: input.employee_id,
            date: input.date,
            status: input.status,
        })
    }

    async fn list_attendance(
        &self,
        employee_id: u64,
        date: Option<NaiveDate>,
    ) -> StoreResult<Vec<Attendance>> {
        let mut query = QueryBuilder::<MySql>::new(
            "SELECT id, employee_id, date, status FROM attendance WHERE employee_id = ",
        );
        query.push_bind(employee_id);
        if let Some(date) = date {
            query.push(" AND date = ").push_bind(date);
        }
        query.push(" ORDER BY id");

        query
            .build_query_as::<AttendanceRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Attendance::try_from)
            .collect()
    }

    async fn employee_attendance_counts(&self) -> StoreResult<Vec<EmployeeAttendanceCounts>> {
        let counts = sqlx::query_as::<_, EmployeeAttendanceCounts>(
            r#"
            SELECT
                e.id,
                e.employee_code,
                e.full_name,
                e.email,
                e.department,
                COUNT(CASE WHEN a.status = 'PRESENT' THEN 1 END) AS total_present_days,
                COUNT(CASE WHEN a.status = 'ABSENT' THEN 1 END) AS total_absent_days
            FROM employees e
            LEFT JOIN attendance a ON a.employee_id = e.id
            GROUP BY e.id, e.employee_code, e.full_name, e.email, e.department
            ORDER BY e.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn dashboard_counts(&self, period: DateRange) -> StoreResult<DashboardCounts> {
        let counts = sqlx::query_as::<_, DashboardCounts>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM employees) AS total_employees,
                COUNT(*) AS total_records,
                COUNT(CASE WHEN status = 'PRESENT' THEN 1 END) AS total_present,
                COUNT(CASE WHEN status = 'ABSENT' THEN 1 END) AS total_absent,
                COUNT(CASE WHEN status = 'PRESENT' AND date >= ? AND date < ? THEN 1 END)
                    AS period_present,
                COUNT(CASE WHEN status = 'ABSENT' AND date >= ? AND date < ? THEN 1 END)
                    AS period_absent
            FROM attendance
            "#,
        )
        .bind(period.start)
        .bind(period.end)
        .bind(period.start)
        .bind(period.end)
        .fetch_one(&self.pool)
        .await?;

        Ok(counts)
    }

    async fn attendance_with_employees(
        &self,
        filter: &AttendanceFilter,
    ) -> StoreResult<Vec<AttendanceWithEmployee>> {
        let mut query = QueryBuilder::<MySql>::new(
            r#"
            SELECT
                a.id AS attendance_id,
                a.date,
                a.status,
                e.id AS employee_id,
                e.employee_code,
                e.full_name,
                e.email,
                e.department
            FROM attendance a
            INNER JOIN employees e ON e.id = a.employee_id
            WHERE 1 = 1
            "#,
        );

        if let Some(name) = &filter.employee_name {
            let pattern = format!("%{}%", escape_like(&name.to_lowercase()));
            query
                .push(" AND (LOWER(e.full_name) LIKE ")
                .push_bind(pattern.clone())
                .push(" OR LOWER(e.employee_code) LIKE ")
                .push_bind(pattern)
                .push(")");
        }

        if let Some(period) = filter.period {
            query
                .push(" AND a.date >= ")
                .push_bind(period.start)
                .push(" AND a.date < ")
                .push_bind(period.end);
        }

        query.push(" ORDER BY a.id");
        debug!(sql = %query.sql(), ?filter, "Fetching attendance for report");

        query
            .build_query_as::<JoinedRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(AttendanceWithEmployee::try_from)
            .collect()
    }
}
