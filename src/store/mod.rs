//! Persistence seam between the HTTP handlers and the database.
//!
//! Handlers only see [`AttendanceStore`]; the MySQL implementation backs
//! production and the in-memory one backs local runs and tests. Both enforce
//! one attendance record per employee and date, and both remove an
//! employee's attendance when the employee is deleted.

use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::Display;

use crate::model::{
    attendance::{Attendance, AttendanceWithEmployee, NewAttendance},
    employee::{Employee, EmployeeAttendanceCounts, NewEmployee},
};

pub mod memory;
pub mod mysql;

pub use memory::MemoryStore;
pub use mysql::MySqlStore;

#[derive(Debug, Display)]
pub enum StoreError {
    #[display(fmt = "attendance already recorded for this employee and date")]
    DuplicateAttendance,

    #[display(fmt = "employee code already in use")]
    DuplicateEmployeeCode,

    #[display(fmt = "employee {} does not exist", _0)]
    EmployeeNotFound(u64),

    #[display(fmt = "corrupt row: {}", _0)]
    CorruptRow(String),

    #[display(fmt = "database error: {}", _0)]
    Database(sqlx::Error),
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err)
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Half-open date interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// Narrows the joined attendance scan used by the HR report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceFilter {
    /// Case-insensitive substring of the employee's full name or code.
    pub employee_name: Option<String>,
    pub period: Option<DateRange>,
}

/// Raw tallies behind the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, sqlx::FromRow)]
pub struct DashboardCounts {
    pub total_employees: i64,
    pub total_records: i64,
    pub total_present: i64,
    pub total_absent: i64,
    pub period_present: i64,
    pub period_absent: i64,
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>>;

    async fn employee_exists(&self, id: u64) -> StoreResult<bool>;

    async fn create_employee(&self, input: NewEmployee) -> StoreResult<Employee>;

    /// Returns `false` when no employee had that id.
    async fn delete_employee(&self, id: u64) -> StoreResult<bool>;

    /// Fails with [`StoreError::DuplicateAttendance`] when the employee already
    /// has a record for that date.
    async fn create_attendance(&self, input: NewAttendance) -> StoreResult<Attendance>;

    async fn list_attendance(
        &self,
        employee_id: u64,
        date: Option<NaiveDate>,
    ) -> StoreResult<Vec<Attendance>>;

    /// One entry per employee, zero counts included, ordered by employee id.
    async fn employee_attendance_counts(&self) -> StoreResult<Vec<EmployeeAttendanceCounts>>;

    /// Whole-table tallies plus present/absent counts inside `period`.
    async fn dashboard_counts(&self, period: DateRange) -> StoreResult<DashboardCounts>;

    /// Attendance joined with employees, ascending record id.
    async fn attendance_with_employees(
        &self,
        filter: &AttendanceFilter,
    ) -> StoreResult<Vec<AttendanceWithEmployee>>;
}
