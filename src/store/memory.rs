use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::{
    AttendanceFilter, AttendanceStore, DashboardCounts, DateRange, StoreError, StoreResult,
};
use crate::model::{
    attendance::{Attendance, AttendanceStatus, AttendanceWithEmployee, NewAttendance},
    employee::{Employee, EmployeeAttendanceCounts, NewEmployee},
};

/// Process-local store with the same constraints as the SQL schema.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    employees: Vec<Employee>,
    attendance: Vec<Attendance>,
    last_employee_id: u64,
    last_attendance_id: u64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn name_matches(employee: &Employee, needle: &str) -> bool {
    employee.full_name.to_lowercase().contains(needle)
        || employee.employee_code.to_lowercase().contains(needle)
}

fn tally(records: &[Attendance], status: AttendanceStatus) -> i64 {
    records.iter().filter(|a| a.status == status).count() as i64
}

#[async_trait]
impl AttendanceStore for MemoryStore {
    async fn list_employees(&self) -> StoreResult<Vec<Employee>> {
        Ok(self.lock().employees.clone())
    }

    async fn employee_exists(&self, id: u64) -> StoreResult<bool> {
        Ok(self.lock().employees.iter().any(|e| e.id == id))
    }

    async fn create_employee(&self, input: NewEmployee) -> StoreResult<Employee> {
        let mut state = self.lock();

        if state
            .employees
            .iter()
            .any(|e| e.employee_code == input.employee_code)
        {
            return Err(StoreError::DuplicateEmployeeCode);
        }

        state.last_employee_id += 1;
        let employee = Employee {
            id: state.last_employee_id,
            employee_code: input.employee_code,
            full_name: input.full_name,
            email: input.email,
            department: input.department,
        };
        state.employees.push(employee.clone());
        Ok(employee)
    }

    async fn delete_employee(&self, id: u64) -> StoreResult<bool> {
        let mut state = self.lock();

        let before = state.employees.len();
        state.employees.retain(|e| e.id != id);
        if state.employees.len() == before {
            return Ok(false);
        }

        state.attendance.retain(|a| a.employee_id != id);
        Ok(true)
    }

    async fn create_attendance(&self, input: NewAttendance) -> StoreResult<Attendance> {
        let mut state = self.lock();

        if !state.employees.iter().any(|e| e.id == input.employee_id) {
            return Err(StoreError::EmployeeNotFound(input.employee_id));
        }
        if state
            .attendance
            .iter()
            .any(|a| a.employee_id == input.employee_id && a.date == input.date)
        {
            return Err(StoreError::DuplicateAttendance);
        }

        state.last_attendance_id += 1;
        let record = Attendance {
            id: state.last_attendance_id,
            employee_id: input.employee_id,
            date: input.date,
            status: input.status,
        };
        state.attendance.push(record.clone());
        Ok(record)
    }

    async fn list_attendance(
        &self,
        employee_id: u64,
        date: Option<NaiveDate>,
    ) -> StoreResult<Vec<Attendance>> {
        Ok(self
            .lock()
            .attendance
            .iter()
            .filter(|a| a.employee_id == employee_id)
            .filter(|a| date.is_none_or(|d| a.date == d))
            .cloned()
            .collect())
    }

    async fn employee_attendance_counts(&self) -> StoreResult<Vec<EmployeeAttendanceCounts>> {
        let state = self.lock();

        Ok(state
            .employees
            .iter()
            .map(|employee| {
                let own: Vec<Attendance> = state
                    .attendance
                    .iter()
                    .filter(|a| a.employee_id == employee.id)
                    .cloned()
                    .collect();

                EmployeeAttendanceCounts {
                    employee: employee.clone(),
                    total_present_days: tally(&own, AttendanceStatus::Present),
                    total_absent_days: tally(&own, AttendanceStatus::Absent),
                }
            })
            .collect())
    }

    async fn dashboard_counts(&self, period: DateRange) -> StoreResult<DashboardCounts> {
        let state = self.lock();

        let in_period: Vec<Attendance> = state
            .attendance
            .iter()
            .filter(|a| period.contains(a.date))
            .cloned()
            .collect();

        Ok(DashboardCounts {
            total_employees: state.employees.len() as i64,
            total_records: state.attendance.len() as i64,
            total_present: tally(&state.attendance, AttendanceStatus::Present),
            total_absent: tally(&state.attendance, AttendanceStatus::Absent),
            period_present: tally(&in_period, AttendanceStatus::Present),
            period_absent: tally(&in_period, AttendanceStatus::Absent),
        })
    }

    async fn attendance_with_employees(
        &self,
        filter: &AttendanceFilter,
    ) -> StoreResult<Vec<AttendanceWithEmployee>> {
        let state = self.lock();
        let needle = filter.employee_name.as_deref().map(str::to_lowercase);

        let mut rows = Vec::new();
        for record in &state.attendance {
            if filter.period.is_some_and(|p| !p.contains(record.date)) {
                continue;
            }

            let Some(employee) = state.employees.iter().find(|e| e.id == record.employee_id)
            else {
                return Err(StoreError::CorruptRow(format!(
                    "attendance {} references missing employee {}",
                    record.id, record.employee_id
                )));
            };

            if needle.as_deref().is_some_and(|n| !name_matches(employee, n)) {
                continue;
            }

            rows.push(AttendanceWithEmployee {
                attendance: record.clone(),
                employee: employee.clone(),
            });
        }
        Ok(rows)
    }
}
