//! HR attendance report: validates the query, then groups the filtered
//! attendance rows per employee in the order employees are first seen.

use std::collections::HashMap;
use std::num::IntErrorKind;

use chrono::{Datelike, NaiveDate};

use crate::error::ApiError;
use crate::model::{
    attendance::{AttendanceStatus, AttendanceWithEmployee},
    employee::Employee,
    report::{
        AttendanceDetail, AttendanceReport, DailyStatus, EmployeeReportSummary, ReportFilters,
        ReportSummary,
    },
};
use crate::store::{AttendanceFilter, DateRange};
use crate::utils::{calendar, rate};

const ALL: &str = "All";

/// Validated report parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportParams {
    pub employee_name: Option<String>,
    pub month: Option<u32>,
    /// Month exactly as requested, trimmed. Echoed back in the report.
    pub month_input: Option<String>,
    pub year: i32,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses an integer bounded by `range`. Well-formed integers too large for
/// `i64` count as out of range rather than malformed.
fn parse_bounded(
    raw: &str,
    range: std::ops::RangeInclusive<i64>,
    malformed: &str,
    out_of_range: &str,
) -> Result<i64, ApiError> {
    let value = raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ApiError::validation(out_of_range)
        }
        _ => ApiError::validation(malformed),
    })?;

    if !range.contains(&value) {
        return Err(ApiError::validation(out_of_range));
    }
    Ok(value)
}

impl ReportParams {
    /// Month is checked before year. A missing year means the year of `today`.
    pub fn parse(
        employee_name: Option<&str>,
        month: Option<&str>,
        year: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, ApiError> {
        let month_input = non_blank(month);
        let month = match month_input {
            None => None,
            Some(raw) => Some(parse_bounded(
                raw,
                1..=12,
                "Invalid month format",
                "Month must be between 1 and 12",
            )? as u32),
        };

        let year = match non_blank(year) {
            None => today.year(),
            Some(raw) => parse_bounded(
                raw,
                1..=9999,
                "Invalid year format",
                "Year must be between 1 and 9999",
            )? as i32,
        };

        Ok(Self {
            employee_name: non_blank(employee_name).map(str::to_string),
            month,
            month_input: month_input.map(str::to_string),
            year,
        })
    }

    pub fn period(&self) -> Option<DateRange> {
        let month = self.month?;
        calendar::month_bounds(self.year, month).map(|(start, end)| DateRange { start, end })
    }

    pub fn filter(&self) -> AttendanceFilter {
        AttendanceFilter {
            employee_name: self.employee_name.clone(),
            period: self.period(),
        }
    }

    fn echoed(&self) -> ReportFilters {
        ReportFilters {
            employee_name: self
                .employee_name
                .clone()
                .unwrap_or_else(|| ALL.to_string()),
            month: self
                .month_input
                .clone()
                .unwrap_or_else(|| ALL.to_string()),
            year: self.year,
            total_working_days_in_month: self
                .month
                .and_then(|m| calendar::days_in_month(self.year, m)),
        }
    }
}

/// Per-employee accumulator filled during the single pass.
struct Bucket {
    employee: Employee,
    present: u64,
    absent: u64,
    records: Vec<DailyStatus>,
}

impl Bucket {
    fn new(employee: Employee) -> Self {
        Self {
            employee,
            present: 0,
            absent: 0,
            records: Vec::new(),
        }
    }

    fn into_summary(self) -> EmployeeReportSummary {
        EmployeeReportSummary {
            attendance_rate: rate::percentage(self.present, self.present + self.absent),
            employee_info: self.employee,
            total_present: self.present,
            total_absent: self.absent,
            attendance_records: self.records,
        }
    }
}

/// Builds the report from rows that already satisfy `params`' filters.
pub fn build_report(params: &ReportParams, rows: Vec<AttendanceWithEmployee>) -> AttendanceReport {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut positions: HashMap<u64, usize> = HashMap::new();
    let mut detailed = Vec::with_capacity(rows.len());

    for AttendanceWithEmployee { attendance, employee } in rows {
        detailed.push(AttendanceDetail {
            id: attendance.id,
            employee_id: employee.id,
            employee_name: employee.full_name.clone(),
            employee_code: employee.employee_code.clone(),
            date: attendance.date,
            status: attendance.status,
        });

        let position = *positions.entry(employee.id).or_insert_with(|| {
            buckets.push(Bucket::new(employee));
            buckets.len() - 1
        });
        let bucket = &mut buckets[position];

        match attendance.status {
            AttendanceStatus::Present => bucket.present += 1,
            AttendanceStatus::Absent => bucket.absent += 1,
        }
        bucket.records.push(DailyStatus {
            date: attendance.date,
            status: attendance.status,
        });
    }

    let employee_summary: Vec<EmployeeReportSummary> =
        buckets.into_iter().map(Bucket::into_summary).collect();

    let overall_present: u64 = employee_summary.iter().map(|s| s.total_present).sum();
    let overall_absent: u64 = employee_summary.iter().map(|s| s.total_absent).sum();
    let total_records = detailed.len();

    AttendanceReport {
        filters_applied: params.echoed(),
        summary: ReportSummary {
            total_employees_in_report: employee_summary.len(),
            total_attendance_records: total_records,
            overall_present,
            overall_absent,
            overall_attendance_rate: rate::percentage(overall_present, total_records as u64),
        },
        employee_summary,
        detailed_attendance: detailed,
    }
}
