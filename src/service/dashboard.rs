use chrono::NaiveDate;

use crate::model::report::DashboardSummary;
use crate::store::{DashboardCounts, DateRange};
use crate::utils::{calendar, rate};

/// Calendar month containing `today`.
pub fn current_month(today: NaiveDate) -> DateRange {
    let (year, month) = calendar::month_of(today);
    match calendar::month_bounds(year, month) {
        Some((start, end)) => DateRange { start, end },
        // only reachable for the last representable month
        None => DateRange {
            start: today,
            end: NaiveDate::MAX,
        },
    }
}

pub fn summarize(counts: DashboardCounts) -> DashboardSummary {
    DashboardSummary {
        total_employees: counts.total_employees,
        total_attendance_records: counts.total_records,
        total_present_days: counts.total_present,
        total_absent_days: counts.total_absent,
        current_month_present: counts.period_present,
        current_month_absent: counts.period_absent,
        attendance_rate_percentage: rate::percentage(
            counts.total_present.max(0) as u64,
            counts.total_records.max(0) as u64,
        ),
    }
}
