pub mod dashboard;
pub mod hr_report;
