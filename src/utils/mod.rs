pub mod calendar;
pub mod rate;
