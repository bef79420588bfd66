//! Callbacks fired by the year view.

use chrono::NaiveDate;
use year_grid::calendar::{day_millis, month_millis};
use year_grid::{DateKey, SelectedDay};

/// A day reported to the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayEvent {
    pub key: DateKey,
    pub date: NaiveDate,
    /// UTC midnight of `date`, in milliseconds since the Unix epoch.
    pub millis: i64,
}

impl From<&SelectedDay> for DayEvent {
    fn from(day: &SelectedDay) -> Self {
        Self { key: day.key.clone(), date: day.date, millis: day_millis(day.date) }
    }
}

/// A month reported to the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthEvent {
    pub year: i32,
    /// Zero-based month.
    pub month_index: usize,
    /// The 1st of the month at 01:00 UTC, in milliseconds since the Unix epoch.
    pub millis: i64,
}

impl MonthEvent {
    pub fn new(year: i32, month_index: usize) -> Self {
        Self { year, month_index, millis: month_millis(year, month_index as u32) }
    }
}

/// Host callbacks. Every method defaults to doing nothing.
pub trait YearViewListener {
    fn on_day_click(&mut self, day: &DayEvent) {
        let _ = day;
    }

    fn on_day_long_click(&mut self, day: &DayEvent) {
        let _ = day;
    }

    fn on_month_click(&mut self, month: &MonthEvent) {
        let _ = month;
    }

    fn on_month_long_click(&mut self, month: &MonthEvent) {
        let _ = month;
    }

    /// Both ends inclusive, `start <= end`.
    fn on_range_selected(&mut self, start: &DayEvent, end: &DayEvent) {
        let _ = (start, end);
    }
}
