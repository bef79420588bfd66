//! Calendar date utility.
//!
//! Pure helpers answering questions about one day of the displayed year:
//! is it today, a weekend, selected, inside the active range. Months are
//! zero-based (`0` = January) everywhere in this crate; weekdays use the
//! ISO numbering `1` = Monday .. `7` = Sunday.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveTime};

use crate::error::{Result, YearViewError};

pub const MONTHS_PER_YEAR: usize = 12;
pub const DAYS_PER_WEEK: usize = 7;

/// Build the date for `day` of zero-based `month` in `year`.
pub fn date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month + 1, day)
}

/// Number of days in zero-based `month` of `year`, leap years included.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month >= 11 { (year + 1, 1) } else { (year, month + 2) };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_of_next| first_of_next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

/// ISO weekday number (1 = Monday .. 7 = Sunday).
pub fn iso_weekday(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// Zero-based (Monday = 0) index of the first day of the week. Out-of-range
/// values wrap, so 0 reads as Sunday and 8 as Monday.
fn week_start_index(first_day_of_week: u8) -> usize {
    (first_day_of_week as usize + DAYS_PER_WEEK - 1) % DAYS_PER_WEEK
}

/// Column (0..7) of the 1st of the month when the grid starts on `first_day_of_week`.
pub fn first_weekday_offset(year: i32, month: u32, first_day_of_week: u8) -> u32 {
    match date(year, month, 1) {
        Some(first) => {
            let weekday = iso_weekday(first) as usize - 1;
            ((weekday + DAYS_PER_WEEK - week_start_index(first_day_of_week)) % DAYS_PER_WEEK) as u32
        }
        None => 0,
    }
}

/// Weekday shown in grid column `column` when weeks start on `first_day_of_week`.
///
/// Wraps with a modulo so every (column, first day) pair lands in 1..=7.
pub fn weekday_for_column(column: usize, first_day_of_week: u8) -> u8 {
    ((week_start_index(first_day_of_week) + column % DAYS_PER_WEEK) % DAYS_PER_WEEK) as u8 + 1
}

pub fn is_today(day: NaiveDate, today: NaiveDate) -> bool {
    day == today
}

pub fn is_weekend(day: NaiveDate, weekend: WeekendDays) -> bool {
    weekend.contains(iso_weekday(day))
}

pub fn is_selected(key: &DateKey, selected: Option<&DateKey>) -> bool {
    selected.is_some_and(|s| s == key)
}

/// Inclusive range check. Open ranges (either end missing) contain nothing.
pub fn is_in_range(day: NaiveDate, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    match (start, end) {
        (Some(s), Some(e)) => s <= day && day <= e,
        _ => false,
    }
}

/// Milliseconds since the Unix epoch at UTC midnight of `day`.
pub fn day_millis(day: NaiveDate) -> i64 {
    day.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Milliseconds since the Unix epoch for the 1st of zero-based `month` at 01:00 UTC.
pub fn month_millis(year: i32, month: u32) -> i64 {
    date(year, month, 1)
        .and_then(|d| d.and_hms_opt(1, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or(0)
}

/// Set of weekdays rendered with the weekend style.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeekendDays(u8);

impl WeekendDays {
    pub const NONE: WeekendDays = WeekendDays(0);

    /// Build from ISO weekday numbers. Anything outside 1..=7 is rejected.
    pub fn from_days<I: IntoIterator<Item = u8>>(days: I) -> Result<Self> {
        let mut mask = 0u8;
        for d in days {
            if !(1..=7).contains(&d) {
                return Err(YearViewError::invalid(format!(
                    "weekend day {d} outside 1 (Monday)..7 (Sunday)"
                )));
            }
            mask |= 1 << (d - 1);
        }
        Ok(Self(mask))
    }

    pub fn contains(&self, weekday: u8) -> bool {
        (1..=7).contains(&weekday) && self.0 & (1 << (weekday - 1)) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        (1..=7u8).filter(|d| self.contains(*d))
    }
}

impl Default for WeekendDays {
    /// Saturday and Sunday.
    fn default() -> Self {
        Self(0b110_0000)
    }
}

impl fmt::Debug for WeekendDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Stable string key identifying one calendar day, produced by a [`DateFormatter`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateKey(String);

impl DateKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Formats days into keys and parses them back. Implementations must round-trip exactly.
pub trait DateFormatter {
    fn format(&self, day: NaiveDate) -> DateKey;
    fn parse(&self, key: &str) -> Result<NaiveDate>;
}

/// chrono pattern based formatter; the default pattern is `%Y-%m-%d`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternDateFormatter {
    pattern: String,
}

impl PatternDateFormatter {
    pub const ISO: &'static str = "%Y-%m-%d";

    /// Accepts only patterns that round-trip a probe date, so keys stay unique per day.
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let formatter = Self { pattern };
        let round_trips = NaiveDate::from_ymd_opt(2024, 11, 23).is_some_and(|probe| {
            let key = formatter.format(probe);
            formatter.parse(key.as_str()).is_ok_and(|back| back == probe)
        });
        if round_trips {
            Ok(formatter)
        } else {
            Err(YearViewError::invalid(format!(
                "date pattern {:?} does not round-trip year, month and day",
                formatter.pattern
            )))
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }
}

impl Default for PatternDateFormatter {
    fn default() -> Self {
        Self { pattern: Self::ISO.to_string() }
    }
}

impl DateFormatter for PatternDateFormatter {
    fn format(&self, day: NaiveDate) -> DateKey {
        DateKey(day.format(&self.pattern).to_string())
    }

    fn parse(&self, key: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(key, &self.pattern).map_err(|e| YearViewError::DateKeyParse {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Month and weekday names shown by the renderer.
pub trait CalendarText {
    /// Display name of zero-based `month`.
    fn month_name(&self, month: u32) -> String;
    /// Short label for ISO weekday `weekday` shown above the day columns.
    fn weekday_label(&self, weekday: u8) -> String;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct EnglishCalendarText;

const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

const WEEKDAY_LABELS: [&str; DAYS_PER_WEEK] = ["M", "T", "W", "T", "F", "S", "S"];

impl CalendarText for EnglishCalendarText {
    fn month_name(&self, month: u32) -> String {
        MONTH_NAMES.get(month as usize).copied().unwrap_or("").to_string()
    }

    fn weekday_label(&self, weekday: u8) -> String {
        WEEKDAY_LABELS
            .get((weekday as usize).wrapping_sub(1))
            .copied()
            .unwrap_or("")
            .to_string()
    }
}
