//! Layout parameters of the year grid.

use chrono::NaiveDate;

use crate::calendar::WeekendDays;
use crate::error::{Result, YearViewError};

/// Everything about the grid that the host configures. Immutable per layout
/// pass; any change invalidates the geometry cache.
#[derive(Clone, Debug, PartialEq)]
pub struct GridParameters {
    pub year: i32,
    pub rows: i32,
    pub columns: i32,
    /// ISO weekday shown in the first column (1 = Monday .. 7 = Sunday).
    pub first_day_of_week: u8,
    pub horizontal_spacing: f32,
    pub vertical_spacing: f32,
    pub margin_below_month_name: f32,
    pub weekend_days: WeekendDays,
    /// Weekday labels ignore the weekend style when set.
    pub day_name_transcends_weekend: bool,
}

impl Default for GridParameters {
    fn default() -> Self {
        Self {
            year: 2025,
            rows: 4,
            columns: 3,
            first_day_of_week: 1,
            horizontal_spacing: 8.0,
            vertical_spacing: 8.0,
            margin_below_month_name: 8.0,
            weekend_days: WeekendDays::default(),
            day_name_transcends_weekend: false,
        }
    }
}

impl GridParameters {
    /// Check every field. Zero spacing is allowed, negative spacing is not.
    pub fn validate(&self) -> Result<()> {
        if self.rows <= 0 {
            return Err(YearViewError::invalid(format!("rows must be positive, got {}", self.rows)));
        }
        if self.columns <= 0 {
            return Err(YearViewError::invalid(format!(
                "columns must be positive, got {}",
                self.columns
            )));
        }
        if !(1..=7).contains(&self.first_day_of_week) {
            return Err(YearViewError::invalid(format!(
                "first day of week must be 1 (Monday)..7 (Sunday), got {}",
                self.first_day_of_week
            )));
        }
        check_length("horizontal spacing", self.horizontal_spacing)?;
        check_length("vertical spacing", self.vertical_spacing)?;
        check_length("margin below month name", self.margin_below_month_name)?;
        if NaiveDate::from_ymd_opt(self.year, 1, 1).is_none()
            || NaiveDate::from_ymd_opt(self.year, 12, 31).is_none()
        {
            return Err(YearViewError::invalid(format!("year {} is out of range", self.year)));
        }
        Ok(())
    }

    /// Number of month slots the grid offers; months past this are not laid out.
    pub fn capacity(&self) -> usize {
        (self.rows.max(0) as usize).saturating_mul(self.columns.max(0) as usize)
    }
}

pub(crate) fn check_length(what: &str, value: f32) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(YearViewError::invalid(format!(
            "{what} must be a finite non-negative length, got {value}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert_eq!(GridParameters::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_non_positive_grid() {
        let p = GridParameters { rows: 0, ..Default::default() };
        assert!(matches!(p.validate(), Err(YearViewError::InvalidConfiguration(_))));
        let p = GridParameters { columns: -2, ..Default::default() };
        assert!(matches!(p.validate(), Err(YearViewError::InvalidConfiguration(_))));
    }

    #[test]
    fn rejects_bad_first_day_and_spacing() {
        let p = GridParameters { first_day_of_week: 0, ..Default::default() };
        assert!(p.validate().is_err());
        let p = GridParameters { first_day_of_week: 8, ..Default::default() };
        assert!(p.validate().is_err());
        let p = GridParameters { horizontal_spacing: -1.0, ..Default::default() };
        assert!(p.validate().is_err());
        let p = GridParameters { vertical_spacing: f32::NAN, ..Default::default() };
        assert!(p.validate().is_err());
        let p = GridParameters { horizontal_spacing: 0.0, ..Default::default() };
        assert!(p.validate().is_ok());
    }

    #[test]
    fn rejects_unrepresentable_year() {
        let p = GridParameters { year: i32::MAX, ..Default::default() };
        assert!(p.validate().is_err());
    }
}
