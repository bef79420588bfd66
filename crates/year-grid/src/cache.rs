//! Geometry cache.
//!
//! Layout runs the geometry engine and the day-grid resolver for all twelve
//! months in one go and keeps the result until something in the
//! [`LayoutKey`] changes. There is no partial invalidation: a new key
//! throws the whole snapshot away.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use engine_core::Rect;
use tracing::debug;

use crate::calendar::{self, CalendarText, DateFormatter};
use crate::day_grid::{resolve_day_grid, DayGrid, DayGridSpec, DayRect, DEFAULT_TOUCH_PADDING};
use crate::error::Result;
use crate::geometry::{compute_month_blocks, MonthBlock};
use crate::hit_test::{self, HitResult};
use crate::measure::{TextMeasure, TextSize, TextStyle};
use crate::params::{check_length, GridParameters};

/// Text and padding inputs of a layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutMetrics {
    pub day_text: TextStyle,
    pub month_name: TextStyle,
    /// Style of the month name for the month containing today.
    pub current_month_name: TextStyle,
    pub touch_padding: f32,
    pub selection_margin: f32,
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        let ink = engine_core::Color::rgba(0, 0, 0, 255);
        Self {
            day_text: TextStyle::new(12.0, ink),
            month_name: TextStyle::new(14.0, ink),
            current_month_name: TextStyle::new(14.0, ink),
            touch_padding: DEFAULT_TOUCH_PADDING,
            selection_margin: 2.0,
        }
    }
}

impl LayoutMetrics {
    /// Reject paddings and margins no layout can use.
    pub fn validate(&self) -> Result<()> {
        check_length("touch padding", self.touch_padding)?;
        check_length("month selection margin", self.selection_margin)
    }
}

/// Everything a layout pass depends on.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutKey {
    pub width: f32,
    pub height: f32,
    pub params: GridParameters,
    pub metrics: LayoutMetrics,
    /// Picks the current-month name style.
    pub today: NaiveDate,
}

impl LayoutKey {
    /// Non-finite surface sizes become 0 so they compare equal and lay out empty.
    pub fn with_finite_surface(mut self) -> Self {
        if !self.width.is_finite() {
            self.width = 0.0;
        }
        if !self.height.is_finite() {
            self.height = 0.0;
        }
        self
    }
}

/// Collaborators consulted while laying out.
#[derive(Clone, Copy)]
pub struct LayoutEnv<'a> {
    pub measure: &'a dyn TextMeasure,
    pub formatter: &'a dyn DateFormatter,
    pub text: &'a dyn CalendarText,
}

/// One laid-out month.
#[derive(Clone, Debug, PartialEq)]
pub struct MonthLayout {
    pub block: MonthBlock,
    pub name: String,
    pub name_size: TextSize,
    pub is_current_month: bool,
    pub grid: DayGrid,
}

impl MonthLayout {
    pub fn month_index(&self) -> usize {
        self.block.month_index
    }

    /// Highlight rectangle, bottom aligned to the last day row.
    pub fn selection_halo(&self) -> Rect {
        self.block.selection_halo(self.grid.last_row_y)
    }
}

/// Immutable result of one layout generation.
#[derive(Clone, Debug, PartialEq)]
pub struct GeometrySnapshot {
    pub generation: u64,
    pub width: f32,
    pub height: f32,
    pub year: i32,
    pub months: Vec<MonthLayout>,
}

impl GeometrySnapshot {
    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    pub fn month(&self, month_index: usize) -> Option<&MonthLayout> {
        self.months.get(month_index)
    }

    pub fn day_rects(&self, month_index: usize) -> &[DayRect] {
        self.month(month_index).map(|m| m.grid.day_rects.as_slice()).unwrap_or(&[])
    }

    pub fn last_row_y(&self, month_index: usize) -> Option<f32> {
        self.month(month_index).map(|m| m.grid.last_row_y)
    }

    /// Find the `DayRect` of `date`, if it is laid out.
    pub fn find_day(&self, date: NaiveDate) -> Option<&DayRect> {
        if date.year() != self.year {
            return None;
        }
        self.month(date.month0() as usize)?.grid.day(date.day())
    }

    pub fn hit_test(&self, point: [f32; 2]) -> HitResult {
        hit_test::resolve(self, point)
    }
}

/// Run a full layout pass for `key`.
pub fn compute_geometry(key: &LayoutKey, env: &LayoutEnv<'_>, generation: u64) -> Result<GeometrySnapshot> {
    let params = &key.params;
    let metrics = &key.metrics;
    params.validate()?;
    metrics.validate()?;

    let blocks = compute_month_blocks(
        key.width,
        key.height,
        params.columns,
        params.rows,
        params.horizontal_spacing,
        params.vertical_spacing,
        metrics.selection_margin,
    )?;

    let year = params.year;
    let mut months = Vec::with_capacity(blocks.len());
    for block in blocks {
        let month = block.month_index as u32;
        let name = env.text.month_name(month);
        let is_current_month = key.today.year() == year && key.today.month0() == month;
        let name_style = if is_current_month { &metrics.current_month_name } else { &metrics.month_name };
        let name_size = env.measure.measure(&name, name_style);
        let spec = DayGridSpec {
            first_weekday_offset: calendar::first_weekday_offset(year, month, params.first_day_of_week),
            days_in_month: calendar::days_in_month(year, month),
            name_row_height: name_size.height,
            margin_below_month_name: params.margin_below_month_name,
            touch_padding: metrics.touch_padding,
        };
        let grid = resolve_day_grid(
            &block,
            &spec,
            |day| env.measure.measure(&day.to_string(), &metrics.day_text),
            |day| calendar::date(year, month, day).map(|date| (env.formatter.format(date), date)),
        );
        months.push(MonthLayout { block, name, name_size, is_current_month, grid });
    }

    debug!(
        generation,
        width = key.width,
        height = key.height,
        months = months.len(),
        "year grid laid out"
    );
    Ok(GeometrySnapshot { generation, width: key.width, height: key.height, year, months })
}

/// Memoizes the last layout pass.
#[derive(Debug, Default)]
pub struct GeometryCache {
    key: Option<LayoutKey>,
    snapshot: Option<Arc<GeometrySnapshot>>,
    generation: u64,
}

impl GeometryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the snapshot when `key` differs from the stored one. Returns true if it did.
    pub fn invalidate_if_changed(&mut self, key: &LayoutKey) -> bool {
        let key = key.clone().with_finite_surface();
        if self.key.as_ref() == Some(&key) {
            return false;
        }
        self.key = Some(key);
        self.snapshot = None;
        true
    }

    /// Forget the snapshot unconditionally, e.g. after swapping the formatter.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.snapshot = None;
    }

    pub fn get(&self) -> Option<Arc<GeometrySnapshot>> {
        self.snapshot.clone()
    }

    /// Generation of the last computed snapshot (0 before the first layout).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Return the snapshot for `key`, recomputing only when the key changed.
    pub fn layout(&mut self, key: &LayoutKey, env: &LayoutEnv<'_>) -> Result<Arc<GeometrySnapshot>> {
        let key = key.clone().with_finite_surface();
        self.invalidate_if_changed(&key);
        if let Some(snapshot) = &self.snapshot {
            return Ok(Arc::clone(snapshot));
        }
        let snapshot = Arc::new(compute_geometry(&key, env, self.generation + 1)?);
        self.generation += 1;
        self.snapshot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{EnglishCalendarText, PatternDateFormatter};
    use crate::measure::HeuristicTextMeasure;

    fn key() -> LayoutKey {
        LayoutKey {
            width: 600.0,
            height: 800.0,
            params: GridParameters { year: 2024, ..Default::default() },
            metrics: LayoutMetrics::default(),
            today: NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(),
        }
    }

    #[test]
    fn test_same_key_returns_same_snapshot() {
        let (m, f, t) = (HeuristicTextMeasure::default(), PatternDateFormatter::default(), EnglishCalendarText);
        let env = LayoutEnv { measure: &m, formatter: &f, text: &t };
        let mut cache = GeometryCache::new();
        assert!(cache.get().is_none());
        let a = cache.layout(&key(), &env).unwrap();
        let b = cache.layout(&key(), &env).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.generation, 1);
        assert!(!cache.invalidate_if_changed(&key()));
    }

    #[test]
    fn test_changed_key_recomputes() {
        let (m, f, t) = (HeuristicTextMeasure::default(), PatternDateFormatter::default(), EnglishCalendarText);
        let env = LayoutEnv { measure: &m, formatter: &f, text: &t };
        let mut cache = GeometryCache::new();
        let a = cache.layout(&key(), &env).unwrap();
        let mut k = key();
        k.width = 601.0;
        let b = cache.layout(&k, &env).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(b.generation, 2);
        assert_eq!(b.months.len(), 12);
    }

    #[test]
    fn test_current_month_flag() {
        let (m, f, t) = (HeuristicTextMeasure::default(), PatternDateFormatter::default(), EnglishCalendarText);
        let env = LayoutEnv { measure: &m, formatter: &f, text: &t };
        let snap = compute_geometry(&key(), &env, 1).unwrap();
        let current: Vec<usize> =
            snap.months.iter().filter(|m| m.is_current_month).map(|m| m.month_index()).collect();
        assert_eq!(current, vec![1]);
        assert_eq!(snap.month(0).map(|m| m.name.as_str()), Some("January"));
    }

    #[test]
    fn test_find_day() {
        let (m, f, t) = (HeuristicTextMeasure::default(), PatternDateFormatter::default(), EnglishCalendarText);
        let env = LayoutEnv { measure: &m, formatter: &f, text: &t };
        let snap = compute_geometry(&key(), &env, 1).unwrap();
        let leap = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(snap.find_day(leap).map(|d| d.key.as_str()), Some("2024-02-29"));
        assert!(snap.find_day(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()).is_none());
    }

    #[test]
    fn test_nan_surface_is_cached_once() {
        let (m, f, t) = (HeuristicTextMeasure::default(), PatternDateFormatter::default(), EnglishCalendarText);
        let env = LayoutEnv { measure: &m, formatter: &f, text: &t };
        let mut k = key();
        k.width = f32::NAN;
        let mut cache = GeometryCache::new();
        let a = cache.layout(&k, &env).unwrap();
        let b = cache.layout(&k, &env).unwrap();
        assert!(a.is_empty());
        assert_eq!(a.width, 0.0);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.generation(), 1);
        assert!(!cache.invalidate_if_changed(&k));
    }

    #[test]
    fn test_negative_metrics_rejected() {
        let mut metrics = LayoutMetrics::default();
        assert!(metrics.validate().is_ok());
        metrics.touch_padding = -1.0;
        assert!(metrics.validate().is_err());
        metrics.touch_padding = 0.0;
        metrics.selection_margin = f32::INFINITY;
        assert!(metrics.validate().is_err());
    }

    #[test]
    fn test_invalid_params_fail_layout() {
        let (m, f, t) = (HeuristicTextMeasure::default(), PatternDateFormatter::default(), EnglishCalendarText);
        let env = LayoutEnv { measure: &m, formatter: &f, text: &t };
        let mut k = key();
        k.params.rows = 0;
        let mut cache = GeometryCache::new();
        assert!(cache.layout(&k, &env).is_err());
        assert!(cache.get().is_none());
        assert_eq!(cache.generation(), 0);
    }
}
