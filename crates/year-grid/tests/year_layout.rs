use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use year_grid::calendar::{self, day_millis};
use year_grid::{
    DateFormatter, EnglishCalendarText, GeometryCache, GridParameters, HeuristicTextMeasure,
    HitResult, LayoutEnv, LayoutKey, LayoutMetrics, PatternDateFormatter, Result, SelectedDay,
    SelectionMachine, SelectionMode, TapOutcome, WeekendDays,
};

struct Env {
    measure: HeuristicTextMeasure,
    formatter: PatternDateFormatter,
    text: EnglishCalendarText,
}

impl Env {
    fn new() -> Self {
        Self {
            measure: HeuristicTextMeasure::default(),
            formatter: PatternDateFormatter::default(),
            text: EnglishCalendarText,
        }
    }

    fn layout(&self) -> LayoutEnv<'_> {
        LayoutEnv { measure: &self.measure, formatter: &self.formatter, text: &self.text }
    }
}

fn key(year: i32) -> LayoutKey {
    LayoutKey {
        width: 960.0,
        height: 1280.0,
        params: GridParameters { year, ..Default::default() },
        metrics: LayoutMetrics::default(),
        today: NaiveDate::from_ymd_opt(year, 7, 4).unwrap(),
    }
}

#[test]
fn every_day_of_the_year_is_laid_out_once() -> Result<()> {
    let env = Env::new();
    let mut cache = GeometryCache::new();
    for year in [2023, 2024, 1900, 2000] {
        let snap = cache.layout(&key(year), &env.layout())?;
        assert_eq!(snap.months.len(), 12);
        let mut expected = NaiveDate::from_ymd_opt(year, 1, 1).unwrap();
        for month in &snap.months {
            assert_eq!(
                month.grid.day_rects.len() as u32,
                calendar::days_in_month(year, month.month_index() as u32),
                "{year}-{}",
                month.month_index() + 1
            );
            for day in &month.grid.day_rects {
                assert_eq!(day.date, expected);
                assert_eq!(env.formatter.parse(day.key.as_str())?, day.date);
                expected = expected.succ_opt().unwrap();
            }
        }
        assert_eq!(expected.year(), year + 1);
    }
    Ok(())
}

#[test]
fn february_2024_monday_first() -> Result<()> {
    let env = Env::new();
    let mut cache = GeometryCache::new();
    let snap = cache.layout(&key(2024), &env.layout())?;
    let feb = snap.month(1).unwrap();
    let keys: Vec<&str> = feb.grid.day_rects.iter().map(|d| d.key.as_str()).collect();
    assert_eq!(keys.len(), 29);
    assert_eq!(keys[0], "2024-02-01");
    assert_eq!(keys[28], "2024-02-29");

    // Thursday lands in the fourth column.
    let first = &feb.grid.day_rects[0];
    assert_eq!(first.center, feb.grid.cell_centers[3]);
    assert_eq!(first.center[0], feb.grid.weekday_centers[3][0]);
    Ok(())
}

#[test]
fn sunday_first_moves_columns() -> Result<()> {
    let env = Env::new();
    let mut cache = GeometryCache::new();
    let mut k = key(2024);
    k.params.first_day_of_week = 7;
    let snap = cache.layout(&k, &env.layout())?;
    let feb = snap.month(1).unwrap();
    assert_eq!(feb.grid.day_rects[0].center, feb.grid.cell_centers[4]);
    Ok(())
}

#[test]
fn day_centers_hit_their_day() -> Result<()> {
    let env = Env::new();
    let mut cache = GeometryCache::new();
    for (cols, rows) in [(3, 4), (4, 3), (6, 2), (2, 6), (12, 1), (1, 12)] {
        let mut k = key(2025);
        k.params.columns = cols;
        k.params.rows = rows;
        let snap = cache.layout(&k, &env.layout())?;
        for month in &snap.months {
            for day in &month.grid.day_rects {
                let hit = snap.hit_test(day.rect.center());
                assert_eq!(
                    hit,
                    HitResult::Day { month_index: month.month_index(), key: day.key.clone(), date: day.date },
                    "{cols}x{rows}"
                );
            }
        }
    }
    Ok(())
}

#[test]
fn month_hit_outside_days() -> Result<()> {
    let env = Env::new();
    let mut cache = GeometryCache::new();
    let snap = cache.layout(&key(2024), &env.layout())?;
    let june = snap.month(5).unwrap();
    let r = june.block.rect;
    let point = [r.right() - 1.0, r.top() + 1.0];
    assert_eq!(snap.hit_test(point), HitResult::Month { month_index: 5 });
    Ok(())
}

#[test]
fn halo_ends_below_last_row() -> Result<()> {
    let env = Env::new();
    let mut cache = GeometryCache::new();
    let snap = cache.layout(&key(2024), &env.layout())?;
    for month in &snap.months {
        let halo = month.selection_halo();
        let lowest = month
            .grid
            .day_rects
            .iter()
            .map(|d| d.center[1] + d.text.height * 0.5)
            .fold(f32::MIN, f32::max);
        assert!((halo.bottom() - (lowest + month.block.selection_margin)).abs() < 1e-3);
        assert!(halo.bottom() <= month.block.selection_rect.bottom() + 1e-3);
    }
    Ok(())
}

fn variant(base: &LayoutKey, change: impl FnOnce(&mut LayoutKey)) -> LayoutKey {
    let mut k = base.clone();
    change(&mut k);
    k
}

#[test]
fn cache_recomputes_on_every_parameter() -> Result<()> {
    let env = Env::new();
    let mut cache = GeometryCache::new();
    let base = key(2024);
    let first = cache.layout(&base, &env.layout())?;
    assert!(Arc::ptr_eq(&first, &cache.layout(&base, &env.layout())?));

    let variants = [
        variant(&base, |k| k.width = 961.0),
        variant(&base, |k| k.height = 1000.0),
        variant(&base, |k| k.params.year = 2025),
        variant(&base, |k| k.params.rows = 6),
        variant(&base, |k| k.params.columns = 4),
        variant(&base, |k| k.params.first_day_of_week = 3),
        variant(&base, |k| k.params.horizontal_spacing = 0.0),
        variant(&base, |k| k.params.vertical_spacing = 12.0),
        variant(&base, |k| k.params.margin_below_month_name = 2.0),
        variant(&base, |k| k.params.weekend_days = WeekendDays::from_days([5, 6]).unwrap()),
        variant(&base, |k| k.params.day_name_transcends_weekend = true),
        variant(&base, |k| k.metrics.touch_padding = 6.0),
        variant(&base, |k| k.metrics.selection_margin = 4.0),
        variant(&base, |k| k.metrics.day_text.size = 18.0),
        variant(&base, |k| k.today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()),
    ];

    let mut previous = first;
    for k in &variants {
        let next = cache.layout(k, &env.layout())?;
        assert!(!Arc::ptr_eq(&previous, &next));
        assert_eq!(next.generation, previous.generation + 1);
        assert_eq!(next.months.len(), 12);
        // Back to base: recomputed again rather than resurrected.
        let back = cache.layout(&base, &env.layout())?;
        assert_eq!(back.generation, next.generation + 1);
        previous = back;
    }
    Ok(())
}

#[test]
fn range_taps_report_chronological_ends() -> Result<()> {
    let env = Env::new();
    let mut cache = GeometryCache::new();
    let snap = cache.layout(&key(2024), &env.layout())?;
    let tap = |month: usize, day: u32| {
        let center = snap.month(month).unwrap().grid.day(day).unwrap().rect.center();
        match snap.hit_test(center) {
            HitResult::Day { key, date, .. } => SelectedDay::new(key, date),
            other => panic!("expected a day, got {other:?}"),
        }
    };

    let mut sm = SelectionMachine::new(SelectionMode::Range, true);
    sm.on_day_tap(tap(8, 15));
    match sm.on_day_tap(tap(2, 3)) {
        TapOutcome::RangeCompleted { start, end } => {
            assert_eq!(start.key.as_str(), "2024-03-03");
            assert_eq!(end.key.as_str(), "2024-09-15");
            assert!(day_millis(start.date) < day_millis(end.date));
        }
        other => panic!("expected a completed range, got {other:?}"),
    }
    Ok(())
}
