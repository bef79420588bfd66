use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use chrono::NaiveDate;
use engine_core::{Command, Viewport};
use year_config::YearViewConfig;
use year_grid::calendar::{day_millis, month_millis};
use year_grid::{GridParameters, HitResult, YearViewError};
use year_scene::{
    DayEvent, EventHandler, EventResult, MonthEvent, PointerEvent, TitleGravity, YearView,
    YearViewListener,
};

#[derive(Debug, Clone, PartialEq)]
enum Fired {
    DayClick(DayEvent),
    DayLongClick(DayEvent),
    MonthClick(MonthEvent),
    MonthLongClick(MonthEvent),
    Range(DayEvent, DayEvent),
}

#[derive(Clone, Default)]
struct Recorder(Rc<RefCell<Vec<Fired>>>);

impl Recorder {
    fn take(&self) -> Vec<Fired> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

impl YearViewListener for Recorder {
    fn on_day_click(&mut self, day: &DayEvent) {
        self.0.borrow_mut().push(Fired::DayClick(day.clone()));
    }

    fn on_day_long_click(&mut self, day: &DayEvent) {
        self.0.borrow_mut().push(Fired::DayLongClick(day.clone()));
    }

    fn on_month_click(&mut self, month: &MonthEvent) {
        self.0.borrow_mut().push(Fired::MonthClick(*month));
    }

    fn on_month_long_click(&mut self, month: &MonthEvent) {
        self.0.borrow_mut().push(Fired::MonthLongClick(*month));
    }

    fn on_range_selected(&mut self, start: &DayEvent, end: &DayEvent) {
        self.0.borrow_mut().push(Fired::Range(start.clone(), end.clone()));
    }
}

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, m, d).unwrap()
}

fn view() -> (YearView, Recorder) {
    let mut view = YearView::new(GridParameters { year: 2024, ..Default::default() }).unwrap();
    view.set_today(date(6, 12)).unwrap();
    view.layout(900.0, 1200.0).unwrap();
    let recorder = Recorder::default();
    view.set_listener(Box::new(recorder.clone()));
    (view, recorder)
}

fn day_center(view: &YearView, m: u32, d: u32) -> [f32; 2] {
    view.snapshot().unwrap().find_day(date(m, d)).unwrap().rect.center()
}

fn tap_day(view: &mut YearView, m: u32, d: u32) -> EventResult {
    let [x, y] = day_center(view, m, d);
    view.handle_pointer(PointerEvent::tap(x, y))
}

fn month_point(view: &YearView, month_index: usize) -> [f32; 2] {
    let rect = view.snapshot().unwrap().month(month_index).unwrap().block.rect;
    [rect.left() + 1.0, rect.top() + 1.0]
}

#[test]
fn tap_selects_and_toggles() {
    let (mut view, rec) = view();
    assert_eq!(tap_day(&mut view, 3, 14), EventResult::Handled);
    assert_eq!(view.selected_day().map(|k| k.as_str()), Some("2024-03-14"));
    match &rec.take()[..] {
        [Fired::DayClick(day)] => {
            assert_eq!(day.key.as_str(), "2024-03-14");
            assert_eq!(day.millis, day_millis(date(3, 14)));
        }
        other => panic!("unexpected callbacks {other:?}"),
    }

    tap_day(&mut view, 3, 14);
    assert!(view.selected_day().is_none());
    assert_eq!(rec.take().len(), 1);
}

#[test]
fn non_sticky_still_reports_clicks() {
    let (mut view, rec) = view();
    view.set_sticky_selection(false);
    tap_day(&mut view, 1, 2);
    assert!(view.selected_day().is_none());
    assert!(matches!(&rec.take()[..], [Fired::DayClick(_)]));
}

#[test]
fn range_selection_reorders_and_reports() {
    let (mut view, rec) = view();
    view.set_multi_selection(true);
    tap_day(&mut view, 10, 5);
    assert!(rec.take().is_empty());
    let (start, end) = view.range().unwrap();
    assert_eq!(start.date, date(10, 5));
    assert!(end.is_none());

    tap_day(&mut view, 2, 29);
    match &rec.take()[..] {
        [Fired::Range(start, end)] => {
            assert_eq!(start.key.as_str(), "2024-02-29");
            assert_eq!(end.key.as_str(), "2024-10-05");
            assert_eq!(start.millis, day_millis(date(2, 29)));
            assert!(start.millis < end.millis);
        }
        other => panic!("unexpected callbacks {other:?}"),
    }

    tap_day(&mut view, 4, 1);
    let (start, end) = view.range().unwrap();
    assert_eq!(start.date, date(4, 1));
    assert!(end.is_none());
}

#[test]
fn month_tap_highlights_then_clears() {
    let (mut view, rec) = view();
    let t0 = Instant::now();
    let [x, y] = month_point(&view, 5);
    assert_eq!(view.hit_test(x, y), HitResult::Month { month_index: 5 });
    assert_eq!(view.handle_pointer(PointerEvent::tap(x, y).at(t0)), EventResult::Handled);
    assert_eq!(view.highlighted_month(), Some(5));
    assert_eq!(
        rec.take(),
        vec![Fired::MonthClick(MonthEvent { year: 2024, month_index: 5, millis: month_millis(2024, 5) })]
    );

    assert!(!view.tick(t0 + Duration::from_millis(250)));
    assert_eq!(view.highlighted_month(), Some(5));
    assert!(view.tick(t0 + Duration::from_millis(300)));
    assert_eq!(view.highlighted_month(), None);
}

#[test]
fn second_month_tap_rearms_timer() {
    let (mut view, _rec) = view();
    let t0 = Instant::now();
    let [x, y] = month_point(&view, 0);
    view.handle_pointer(PointerEvent::tap(x, y).at(t0));
    let [x, y] = month_point(&view, 7);
    view.handle_pointer(PointerEvent::tap(x, y).at(t0 + Duration::from_millis(200)));
    assert!(!view.tick(t0 + Duration::from_millis(350)));
    assert_eq!(view.highlighted_month(), Some(7));
    assert_eq!(view.highlight_deadline(), Some(t0 + Duration::from_millis(500)));
}

#[test]
fn long_press_reports_without_selecting() {
    let (mut view, rec) = view();
    let [x, y] = day_center(&view, 8, 8);
    view.handle_pointer(PointerEvent::long_press(x, y));
    let [mx, my] = month_point(&view, 2);
    view.handle_pointer(PointerEvent::long_press(mx, my));

    assert!(view.selected_day().is_none());
    assert_eq!(view.highlighted_month(), None);
    match &rec.take()[..] {
        [Fired::DayLongClick(day), Fired::MonthLongClick(month)] => {
            assert_eq!(day.date, date(8, 8));
            assert_eq!(month.month_index, 2);
        }
        other => panic!("unexpected callbacks {other:?}"),
    }
}

#[test]
fn nothing_happens_before_layout() {
    let mut view = YearView::new(GridParameters::default()).unwrap();
    assert_eq!(view.handle_pointer(PointerEvent::tap(10.0, 10.0)), EventResult::Ignored);
    assert!(view.render_display_list(Viewport { width: 100, height: 100 }).commands.is_empty());

    // Too small to fit anything: still no geometry, still no error.
    let snapshot = view.layout(5.0, 5.0).unwrap();
    assert!(snapshot.is_empty());
    assert_eq!(view.hit_test(1.0, 1.0), HitResult::None);
}

#[test]
fn gaps_between_months_are_ignored() {
    let (mut view, rec) = view();
    let snapshot = view.snapshot().unwrap();
    let x = snapshot.month(0).unwrap().block.rect.right() + 2.0;
    assert_eq!(view.handle_pointer(PointerEvent::tap(x, 20.0)), EventResult::Ignored);
    assert!(rec.take().is_empty());
}

#[test]
fn setters_validate_and_relayout() {
    let (mut view, _rec) = view();
    let before = view.snapshot().unwrap();
    assert!(matches!(view.set_rows(0), Err(YearViewError::InvalidConfiguration(_))));
    assert!(view.set_first_day_of_week(8).is_err());
    assert!(view.set_weekend_days([9]).is_err());
    assert!(view.set_spacing(-1.0, 0.0).is_err());
    assert_eq!(view.params().rows, 4);
    assert!(std::sync::Arc::ptr_eq(&before, &view.snapshot().unwrap()));

    view.set_columns(4).unwrap();
    view.set_rows(3).unwrap();
    let after = view.snapshot().unwrap();
    assert!(after.generation > before.generation);
    assert_eq!(after.months.len(), 12);
    assert!(std::sync::Arc::ptr_eq(&after, &view.layout(900.0, 1200.0).unwrap()));

    view.set_first_day_of_week(7).unwrap();
    view.set_weekend_days([5, 6]).unwrap();
    assert_eq!(view.params().weekend_days.iter().collect::<Vec<_>>(), vec![5, 6]);
}

#[test]
fn bad_style_is_rejected_and_layout_survives() {
    let (mut view, _rec) = view();
    let before = view.snapshot().unwrap();

    let mut style = view.style().clone();
    style.touch_padding = -1.0;
    assert!(matches!(view.set_style(style), Err(YearViewError::InvalidConfiguration(_))));
    let mut style = view.style().clone();
    style.month.selection.selection_margin = -3.0;
    assert!(view.set_style(style).is_err());

    assert_eq!(view.style().touch_padding, 4.0);
    assert!(std::sync::Arc::ptr_eq(&before, &view.snapshot().unwrap()));
    assert_eq!(tap_day(&mut view, 4, 9), EventResult::Handled);

    let mut style = view.style().clone();
    style.touch_padding = 2.0;
    view.set_style(style).unwrap();
    let after = view.layout(900.0, 1200.0).unwrap();
    assert!(after.generation > before.generation);
    assert_eq!(after.months.len(), 12);
}

#[test]
fn style_is_checked_before_first_layout() {
    let mut view = YearView::new(GridParameters::default()).unwrap();
    let mut style = view.style().clone();
    style.touch_padding = f32::NAN;
    assert!(view.set_style(style).is_err());
    assert!(!view.layout(900.0, 1200.0).unwrap().is_empty());
}

#[test]
fn selected_day_api_validates_keys() {
    let (mut view, _rec) = view();
    assert!(matches!(view.set_selected_day("not a date"), Err(YearViewError::DateKeyParse { .. })));
    view.set_selected_day("2024-05-17").unwrap();
    assert_eq!(view.selected_day().map(|k| k.as_str()), Some("2024-05-17"));
    view.clear_selection();
    assert!(view.selected_day().is_none());
}

#[test]
fn renders_every_label() {
    let (mut view, _rec) = view();
    view.set_selected_day("2024-01-10").unwrap();
    let list = view.render_display_list(Viewport { width: 900, height: 1200 });
    let texts: Vec<&str> = list.text_runs().map(|r| r.text.as_str()).collect();
    // 12 month names, 12 x 7 weekday labels, 366 days.
    assert_eq!(texts.len(), 12 + 84 + 366);
    assert!(texts.contains(&"January"));
    assert!(texts.contains(&"29"));

    // Today and the selected day get a circle each.
    let circles = list.commands.iter().filter(|c| matches!(c, Command::DrawEllipse { .. })).count();
    assert_eq!(circles, 2);
}

#[test]
fn renderer_culls_offscreen_months() {
    let (view, _rec) = view();
    let list = view.render_display_list(Viewport { width: 300, height: 300 });
    let names: Vec<&str> = list
        .text_runs()
        .map(|r| r.text.as_str())
        .filter(|t| t.len() > 2 && t.chars().all(char::is_alphabetic))
        .collect();
    assert_eq!(names, vec!["January"]);
}

#[test]
fn highlighted_month_draws_halo() {
    let (mut view, _rec) = view();
    let [x, y] = month_point(&view, 4);
    view.handle_pointer(PointerEvent::tap(x, y));
    let list = view.render_display_list(Viewport { width: 900, height: 1200 });
    let halo = view.snapshot().unwrap().month(4).unwrap().selection_halo();
    assert!(list.commands.iter().any(|c| matches!(c, Command::DrawRoundedRect { rrect, z: 1, .. } if rrect.rect == halo)));
}

#[test]
fn builds_from_config() {
    let mut config = YearViewConfig::default();
    config.grid.year = None;
    config.grid.columns = 6;
    config.grid.rows = 2;
    config.behavior.multi_selection = true;
    config.style.title_gravity = "sideways".to_string();

    let today = NaiveDate::from_ymd_opt(2031, 3, 9).unwrap();
    let mut view = YearView::from_config(&config, today).unwrap();
    assert_eq!(view.params().year, 2031);
    assert_eq!(view.style().month.title_gravity, TitleGravity::Center);
    assert_eq!(view.selection_mode(), year_grid::SelectionMode::Range);
    let snapshot = view.layout(config.surface.width, config.surface.height).unwrap();
    assert_eq!(snapshot.months.len(), 12);
    assert!(snapshot.month(2).unwrap().is_current_month);
}
