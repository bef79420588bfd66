//! The year view widget: owns parameters, styles, geometry and selection,
//! and turns pointer events into listener callbacks.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{Datelike, Local, NaiveDate};
use engine_core::{DisplayList, Painter, Viewport};
use tracing::debug;
use year_config::{ConfigError, YearViewConfig};
use year_grid::{
    CalendarText, DateFormatter, DateKey, EnglishCalendarText, GeometryCache, GeometrySnapshot,
    GridParameters, HeuristicTextMeasure, HitResult, LayoutEnv, LayoutKey, MonthHighlight,
    PatternDateFormatter, Result, SelectedDay, SelectionMachine, SelectionMode, TapOutcome,
    TextMeasure, WeekendDays,
};

use crate::event_handler::{EventHandler, EventResult, PointerEvent, PointerKind};
use crate::listener::{DayEvent, MonthEvent, YearViewListener};
use crate::render::{render_year, RenderContext};
use crate::style::YearViewStyle;

pub struct YearView {
    params: GridParameters,
    style: YearViewStyle,
    today: NaiveDate,
    measure: Box<dyn TextMeasure>,
    formatter: Box<dyn DateFormatter>,
    text: Box<dyn CalendarText>,
    cache: GeometryCache,
    /// Last surface size handed to `layout`.
    surface: Option<(f32, f32)>,
    selection: SelectionMachine,
    highlight: MonthHighlight,
    listener: Option<Box<dyn YearViewListener>>,
}

impl YearView {
    /// Create a view with default style and collaborators. Today is taken from the local clock.
    pub fn new(params: GridParameters) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            style: YearViewStyle::default(),
            today: Local::now().date_naive(),
            measure: Box::new(HeuristicTextMeasure::default()),
            formatter: Box::new(PatternDateFormatter::default()),
            text: Box::new(EnglishCalendarText),
            cache: GeometryCache::new(),
            surface: None,
            selection: SelectionMachine::default(),
            highlight: MonthHighlight::default(),
            listener: None,
        })
    }

    /// Build a view from loaded configuration. An unset year resolves to `today`'s year.
    pub fn from_config(config: &YearViewConfig, today: NaiveDate) -> year_config::Result<Self> {
        let params = config.grid_parameters(today.year())?;
        let style = YearViewStyle::from_config(&config.style)?;
        let formatter = config.date_formatter()?;
        let mut view = Self::new(params).map_err(|e| ConfigError::Invalid(e.to_string()))?;
        view.today = today;
        view.style = style;
        view.formatter = Box::new(formatter);
        view.selection = SelectionMachine::new(
            if config.behavior.multi_selection { SelectionMode::Range } else { SelectionMode::Single },
            config.behavior.sticky_selection,
        );
        view.highlight.set_duration(Duration::from_millis(config.behavior.highlight_duration_ms));
        Ok(view)
    }

    pub fn with_text_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self.cache.invalidate();
        self
    }

    pub fn with_date_formatter(mut self, formatter: Box<dyn DateFormatter>) -> Self {
        self.formatter = formatter;
        self.cache.invalidate();
        // Stored keys were produced by the old formatter.
        self.selection.clear();
        self
    }

    pub fn with_calendar_text(mut self, text: Box<dyn CalendarText>) -> Self {
        self.text = text;
        self.cache.invalidate();
        self
    }

    pub fn set_listener(&mut self, listener: Box<dyn YearViewListener>) {
        self.listener = Some(listener);
    }

    pub fn take_listener(&mut self) -> Option<Box<dyn YearViewListener>> {
        self.listener.take()
    }

    // --- Layout ---

    /// Lay out for a surface of `width × height`. Identical inputs return the same snapshot.
    pub fn layout(&mut self, width: f32, height: f32) -> Result<Arc<GeometrySnapshot>> {
        self.surface = Some((width, height));
        let key = self.layout_key(width, height);
        let env = LayoutEnv {
            measure: self.measure.as_ref(),
            formatter: self.formatter.as_ref(),
            text: self.text.as_ref(),
        };
        self.cache.layout(&key, &env)
    }

    /// Current geometry, if a usable layout exists.
    pub fn snapshot(&self) -> Option<Arc<GeometrySnapshot>> {
        self.cache.get()
    }

    pub fn hit_test(&self, x: f32, y: f32) -> HitResult {
        match self.cache.get() {
            Some(snapshot) => snapshot.hit_test([x, y]),
            None => HitResult::None,
        }
    }

    fn layout_key(&self, width: f32, height: f32) -> LayoutKey {
        LayoutKey {
            width,
            height,
            params: self.params.clone(),
            metrics: self.style.layout_metrics(),
            today: self.today,
        }
    }

    /// Re-run layout for the last surface after an input changed.
    fn refresh(&mut self) -> Result<()> {
        if let Some((w, h)) = self.surface {
            self.layout(w, h)?;
        }
        Ok(())
    }

    fn update_params(&mut self, change: impl FnOnce(&mut GridParameters)) -> Result<()> {
        let mut params = self.params.clone();
        change(&mut params);
        params.validate()?;
        if params.year != self.params.year {
            self.highlight.clear();
        }
        self.params = params;
        self.refresh()
    }

    // --- Parameters ---

    pub fn params(&self) -> &GridParameters {
        &self.params
    }

    pub fn set_year(&mut self, year: i32) -> Result<()> {
        self.update_params(|p| p.year = year)
    }

    pub fn set_rows(&mut self, rows: i32) -> Result<()> {
        self.update_params(|p| p.rows = rows)
    }

    pub fn set_columns(&mut self, columns: i32) -> Result<()> {
        self.update_params(|p| p.columns = columns)
    }

    pub fn set_spacing(&mut self, horizontal: f32, vertical: f32) -> Result<()> {
        self.update_params(|p| {
            p.horizontal_spacing = horizontal;
            p.vertical_spacing = vertical;
        })
    }

    pub fn set_margin_below_month_name(&mut self, margin: f32) -> Result<()> {
        self.update_params(|p| p.margin_below_month_name = margin)
    }

    /// ISO weekday (1 = Monday .. 7 = Sunday) shown in the first column.
    pub fn set_first_day_of_week(&mut self, day: u8) -> Result<()> {
        self.update_params(|p| p.first_day_of_week = day)
    }

    pub fn set_weekend_days<I: IntoIterator<Item = u8>>(&mut self, days: I) -> Result<()> {
        let weekend = WeekendDays::from_days(days)?;
        self.update_params(|p| p.weekend_days = weekend)
    }

    pub fn set_day_name_transcends_weekend(&mut self, transcends: bool) -> Result<()> {
        self.update_params(|p| p.day_name_transcends_weekend = transcends)
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn set_today(&mut self, today: NaiveDate) -> Result<()> {
        self.today = today;
        self.refresh()
    }

    pub fn style(&self) -> &YearViewStyle {
        &self.style
    }

    /// Replace the style. A style whose layout metrics are unusable is
    /// rejected and the current one kept.
    pub fn set_style(&mut self, style: YearViewStyle) -> Result<()> {
        style.layout_metrics().validate()?;
        self.style = style;
        self.refresh()
    }

    // --- Selection ---

    pub fn set_sticky_selection(&mut self, sticky: bool) {
        self.selection.set_sticky(sticky);
    }

    /// Switch between single-day and range selection. Clears the current selection.
    pub fn set_multi_selection(&mut self, enabled: bool) {
        self.selection.set_mode(if enabled { SelectionMode::Range } else { SelectionMode::Single });
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    pub fn selected_day(&self) -> Option<&DateKey> {
        self.selection.selected().map(|d| &d.key)
    }

    /// Select the day identified by `key`, parsed with the active formatter.
    pub fn set_selected_day(&mut self, key: &str) -> Result<()> {
        let date = self.formatter.parse(key)?;
        self.selection.select(SelectedDay::new(self.formatter.format(date), date));
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Range ends; the end is `None` while waiting for the second tap.
    pub fn range(&self) -> Option<(&SelectedDay, Option<&SelectedDay>)> {
        self.selection.range()
    }

    pub fn highlighted_month(&self) -> Option<usize> {
        self.highlight.current()
    }

    /// When the month highlight will clear, if one is pending.
    pub fn highlight_deadline(&self) -> Option<Instant> {
        self.highlight.deadline()
    }

    // --- Rendering ---

    /// Draw the current geometry. Draws nothing before the first usable layout.
    pub fn render(&self, painter: &mut Painter) {
        let Some(snapshot) = self.cache.get() else {
            return;
        };
        let (selected, range) = match self.selection.range() {
            Some((start, Some(end))) => (None, Some((start.date, end.date))),
            Some((start, None)) => (Some(start), None),
            None => (self.selection.selected(), None),
        };
        let ctx = RenderContext {
            snapshot: &snapshot,
            style: &self.style,
            params: &self.params,
            today: self.today,
            selected,
            range,
            highlighted_month: self.highlight.current(),
            measure: self.measure.as_ref(),
            text: self.text.as_ref(),
        };
        render_year(painter, &ctx);
    }

    pub fn render_display_list(&self, viewport: Viewport) -> DisplayList {
        let mut painter = Painter::begin_frame(viewport);
        self.render(&mut painter);
        painter.finish()
    }

    // --- Events ---

    fn describe_day(&self, day: &SelectedDay) -> String {
        let mut description = format!(
            "Day {}, {}, {}",
            day.date.day(),
            self.text.month_name(day.date.month0()),
            day.date.year()
        );
        if self.selection.selected() == Some(day) {
            description.push_str(", Selected");
        } else if day.date == self.today {
            description.push_str(", Today");
        }
        description
    }

    fn on_day_tap(&mut self, day: SelectedDay) {
        log::info!("Tapped {}", self.describe_day(&day));
        match self.selection.on_day_tap(day) {
            TapOutcome::DayClicked(day) => {
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_day_click(&DayEvent::from(&day));
                }
            }
            TapOutcome::RangeStarted(start) => {
                log::info!("Range selection started at {}", start.key);
            }
            TapOutcome::RangeCompleted { start, end } => {
                log::info!("Range selection completed from {} to {}", start.key, end.key);
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_range_selected(&DayEvent::from(&start), &DayEvent::from(&end));
                }
            }
        }
    }

    fn on_month_tap(&mut self, month_index: usize, now: Instant) {
        self.highlight.highlight(month_index, now);
        debug!(month_index, "month highlighted");
        let event = MonthEvent::new(self.params.year, month_index);
        if let Some(listener) = self.listener.as_mut() {
            listener.on_month_click(&event);
        }
    }
}

impl EventHandler for YearView {
    fn handle_pointer(&mut self, event: PointerEvent) -> EventResult {
        match (self.hit_test(event.x, event.y), event.kind) {
            (HitResult::Day { key, date, .. }, PointerKind::Tap) => {
                self.on_day_tap(SelectedDay::new(key, date));
                EventResult::Handled
            }
            (HitResult::Day { key, date, .. }, PointerKind::LongPress) => {
                let day = DayEvent::from(&SelectedDay::new(key, date));
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_day_long_click(&day);
                }
                EventResult::Handled
            }
            (HitResult::Month { month_index }, PointerKind::Tap) => {
                self.on_month_tap(month_index, event.time);
                EventResult::Handled
            }
            (HitResult::Month { month_index }, PointerKind::LongPress) => {
                let month = MonthEvent::new(self.params.year, month_index);
                if let Some(listener) = self.listener.as_mut() {
                    listener.on_month_long_click(&month);
                }
                EventResult::Handled
            }
            (HitResult::None, _) => EventResult::Ignored,
        }
    }

    fn tick(&mut self, now: Instant) -> bool {
        self.highlight.tick(now)
    }

    fn contains_point(&self, x: f32, y: f32) -> bool {
        self.hit_test(x, y) != HitResult::None
    }
}
