//! Selection and range state machine.

use chrono::NaiveDate;
use tracing::debug;

use crate::calendar::DateKey;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    #[default]
    Single,
    /// Two taps pick the ends of an inclusive date range.
    Range,
}

/// A day as the state machine sees it: key and date always travel together.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectedDay {
    pub key: DateKey,
    pub date: NaiveDate,
}

impl SelectedDay {
    pub fn new(key: DateKey, date: NaiveDate) -> Self {
        Self { key, date }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Idle,
    SingleSelected(SelectedDay),
    RangeStart(SelectedDay),
    /// `start <= end` always holds.
    RangeComplete { start: SelectedDay, end: SelectedDay },
}

/// What a day tap produced, for the caller to turn into callbacks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// Single mode tap. Fires the day-click callback whether or not anything stays selected.
    DayClicked(SelectedDay),
    RangeStarted(SelectedDay),
    RangeCompleted { start: SelectedDay, end: SelectedDay },
}

#[derive(Clone, Debug)]
pub struct SelectionMachine {
    mode: SelectionMode,
    sticky: bool,
    state: Selection,
}

impl Default for SelectionMachine {
    fn default() -> Self {
        Self::new(SelectionMode::Single, true)
    }
}

impl SelectionMachine {
    pub fn new(mode: SelectionMode, sticky: bool) -> Self {
        Self { mode, sticky, state: Selection::Idle }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    pub fn state(&self) -> &Selection {
        &self.state
    }

    /// Switching modes drops whatever the old mode had selected.
    pub fn set_mode(&mut self, mode: SelectionMode) {
        if self.mode != mode {
            self.mode = mode;
            self.state = Selection::Idle;
        }
    }

    /// Turning sticky selection off clears a retained single selection.
    pub fn set_sticky(&mut self, sticky: bool) {
        self.sticky = sticky;
        if !sticky && matches!(self.state, Selection::SingleSelected(_)) {
            self.state = Selection::Idle;
        }
    }

    pub fn on_day_tap(&mut self, day: SelectedDay) -> TapOutcome {
        let previous = std::mem::take(&mut self.state);
        let outcome = match self.mode {
            SelectionMode::Single => {
                self.state = match previous {
                    Selection::SingleSelected(current) if current == day => Selection::Idle,
                    _ if self.sticky => Selection::SingleSelected(day.clone()),
                    _ => Selection::Idle,
                };
                TapOutcome::DayClicked(day)
            }
            SelectionMode::Range => match previous {
                Selection::RangeStart(first) => {
                    let (start, end) = if first.date > day.date { (day, first) } else { (first, day) };
                    self.state = Selection::RangeComplete { start: start.clone(), end: end.clone() };
                    TapOutcome::RangeCompleted { start, end }
                }
                _ => {
                    self.state = Selection::RangeStart(day.clone());
                    TapOutcome::RangeStarted(day)
                }
            },
        };
        debug!(state = ?self.state, "selection changed");
        outcome
    }

    /// Programmatic single selection. Ignored in range mode and when not sticky.
    pub fn select(&mut self, day: SelectedDay) {
        if self.mode == SelectionMode::Single && self.sticky {
            self.state = Selection::SingleSelected(day);
        }
    }

    pub fn clear(&mut self) {
        self.state = Selection::Idle;
    }

    pub fn selected(&self) -> Option<&SelectedDay> {
        match &self.state {
            Selection::SingleSelected(day) => Some(day),
            _ => None,
        }
    }

    /// Range ends as `(start, end)`; `end` is `None` until the second tap.
    pub fn range(&self) -> Option<(&SelectedDay, Option<&SelectedDay>)> {
        match &self.state {
            Selection::RangeStart(start) => Some((start, None)),
            Selection::RangeComplete { start, end } => Some((start, Some(end))),
            _ => None,
        }
    }
}
