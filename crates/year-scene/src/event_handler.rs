//! Pointer event handling for the year view.
//!
//! Gesture detection happens in the host: events arrive already classified
//! as a tap or a long press, in surface coordinates.

use std::time::Instant;

/// Result of an event handling operation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventResult {
    /// Event was handled and should not propagate
    Handled,
    /// Event was not handled, continue propagation
    Ignored,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Handled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Tap,
    LongPress,
}

/// Pointer event data
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// X coordinate in surface space
    pub x: f32,
    /// Y coordinate in surface space
    pub y: f32,
    /// When the gesture was recognised; drives the month highlight timer.
    pub time: Instant,
}

impl PointerEvent {
    pub fn tap(x: f32, y: f32) -> Self {
        Self { kind: PointerKind::Tap, x, y, time: Instant::now() }
    }

    pub fn long_press(x: f32, y: f32) -> Self {
        Self { kind: PointerKind::LongPress, x, y, time: Instant::now() }
    }

    pub fn at(mut self, time: Instant) -> Self {
        self.time = time;
        self
    }

    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// Event handler trait for interactive widgets
///
/// The host dispatches pointer events and the widget returns whether it
/// consumed them.
pub trait EventHandler {
    /// Handle a tap or long press at surface coordinates
    fn handle_pointer(&mut self, event: PointerEvent) -> EventResult {
        let _ = event;
        EventResult::Ignored
    }

    /// Advance time-driven state. Returns true when a redraw is needed.
    fn tick(&mut self, now: Instant) -> bool {
        let _ = now;
        false
    }

    /// Check if the point (x, y) in surface coordinates is inside this widget
    fn contains_point(&self, x: f32, y: f32) -> bool {
        let _ = (x, y);
        false
    }
}
