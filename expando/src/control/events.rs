//! Touch and keyboard handling for the control.

use std::time::Instant;

use log::debug;

use crate::event::{Event, Key, MouseButton};
use crate::geometry::Point;

use super::ExpandableSegmentedControl;

/// Result of handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was ignored, try other handlers.
    Ignored,
    /// Event was consumed, stop propagation.
    Consumed,
}

impl EventResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, EventResult::Consumed)
    }
}

/// Something the control did that its owner may want to react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// The selected item changed.
    ValueChanged { selected: usize },
    Expanded,
    Collapsed,
}

impl ExpandableSegmentedControl {
    /// Handle input delivered by the event loop.
    pub fn handle_event(&mut self, event: &Event) -> EventResult {
        self.handle_event_at(event, Instant::now())
    }

    /// Same as `handle_event`, with an explicit timestamp for transitions and timers.
    pub fn handle_event_at(&mut self, event: &Event, now: Instant) -> EventResult {
        match *event {
            Event::Press {
                x,
                y,
                button: MouseButton::Left,
            } => self.on_press(Point::new(x, y), now),
            Event::Release {
                x,
                y,
                button: MouseButton::Left,
            } => self.on_release(Point::new(x, y), now),
            Event::Key { key, modifiers } if self.focused && modifiers.none() => {
                self.on_key(key, now)
            }
            _ => EventResult::Ignored,
        }
    }

    fn on_press(&mut self, point: Point, now: Instant) -> EventResult {
        if !self.bounds.contains(point.x, point.y) {
            self.set_focused(false);
            // A touch that went down inside but never came up is over.
            if self.pending_tap.take().is_some() {
                debug!("release never arrived, dropping pending tap");
                self.rearm_idle_timer(now);
            }
            return EventResult::Ignored;
        }

        self.set_focused(true);
        self.pending_tap = Some(point);
        // The user is interacting; hold off the auto-collapse.
        self.idle_timer.cancel();
        EventResult::Consumed
    }

    fn on_release(&mut self, point: Point, now: Instant) -> EventResult {
        let Some(_down) = self.pending_tap.take() else {
            return EventResult::Ignored;
        };

        if self.bounds.contains(point.x, point.y) {
            self.tap(point, now);
        } else {
            debug!("touch left the control, tap cancelled");
            self.rearm_idle_timer(now);
        }
        EventResult::Consumed
    }

    fn on_key(&mut self, key: Key, now: Instant) -> EventResult {
        let animated = self.style.use_animation;
        match key {
            Key::Enter | Key::Space => {
                if self.expanded {
                    self.set_expanded_at(false, animated, now);
                } else {
                    self.tap_collapsed(now);
                }
                EventResult::Consumed
            }
            Key::Escape if self.expanded => {
                self.set_expanded_at(false, animated, now);
                EventResult::Consumed
            }
            Key::Left | Key::Right if self.expanded => {
                let Some(current) = self.selected else {
                    return EventResult::Ignored;
                };
                let next = if key == Key::Left {
                    current.checked_sub(1)
                } else {
                    Some(current + 1).filter(|next| *next < self.items.len())
                };
                if let Some(next) = next {
                    let _ = self.select_at(next, animated, now);
                }
                self.rearm_idle_timer(now);
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    /// A completed tap inside the control.
    fn tap(&mut self, point: Point, now: Instant) {
        if !self.expanded {
            self.tap_collapsed(now);
            return;
        }

        let animated = self.style.use_animation;
        if let Some(index) = self.item_at(point) {
            if self.selected != Some(index) {
                let _ = self.select_at(index, animated, now);
            }
        }
        self.set_expanded_at(false, animated, now);
    }

    fn tap_collapsed(&mut self, now: Instant) {
        let animated = self.style.use_animation;
        if self.style.toggle_mode {
            if let Some(current) = self.selected {
                let next = (current + 1) % self.items.len();
                let _ = self.select_at(next, animated, now);
            }
        } else {
            self.set_expanded_at(true, animated, now);
        }
    }

    fn rearm_idle_timer(&mut self, now: Instant) {
        if self.expanded && !self.style.timeout.is_zero() {
            self.idle_timer.arm(now, self.style.timeout);
        }
    }
}
