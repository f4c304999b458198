//! Style and behaviour configuration for the control.

use std::time::Duration;

use crate::animation::{Easing, TransitionConfig};
use crate::types::{Color, Font};

/// Every configurable attribute of an `ExpandableSegmentedControl`.
///
/// Mutating a style through `ExpandableSegmentedControl::style_mut` does not
/// redraw on its own; call `update_display` afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlStyle {
    /// Animate state transitions.
    pub use_animation: bool,

    /// Act as a two-state toggle: taps cycle the selection instead of expanding.
    pub toggle_mode: bool,

    /// Collapse after this long without interaction. Zero disables it.
    pub timeout: Duration,

    /// Cells on each side of every segment.
    pub horizontal_padding: u16,

    /// Rows above and below the segments.
    pub vertical_padding: u16,

    /// Outer border thickness. 0 = none, 1 = rounded, 2+ = heavy.
    pub border_width: u16,

    /// Separator thickness between segments. 0 = none.
    pub inner_border_width: u16,

    pub border_color: Color,
    pub text_color: Color,
    pub background_color: Color,

    /// Font of the selected item (and of the left title).
    pub label_font: Font,

    /// Font of unselected items. `None` means same as `label_font`.
    pub unselected_label_font: Option<Font>,

    pub transition: TransitionConfig,
}

impl Default for ControlStyle {
    fn default() -> Self {
        Self {
            use_animation: true,
            toggle_mode: false,
            timeout: Duration::from_secs(4),
            horizontal_padding: 1,
            vertical_padding: 0,
            border_width: 1,
            inner_border_width: 1,
            border_color: Color::oklch(0.75, 0.0, 0.0),
            text_color: Color::WHITE,
            background_color: Color::BLACK,
            label_font: Font::new().bold(),
            unselected_label_font: None,
            transition: TransitionConfig::new(Duration::from_millis(200), Easing::EaseInOut),
        }
    }
}

impl ControlStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_animation(mut self, enabled: bool) -> Self {
        self.use_animation = enabled;
        self
    }

    pub fn toggle_mode(mut self, enabled: bool) -> Self {
        self.toggle_mode = enabled;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Disable the auto-collapse timeout.
    pub fn no_timeout(self) -> Self {
        self.timeout(Duration::ZERO)
    }

    pub fn horizontal_padding(mut self, cells: u16) -> Self {
        self.horizontal_padding = cells;
        self
    }

    pub fn vertical_padding(mut self, rows: u16) -> Self {
        self.vertical_padding = rows;
        self
    }

    pub fn border_width(mut self, width: u16) -> Self {
        self.border_width = width;
        self
    }

    pub fn inner_border_width(mut self, width: u16) -> Self {
        self.inner_border_width = width;
        self
    }

    pub fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    pub fn text_color(mut self, color: Color) -> Self {
        self.text_color = color;
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    pub fn label_font(mut self, font: Font) -> Self {
        self.label_font = font;
        self
    }

    pub fn unselected_label_font(mut self, font: Font) -> Self {
        self.unselected_label_font = Some(font);
        self
    }

    pub fn transition(mut self, duration: Duration, easing: Easing) -> Self {
        self.transition = TransitionConfig::new(duration, easing);
        self
    }

    /// Font for a segment given whether it is the selected one.
    pub fn font_for(&self, selected: bool) -> Font {
        if selected {
            self.label_font
        } else {
            self.unselected_label_font.unwrap_or(self.label_font)
        }
    }

    /// Transition to use for a change, or None when it should apply immediately.
    pub fn transition_for(&self, animated: bool) -> Option<TransitionConfig> {
        animated.then_some(self.transition)
    }
}
