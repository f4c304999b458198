//! Segment contents: the capability contract every title or item satisfies.

use std::fmt;

use crate::buffer::{Buffer, Cell};
use crate::geometry::{Rect, Size};
use crate::text::{char_width, display_width, truncate_to_width};
use crate::types::{Color, Font, Rgb};

/// Anything that can be shown inside a segment.
///
/// `default_size` and `render` are required. The remaining methods are
/// optional capabilities: a view that does not support highlighting keeps the
/// default `as_highlightable`, and highlighting it becomes a no-op.
pub trait SegmentView: fmt::Debug {
    /// Natural size in cells, before padding.
    fn default_size(&self) -> Size;

    /// Draw into `area`. `opacity` is 0.0 (invisible) to 1.0.
    fn render(&self, area: Rect, buf: &mut Buffer, opacity: f32);

    fn as_highlightable(&mut self) -> Option<&mut dyn Highlightable> {
        None
    }

    /// Receive the control's label font and text color.
    fn apply_label_style(&mut self, _font: Font, _color: Color) {}
}

/// Optional capability: show a highlighted (selected) state.
pub trait Highlightable {
    fn set_highlighted(&mut self, highlighted: bool);
    fn is_highlighted(&self) -> bool;
}

/// The built-in single-line text segment.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    text: String,
    font: Font,
    color: Color,
    highlighted: bool,
}

impl TextLabel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            font: Font::new(),
            color: Color::WHITE,
            highlighted: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> Font {
        self.font
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Font actually drawn; highlighting underlines the label.
    fn effective_font(&self) -> Font {
        if self.highlighted {
            self.font.underline()
        } else {
            self.font
        }
    }
}

impl SegmentView for TextLabel {
    fn default_size(&self) -> Size {
        Size::new(u16::try_from(display_width(&self.text)).unwrap_or(u16::MAX), 1)
    }

    fn render(&self, area: Rect, buf: &mut Buffer, opacity: f32) {
        if area.is_empty() || opacity <= 0.0 {
            return;
        }

        let text = truncate_to_width(&self.text, area.width as usize);
        let text_width = display_width(&text) as u16;
        let mut x = area.x.saturating_add((area.width - text_width) / 2);
        let y = area.y + area.height.saturating_sub(1) / 2;
        let font = self.effective_font();

        for ch in text.chars() {
            let width = char_width(ch) as u16;
            if x.saturating_add(width) > area.right() {
                break;
            }

            let bg = buf.get(x, y).map(|c| c.bg).unwrap_or(Rgb::new(0, 0, 0));
            let fg = blend(self.color, bg, opacity);
            buf.set(x, y, Cell::glyph(ch, fg, bg).with_font(font));
            if width == 2 {
                buf.set(x.saturating_add(1), y, Cell::continuation(bg));
            }
            x = x.saturating_add(width.max(1));
        }
    }

    fn as_highlightable(&mut self) -> Option<&mut dyn Highlightable> {
        Some(self)
    }

    fn apply_label_style(&mut self, font: Font, color: Color) {
        self.font = font;
        self.color = color;
    }
}

impl Highlightable for TextLabel {
    fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

/// Fade `fg` toward the background it sits on.
pub fn blend(fg: Color, bg: Rgb, opacity: f32) -> Rgb {
    if opacity >= 1.0 {
        return fg.to_rgb();
    }
    Color::from(bg).lerp(&fg, opacity).to_rgb()
}

/// A value accepted wherever a title or item is expected.
pub enum SegmentValue {
    Text(String),
    View(Box<dyn SegmentView>),
}

impl SegmentValue {
    pub fn into_view(self) -> Box<dyn SegmentView> {
        match self {
            SegmentValue::Text(text) => Box::new(TextLabel::new(text)),
            SegmentValue::View(view) => view,
        }
    }
}

impl fmt::Debug for SegmentValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentValue::Text(text) => f.debug_tuple("Text").field(text).finish(),
            SegmentValue::View(view) => f.debug_tuple("View").field(view).finish(),
        }
    }
}

impl From<&str> for SegmentValue {
    fn from(text: &str) -> Self {
        SegmentValue::Text(text.to_string())
    }
}

impl From<String> for SegmentValue {
    fn from(text: String) -> Self {
        SegmentValue::Text(text)
    }
}

impl From<Box<dyn SegmentView>> for SegmentValue {
    fn from(view: Box<dyn SegmentView>) -> Self {
        SegmentValue::View(view)
    }
}

/// One laid-out segment of the control.
#[derive(Debug)]
pub struct Segment {
    pub(crate) view: Box<dyn SegmentView>,
    /// Natural size, refreshed on every layout pass.
    pub(crate) size: Size,
    /// Model frame in screen cells.
    pub(crate) frame: Rect,
    /// Model opacity; 0.0 for hidden items.
    pub(crate) opacity: f32,
    /// Carries the selection marker.
    pub(crate) selected: bool,
}

impl Segment {
    pub(crate) fn new(view: Box<dyn SegmentView>) -> Self {
        let size = view.default_size();
        Self {
            view,
            size,
            frame: Rect::default(),
            opacity: 1.0,
            selected: false,
        }
    }

    pub fn view(&self) -> &dyn SegmentView {
        self.view.as_ref()
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Mark or unmark as selected. The view is highlighted if it supports it.
    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        if let Some(view) = self.view.as_highlightable() {
            view.set_highlighted(selected);
        }
    }
}
