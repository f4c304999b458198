//! Drawing the control into a cell buffer.

use std::collections::BTreeSet;
use std::time::Instant;

use log::trace;

use crate::buffer::Buffer;
use crate::geometry::Rect;
use crate::types::{Border, Rgb};

use super::{ExpandableSegmentedControl, SegmentSlot};

/// Segments at or above this presented opacity get a separator on their left.
const SEPARATOR_OPACITY: f32 = 0.5;

impl ExpandableSegmentedControl {
    /// Draw the control as presented at `now`.
    pub fn render(&self, buf: &mut Buffer, now: Instant) {
        let bounds = self.presented_bounds(now).intersection(buf.area());
        if bounds.is_empty() {
            return;
        }
        trace!("render control at {:?}", bounds);

        buf.fill_bg(bounds, self.style.background_color.to_rgb());

        let border = Border::for_width(self.style.border_width);
        let thickness = border.thickness();
        let inner = bounds.shrink(thickness, thickness, thickness, thickness);

        // Fading segments first so the visible ones win where they overlap.
        let mut layers: Vec<(SegmentSlot, Rect, f32)> = self
            .segments()
            .filter_map(|(slot, _)| {
                let frame = self.presented_frame(slot, now)?;
                let opacity = self.presented_opacity(slot, now)?;
                Some((slot, frame, opacity))
            })
            .filter(|(_, _, opacity)| *opacity > 0.0)
            .collect();
        layers.sort_by(|a, b| a.2.total_cmp(&b.2));

        let padding = self.style.horizontal_padding;
        for (slot, frame, opacity) in &layers {
            let Some(segment) = self.segment(*slot) else {
                continue;
            };
            let area = frame.shrink(0, padding, 0, padding).intersection(inner);
            segment.view.render(area, buf, *opacity);
        }

        self.render_border(buf, bounds, border);

        if self.style.inner_border_width > 0 {
            let columns: BTreeSet<u16> = layers
                .iter()
                .filter(|(_, frame, opacity)| *opacity >= SEPARATOR_OPACITY && frame.x > inner.x)
                .map(|(_, frame, _)| frame.x - 1)
                .filter(|x| *x < inner.right())
                .collect();
            for x in columns {
                self.render_separator(buf, bounds, inner, x, border);
            }
        }
    }

    fn render_border(&self, buf: &mut Buffer, rect: Rect, border: Border) {
        let Some((tl, tr, bl, br, h, v)) = border.glyphs() else {
            return;
        };
        if rect.width < 2 || rect.height < 2 {
            return;
        }

        let fg = self.border_rgb();

        buf.set_char(rect.x, rect.y, tl, fg);
        buf.set_char(rect.right() - 1, rect.y, tr, fg);
        buf.set_char(rect.x, rect.bottom() - 1, bl, fg);
        buf.set_char(rect.right() - 1, rect.bottom() - 1, br, fg);

        for x in (rect.x + 1)..(rect.right() - 1) {
            buf.set_char(x, rect.y, h, fg);
            buf.set_char(x, rect.bottom() - 1, h, fg);
        }

        for y in (rect.y + 1)..(rect.bottom() - 1) {
            buf.set_char(rect.x, y, v, fg);
            buf.set_char(rect.right() - 1, y, v, fg);
        }
    }

    fn render_separator(&self, buf: &mut Buffer, bounds: Rect, inner: Rect, x: u16, border: Border) {
        let fg = self.border_rgb();
        let glyph = if self.style.inner_border_width > 1 {
            '┃'
        } else {
            '│'
        };

        for y in inner.y..inner.bottom() {
            buf.set_char(x, y, glyph, fg);
        }

        if let Some((top, bottom)) = border.tees() {
            if bounds.height >= 2 {
                buf.set_char(x, bounds.y, top, fg);
                buf.set_char(x, bounds.bottom() - 1, bottom, fg);
            }
        }
    }

    fn border_rgb(&self) -> Rgb {
        self.style.border_color.to_rgb()
    }
}
