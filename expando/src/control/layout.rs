//! Geometry of the control for a given state.

use crate::geometry::{Point, Rect, Size};
use crate::style::ControlStyle;
use crate::types::Border;

/// Target geometry produced by one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct LayoutPlan {
    pub bounds: Rect,
    pub title: Option<Rect>,
    /// Frame and opacity per item, in item order.
    pub items: Vec<(Rect, f32)>,
}

/// Lay segments out left to right from `anchor`.
///
/// Every slot is the segment's natural width plus horizontal padding on both
/// sides. Collapsed, only the title and the selected item get slots; the other
/// items sit on the selected item's frame at opacity 0.
pub(crate) fn compute_layout(
    anchor: Point,
    title: Option<Size>,
    items: &[Size],
    selected: Option<usize>,
    expanded: bool,
    style: &ControlStyle,
) -> LayoutPlan {
    let border = Border::for_width(style.border_width).thickness();
    let separator = u16::from(style.inner_border_width > 0);
    let padding = style.horizontal_padding;

    let content_height = title
        .iter()
        .chain(items.iter())
        .map(|size| size.height)
        .max()
        .unwrap_or(0)
        .max(1);
    // Anchors near the edge of the coordinate space clamp instead of wrapping.
    let height = border
        .saturating_mul(2)
        .saturating_add(style.vertical_padding.saturating_mul(2))
        .saturating_add(content_height);
    let y = anchor
        .y
        .saturating_add(border)
        .saturating_add(style.vertical_padding);

    let mut x = anchor.x.saturating_add(border);
    let mut placed_any = false;
    let mut place = |width: u16| -> Rect {
        if placed_any {
            x = x.saturating_add(separator);
        }
        placed_any = true;
        let slot = width.saturating_add(padding.saturating_mul(2));
        let frame = Rect::new(x, y, slot, content_height);
        x = frame.right();
        frame
    };

    let title_frame = title.map(|size| place(size.width));

    let items_plan = if expanded {
        items
            .iter()
            .map(|size| (place(size.width), 1.0))
            .collect()
    } else {
        match selected.and_then(|index| items.get(index).map(|size| (index, size))) {
            Some((selected_index, selected_size)) => {
                let frame = place(selected_size.width);
                (0..items.len())
                    .map(|index| {
                        let opacity = if index == selected_index { 1.0 } else { 0.0 };
                        (frame, opacity)
                    })
                    .collect()
            }
            None => Vec::new(),
        }
    };

    let width = (x - anchor.x).saturating_add(border);

    LayoutPlan {
        bounds: Rect::new(anchor.x, anchor.y, width, height),
        title: title_frame,
        items: items_plan,
    }
}
