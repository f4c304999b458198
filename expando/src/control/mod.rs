//! The expandable segmented control.

mod events;
mod layout;
mod render;

use std::time::{Duration, Instant};

use log::{debug, warn};

use crate::animation::{Animator, PropertyValue, TransitionConfig};
use crate::error::ControlError;
use crate::geometry::{Point, Rect};
use crate::segment::{Segment, SegmentValue, SegmentView};
use crate::style::ControlStyle;
use crate::timer::IdleTimer;

pub use events::{ControlEvent, EventResult};

use layout::compute_layout;

/// Which segment a property belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentSlot {
    Title,
    Item(usize),
}

/// Animated properties of the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimationKey {
    Bounds,
    Frame(SegmentSlot),
    Opacity(SegmentSlot),
}

/// A left title followed by a row of selectable items.
///
/// Collapsed, it shows the title and the selected item. A tap expands it to
/// reveal every item; a tap on an item selects it and collapses again. With a
/// non-zero timeout, an expanded control collapses on its own when left idle.
/// In toggle mode a tap cycles the selection and the control never expands.
///
/// All mutation happens on the host event loop: feed input to
/// `handle_event`, call `tick` on every loop iteration, and `render` when
/// `is_dirty` or `is_animating`.
///
/// # Example
///
/// ```
/// use expando::{ExpandableSegmentedControl, Point};
///
/// let mut flash = ExpandableSegmentedControl::new(
///     Point::new(2, 1),
///     Some("Flash".into()),
///     vec!["Auto".into(), "On".into(), "Off".into()],
/// );
///
/// flash.set_expanded(true, false);
/// flash.set_selected_item(2, false);
/// flash.set_expanded(false, false);
/// assert_eq!(flash.selected_item(), Some(2));
/// ```
#[derive(Debug)]
pub struct ExpandableSegmentedControl {
    anchor: Point,
    style: ControlStyle,
    title: Option<Segment>,
    items: Vec<Segment>,
    selected: Option<usize>,
    expanded: bool,
    /// Model bounds; the presented bounds may lag behind while animating.
    bounds: Rect,
    animator: Animator<AnimationKey>,
    idle_timer: IdleTimer,
    /// Where the current touch went down, if it is still a candidate tap.
    pending_tap: Option<Point>,
    focused: bool,
    dirty: bool,
    events: Vec<ControlEvent>,
}

impl ExpandableSegmentedControl {
    /// Create a collapsed control with the default style.
    pub fn new(anchor: Point, left_title: Option<SegmentValue>, items: Vec<SegmentValue>) -> Self {
        Self::with_style(anchor, left_title, items, ControlStyle::default())
    }

    pub fn with_style(
        anchor: Point,
        left_title: Option<SegmentValue>,
        items: Vec<SegmentValue>,
        style: ControlStyle,
    ) -> Self {
        let items: Vec<Segment> = items
            .into_iter()
            .map(|value| Segment::new(value.into_view()))
            .collect();
        let selected = (!items.is_empty()).then_some(0);

        let mut control = Self {
            anchor,
            style,
            title: left_title.map(|value| Segment::new(value.into_view())),
            items,
            selected,
            expanded: false,
            bounds: Rect::default(),
            animator: Animator::new(),
            idle_timer: IdleTimer::new(),
            pending_tap: None,
            focused: false,
            dirty: true,
            events: Vec::new(),
        };
        control.apply_label_styles();
        control.relayout(None, Instant::now());
        control
    }

    // -------------------------------------------------------------------------
    // Read methods
    // -------------------------------------------------------------------------

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Selected item index, or None when there are no items.
    pub fn selected_item(&self) -> Option<usize> {
        self.selected
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn has_left_title(&self) -> bool {
        self.title.is_some()
    }

    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Model bounds, i.e. where the control ends up once animations finish.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn style(&self) -> &ControlStyle {
        &self.style
    }

    /// Segment views in display order: the left title first, then the items.
    pub fn labels(&self) -> impl Iterator<Item = &dyn SegmentView> + '_ {
        self.segments().map(|(_, segment)| segment.view())
    }

    pub fn title_segment(&self) -> Option<&Segment> {
        self.title.as_ref()
    }

    pub fn item_segment(&self, index: usize) -> Option<&Segment> {
        self.items.get(index)
    }

    /// Model frames of every visible segment, left to right.
    pub fn visible_frames(&self) -> Vec<Rect> {
        let mut frames: Vec<Rect> = self
            .segments()
            .filter(|(_, segment)| segment.is_visible())
            .map(|(_, segment)| segment.frame())
            .collect();
        frames.sort_by_key(|frame| frame.x);
        frames
    }

    /// Indices of items currently shown.
    pub fn visible_items(&self) -> Vec<usize> {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, segment)| segment.is_visible())
            .map(|(index, _)| index)
            .collect()
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.focused != focused {
            self.focused = focused;
            self.dirty = true;
        }
    }

    // -------------------------------------------------------------------------
    // Property setters
    // -------------------------------------------------------------------------

    /// Mutable access for bulk style changes. Call `update_display` afterwards.
    pub fn style_mut(&mut self) -> &mut ControlStyle {
        &mut self.style
    }

    pub fn set_use_animation(&mut self, enabled: bool) {
        self.style.use_animation = enabled;
    }

    /// Enabling toggle mode collapses an expanded control immediately.
    pub fn set_toggle_mode(&mut self, enabled: bool) {
        self.style.toggle_mode = enabled;
        if enabled && self.expanded {
            self.set_expanded(false, false);
        }
    }

    /// Change the idle timeout. Zero disarms any pending auto-collapse.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.set_timeout_at(timeout, Instant::now());
    }

    /// Same as `set_timeout`; an expanded control re-arms from `now`.
    pub fn set_timeout_at(&mut self, timeout: Duration, now: Instant) {
        self.style.timeout = timeout;
        if timeout.is_zero() {
            self.idle_timer.cancel();
        } else if self.expanded {
            self.idle_timer.arm(now, timeout);
        }
    }

    /// Move the control. Applies immediately.
    pub fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
        self.animator.clear();
        self.relayout(None, Instant::now());
    }

    /// Complete every transition instantly from now on.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.animator.set_reduced_motion(enabled);
        self.dirty = true;
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Select an item. Out-of-range indices are ignored.
    pub fn set_selected_item(&mut self, index: usize, animated: bool) {
        if let Err(err) = self.try_set_selected_item(index, animated) {
            warn!("ignoring selection request: {}", err);
        }
    }

    /// Select an item, reporting why a request was rejected.
    pub fn try_set_selected_item(&mut self, index: usize, animated: bool) -> Result<(), ControlError> {
        self.select_at(index, animated, Instant::now())
    }

    /// Expand or collapse. In toggle mode expansion is refused.
    pub fn set_expanded(&mut self, expanded: bool, animated: bool) {
        self.set_expanded_at(expanded, animated, Instant::now());
    }

    /// Replace the left title. `None` removes it.
    pub fn set_left_title(&mut self, left_title: Option<SegmentValue>) {
        self.title = left_title.map(|value| Segment::new(value.into_view()));
        self.animator.clear();
        self.apply_label_styles();
        self.relayout(None, Instant::now());
    }

    /// Replace the items, keeping the selection when it is still in range.
    pub fn set_items(&mut self, items: Vec<SegmentValue>) {
        self.items = items
            .into_iter()
            .map(|value| Segment::new(value.into_view()))
            .collect();

        let previous = self.selected;
        self.selected = match previous {
            Some(index) if index < self.items.len() => Some(index),
            _ if self.items.is_empty() => None,
            _ => Some(0),
        };
        if self.selected != previous {
            debug!("selection reset from {:?} to {:?} after items changed", previous, self.selected);
            if let Some(selected) = self.selected {
                self.events.push(ControlEvent::ValueChanged { selected });
            }
        }

        self.animator.clear();
        self.apply_label_styles();
        self.relayout(None, Instant::now());
    }

    /// Cancel a pending auto-collapse. The expansion state is left alone.
    pub fn disable_timeout(&mut self) {
        if self.idle_timer.cancel() {
            debug!("idle timeout disabled");
        }
    }

    /// Re-read sizes and style and lay out again without animation.
    pub fn update_display(&mut self) {
        self.update_display_at(Instant::now());
    }

    /// Same as `update_display`, with an explicit timestamp.
    ///
    /// Behaviour flags changed through `style_mut` take effect here: a zero
    /// timeout disarms the idle timer and toggle mode collapses the control.
    pub fn update_display_at(&mut self, now: Instant) {
        for (_, segment) in self.segments_mut() {
            segment.size = segment.view.default_size();
        }
        self.animator.clear();
        self.apply_label_styles();
        self.relayout(None, now);

        if self.style.timeout.is_zero() && self.idle_timer.cancel() {
            debug!("timeout set to zero, idle timer disarmed");
        }
        if self.style.toggle_mode && self.expanded {
            self.set_expanded_at(false, false, now);
        }
    }

    // -------------------------------------------------------------------------
    // Event loop integration
    // -------------------------------------------------------------------------

    /// Advance timers and transitions. Returns true when a redraw is needed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.idle_timer.fire(now).is_some() {
            debug!("idle timeout fired, collapsing");
            let animated = self.style.use_animation;
            self.set_expanded_at(false, animated, now);
        }

        let was_animating = self.animator.is_animating();
        let animating = self.animator.prune(now);
        self.dirty || animating || was_animating
    }

    /// Next instant `tick` has work to do for the idle timer.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.idle_timer.deadline()
    }

    pub fn is_animating(&self) -> bool {
        self.animator.is_animating()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Take the events produced since the last call.
    pub fn drain_events(&mut self) -> Vec<ControlEvent> {
        std::mem::take(&mut self.events)
    }

    /// Bounds as currently presented, mid-animation included.
    pub fn presented_bounds(&self, now: Instant) -> Rect {
        self.animator
            .value_at(&AnimationKey::Bounds, now)
            .and_then(|value| value.as_frame())
            .unwrap_or(self.bounds)
    }

    pub fn presented_frame(&self, slot: SegmentSlot, now: Instant) -> Option<Rect> {
        let segment = self.segment(slot)?;
        Some(
            self.animator
                .value_at(&AnimationKey::Frame(slot), now)
                .and_then(|value| value.as_frame())
                .unwrap_or(segment.frame),
        )
    }

    pub fn presented_opacity(&self, slot: SegmentSlot, now: Instant) -> Option<f32> {
        let segment = self.segment(slot)?;
        Some(
            self.animator
                .value_at(&AnimationKey::Opacity(slot), now)
                .and_then(|value| value.as_opacity())
                .unwrap_or(segment.opacity),
        )
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn select_at(&mut self, index: usize, animated: bool, now: Instant) -> Result<(), ControlError> {
        if self.items.is_empty() {
            return Err(ControlError::NoItems);
        }
        if index >= self.items.len() {
            return Err(ControlError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }

        let previous = self.selected.replace(index);
        self.apply_label_styles();
        self.relayout(self.style.transition_for(animated), now);

        if previous != Some(index) {
            debug!("selected item {:?} -> {}", previous, index);
            self.events.push(ControlEvent::ValueChanged { selected: index });
        }
        Ok(())
    }

    fn set_expanded_at(&mut self, expanded: bool, animated: bool, now: Instant) {
        if expanded && self.style.toggle_mode {
            debug!("toggle mode: not expanding");
            return;
        }

        if expanded && !self.style.timeout.is_zero() {
            self.idle_timer.arm(now, self.style.timeout);
        } else {
            self.idle_timer.cancel();
        }

        if self.expanded == expanded {
            return;
        }

        self.expanded = expanded;
        self.relayout(self.style.transition_for(animated), now);

        debug!("control {}", if expanded { "expanded" } else { "collapsed" });
        self.events.push(if expanded {
            ControlEvent::Expanded
        } else {
            ControlEvent::Collapsed
        });
    }

    /// Push the selection marker, fonts and text color to every segment.
    fn apply_label_styles(&mut self) {
        let text_color = self.style.text_color;
        let title_font = self.style.label_font;
        if let Some(title) = self.title.as_mut() {
            title.view.apply_label_style(title_font, text_color);
            title.set_selected(false);
        }

        for (index, segment) in self.items.iter_mut().enumerate() {
            let selected = self.selected == Some(index);
            segment
                .view
                .apply_label_style(self.style.font_for(selected), text_color);
            segment.set_selected(selected);
        }
        self.dirty = true;
    }

    /// Compute the target layout and move every segment to it, animated when
    /// `transition` is set.
    fn relayout(&mut self, transition: Option<TransitionConfig>, now: Instant) {
        let item_sizes: Vec<_> = self.items.iter().map(|segment| segment.size).collect();
        let plan = compute_layout(
            self.anchor,
            self.title.as_ref().map(|segment| segment.size),
            &item_sizes,
            self.selected,
            self.expanded,
            &self.style,
        );

        let old_bounds = self.bounds;
        self.bounds = plan.bounds;
        self.animate(
            AnimationKey::Bounds,
            PropertyValue::Frame(old_bounds),
            PropertyValue::Frame(plan.bounds),
            transition,
            now,
        );

        if let (Some(frame), Some(title)) = (plan.title, self.title.as_mut()) {
            let old_frame = std::mem::replace(&mut title.frame, frame);
            title.opacity = 1.0;
            self.animate(
                AnimationKey::Frame(SegmentSlot::Title),
                PropertyValue::Frame(old_frame),
                PropertyValue::Frame(frame),
                transition,
                now,
            );
        }

        for (index, (frame, opacity)) in plan.items.into_iter().enumerate() {
            let Some(segment) = self.items.get_mut(index) else {
                continue;
            };
            let old_frame = std::mem::replace(&mut segment.frame, frame);
            let old_opacity = std::mem::replace(&mut segment.opacity, opacity);
            let slot = SegmentSlot::Item(index);
            self.animate(
                AnimationKey::Frame(slot),
                PropertyValue::Frame(old_frame),
                PropertyValue::Frame(frame),
                transition,
                now,
            );
            self.animate(
                AnimationKey::Opacity(slot),
                PropertyValue::Opacity(old_opacity),
                PropertyValue::Opacity(opacity),
                transition,
                now,
            );
        }

        self.dirty = true;
    }

    fn animate(
        &mut self,
        key: AnimationKey,
        from: PropertyValue,
        to: PropertyValue,
        transition: Option<TransitionConfig>,
        now: Instant,
    ) {
        match transition {
            Some(config) => self.animator.start(key, from, to, config, now),
            None => self.animator.cancel(&key),
        }
    }

    fn segment(&self, slot: SegmentSlot) -> Option<&Segment> {
        match slot {
            SegmentSlot::Title => self.title.as_ref(),
            SegmentSlot::Item(index) => self.items.get(index),
        }
    }

    fn segments(&self) -> impl Iterator<Item = (SegmentSlot, &Segment)> + '_ {
        self.title
            .iter()
            .map(|segment| (SegmentSlot::Title, segment))
            .chain(
                self.items
                    .iter()
                    .enumerate()
                    .map(|(index, segment)| (SegmentSlot::Item(index), segment)),
            )
    }

    fn segments_mut(&mut self) -> impl Iterator<Item = (SegmentSlot, &mut Segment)> + '_ {
        self.title
            .iter_mut()
            .map(|segment| (SegmentSlot::Title, segment))
            .chain(
                self.items
                    .iter_mut()
                    .enumerate()
                    .map(|(index, segment)| (SegmentSlot::Item(index), segment)),
            )
    }

    /// Index of the visible item under `point`.
    fn item_at(&self, point: Point) -> Option<usize> {
        self.items
            .iter()
            .position(|segment| segment.is_visible() && segment.frame.contains(point.x, point.y))
    }
}
