use std::cell::Cell as StdCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use expando::{
    Buffer, ControlError, ControlEvent, ControlStyle, Event, EventResult,
    ExpandableSegmentedControl, Highlightable, Key, Point, Rect, SegmentSlot, SegmentValue,
    SegmentView, Size,
};

fn flash() -> ExpandableSegmentedControl {
    ExpandableSegmentedControl::new(
        Point::new(0, 0),
        Some("Flash".into()),
        vec!["Auto".into(), "On".into(), "Off".into()],
    )
}

fn instant_flash() -> ExpandableSegmentedControl {
    ExpandableSegmentedControl::with_style(
        Point::new(0, 0),
        Some("Flash".into()),
        vec!["Auto".into(), "On".into(), "Off".into()],
        ControlStyle::new().use_animation(false),
    )
}

fn tap(control: &mut ExpandableSegmentedControl, x: u16, y: u16, now: Instant) {
    control.handle_event_at(&Event::press(x, y), now);
    control.handle_event_at(&Event::release(x, y), now);
}

fn selected_marks(control: &ExpandableSegmentedControl) -> Vec<bool> {
    (0..control.item_count())
        .map(|index| control.item_segment(index).is_some_and(|s| s.is_selected()))
        .collect()
}

/// A view that records whether it was highlighted.
#[derive(Debug)]
struct HighlightRecorder {
    highlighted: Rc<StdCell<bool>>,
}

impl SegmentView for HighlightRecorder {
    fn default_size(&self) -> Size {
        Size::new(3, 1)
    }

    fn render(&self, _area: Rect, _buf: &mut Buffer, _opacity: f32) {}

    fn as_highlightable(&mut self) -> Option<&mut dyn Highlightable> {
        Some(self)
    }
}

impl Highlightable for HighlightRecorder {
    fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted.set(highlighted);
    }

    fn is_highlighted(&self) -> bool {
        self.highlighted.get()
    }
}

/// A view with only the required capability.
#[derive(Debug)]
struct Plain;

impl SegmentView for Plain {
    fn default_size(&self) -> Size {
        Size::new(2, 1)
    }

    fn render(&self, _area: Rect, _buf: &mut Buffer, _opacity: f32) {}
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_new_control_is_collapsed_on_first_item() {
    let control = flash();

    assert!(!control.is_expanded());
    assert_eq!(control.selected_item(), Some(0));
    assert!(control.has_left_title());
    assert_eq!(control.item_count(), 3);
    assert_eq!(control.visible_items(), vec![0]);
    assert_eq!(control.bounds(), Rect::new(0, 0, 16, 3));
}

#[test]
fn test_new_control_without_items_has_no_selection() {
    let control = ExpandableSegmentedControl::new(Point::new(0, 0), Some("Mode".into()), vec![]);

    assert_eq!(control.selected_item(), None);
    assert!(control.visible_items().is_empty());
    assert_eq!(control.visible_frames().len(), 1);
}

#[test]
fn test_collapsed_frames_are_title_then_selection() {
    let control = flash();

    assert_eq!(
        control.visible_frames(),
        vec![Rect::new(1, 1, 7, 1), Rect::new(9, 1, 6, 1)]
    );
}

// ============================================================================
// Selection
// ============================================================================

#[test]
fn test_exactly_one_item_carries_the_selection_marker() {
    let mut control = flash();

    for index in 0..3 {
        control.set_selected_item(index, false);
        let marks = selected_marks(&control);
        assert_eq!(marks.iter().filter(|m| **m).count(), 1);
        assert!(marks[index]);
        assert_eq!(control.selected_item(), Some(index));
    }
    assert!(!control.title_segment().is_some_and(|s| s.is_selected()));
}

#[test]
fn test_out_of_range_selection_is_ignored() {
    let mut control = flash();
    control.set_selected_item(1, false);
    let frames = control.visible_frames();
    control.drain_events();

    control.set_selected_item(7, false);

    assert_eq!(control.selected_item(), Some(1));
    assert_eq!(control.visible_frames(), frames);
    assert!(control.drain_events().is_empty());
}

#[test]
fn test_try_select_reports_rejection() {
    let mut control = flash();

    assert_eq!(
        control.try_set_selected_item(3, false),
        Err(ControlError::IndexOutOfRange { index: 3, len: 3 })
    );
    assert_eq!(control.try_set_selected_item(2, false), Ok(()));
    assert_eq!(control.selected_item(), Some(2));
}

#[test]
fn test_selecting_while_collapsed_swaps_the_shown_item() {
    let mut control = flash();

    control.set_selected_item(2, false);

    assert_eq!(control.visible_items(), vec![2]);
    // "Off" is one cell narrower than "Auto".
    assert_eq!(control.bounds(), Rect::new(0, 0, 15, 3));
}

#[test]
fn test_selection_change_emits_value_changed_once() {
    let mut control = flash();

    control.set_selected_item(1, false);
    control.set_selected_item(1, false);

    assert_eq!(
        control.drain_events(),
        vec![ControlEvent::ValueChanged { selected: 1 }]
    );
}

#[test]
fn test_highlight_reaches_views_that_support_it() {
    let first = Rc::new(StdCell::new(false));
    let second = Rc::new(StdCell::new(false));
    let mut control = ExpandableSegmentedControl::new(
        Point::new(0, 0),
        None,
        vec![
            SegmentValue::View(Box::new(HighlightRecorder {
                highlighted: first.clone(),
            })),
            SegmentValue::View(Box::new(HighlightRecorder {
                highlighted: second.clone(),
            })),
            SegmentValue::View(Box::new(Plain)),
        ],
    );

    assert!(first.get());
    assert!(!second.get());

    control.set_selected_item(1, false);
    assert!(!first.get());
    assert!(second.get());

    // No highlight capability: selection still works.
    control.set_selected_item(2, false);
    assert_eq!(control.selected_item(), Some(2));
    assert!(!first.get());
    assert!(!second.get());
    assert_eq!(selected_marks(&control), vec![false, false, true]);
}

// ============================================================================
// Expansion
// ============================================================================

#[test]
fn test_expanded_shows_every_item() {
    let mut control = flash();

    control.set_expanded(true, false);

    assert!(control.is_expanded());
    assert_eq!(control.visible_items(), vec![0, 1, 2]);
    assert_eq!(
        control.visible_frames(),
        vec![
            Rect::new(1, 1, 7, 1),
            Rect::new(9, 1, 6, 1),
            Rect::new(16, 1, 4, 1),
            Rect::new(21, 1, 5, 1),
        ]
    );
    assert_eq!(control.bounds(), Rect::new(0, 0, 27, 3));
}

#[test]
fn test_expand_then_collapse_restores_layout() {
    let mut control = flash();
    control.set_selected_item(1, false);
    let frames = control.visible_frames();
    let bounds = control.bounds();

    control.set_expanded(true, false);
    control.set_expanded(false, false);

    assert_eq!(control.visible_frames(), frames);
    assert_eq!(control.bounds(), bounds);
}

#[test]
fn test_expansion_events() {
    let mut control = flash();

    control.set_expanded(true, false);
    control.set_expanded(true, false);
    control.set_expanded(false, false);

    assert_eq!(
        control.drain_events(),
        vec![ControlEvent::Expanded, ControlEvent::Collapsed]
    );
    assert!(control.drain_events().is_empty());
}

#[test]
fn test_collapsed_hidden_items_share_the_selected_frame() {
    let control = flash();
    let shown = control.item_segment(0).map(|s| s.frame());

    for index in 1..3 {
        let segment = control.item_segment(index).unwrap();
        assert!(!segment.is_visible());
        assert_eq!(Some(segment.frame()), shown);
    }
}

// ============================================================================
// Content Replacement
// ============================================================================

#[test]
fn test_set_items_keeps_valid_selection() {
    let mut control = flash();
    control.set_selected_item(1, false);
    control.drain_events();

    control.set_items(vec!["Low".into(), "Mid".into(), "High".into()]);

    assert_eq!(control.selected_item(), Some(1));
    assert!(control.drain_events().is_empty());
}

#[test]
fn test_set_items_shorter_resets_selection() {
    let mut control = flash();
    control.set_selected_item(2, false);
    control.drain_events();

    control.set_items(vec!["A".into(), "B".into()]);

    assert_eq!(control.selected_item(), Some(0));
    assert_eq!(selected_marks(&control), vec![true, false]);
    assert_eq!(
        control.drain_events(),
        vec![ControlEvent::ValueChanged { selected: 0 }]
    );
}

#[test]
fn test_set_items_empty_clears_selection() {
    let mut control = flash();

    control.set_items(vec![]);

    assert_eq!(control.selected_item(), None);
    assert_eq!(control.try_set_selected_item(0, false), Err(ControlError::NoItems));
    control.set_selected_item(0, false);
    assert_eq!(control.selected_item(), None);
}

#[test]
fn test_remove_left_title() {
    let mut control = flash();

    control.set_left_title(None);

    assert!(!control.has_left_title());
    assert_eq!(control.visible_frames(), vec![Rect::new(1, 1, 6, 1)]);
    assert_eq!(control.bounds(), Rect::new(0, 0, 8, 3));
}

#[test]
fn test_update_display_applies_style_changes() {
    let mut control = flash();

    control.style_mut().horizontal_padding = 0;
    assert_eq!(control.bounds(), Rect::new(0, 0, 16, 3));

    control.update_display();

    assert_eq!(control.bounds(), Rect::new(0, 0, 12, 3));
    assert_eq!(control.selected_item(), Some(0));
    assert!(!control.is_expanded());
}

#[test]
fn test_update_display_applies_zero_timeout() {
    let mut control = instant_flash();
    let t0 = Instant::now();
    tap(&mut control, 10, 1, t0);
    assert!(control.next_deadline().is_some());

    control.style_mut().timeout = Duration::ZERO;
    control.update_display_at(t0);

    assert!(control.next_deadline().is_none());
    control.tick(t0 + Duration::from_secs(60));
    assert!(control.is_expanded());
}

#[test]
fn test_update_display_applies_toggle_mode() {
    let mut control = instant_flash();
    control.set_expanded(true, false);
    control.drain_events();

    control.style_mut().toggle_mode = true;
    control.update_display();

    assert!(!control.is_expanded());
    assert_eq!(control.visible_items(), vec![0]);
    assert!(control.next_deadline().is_none());
    assert_eq!(control.drain_events(), vec![ControlEvent::Collapsed]);
}

#[test]
fn test_anchor_at_coordinate_edge_clamps() {
    let mut control = ExpandableSegmentedControl::new(
        Point::new(u16::MAX - 3, 0),
        Some("Flash".into()),
        vec!["Auto".into(), "On".into()],
    );
    assert_eq!(control.bounds().x, u16::MAX - 3);
    assert_eq!(control.bounds().right(), u16::MAX);

    control.set_expanded(true, false);
    let mut buf = Buffer::new(10, 3);
    control.render(&mut buf, Instant::now());

    assert_eq!(buf.row_text(1), "          ");
}

#[test]
fn test_set_anchor_moves_everything() {
    let mut control = flash();

    control.set_anchor(Point::new(4, 2));

    assert_eq!(control.bounds(), Rect::new(4, 2, 16, 3));
    assert_eq!(control.visible_frames()[0], Rect::new(5, 3, 7, 1));
}

// ============================================================================
// Touch Handling
// ============================================================================

#[test]
fn test_tap_collapsed_expands() {
    let mut control = instant_flash();
    let now = Instant::now();

    tap(&mut control, 10, 1, now);

    assert!(control.is_expanded());
    assert_eq!(control.selected_item(), Some(0));
}

#[test]
fn test_tap_item_while_expanded_selects_and_collapses() {
    let mut control = instant_flash();
    let now = Instant::now();
    tap(&mut control, 10, 1, now);
    control.drain_events();

    tap(&mut control, 22, 1, now);

    assert!(!control.is_expanded());
    assert_eq!(control.selected_item(), Some(2));
    assert_eq!(
        control.drain_events(),
        vec![
            ControlEvent::ValueChanged { selected: 2 },
            ControlEvent::Collapsed
        ]
    );
}

#[test]
fn test_tap_selected_item_or_title_recollapses() {
    let mut control = instant_flash();
    let now = Instant::now();

    tap(&mut control, 10, 1, now);
    tap(&mut control, 10, 1, now);
    assert!(!control.is_expanded());

    tap(&mut control, 10, 1, now);
    tap(&mut control, 3, 1, now);
    assert!(!control.is_expanded());
    assert_eq!(control.selected_item(), Some(0));
}

#[test]
fn test_release_outside_cancels_tap() {
    let mut control = instant_flash();
    let now = Instant::now();

    control.handle_event_at(&Event::press(10, 1), now);
    control.handle_event_at(&Event::release(40, 1), now);

    assert!(!control.is_expanded());
}

#[test]
fn test_press_outside_is_ignored() {
    let mut control = instant_flash();

    let result = control.handle_event_at(&Event::press(40, 10), Instant::now());

    assert_eq!(result, EventResult::Ignored);
    assert!(!control.is_focused());
}

#[test]
fn test_press_outside_drops_unreleased_tap() {
    let mut control = instant_flash();
    let t0 = Instant::now();
    tap(&mut control, 10, 1, t0);

    // The release for this press is lost.
    let t1 = t0 + Duration::from_secs(1);
    control.handle_event_at(&Event::press(16, 1), t1);
    assert!(control.next_deadline().is_none());

    control.handle_event_at(&Event::press(60, 20), t1);
    assert_eq!(control.next_deadline(), Some(t1 + Duration::from_secs(4)));

    // A later release inside must not complete the stale tap.
    control.handle_event_at(&Event::release(16, 1), t1);
    assert!(control.is_expanded());
    assert_eq!(control.selected_item(), Some(0));

    control.tick(t1 + Duration::from_secs(4));
    assert!(!control.is_expanded());
}

// ============================================================================
// Toggle Mode
// ============================================================================

fn hdr() -> ExpandableSegmentedControl {
    ExpandableSegmentedControl::with_style(
        Point::new(0, 0),
        Some("HDR".into()),
        vec!["On".into(), "Off".into()],
        ControlStyle::new().toggle_mode(true).use_animation(false),
    )
}

#[test]
fn test_toggle_mode_flips_without_expanding() {
    let mut control = hdr();
    let now = Instant::now();

    for expected in [1, 0, 1, 0] {
        tap(&mut control, 2, 1, now);
        assert_eq!(control.selected_item(), Some(expected));
        assert!(!control.is_expanded());
        assert_eq!(control.visible_items(), vec![expected]);
    }
}

#[test]
fn test_toggle_mode_refuses_expansion() {
    let mut control = hdr();

    control.set_expanded(true, false);

    assert!(!control.is_expanded());
    assert!(control.next_deadline().is_none());
}

#[test]
fn test_enabling_toggle_mode_collapses() {
    let mut control = instant_flash();
    control.set_expanded(true, false);

    control.set_toggle_mode(true);

    assert!(!control.is_expanded());
}

// ============================================================================
// Idle Timeout
// ============================================================================

#[test]
fn test_idle_timeout_collapses() {
    let mut control = instant_flash();
    let t0 = Instant::now();
    tap(&mut control, 10, 1, t0);

    assert_eq!(control.next_deadline(), Some(t0 + Duration::from_secs(4)));

    control.tick(t0 + Duration::from_secs(3));
    assert!(control.is_expanded());

    control.tick(t0 + Duration::from_secs(4));
    assert!(!control.is_expanded());
    assert!(control.next_deadline().is_none());
    assert_eq!(control.drain_events().last(), Some(&ControlEvent::Collapsed));
}

#[test]
fn test_disable_timeout_keeps_control_expanded() {
    let mut control = instant_flash();
    let t0 = Instant::now();
    tap(&mut control, 10, 1, t0);

    control.disable_timeout();
    control.tick(t0 + Duration::from_secs(60));

    assert!(control.is_expanded());
}

#[test]
fn test_zero_timeout_never_arms() {
    let mut control = instant_flash();
    control.set_timeout(Duration::ZERO);
    let t0 = Instant::now();

    tap(&mut control, 10, 1, t0);

    assert!(control.next_deadline().is_none());
    control.tick(t0 + Duration::from_secs(60));
    assert!(control.is_expanded());
}

#[test]
fn test_set_timeout_rearms_from_given_time() {
    let mut control = instant_flash();
    let t0 = Instant::now();
    tap(&mut control, 10, 1, t0);

    let t1 = t0 + Duration::from_secs(1);
    control.set_timeout_at(Duration::from_secs(2), t1);
    assert_eq!(control.next_deadline(), Some(t1 + Duration::from_secs(2)));

    control.tick(t1 + Duration::from_secs(2));
    assert!(!control.is_expanded());

    control.set_timeout_at(Duration::ZERO, t1);
    assert!(control.next_deadline().is_none());
}

#[test]
fn test_explicit_collapse_cancels_timer() {
    let mut control = instant_flash();
    control.set_expanded(true, false);
    assert!(control.next_deadline().is_some());

    control.set_expanded(false, false);

    assert!(control.next_deadline().is_none());
}

#[test]
fn test_interaction_postpones_timeout() {
    let mut control = instant_flash();
    let t0 = Instant::now();
    tap(&mut control, 10, 1, t0);

    let t1 = t0 + Duration::from_secs(2);
    control.handle_event_at(&Event::press(16, 1), t1);
    assert!(control.next_deadline().is_none());

    control.handle_event_at(&Event::release(40, 1), t1);
    assert_eq!(control.next_deadline(), Some(t1 + Duration::from_secs(4)));

    control.tick(t0 + Duration::from_secs(4));
    assert!(control.is_expanded());
    control.tick(t1 + Duration::from_secs(4));
    assert!(!control.is_expanded());
}

// ============================================================================
// Keyboard
// ============================================================================

#[test]
fn test_keys_ignored_without_focus() {
    let mut control = instant_flash();

    let result = control.handle_event(&Event::key(Key::Enter));

    assert_eq!(result, EventResult::Ignored);
    assert!(!control.is_expanded());
}

#[test]
fn test_keyboard_navigation() {
    let mut control = instant_flash();
    control.set_focused(true);

    control.handle_event(&Event::key(Key::Enter));
    assert!(control.is_expanded());

    control.handle_event(&Event::key(Key::Right));
    control.handle_event(&Event::key(Key::Right));
    control.handle_event(&Event::key(Key::Right));
    assert_eq!(control.selected_item(), Some(2));

    control.handle_event(&Event::key(Key::Left));
    assert_eq!(control.selected_item(), Some(1));
    assert!(control.is_expanded());

    control.handle_event(&Event::key(Key::Escape));
    assert!(!control.is_expanded());
    assert_eq!(control.selected_item(), Some(1));
}

#[test]
fn test_space_toggles_in_toggle_mode() {
    let mut control = hdr();
    control.set_focused(true);

    control.handle_event(&Event::key(Key::Space));

    assert_eq!(control.selected_item(), Some(1));
    assert!(!control.is_expanded());
}

// ============================================================================
// Animated Transitions
// ============================================================================

#[test]
fn test_animated_expand_starts_from_collapsed_bounds() {
    let mut control = flash();
    let collapsed = control.bounds();
    let t0 = Instant::now();

    tap(&mut control, 10, 1, t0);

    assert!(control.is_animating());
    assert_eq!(control.presented_bounds(t0), collapsed);
    assert_eq!(
        control.presented_bounds(t0 + Duration::from_millis(200)),
        control.bounds()
    );

    let mid = control.presented_bounds(t0 + Duration::from_millis(100));
    assert!(mid.width > collapsed.width && mid.width < control.bounds().width);

    assert!(control.tick(t0 + Duration::from_millis(200)));
    assert!(!control.is_animating());
}

#[test]
fn test_hidden_items_fade_in() {
    let mut control = flash();
    let t0 = Instant::now();

    tap(&mut control, 10, 1, t0);

    let slot = SegmentSlot::Item(2);
    assert_eq!(control.presented_opacity(slot, t0), Some(0.0));
    let halfway = control
        .presented_opacity(slot, t0 + Duration::from_millis(100))
        .unwrap();
    assert!(halfway > 0.0 && halfway < 1.0);
    assert_eq!(
        control.presented_opacity(slot, t0 + Duration::from_millis(250)),
        Some(1.0)
    );
}

#[test]
fn test_collapse_mid_expand_does_not_jump() {
    let mut control = flash();
    let t0 = Instant::now();
    tap(&mut control, 10, 1, t0);

    let t1 = t0 + Duration::from_millis(100);
    let presented = control.presented_bounds(t1);

    // Title tap while expanded collapses.
    tap(&mut control, 3, 1, t1);

    assert!(!control.is_expanded());
    assert_eq!(control.presented_bounds(t1), presented);
    assert_eq!(
        control.presented_bounds(t1 + Duration::from_millis(200)),
        control.bounds()
    );
}

#[test]
fn test_reduced_motion_applies_instantly() {
    let mut control = flash();
    control.set_reduced_motion(true);
    let t0 = Instant::now();

    tap(&mut control, 10, 1, t0);

    assert!(!control.is_animating());
    assert_eq!(control.presented_bounds(t0), control.bounds());
}

#[test]
fn test_unanimated_request_snaps() {
    let mut control = flash();

    control.set_expanded(true, false);

    assert!(!control.is_animating());
}
