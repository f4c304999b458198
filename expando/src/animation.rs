//! Property transitions driven by the host event loop.
//!
//! A transition is a declarative request: animate one property of one target
//! from its presented value to a new value over a duration. The event loop
//! calls `prune` on each frame and asks for interpolated values while drawing.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::{Duration, Instant};

use crate::geometry::Rect;

/// Easing function for transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Easing {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Easing {
    /// Apply easing to progress (0.0 to 1.0).
    pub fn apply(self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Duration and easing for a single transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionConfig {
    pub duration: Duration,
    pub easing: Easing,
}

impl TransitionConfig {
    pub const fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::new(Duration::from_millis(200), Easing::EaseInOut)
    }
}

/// Values that can be interpolated between two endpoints.
pub trait Lerp: Sized {
    fn lerp(&self, to: &Self, t: f32) -> Self;
}

impl Lerp for u16 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        let from = *self as f32;
        let to = *to as f32;
        (from + (to - from) * t).round() as u16
    }
}

impl Lerp for f32 {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        self + (to - self) * t
    }
}

impl Lerp for Rect {
    fn lerp(&self, to: &Self, t: f32) -> Self {
        Rect::new(
            Lerp::lerp(&self.x, &to.x, t),
            Lerp::lerp(&self.y, &to.y, t),
            Lerp::lerp(&self.width, &to.width, t),
            Lerp::lerp(&self.height, &to.height, t),
        )
    }
}

/// A property value that can be animated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyValue {
    Frame(Rect),
    Opacity(f32),
}

impl PropertyValue {
    fn interpolate(&self, to: &PropertyValue, t: f32) -> PropertyValue {
        match (self, to) {
            (PropertyValue::Frame(a), PropertyValue::Frame(b)) => PropertyValue::Frame(a.lerp(b, t)),
            (PropertyValue::Opacity(a), PropertyValue::Opacity(b)) => {
                PropertyValue::Opacity(Lerp::lerp(a, b, t))
            }
            // Mismatched kinds: jump to the target.
            _ => *to,
        }
    }

    pub fn as_frame(&self) -> Option<Rect> {
        match self {
            PropertyValue::Frame(rect) => Some(*rect),
            _ => None,
        }
    }

    pub fn as_opacity(&self) -> Option<f32> {
        match self {
            PropertyValue::Opacity(value) => Some(*value),
            _ => None,
        }
    }
}

/// A single active transition.
#[derive(Debug, Clone)]
struct ActiveTransition {
    from: PropertyValue,
    to: PropertyValue,
    start: Instant,
    config: TransitionConfig,
}

impl ActiveTransition {
    fn progress(&self, now: Instant) -> f32 {
        if self.config.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.config.duration.as_secs_f32()).min(1.0)
    }

    fn value_at(&self, now: Instant) -> PropertyValue {
        let eased = self.config.easing.apply(self.progress(now));
        self.from.interpolate(&self.to, eased)
    }

    fn is_finished(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.config.duration
    }
}

/// Active transitions keyed by target property. At most one per key.
#[derive(Debug)]
pub struct Animator<K> {
    active: HashMap<K, ActiveTransition>,
    /// When true, requests complete instantly.
    reduced_motion: bool,
}

impl<K> Default for Animator<K> {
    fn default() -> Self {
        Self {
            active: HashMap::new(),
            reduced_motion: false,
        }
    }
}

impl<K: Eq + Hash + Clone + Debug> Animator<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.reduced_motion = enabled;
        if enabled {
            self.active.clear();
        }
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Returns true if any transition is running.
    pub fn is_animating(&self) -> bool {
        !self.active.is_empty()
    }

    /// Request a transition of `key` toward `to`.
    ///
    /// If a transition is already running on the same key it is replaced, and
    /// the new one starts from the currently presented value so the property
    /// never jumps.
    pub fn start(
        &mut self,
        key: K,
        from: PropertyValue,
        to: PropertyValue,
        config: TransitionConfig,
        now: Instant,
    ) {
        let from = match self.active.get(&key) {
            Some(existing) => existing.value_at(now),
            None => from,
        };

        if self.reduced_motion || config.duration.is_zero() || from == to {
            self.active.remove(&key);
            return;
        }

        self.active.insert(
            key,
            ActiveTransition {
                from,
                to,
                start: now,
                config,
            },
        );
    }

    /// Drop any running transition on `key`; the property snaps to its model value.
    pub fn cancel(&mut self, key: &K) {
        self.active.remove(key);
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Interpolated value for `key`, or None when it is not animating.
    pub fn value_at(&self, key: &K, now: Instant) -> Option<PropertyValue> {
        self.active.get(key).map(|transition| transition.value_at(now))
    }

    /// Remove finished transitions. Returns true if any are still running.
    pub fn prune(&mut self, now: Instant) -> bool {
        self.active.retain(|_, transition| !transition.is_finished(now));
        !self.active.is_empty()
    }

    /// When the last running transition ends.
    pub fn finishes_at(&self) -> Option<Instant> {
        self.active
            .values()
            .map(|transition| transition.start + transition.config.duration)
            .max()
    }
}
