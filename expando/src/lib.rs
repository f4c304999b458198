pub mod animation;
pub mod buffer;
pub mod control;
pub mod error;
pub mod event;
pub mod geometry;
pub mod segment;
pub mod style;
pub mod terminal;
pub mod text;
pub mod timer;
pub mod types;

pub use animation::{Easing, TransitionConfig};
pub use buffer::{Buffer, Cell};
pub use control::{ControlEvent, EventResult, ExpandableSegmentedControl, SegmentSlot};
pub use error::ControlError;
pub use event::{Event, Key, Modifiers, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use segment::{Highlightable, Segment, SegmentValue, SegmentView, TextLabel};
pub use style::ControlStyle;
pub use terminal::Terminal;
pub use types::*;
