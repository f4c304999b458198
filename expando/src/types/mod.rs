mod color;
mod font;

pub use color::*;
pub use font::*;
