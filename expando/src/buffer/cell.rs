use crate::types::{Font, Rgb};

const DEFAULT_FG: Rgb = Rgb::new(255, 255, 255);
const DEFAULT_BG: Rgb = Rgb::new(0, 0, 0);

/// One terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub font: Font,
    /// Second column of a double-width glyph; the terminal skips it.
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::blank(DEFAULT_BG)
    }
}

impl Cell {
    /// `char` in `fg` on `bg`, plain font.
    pub fn glyph(char: char, fg: Rgb, bg: Rgb) -> Self {
        Self {
            char,
            fg,
            bg,
            font: Font::new(),
            wide_continuation: false,
        }
    }

    /// An empty cell on `bg`.
    pub fn blank(bg: Rgb) -> Self {
        Self::glyph(' ', DEFAULT_FG, bg)
    }

    /// Placeholder for the right half of a double-width glyph.
    pub fn continuation(bg: Rgb) -> Self {
        Self {
            wide_continuation: true,
            ..Self::blank(bg)
        }
    }

    pub fn with_font(mut self, font: Font) -> Self {
        self.font = font;
        self
    }
}
