/// Terminal text attributes, used wherever a label font is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Font {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub dim: bool,
}

impl Font {
    pub const fn new() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            dim: false,
        }
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }
}

/// Box-drawing style for the outer border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Border {
    #[default]
    None,
    Rounded,
    Thick,
}

impl Border {
    /// Pick the box style for a configured border width.
    pub fn for_width(width: u16) -> Self {
        match width {
            0 => Border::None,
            1 => Border::Rounded,
            _ => Border::Thick,
        }
    }

    /// Cells the border takes on each side.
    pub fn thickness(self) -> u16 {
        match self {
            Border::None => 0,
            Border::Rounded | Border::Thick => 1,
        }
    }

    /// (top-left, top-right, bottom-left, bottom-right, horizontal, vertical)
    pub fn glyphs(self) -> Option<(char, char, char, char, char, char)> {
        match self {
            Border::None => None,
            Border::Rounded => Some(('╭', '╮', '╰', '╯', '─', '│')),
            Border::Thick => Some(('┏', '┓', '┗', '┛', '━', '┃')),
        }
    }

    /// (top tee, bottom tee) where an inner separator meets the border.
    pub fn tees(self) -> Option<(char, char)> {
        match self {
            Border::None => None,
            Border::Rounded => Some(('┬', '┴')),
            Border::Thick => Some(('┳', '┻')),
        }
    }
}
