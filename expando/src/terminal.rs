//! Raw-mode terminal that flushes a cell buffer with diffed output.

use std::io::{self, Stdout, Write};
use std::panic;

use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::buffer::{Buffer, Cell};
use crate::text::char_width;
use crate::types::{Font, Rgb};

/// Owns the screen while alive; dropping it restores the terminal.
pub struct Terminal {
    out: Stdout,
    front: Buffer,
    back: Buffer,
}

impl Terminal {
    /// Enter raw mode and the alternate screen with mouse capture.
    ///
    /// A panic hook restores the terminal before the previous hook runs.
    pub fn new() -> io::Result<Self> {
        let previous_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let _ = restore_terminal();
            previous_hook(info);
        }));

        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        let setup = execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            EnableMouseCapture
        )
        .and_then(|()| terminal::size());
        // Raw mode is already on; leave the shell usable if the rest fails.
        let (width, height) = or_restore(setup, || {
            let _ = restore_terminal();
        })?;

        Ok(Self {
            out,
            front: Buffer::new(width, height),
            back: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.back.width(), self.back.height())
    }

    /// Draw a frame. `paint` fills a blank buffer; only cells that changed
    /// since the last frame reach the terminal.
    pub fn draw(&mut self, paint: impl FnOnce(&mut Buffer)) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if (width, height) != self.size() {
            self.front = Buffer::new(width, height);
            self.back = Buffer::new(width, height);
            execute!(self.out, terminal::Clear(ClearType::All))?;
        }

        self.back.clear();
        paint(&mut self.back);
        self.flush()?;
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut pen = Pen::default();
        // Where the terminal cursor sits after the last write.
        let mut cursor_at: Option<(u16, u16)> = None;

        queue!(self.out, SetAttribute(Attribute::Reset))?;
        for (x, y, cell) in self.back.diff(&self.front) {
            if cell.wide_continuation {
                continue;
            }
            if cursor_at != Some((x, y)) {
                queue!(self.out, cursor::MoveTo(x, y))?;
            }
            pen.apply(&mut self.out, cell)?;
            write!(self.out, "{}", cell.char)?;

            let advance = char_width(cell.char).max(1) as u16;
            cursor_at = Some((x.saturating_add(advance), y));
        }
        queue!(self.out, SetAttribute(Attribute::Reset))?;
        self.out.flush()
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = restore_terminal();
    }
}

/// Colors and attributes last sent to the terminal.
#[derive(Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    font: Font,
}

impl Pen {
    fn apply(&mut self, out: &mut Stdout, cell: &Cell) -> io::Result<()> {
        if cell.font != self.font {
            // Reset drops the colors as well.
            queue!(out, SetAttribute(Attribute::Reset))?;
            self.fg = None;
            self.bg = None;
            for (enabled, attribute) in [
                (cell.font.bold, Attribute::Bold),
                (cell.font.dim, Attribute::Dim),
                (cell.font.italic, Attribute::Italic),
                (cell.font.underline, Attribute::Underlined),
            ] {
                if enabled {
                    queue!(out, SetAttribute(attribute))?;
                }
            }
            self.font = cell.font;
        }
        if self.fg != Some(cell.fg) {
            queue!(out, SetForegroundColor(to_crossterm(cell.fg)))?;
            self.fg = Some(cell.fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, SetBackgroundColor(to_crossterm(cell.bg)))?;
            self.bg = Some(cell.bg);
        }
        Ok(())
    }
}

fn to_crossterm(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Pass `result` through, running `restore` first when it is an error.
fn or_restore<T>(result: io::Result<T>, restore: impl FnOnce()) -> io::Result<T> {
    if result.is_err() {
        restore();
    }
    result
}

fn restore_terminal() -> io::Result<()> {
    let mut out = io::stdout();
    execute!(
        out,
        DisableMouseCapture,
        cursor::Show,
        terminal::LeaveAlternateScreen
    )?;
    terminal::disable_raw_mode()
}
