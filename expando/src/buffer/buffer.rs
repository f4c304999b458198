use super::Cell;
use crate::geometry::Rect;
use crate::types::Rgb;

/// A grid of cells the control draws into and the terminal flushes.
///
/// Writes outside the grid are dropped, so callers never clip by hand.
#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    rows: Vec<Vec<Cell>>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            rows: vec![vec![Cell::default(); width as usize]; height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.rows.len() as u16
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width(), self.height())
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.rows.get(y as usize)?.get(x as usize)
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.rows.get_mut(y as usize)?.get_mut(x as usize)
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Replace the glyph and foreground, keeping whatever background is already there.
    pub fn set_char(&mut self, x: u16, y: u16, ch: char, fg: Rgb) {
        if let Some(cell) = self.get_mut(x, y) {
            cell.char = ch;
            cell.fg = fg;
            cell.wide_continuation = false;
        }
    }

    /// Blank every cell in `rect` on the given background.
    pub fn fill_bg(&mut self, rect: Rect, bg: Rgb) {
        let rect = rect.intersection(self.area());
        if rect.is_empty() {
            return;
        }
        for row in &mut self.rows[rect.y as usize..rect.bottom() as usize] {
            row[rect.x as usize..rect.right() as usize].fill(Cell::blank(bg));
        }
    }

    /// Read back one row as text, skipping wide-glyph continuation cells.
    pub fn row_text(&self, y: u16) -> String {
        self.rows
            .get(y as usize)
            .map(|row| {
                row.iter()
                    .filter(|cell| !cell.wide_continuation)
                    .map(|cell| cell.char)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Cells that differ from `previous`, row by row. Both buffers must be the same size.
    pub fn diff<'a>(&'a self, previous: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.rows
            .iter()
            .zip(&previous.rows)
            .enumerate()
            .flat_map(|(y, (row, old_row))| {
                row.iter()
                    .zip(old_row)
                    .enumerate()
                    .filter(|(_, (cell, old))| cell != old)
                    .map(move |(x, (cell, _))| (x as u16, y as u16, cell))
            })
    }

    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::default());
        }
    }
}
