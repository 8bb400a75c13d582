// Copyright (c) 2026 glyphfall contributors

use crate::palette::Rgb;

/// A cell-addressed drawing surface. The rain engine only needs three
/// things from its environment: the grid size, a translucent overpaint of
/// the whole surface, and painting a single glyph at a cell position.
pub trait Surface {
    fn width(&self) -> u16;
    fn height(&self) -> u16;

    /// Overpaint everything with a low-alpha layer of the background.
    /// Existing glyphs dim instead of disappearing; repeated calls produce
    /// the fading trail.
    fn fade(&mut self, alpha: f32);

    /// Paint one glyph. Positions outside the surface are ignored.
    fn put(&mut self, x: u16, y: u16, ch: char, color: Rgb);
}

// Colors dimmed to within this distance of the background count as gone.
const BLANK_TOLERANCE: u8 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgb,
}

/// In-memory cell grid, flushed to the terminal by `Terminal::draw`.
#[derive(Clone, Debug)]
pub struct Frame {
    width: u16,
    height: u16,
    bg: Rgb,
    cells: Vec<Cell>,
}

impl Frame {
    pub fn new(width: u16, height: u16, bg: Rgb) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            bg,
            cells: vec![Cell { ch: ' ', fg: bg }; len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn bg(&self) -> Rgb {
        self.bg
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[allow(dead_code)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }
}

impl Surface for Frame {
    fn width(&self) -> u16 {
        self.width
    }

    fn height(&self) -> u16 {
        self.height
    }

    fn fade(&mut self, alpha: f32) {
        let bg = self.bg;
        for cell in &mut self.cells {
            if cell.fg == bg {
                continue;
            }
            cell.fg = cell.fg.toward(bg, alpha);
            if cell.fg.near(bg, BLANK_TOLERANCE) {
                cell.ch = ' ';
                cell.fg = bg;
            }
        }
    }

    fn put(&mut self, x: u16, y: u16, ch: char, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = Cell { ch, fg: color };
        }
    }
}
