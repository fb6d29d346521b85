/// Character-cell rasterizer for terminal rendering
use crossterm::{
    style::{self, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use wirecube_core::Color;

/// Glyph used for every lit cell
const FILL_GLYPH: char = '█';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

impl Cell {
    fn blank(background: Color) -> Self {
        Self {
            glyph: ' ',
            color: background,
        }
    }
}

/// A grid of terminal cells that lines and rectangles are rasterized into
pub struct Canvas {
    width: usize,
    height: usize,
    background: Color,
    cells: Vec<Cell>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            background: Color::BLACK,
            cells: vec![Cell::blank(Color::BLACK); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells = vec![Cell::blank(self.background); width * height];
    }

    /// Blank every cell and remember `color` as the background
    pub fn clear(&mut self, color: Color) {
        self.background = color;
        self.cells.fill(Cell::blank(color));
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x < self.width && y < self.height {
            self.cells.get(y * self.width + x)
        } else {
            None
        }
    }

    /// Light one cell; coordinates outside the grid are ignored
    pub fn plot(&mut self, x: i64, y: i64, color: Color) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        self.cells[idx] = Cell {
            glyph: FILL_GLYPH,
            color,
        };
    }

    /// Bresenham line between two cell coordinates, clipped to the grid
    pub fn draw_line(&mut self, from: (i64, i64), to: (i64, i64), color: Color) {
        let Some(((x0, y0), (x1, y1))) = self.clip(from, to) else {
            return;
        };

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.plot(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Fill the cells of `[x0, x1) x [y0, y1)`, clipped to the grid
    pub fn fill_rect(&mut self, x0: i64, y0: i64, x1: i64, y1: i64, color: Color) {
        let x0 = x0.clamp(0, self.width as i64);
        let x1 = x1.clamp(0, self.width as i64);
        let y0 = y0.clamp(0, self.height as i64);
        let y1 = y1.clamp(0, self.height as i64);

        for y in y0..y1 {
            for x in x0..x1 {
                self.plot(x, y, color);
            }
        }
    }

    /// Liang-Barsky clip of a segment against the grid bounds
    ///
    /// Keeps far-off endpoints from turning into long rasterization loops.
    fn clip(&self, from: (i64, i64), to: (i64, i64)) -> Option<((i64, i64), (i64, i64))> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let (x0, y0) = (from.0 as f64, from.1 as f64);
        let (dx, dy) = ((to.0 - from.0) as f64, (to.1 - from.1) as f64);
        let (xmax, ymax) = ((self.width - 1) as f64, (self.height - 1) as f64);

        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [(-dx, x0), (dx, xmax - x0), (-dy, y0), (dy, ymax - y0)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        let at = |t: f64| ((x0 + t * dx).round() as i64, (y0 + t * dy).round() as i64);
        let start = if t0 > 0.0 { at(t0) } else { from };
        let end = if t1 < 1.0 { at(t1) } else { to };
        Some((start, end))
    }

    /// Queue the whole grid to `writer`, one terminal row per canvas row
    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.queue(SetBackgroundColor(to_term_color(self.background)))?;

        let mut current = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(to_term_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

pub fn to_term_color(color: Color) -> style::Color {
    style::Color::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
