/// ASCII wireframe preview for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use pinhole_core::{Edge, ImageSize, Visibility, Wireframe};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    visibility: Visibility,
}

/// Character grid that image-space edges are scaled onto
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<Option<Cell>>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
    }

    pub fn render_wireframe(&mut self, wireframe: &Wireframe, image: ImageSize) {
        if image.width == 0 || image.height == 0 {
            return;
        }
        let sx = self.width as f64 / f64::from(image.width);
        let sy = self.height as f64 / f64::from(image.height);
        for edge in &wireframe.edges {
            self.render_edge(edge, sx, sy);
        }
    }

    fn render_edge(&mut self, edge: &Edge, sx: f64, sy: f64) {
        let from = (f64::from(edge.from.x) * sx, f64::from(edge.from.y) * sy);
        let to = (f64::from(edge.to.x) * sx, f64::from(edge.to.y) * sy);
        let Some((a, b)) = clip(from, to, self.width as f64, self.height as f64) else {
            return;
        };

        let glyph = slope_glyph(to.0 - from.0, to.1 - from.1);
        let cell = Cell {
            glyph,
            visibility: edge.visibility,
        };
        bresenham(
            (a.0.floor() as i64, a.1.floor() as i64),
            (b.0.floor() as i64, b.1.floor() as i64),
            |x, y| self.plot(x, y, cell),
        );
    }

    fn plot(&mut self, x: i64, y: i64, cell: Cell) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = y as usize * self.width + x as usize;
        // inside edges win over outside ones sharing a cell
        match self.cells[idx] {
            Some(existing) if existing.visibility == Visibility::Inside => {}
            _ => self.cells[idx] = Some(cell),
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.cells.chunks(self.width.max(1)) {
            for cell in row {
                match cell {
                    Some(cell) => {
                        let color = match cell.visibility {
                            Visibility::Inside => Color::White,
                            Visibility::Outside => Color::Red,
                        };
                        writer.queue(SetForegroundColor(color))?;
                        writer.queue(Print(cell.glyph))?;
                    }
                    None => {
                        writer.queue(Print(' '))?;
                    }
                }
            }
            writer.queue(Print('\n'))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }

    #[cfg(test)]
    fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        self.cells[y * self.width + x].map(|cell| cell.glyph)
    }
}

/// Terminal rows are about twice as tall as columns are wide
fn slope_glyph(dx: f64, dy: f64) -> char {
    let (ax, ay) = (dx.abs(), dy.abs() * 2.0);
    if ay < ax * 0.5 {
        '-'
    } else if ax < ay * 0.5 {
        '|'
    } else if (dx > 0.0) == (dy > 0.0) {
        '\\'
    } else {
        '/'
    }
}

/// Liang-Barsky clip of a segment against `[0, w) x [0, h)`
fn clip(from: (f64, f64), to: (f64, f64), w: f64, h: f64) -> Option<((f64, f64), (f64, f64))> {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let max_x = w - 1e-9;
    let max_y = h - 1e-9;
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [
        (-dx, from.0),
        (dx, max_x - from.0),
        (-dy, from.1),
        (dy, max_y - from.1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        (from.0 + t0 * dx, from.1 + t0 * dy),
        (from.0 + t1 * dx, from.1 + t1 * dy),
    ))
}

fn bresenham(from: (i64, i64), to: (i64, i64), mut plot: impl FnMut(i64, i64)) {
    let (mut x, mut y) = from;
    let dx = (to.0 - x).abs();
    let dy = -(to.1 - y).abs();
    let step_x = if x < to.0 { 1 } else { -1 };
    let step_y = if y < to.1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        plot(x, y);
        if (x, y) == to {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += step_x;
        }
        if e2 <= dx {
            err += dx;
            y += step_y;
        }
    }
}
