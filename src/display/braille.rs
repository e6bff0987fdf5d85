use ratatui::prelude::*;

use crate::color::RgbColor;
use crate::surface::Surface;

/// Braille dot positions within a 2x4 cell:
/// (0,0)=0x01 (1,0)=0x08
/// (0,1)=0x02 (1,1)=0x10
/// (0,2)=0x04 (1,2)=0x20
/// (0,3)=0x40 (1,3)=0x80
pub const DOT_MAP: [[u8; 4]; 2] = [
    [0x01, 0x02, 0x04, 0x40],
    [0x08, 0x10, 0x20, 0x80],
];

/// Dots per character cell, horizontally and vertically.
pub const DOTS_X: usize = 2;
pub const DOTS_Y: usize = 4;

/// A surface for sub-character braille rendering.
/// Each terminal character cell maps to a 2x4 grid of braille dots; one dot is
/// one surface unit. Strokes set dots, text is laid over whole cells and
/// fills are not drawn.
pub struct BrailleCanvas {
    pub grid: Vec<bool>,
    pub grid_w: usize,
    pub grid_h: usize,
    char_w: usize,
    char_h: usize,
    colors: Vec<Option<RgbColor>>,
    text: Vec<Option<(char, RgbColor)>>,
    state: PenState,
    stack: Vec<PenState>,
    path: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug, Clone, Copy)]
struct PenState {
    tx: f64,
    ty: f64,
    stroke_color: RgbColor,
    fill_color: RgbColor,
}

impl Default for PenState {
    fn default() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            stroke_color: RgbColor::WHITE,
            fill_color: RgbColor::WHITE,
        }
    }
}

impl BrailleCanvas {
    /// Create a new braille canvas for the given character dimensions.
    pub fn new(char_w: usize, char_h: usize) -> Self {
        let grid_w = char_w * DOTS_X;
        let grid_h = char_h * DOTS_Y;
        Self {
            grid: vec![false; grid_w * grid_h],
            grid_w,
            grid_h,
            char_w,
            char_h,
            colors: vec![None; char_w * char_h],
            text: vec![None; char_w * char_h],
            state: PenState::default(),
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Set a single dot on the braille grid (bounds-checked), coloring its cell.
    #[inline]
    pub fn set(&mut self, gx: isize, gy: isize, color: RgbColor) {
        if gx < 0 || gy < 0 {
            return;
        }
        let (gx, gy) = (gx as usize, gy as usize);
        if gx < self.grid_w && gy < self.grid_h {
            self.grid[gy * self.grid_w + gx] = true;
            self.colors[(gy / DOTS_Y) * self.char_w + gx / DOTS_X] = Some(color);
        }
    }

    pub fn is_set(&self, gx: usize, gy: usize) -> bool {
        gx < self.grid_w && gy < self.grid_h && self.grid[gy * self.grid_w + gx]
    }

    /// Character laid over the cell at (cx, cy), if any.
    pub fn text_at(&self, cx: usize, cy: usize) -> Option<char> {
        if cx < self.char_w && cy < self.char_h {
            self.text[cy * self.char_w + cx].map(|(ch, _)| ch)
        } else {
            None
        }
    }

    /// Draw a line using Bresenham's algorithm.
    pub fn line(&mut self, x0: isize, y0: isize, x1: isize, y1: isize, color: RgbColor) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx: isize = if x0 < x1 { 1 } else { -1 };
        let sy: isize = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.set(x, y, color);

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

    /// Encode braille grid to characters and write to the frame buffer.
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        for cy in 0..self.char_h.min(area.height as usize) {
            for cx in 0..self.char_w.min(area.width as usize) {
                let cell_index = cy * self.char_w + cx;
                let position = (area.x + cx as u16, area.y + cy as u16);

                if let Some((ch, color)) = self.text[cell_index] {
                    if let Some(cell) = frame.buffer_mut().cell_mut(position) {
                        cell.set_char(ch);
                        cell.set_fg(Color::Rgb(color.r, color.g, color.b));
                    }
                    continue;
                }

                let mut braille: u8 = 0;
                for (dx, col) in DOT_MAP.iter().enumerate() {
                    for (dy, &bit) in col.iter().enumerate() {
                        if self.is_set(cx * DOTS_X + dx, cy * DOTS_Y + dy) {
                            braille |= bit;
                        }
                    }
                }

                if braille != 0 {
                    let color = self.colors[cell_index].unwrap_or(RgbColor::WHITE);
                    let ch = char::from_u32(0x2800 + braille as u32).unwrap_or(' ');
                    if let Some(cell) = frame.buffer_mut().cell_mut(position) {
                        cell.set_char(ch);
                        cell.set_fg(Color::Rgb(color.r, color.g, color.b));
                    }
                }
            }
        }
    }

    fn device(&self, x: f64, y: f64) -> (f64, f64) {
        (x + self.state.tx, y + self.state.ty)
    }

    fn current_subpath(&mut self) -> &mut Vec<(f64, f64)> {
        if self.path.is_empty() {
            self.path.push(Vec::new());
        }
        let last = self.path.len() - 1;
        &mut self.path[last]
    }
}

fn to_dot(v: f64) -> Option<isize> {
    v.is_finite().then(|| v.floor() as isize)
}

impl Surface for BrailleCanvas {
    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.tx += dx;
        self.state.ty += dy;
    }

    fn set_stroke_color(&mut self, color: RgbColor) {
        self.state.stroke_color = color;
    }

    fn set_fill_color(&mut self, color: RgbColor) {
        self.state.fill_color = color;
    }

    fn set_line_width(&mut self, _width: f64) {}

    fn set_font_size(&mut self, _px: f64) {}

    fn begin_path(&mut self) {
        self.path.clear();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        let p = self.device(x, y);
        self.path.push(vec![p]);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        let p = self.device(x, y);
        self.current_subpath().push(p);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        let (cx, cy) = self.device(cx, cy);
        let sweep = end - start;
        let length = radius.abs() * sweep.abs();
        if !length.is_finite() {
            return;
        }
        let segments = (length.ceil() as usize).clamp(8, 1024);
        let subpath = self.current_subpath();
        for i in 0..=segments {
            let theta = start + sweep * i as f64 / segments as f64;
            subpath.push((cx + radius * theta.cos(), cy + radius * theta.sin()));
        }
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (x, y) = self.device(x, y);
        self.path.push(vec![
            (x, y),
            (x + width, y),
            (x + width, y + height),
            (x, y + height),
            (x, y),
        ]);
    }

    fn stroke(&mut self) {
        let color = self.state.stroke_color;
        let path = std::mem::take(&mut self.path);
        for subpath in &path {
            for pair in subpath.windows(2) {
                if let (Some(x0), Some(y0), Some(x1), Some(y1)) = (
                    to_dot(pair[0].0),
                    to_dot(pair[0].1),
                    to_dot(pair[1].0),
                    to_dot(pair[1].1),
                ) {
                    self.line(x0, y0, x1, y1, color);
                }
            }
        }
        self.path = path;
    }

    fn fill(&mut self) {}

    fn measure_text(&mut self, text: &str) -> f64 {
        (text.chars().count() * DOTS_X) as f64
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let (x, y) = self.device(x, y);
        let (Some(x), Some(y)) = (to_dot(x), to_dot(y - 1.0)) else {
            return;
        };
        if y < 0 {
            return;
        }
        let row = y as usize / DOTS_Y;
        let color = self.state.fill_color;
        let start = x.div_euclid(DOTS_X as isize);
        for (i, ch) in text.chars().enumerate() {
            let col = start + i as isize;
            if col >= 0 && (col as usize) < self.char_w && row < self.char_h {
                self.text[row * self.char_w + col as usize] = Some((ch, color));
            }
        }
    }

    fn stroke_text(&mut self, _text: &str, _x: f64, _y: f64) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_set_dots_and_color_cells() {
        let mut canvas = BrailleCanvas::new(4, 2);
        canvas.line(0, 0, 7, 0, RgbColor::BLACK);
        assert!((0..8).all(|x| canvas.is_set(x, 0)));
        assert!(!canvas.is_set(0, 1));
    }

    #[test]
    fn off_grid_dots_are_clipped() {
        let mut canvas = BrailleCanvas::new(2, 2);
        canvas.line(-10, 3, 10, 3, RgbColor::BLACK);
        assert!((0..4).all(|x| canvas.is_set(x, 3)));
    }

    #[test]
    fn text_lands_on_the_cell_above_the_baseline() {
        let mut canvas = BrailleCanvas::new(10, 4);
        canvas.translate(4.0, 0.0);
        canvas.fill_text("12", 0.0, 8.0);
        assert_eq!(canvas.text_at(2, 1), Some('1'));
        assert_eq!(canvas.text_at(3, 1), Some('2'));
        assert_eq!(canvas.text_at(2, 2), None);
    }

    #[test]
    fn stroked_paths_follow_the_transform() {
        let mut canvas = BrailleCanvas::new(10, 10);
        canvas.translate(10.0, 20.0);
        canvas.begin_path();
        canvas.move_to(0.0, 0.0);
        canvas.line_to(4.0, 0.0);
        canvas.stroke();
        assert!(canvas.is_set(10, 20));
        assert!(canvas.is_set(14, 20));
        assert!(!canvas.is_set(0, 0));
    }
}
