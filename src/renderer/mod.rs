//! Pixel renderer
//!
//! The chart draws into an owned RGBA pixel buffer (`Canvas`) through the
//! [`Surface`] trait. The canvas keeps a canvas-style state stack (transform,
//! colors, line width, font size) and a current path made of subpaths in
//! device coordinates.

pub mod raster;
pub mod text;

use std::f64::consts::PI;
use std::path::Path;

use tracing::info;

use crate::chart::{HostChart, PolarChart};
use crate::color::RgbColor;
use crate::error::{Error, Result};
use crate::surface::Surface;

/// Owned RGBA pixel buffer, 4 bytes per pixel, straight alpha.
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
    state: DrawState,
    stack: Vec<DrawState>,
    path: Vec<Vec<(f64, f64)>>,
}

#[derive(Debug, Clone, Copy)]
struct DrawState {
    tx: f64,
    ty: f64,
    stroke_color: RgbColor,
    fill_color: RgbColor,
    line_width: f64,
    font_size: f64,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            tx: 0.0,
            ty: 0.0,
            stroke_color: RgbColor::BLACK,
            fill_color: RgbColor::BLACK,
            line_width: 1.0,
            font_size: 10.0,
        }
    }
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![0u8; width * height * 4],
            width,
            height,
            state: DrawState::default(),
            stack: Vec::new(),
            path: Vec::new(),
        }
    }

    /// Fill the whole canvas with an opaque color and reset drawing state.
    pub fn clear(&mut self, color: RgbColor) {
        let len = self.width * self.height * 4;
        for px in self.data[..len].chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, 255]);
        }
        self.state = DrawState::default();
        self.stack.clear();
        self.path.clear();
    }

    /// Composite `color` over the pixel at (x, y) with the given coverage.
    #[inline]
    pub fn blend_pixel(&mut self, x: usize, y: usize, color: RgbColor, coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y * self.width + x) * 4;
        let a = coverage.clamp(0.0, 1.0);
        let dst_a = self.data[idx + 3] as f32 / 255.0;
        let out_a = a + dst_a * (1.0 - a);
        if out_a <= 0.0 {
            return;
        }
        let mix = |src: u8, dst: u8| -> u8 {
            ((src as f32 * a + dst as f32 * dst_a * (1.0 - a)) / out_a).round() as u8
        };
        self.data[idx] = mix(color.r, self.data[idx]);
        self.data[idx + 1] = mix(color.g, self.data[idx + 1]);
        self.data[idx + 2] = mix(color.b, self.data[idx + 2]);
        self.data[idx + 3] = (out_a * 255.0).round() as u8;
    }

    /// Read the RGBA values at (x, y).
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> (u8, u8, u8, u8) {
        let idx = (y * self.width + x) * 4;
        if x < self.width && idx + 3 < self.data.len() {
            (self.data[idx], self.data[idx + 1], self.data[idx + 2], self.data[idx + 3])
        } else {
            (0, 0, 0, 0)
        }
    }

    /// Write the canvas as an image; the format follows the file extension.
    pub fn save_png(&self, path: &Path) -> Result<()> {
        let len = self.width * self.height * 4;
        image::save_buffer(
            path,
            &self.data[..len],
            self.width as u32,
            self.height as u32,
            image::ColorType::Rgba8,
        )
        .map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })?;
        info!("wrote {}x{} chart to {}", self.width, self.height, path.display());
        Ok(())
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

/// Number of chords used to flatten an arc of `sweep` radians.
fn arc_segments(radius: f64, sweep: f64) -> usize {
    let length = radius.abs() * sweep.abs();
    if !length.is_finite() {
        return 0;
    }
    ((length / 2.0).ceil() as usize).clamp(8, 2048)
}

impl Surface for Canvas {
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

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
    }

    fn set_font_size(&mut self, px: f64) {
        self.state.font_size = px;
    }

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
        let segments = arc_segments(radius, sweep);
        if segments == 0 {
            return;
        }
        // a full turn closes on itself; keep the last point exact
        let full_turn = (sweep.abs() - 2.0 * PI).abs() < 1e-12;
        let subpath = self.current_subpath();
        for i in 0..=segments {
            let theta = if full_turn && i == segments {
                start
            } else {
                start + sweep * i as f64 / segments as f64
            };
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
        let width = self.state.line_width;
        if width <= 0.0 {
            return;
        }
        let path = std::mem::take(&mut self.path);
        for subpath in &path {
            for pair in subpath.windows(2) {
                raster::stroke_segment(self, pair[0], pair[1], width, color);
            }
        }
        self.path = path;
    }

    fn fill(&mut self) {
        let color = self.state.fill_color;
        let path = std::mem::take(&mut self.path);
        raster::fill_polygons(self, &path, color);
        self.path = path;
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        text::measure(text, self.state.font_size)
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        let (x, y) = self.device(x, y);
        let state = self.state;
        text::draw_text(self, text, x, y, state.font_size, state.fill_color);
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
        let (x, y) = self.device(x, y);
        let state = self.state;
        text::stroke_text(self, text, x, y, state.font_size, state.line_width, state.stroke_color);
    }
}

/// Main entry point: render a complete chart to the canvas, with an optional
/// cursor highlight at plot coordinates.
pub fn render_chart<H: HostChart>(
    canvas: &mut Canvas,
    chart: &mut PolarChart,
    host: &H,
    cursor: Option<(f64, f64)>,
) {
    canvas.clear(host.grid().page_color);
    chart.draw(host, canvas);
    if let Some((x, y)) = cursor {
        chart.draw_cursor(host, canvas, x, y);
    }
}
