//! The drawing capability the chart renders through.
//!
//! Modeled on a 2D canvas context: a path is built with `move_to`, `line_to`,
//! `arc` and `rect`, then stroked or filled; `save`/`restore` bracket changes
//! to the transform and style state. Text is anchored at its left baseline.

use crate::color::RgbColor;

pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, dx: f64, dy: f64);

    fn set_stroke_color(&mut self, color: RgbColor);
    fn set_fill_color(&mut self, color: RgbColor);
    fn set_line_width(&mut self, width: f64);
    fn set_font_size(&mut self, px: f64);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    /// Circular arc around (cx, cy), angles in radians, clockwise on screen.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64);
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    fn stroke(&mut self);
    fn fill(&mut self);

    /// Rendered width of `text` at the current font size.
    fn measure_text(&mut self, text: &str) -> f64;
    fn fill_text(&mut self, text: &str, x: f64, y: f64);
    fn stroke_text(&mut self, text: &str, x: f64, y: f64);
}

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Save,
    Restore,
    Translate(f64, f64),
    StrokeColor(RgbColor),
    FillColor(RgbColor),
    LineWidth(f64),
    FontSize(f64),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc {
        cx: f64,
        cy: f64,
        radius: f64,
        start: f64,
        end: f64,
    },
    Rect(f64, f64, f64, f64),
    Stroke,
    Fill,
    MeasureText(String),
    FillText(String, f64, f64),
    StrokeText(String, f64, f64),
}

/// Surface that draws nothing and keeps a log of every call.
///
/// Text is measured as `0.6 × font size` per character.
#[derive(Debug, Clone)]
pub struct Recorder {
    pub ops: Vec<DrawOp>,
    font_size: f64,
    font_stack: Vec<f64>,
}

impl Default for Recorder {
    fn default() -> Self {
        Self {
            ops: Vec::new(),
            font_size: 10.0,
            font_stack: Vec::new(),
        }
    }
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&DrawOp) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    /// Texts passed to `fill_text`, in order.
    pub fn filled_texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillText(text, _, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for Recorder {
    fn save(&mut self) {
        self.font_stack.push(self.font_size);
        self.ops.push(DrawOp::Save);
    }

    fn restore(&mut self) {
        if let Some(size) = self.font_stack.pop() {
            self.font_size = size;
        }
        self.ops.push(DrawOp::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.ops.push(DrawOp::Translate(dx, dy));
    }

    fn set_stroke_color(&mut self, color: RgbColor) {
        self.ops.push(DrawOp::StrokeColor(color));
    }

    fn set_fill_color(&mut self, color: RgbColor) {
        self.ops.push(DrawOp::FillColor(color));
    }

    fn set_line_width(&mut self, width: f64) {
        self.ops.push(DrawOp::LineWidth(width));
    }

    fn set_font_size(&mut self, px: f64) {
        self.font_size = px;
        self.ops.push(DrawOp::FontSize(px));
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start: f64, end: f64) {
        self.ops.push(DrawOp::Arc {
            cx,
            cy,
            radius,
            start,
            end,
        });
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(DrawOp::Rect(x, y, width, height));
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill);
    }

    fn measure_text(&mut self, text: &str) -> f64 {
        self.ops.push(DrawOp::MeasureText(text.to_string()));
        text.chars().count() as f64 * self.font_size * 0.6
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::FillText(text.to_string(), x, y));
    }

    fn stroke_text(&mut self, text: &str, x: f64, y: f64) {
        self.ops.push(DrawOp::StrokeText(text.to_string(), x, y));
    }
}
