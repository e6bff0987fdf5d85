//! Outlined labels with optional background plates.

use crate::color::RgbColor;
use crate::surface::Surface;

/// Fill of the plate drawn behind highlighted labels.
pub const PLATE_COLOR: RgbColor = RgbColor::new(0xFF, 0xFF, 0xBC);
/// Glyph outline drawn before the fill so labels stay legible over grid lines.
pub const OUTLINE_COLOR: RgbColor = RgbColor::WHITE;
pub const OUTLINE_WIDTH: f64 = 2.0;

/// Text centered horizontally on `x`, with its baseline at `y`.
#[derive(Debug, Clone, Copy)]
pub struct Label<'a> {
    pub text: &'a str,
    pub x: f64,
    pub y: f64,
    pub background: bool,
}

impl<'a> Label<'a> {
    pub fn new(text: &'a str, x: f64, y: f64) -> Self {
        Self {
            text,
            x,
            y,
            background: false,
        }
    }

    pub fn with_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }
}

pub fn draw_label(surface: &mut dyn Surface, label: &Label, color: RgbColor, text_size: f64) {
    surface.save();
    surface.set_font_size(text_size);
    let half_width = surface.measure_text(label.text) / 2.0;
    let left = label.x - half_width;

    if label.background {
        let padding = text_size / 5.0;
        surface.save();
        surface.begin_path();
        surface.rect(
            left - padding,
            label.y + padding,
            half_width * 2.0 + padding * 2.0,
            -text_size - padding * 2.0,
        );
        surface.set_fill_color(PLATE_COLOR);
        surface.fill();
        surface.restore();
    }

    surface.set_line_width(OUTLINE_WIDTH);
    surface.set_stroke_color(OUTLINE_COLOR);
    surface.stroke_text(label.text, left + OUTLINE_WIDTH / 2.0, label.y);

    surface.set_fill_color(color);
    surface.fill_text(label.text, left, label.y);
    surface.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawOp, Recorder};

    #[test]
    fn outline_is_stroked_before_fill() {
        let mut rec = Recorder::new();
        draw_label(&mut rec, &Label::new("10", 50.0, 20.0), RgbColor::BLACK, 10.0);

        let stroke_at = rec
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::StrokeText(..)))
            .unwrap();
        let fill_at = rec
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::FillText(..)))
            .unwrap();
        assert!(stroke_at < fill_at);
        assert!(rec.ops.contains(&DrawOp::StrokeColor(OUTLINE_COLOR)));
        // "10" measures 12 at size 10, so it starts 6 left of the anchor
        assert!(rec.ops.contains(&DrawOp::FillText("10".into(), 44.0, 20.0)));
        assert_eq!(rec.count(|op| matches!(op, DrawOp::Rect(..))), 0);
    }

    #[test]
    fn plate_covers_text_plus_padding() {
        let mut rec = Recorder::new();
        let label = Label::new("10", 50.0, 20.0).with_background(true);
        draw_label(&mut rec, &label, RgbColor::BLACK, 10.0);

        assert!(rec.ops.contains(&DrawOp::Rect(42.0, 22.0, 16.0, -14.0)));
        assert!(rec.ops.contains(&DrawOp::FillColor(PLATE_COLOR)));
        let rect_at = rec.ops.iter().position(|op| matches!(op, DrawOp::Rect(..))).unwrap();
        let text_at = rec
            .ops
            .iter()
            .position(|op| matches!(op, DrawOp::StrokeText(..)))
            .unwrap();
        assert!(rect_at < text_at);
    }

    #[test]
    fn state_is_balanced() {
        let mut rec = Recorder::new();
        draw_label(&mut rec, &Label::new("1", 0.0, 0.0).with_background(true), RgbColor::BLACK, 11.0);
        assert_eq!(
            rec.count(|op| matches!(op, DrawOp::Save)),
            rec.count(|op| matches!(op, DrawOp::Restore))
        );
    }
}
