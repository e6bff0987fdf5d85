//! Background disc, rings and spokes.
//!
//! All functions draw in the disc-local frame: the caller has already
//! translated the surface to the disc center.

use std::f64::consts::PI;

use super::label::{draw_label, Label};
use crate::color::RgbColor;
use crate::config::StrokeConfig;
use crate::polar::{normalize_angle, radius_label, PolarPoint, Projection};
use crate::surface::Surface;

/// How a ring or spoke and its label are drawn.
#[derive(Debug, Clone, Copy)]
pub struct MarkStyle {
    pub line_color: RgbColor,
    pub line_width: f64,
    pub label_color: RgbColor,
    pub text_size: f64,
    /// Draw label plates; used for the cursor highlight
    pub background: bool,
}

pub fn draw_background(
    surface: &mut dyn Surface,
    color: RgbColor,
    radius: f64,
    outline: &StrokeConfig,
) {
    surface.save();
    surface.set_fill_color(color);
    surface.begin_path();
    surface.arc(0.0, 0.0, radius, 0.0, 2.0 * PI);
    surface.fill();
    if outline.width > 0 {
        surface.set_stroke_color(outline.color);
        surface.set_line_width(outline.width as f64);
        surface.stroke();
    }
    surface.restore();
}

/// Ring at `radius` pixels, labelled with its data radius below the point
/// where it crosses the zero-angle reference.
pub fn draw_radius_mark(
    surface: &mut dyn Surface,
    projection: &Projection,
    radius: f64,
    scale: f64,
    style: &MarkStyle,
) {
    surface.save();
    surface.set_stroke_color(style.line_color);
    surface.set_line_width(style.line_width);
    surface.begin_path();
    surface.arc(0.0, 0.0, radius, 0.0, 2.0 * PI);
    surface.stroke();
    surface.restore();

    let anchor = projection.to_cartesian(
        PolarPoint::new(radius, -projection.rotational_offset()),
        1.0,
    );
    let text = radius_label(radius / scale);
    let label = Label::new(&text, anchor.x, anchor.y + style.text_size)
        .with_background(style.background);
    draw_label(surface, &label, style.label_color, style.text_size);
}

/// Spoke from the center to `radius` pixels at data angle `angle`.
///
/// Without an explicit `label` the spoke is labelled with its angle.
pub fn draw_angle_mark(
    surface: &mut dyn Surface,
    projection: &Projection,
    angle: f64,
    radius: f64,
    style: &MarkStyle,
    label: Option<&str>,
) {
    let angle = normalize_angle(angle);
    let tip = projection.to_cartesian(PolarPoint::new(radius, angle), 1.0);

    surface.save();
    surface.set_stroke_color(style.line_color);
    surface.set_line_width(style.line_width);
    surface.begin_path();
    surface.move_to(0.0, 0.0);
    surface.line_to(tip.x, tip.y);
    surface.stroke();
    surface.restore();

    let text = match label {
        Some(text) => text.to_string(),
        None => angle_label(angle),
    };
    let label = Label::new(&text, tip.x, tip.y).with_background(style.background);
    draw_label(surface, &label, style.label_color, style.text_size);
}

/// Whole degrees print without decimals, others with up to two.
pub fn angle_label(angle: f64) -> String {
    if (angle - angle.round()).abs() < 1e-9 {
        format!("{:.0}", angle.round())
    } else {
        let text = format!("{:.2}", angle);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}
