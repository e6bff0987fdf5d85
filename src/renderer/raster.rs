//! Scan conversion helpers for the pixel canvas.

use super::Canvas;
use crate::color::RgbColor;

/// Stroke one segment `width` pixels wide, with a one-pixel soft edge.
pub fn stroke_segment(
    canvas: &mut Canvas,
    (x0, y0): (f64, f64),
    (x1, y1): (f64, f64),
    width: f64,
    color: RgbColor,
) {
    if ![x0, y0, x1, y1, width].iter().all(|v| v.is_finite()) {
        return;
    }

    let half = width.max(1.0) / 2.0;
    let reach = half + 1.0;
    let min_x = (x0.min(x1) - reach).floor().max(0.0);
    let max_x = (x0.max(x1) + reach).ceil().min(canvas.width as f64 - 1.0);
    let min_y = (y0.min(y1) - reach).floor().max(0.0);
    let max_y = (y0.max(y1) + reach).ceil().min(canvas.height as f64 - 1.0);
    if min_x > max_x || min_y > max_y {
        return;
    }

    for py in min_y as usize..=max_y as usize {
        for px in min_x as usize..=max_x as usize {
            let d = distance_to_segment(px as f64 + 0.5, py as f64 + 0.5, x0, y0, x1, y1);
            let coverage = (half + 0.5 - d).clamp(0.0, 1.0);
            if coverage > 0.0 {
                canvas.blend_pixel(px, py, color, coverage as f32);
            }
        }
    }
}

fn distance_to_segment(px: f64, py: f64, x0: f64, y0: f64, x1: f64, y1: f64) -> f64 {
    let dx = x1 - x0;
    let dy = y1 - y0;
    let len_sq = dx * dx + dy * dy;
    let t = if len_sq > 0.0 {
        (((px - x0) * dx + (py - y0) * dy) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let cx = x0 + t * dx;
    let cy = y0 + t * dy;
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

/// Fill the union of closed polygons with the even-odd rule, sampling pixel
/// centers.
pub fn fill_polygons(canvas: &mut Canvas, polygons: &[Vec<(f64, f64)>], color: RgbColor) {
    let edges: Vec<((f64, f64), (f64, f64))> = polygons
        .iter()
        .filter(|poly| poly.len() >= 3)
        .flat_map(|poly| {
            poly.iter()
                .zip(poly.iter().cycle().skip(1))
                .map(|(a, b)| (*a, *b))
        })
        .filter(|(a, b)| a.0.is_finite() && a.1.is_finite() && b.0.is_finite() && b.1.is_finite())
        .collect();
    if edges.is_empty() {
        return;
    }

    let min_y = edges.iter().map(|(a, b)| a.1.min(b.1)).fold(f64::INFINITY, f64::min);
    let max_y = edges.iter().map(|(a, b)| a.1.max(b.1)).fold(f64::NEG_INFINITY, f64::max);
    let first_row = min_y.floor().max(0.0) as usize;
    let last_row = (max_y.ceil().max(0.0) as usize).min(canvas.height);

    let mut crossings = Vec::new();
    for py in first_row..last_row {
        let sy = py as f64 + 0.5;
        crossings.clear();
        for &((x0, y0), (x1, y1)) in &edges {
            if (y0 <= sy && sy < y1) || (y1 <= sy && sy < y0) {
                crossings.push(x0 + (sy - y0) / (y1 - y0) * (x1 - x0));
            }
        }
        crossings.sort_by(f64::total_cmp);

        for span in crossings.chunks_exact(2) {
            let start = (span[0] - 0.5).ceil().max(0.0) as usize;
            let end = ((span[1] - 0.5).ceil().max(0.0) as usize).min(canvas.width);
            for px in start..end {
                canvas.blend_pixel(px, py, color, 1.0);
            }
        }
    }
}
