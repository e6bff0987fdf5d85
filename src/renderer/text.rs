//! Bitmap font text rendering for the pixel canvas.
//!
//! Labels use an 8×8 bitmap font scaled by a whole factor picked from the
//! requested font size. Text is anchored at its left baseline; the last row of
//! each glyph sits just below the baseline.

use super::Canvas;
use crate::color::RgbColor;

const GLYPH_SIZE: usize = 8;

/// Whole-pixel scale for a font size in pixels.
pub fn glyph_scale(font_size: f64) -> usize {
    (font_size / GLYPH_SIZE as f64).round().max(1.0) as usize
}

/// Width in pixels of `text` at `font_size`.
pub fn measure(text: &str, font_size: f64) -> f64 {
    let count = text.chars().count();
    if count == 0 {
        return 0.0;
    }
    let scale = glyph_scale(font_size);
    (count * (GLYPH_SIZE + 1) * scale - scale) as f64
}

/// Draw `text` with its left baseline at (x, y).
pub fn draw_text(canvas: &mut Canvas, text: &str, x: f64, y: f64, font_size: f64, color: RgbColor) {
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    let scale = glyph_scale(font_size) as isize;
    let top = y.round() as isize - 7 * scale;
    let mut left = x.round() as isize;

    for ch in text.chars() {
        if let Some(bitmap) = get_char_bitmap(ch) {
            render_char(canvas, left, top, &bitmap, color, scale);
        }
        left += (GLYPH_SIZE as isize + 1) * scale;
    }
}

/// Draw the outline of `text`: every glyph stamped around its position at
/// distance up to `width / 2`.
pub fn stroke_text(
    canvas: &mut Canvas,
    text: &str,
    x: f64,
    y: f64,
    font_size: f64,
    width: f64,
    color: RgbColor,
) {
    let reach = (width / 2.0).ceil().max(1.0) as isize;
    for oy in -reach..=reach {
        for ox in -reach..=reach {
            if ox == 0 && oy == 0 {
                continue;
            }
            draw_text(canvas, text, x + ox as f64, y + oy as f64, font_size, color);
        }
    }
}

fn render_char(canvas: &mut Canvas, x: isize, y: isize, bitmap: &[u8; 8], color: RgbColor, scale: isize) {
    for (row_idx, &row) in bitmap.iter().enumerate() {
        for col in 0..GLYPH_SIZE {
            if (row >> (7 - col)) & 1 == 1 {
                for sy in 0..scale {
                    for sx in 0..scale {
                        let px = x + col as isize * scale + sx;
                        let py = y + row_idx as isize * scale + sy;
                        if px >= 0 && py >= 0 {
                            canvas.blend_pixel(px as usize, py as usize, color, 1.0);
                        }
                    }
                }
            }
        }
    }
}

/// Glyphs for numeric labels. Each character is 8 bytes, one per row.
fn get_char_bitmap(ch: char) -> Option<[u8; 8]> {
    Some(match ch {
        '0' => [0x3C, 0x42, 0x46, 0x5A, 0x62, 0x42, 0x3C, 0x00],
        '1' => [0x08, 0x18, 0x28, 0x08, 0x08, 0x08, 0x3E, 0x00],
        '2' => [0x3C, 0x42, 0x02, 0x0C, 0x30, 0x40, 0x7E, 0x00],
        '3' => [0x3C, 0x42, 0x02, 0x1C, 0x02, 0x42, 0x3C, 0x00],
        '4' => [0x04, 0x0C, 0x14, 0x24, 0x7E, 0x04, 0x04, 0x00],
        '5' => [0x7E, 0x40, 0x7C, 0x02, 0x02, 0x42, 0x3C, 0x00],
        '6' => [0x1C, 0x20, 0x40, 0x7C, 0x42, 0x42, 0x3C, 0x00],
        '7' => [0x7E, 0x02, 0x04, 0x08, 0x10, 0x10, 0x10, 0x00],
        '8' => [0x3C, 0x42, 0x42, 0x3C, 0x42, 0x42, 0x3C, 0x00],
        '9' => [0x3C, 0x42, 0x42, 0x3E, 0x02, 0x04, 0x38, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x7E, 0x00, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x08, 0x08, 0x3E, 0x08, 0x08, 0x00, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x18, 0x00],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x18, 0x08, 0x10],
        ':' => [0x00, 0x18, 0x18, 0x00, 0x18, 0x18, 0x00, 0x00],
        'e' => [0x00, 0x00, 0x3C, 0x42, 0x7E, 0x40, 0x3C, 0x00],
        ' ' => [0x00; 8],
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_follows_font_size() {
        assert_eq!(glyph_scale(4.0), 1);
        assert_eq!(glyph_scale(11.0), 1);
        assert_eq!(glyph_scale(16.0), 2);
        assert_eq!(glyph_scale(22.0), 3);
    }

    #[test]
    fn measure_counts_advance_without_trailing_gap() {
        assert_eq!(measure("", 11.0), 0.0);
        assert_eq!(measure("1", 11.0), 8.0);
        assert_eq!(measure("12.50", 11.0), 44.0);
        assert_eq!(measure("12.50", 16.0), 88.0);
    }

    #[test]
    fn text_sits_on_the_baseline() {
        let mut canvas = Canvas::new(20, 20);
        draw_text(&mut canvas, "-", 2.0, 10.0, 8.0, RgbColor::BLACK);
        // the dash is row 3 of the glyph; top is baseline - 7
        assert_eq!(canvas.get_pixel(3, 6).3, 255);
        assert_eq!(canvas.get_pixel(3, 7).3, 0);
    }

    #[test]
    fn unknown_glyphs_still_advance() {
        let mut canvas = Canvas::new(40, 20);
        draw_text(&mut canvas, "?-", 0.0, 10.0, 8.0, RgbColor::BLACK);
        assert_eq!(canvas.get_pixel(2, 6).3, 0);
        assert_eq!(canvas.get_pixel(11, 6).3, 255);
    }

    #[test]
    fn outline_surrounds_the_glyph() {
        let mut canvas = Canvas::new(20, 20);
        stroke_text(&mut canvas, "-", 2.0, 10.0, 8.0, 2.0, RgbColor::WHITE);
        // one row above and below the dash get painted by the offsets
        assert_eq!(canvas.get_pixel(4, 5).3, 255);
        assert_eq!(canvas.get_pixel(4, 7).3, 255);
    }
}
