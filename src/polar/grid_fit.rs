//! Radial ring fitting.
//!
//! Picks how many concentric rings the grid gets so that their labels, laid
//! end to end, do not exceed the outer radius. The bound is linear in the
//! ring count rather than true arc length, so it is a conservative heuristic.

use std::collections::HashMap;

use tracing::warn;

/// Upper bound on trial ring counts.
pub const MAX_RING_COUNT: usize = 32;

/// Label text for a ring at `value` data units.
pub fn radius_label(value: f64) -> String {
    format!("{:.2}", value)
}

/// Compute the ring count for a disc of `max_radius` surface units.
///
/// `measure` returns the rendered width of a label; each distinct label is
/// measured once. The result is at least 1. If labels never collide within
/// [`MAX_RING_COUNT`] trials the cap is returned.
pub fn fit_radial_marks<F>(
    max_radius: f64,
    scale: f64,
    max_data_radius: f64,
    spacing: f64,
    mut measure: F,
) -> usize
where
    F: FnMut(&str) -> f64,
{
    let mut widths: HashMap<String, f64> = HashMap::new();

    for count in 1..=MAX_RING_COUNT {
        let step = max_radius / count as f64;
        let mut occupied = 0.0;
        for i in 1..=count {
            let value = if scale > 0.0 && scale.is_finite() {
                step * i as f64 / scale
            } else {
                max_data_radius * i as f64 / count as f64
            };
            let label = radius_label(value);
            let width = match widths.get(&label) {
                Some(w) => *w,
                None => {
                    let w = measure(&label);
                    widths.insert(label, w);
                    w
                }
            };
            occupied += width + spacing;
        }
        occupied += spacing * (count - 1) as f64;

        // NaN radius compares false here and ends the search at one ring
        if !(occupied < max_radius) {
            return (count - 1).max(1);
        }
    }

    warn!(
        max_radius,
        spacing, "radial labels never collided, capping ring count at {}", MAX_RING_COUNT
    );
    MAX_RING_COUNT
}
