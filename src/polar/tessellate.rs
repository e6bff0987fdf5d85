//! Arc tessellation of polar series.
//!
//! A straight line between two polar samples is not a straight line on
//! screen. Segments that sweep more than a threshold angle are split into
//! short chords by interpolating radius and angle linearly in polar space.

use super::projection::{CartesianPoint, PolarPoint, Projection};

/// Default maximum angular span of a single chord, in degrees.
pub const DEFAULT_MIN_SEGMENT_DEG: f64 = 5.0;

/// Upper bound on chords per segment, whatever the threshold.
pub const MAX_SEGMENT_CHORDS: usize = 360;

/// Directed pair of samples with the signed minor-arc sweep between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: PolarPoint,
    pub to: PolarPoint,
    /// Sweep from `from` to `to` in degrees, within (-180, 180].
    pub delta: f64,
}

impl Segment {
    pub fn new(from: PolarPoint, to: PolarPoint) -> Self {
        Self {
            from,
            to,
            delta: shortest_delta(from.angle, to.angle),
        }
    }

    /// Number of chords this segment is drawn with, in `1..=MAX_SEGMENT_CHORDS`.
    pub fn subdivisions(&self, min_segment_deg: f64) -> usize {
        let sweep = self.delta.abs();
        if sweep <= min_segment_deg {
            1
        } else {
            // NaN casts to 0; huge ratios saturate
            ((sweep / min_segment_deg).ceil() as usize).clamp(1, MAX_SEGMENT_CHORDS)
        }
    }

    /// Polar point at fraction `t` of the way along the segment.
    fn lerp(&self, t: f64) -> PolarPoint {
        PolarPoint {
            radius: self.from.radius + (self.to.radius - self.from.radius) * t,
            angle: self.from.angle + self.delta * t,
        }
    }
}

/// Signed minimal angular difference `to - from`, normalized into (-180, 180].
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(360.0);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}

/// Convert a series into a screen polyline that follows the arcs between samples.
///
/// Each segment starts and ends on the exact projection of its samples; the
/// shared point between consecutive segments appears once.
pub fn tessellate(
    points: &[PolarPoint],
    projection: &Projection,
    scale: f64,
    min_segment_deg: f64,
) -> Vec<CartesianPoint> {
    if points.len() < 2 {
        return Vec::new();
    }

    let min_segment_deg = if min_segment_deg.is_finite() && min_segment_deg > 0.0 {
        min_segment_deg
    } else {
        DEFAULT_MIN_SEGMENT_DEG
    };

    let mut out = Vec::with_capacity(points.len());
    out.push(projection.to_cartesian(points[0], scale));

    for pair in points.windows(2) {
        let segment = Segment::new(pair[0], pair[1]);
        let steps = segment.subdivisions(min_segment_deg);
        for j in 1..steps {
            let t = j as f64 / steps as f64;
            out.push(projection.to_cartesian(segment.lerp(t), scale));
        }
        out.push(projection.to_cartesian(segment.to, scale));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(radius: f64, angle: f64) -> PolarPoint {
        PolarPoint::new(radius, angle)
    }

    #[test]
    fn delta_takes_the_short_way_round() {
        assert_eq!(shortest_delta(350.0, 10.0), 20.0);
        assert_eq!(shortest_delta(10.0, 350.0), -20.0);
        assert_eq!(shortest_delta(0.0, 180.0), 180.0);
        assert_eq!(shortest_delta(180.0, 0.0), 180.0);
        assert_eq!(shortest_delta(-720.0, 725.0), 5.0);
    }

    #[test]
    fn delta_stays_in_half_open_range() {
        let mut from = -400.0;
        while from < 400.0 {
            let mut to = -400.0;
            while to < 400.0 {
                let d = shortest_delta(from, to);
                assert!(d > -180.0 && d <= 180.0, "{from} -> {to} gave {d}");
                to += 13.7;
            }
            from += 11.3;
        }
    }

    #[test]
    fn tiny_thresholds_stay_bounded() {
        let half_turn = Segment::new(pt(1.0, 0.0), pt(1.0, 180.0));
        assert_eq!(half_turn.subdivisions(1e-9), MAX_SEGMENT_CHORDS);
        assert_eq!(half_turn.subdivisions(1e-300), MAX_SEGMENT_CHORDS);
        assert_eq!(half_turn.subdivisions(1.0), 180);

        let projection = Projection::default();
        let out = tessellate(&[pt(1.0, 0.0), pt(1.0, 180.0)], &projection, 1.0, 1e-12);
        assert_eq!(out.len(), MAX_SEGMENT_CHORDS + 1);
        assert_eq!(
            *out.last().unwrap(),
            projection.to_cartesian(pt(1.0, 180.0), 1.0)
        );
    }

    #[test]
    fn nan_angles_still_reach_the_endpoint() {
        let segment = Segment::new(pt(1.0, f64::NAN), pt(1.0, 10.0));
        assert_eq!(segment.subdivisions(5.0), 1);
    }

    #[test]
    fn short_series_produce_nothing() {
        let projection = Projection::default();
        assert!(tessellate(&[], &projection, 1.0, 5.0).is_empty());
        assert!(tessellate(&[pt(1.0, 0.0)], &projection, 1.0, 5.0).is_empty());
    }

    #[test]
    fn small_sweeps_stay_straight() {
        let projection = Projection::default();
        let out = tessellate(&[pt(1.0, 10.0), pt(2.0, 15.0)], &projection, 1.0, 5.0);
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn wide_sweeps_are_subdivided() {
        let projection = Projection::default();
        let out = tessellate(&[pt(1.0, 0.0), pt(1.0, 37.0)], &projection, 1.0, 5.0);
        assert_eq!(out.len(), 9);
    }

    #[test]
    fn endpoints_match_direct_projection() {
        let projection = Projection::new(12.5);
        for (a, b) in [(0.0, 3.0), (10.0, 170.0), (350.0, 10.0), (0.0, 180.0)] {
            let p1 = pt(2.0, a);
            let p2 = pt(5.0, b);
            let out = tessellate(&[p1, p2], &projection, 7.0, 5.0);
            assert_eq!(out[0], projection.to_cartesian(p1, 7.0));
            assert_eq!(*out.last().unwrap(), projection.to_cartesian(p2, 7.0));
        }
    }

    #[test]
    fn quarter_circle_traces_the_arc() {
        let projection = Projection::new(0.0);
        let out = tessellate(&[pt(1.0, 0.0), pt(1.0, 90.0)], &projection, 10.0, 5.0);
        assert_eq!(out.len(), 19);
        for p in &out {
            assert!(((p.x * p.x + p.y * p.y).sqrt() - 10.0).abs() < 1e-9);
        }
        assert!((out[0].x - 10.0).abs() < 1e-9 && out[0].y.abs() < 1e-9);
        let last = out.last().unwrap();
        assert!(last.x.abs() < 1e-9 && (last.y + 10.0).abs() < 1e-9);
    }

    #[test]
    fn wraparound_sweeps_the_minor_arc() {
        let projection = Projection::new(0.0);
        let out = tessellate(&[pt(1.0, 350.0), pt(1.0, 10.0)], &projection, 1.0, 5.0);
        // 20 degrees in 4 chords, never passing through 180
        assert_eq!(out.len(), 5);
        for p in &out {
            assert!(p.x > 0.9);
        }
    }

    #[test]
    fn radius_is_interpolated_linearly() {
        let projection = Projection::new(0.0);
        let out = tessellate(&[pt(1.0, 0.0), pt(3.0, 20.0)], &projection, 1.0, 5.0);
        let radii: Vec<f64> = out.iter().map(|p| (p.x * p.x + p.y * p.y).sqrt()).collect();
        let expected = [1.0, 1.5, 2.0, 2.5, 3.0];
        for (r, e) in radii.iter().zip(expected) {
            assert!((r - e).abs() < 1e-9);
        }
    }

    #[test]
    fn joints_are_not_duplicated() {
        let projection = Projection::default();
        let out = tessellate(
            &[pt(1.0, 0.0), pt(1.0, 2.0), pt(1.0, 4.0)],
            &projection,
            1.0,
            5.0,
        );
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn bad_threshold_falls_back_to_default() {
        let projection = Projection::default();
        let zero = tessellate(&[pt(1.0, 0.0), pt(1.0, 37.0)], &projection, 1.0, 0.0);
        let nan = tessellate(&[pt(1.0, 0.0), pt(1.0, 37.0)], &projection, 1.0, f64::NAN);
        assert_eq!(zero.len(), 9);
        assert_eq!(nan.len(), 9);
    }
}
