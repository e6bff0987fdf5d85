//! Polar <-> Cartesian projection.
//!
//! Angles are in degrees and grow clockwise on screen. The `+90°` term turns
//! the zero reference so that, with no rotational offset, angle zero points
//! along the positive x axis of the chart-local frame (screen y grows down).

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// A data point as (radius, angle in degrees).
///
/// Written as a two-element array `[radius, angle]` in data files.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct PolarPoint {
    pub radius: f64,
    pub angle: f64,
}

impl PolarPoint {
    pub fn new(radius: f64, angle: f64) -> Self {
        Self { radius, angle }
    }
}

impl From<[f64; 2]> for PolarPoint {
    fn from([radius, angle]: [f64; 2]) -> Self {
        Self { radius, angle }
    }
}

impl From<PolarPoint> for [f64; 2] {
    fn from(p: PolarPoint) -> Self {
        [p.radius, p.angle]
    }
}

/// A position relative to the disc center, in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CartesianPoint {
    pub x: f64,
    pub y: f64,
}

/// Bidirectional mapping for one chart, carrying its rotational offset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projection {
    rotational_offset: f64,
}

impl Projection {
    pub fn new(rotational_offset: f64) -> Self {
        Self { rotational_offset }
    }

    pub fn rotational_offset(&self) -> f64 {
        self.rotational_offset
    }

    /// Project a polar point, `scale` being surface units per data unit.
    pub fn to_cartesian(&self, point: PolarPoint, scale: f64) -> CartesianPoint {
        let r = point.radius * scale;
        let phi = (point.angle + self.rotational_offset + 90.0) * PI / 180.0;
        CartesianPoint {
            x: r * phi.sin(),
            y: r * phi.cos(),
        }
    }

    /// Inverse of [`Projection::to_cartesian`]; the angle comes back in [0, 360).
    pub fn to_polar(&self, x: f64, y: f64, scale: f64) -> PolarPoint {
        let radius = (x * x + y * y).sqrt() / scale;
        let phi = x.atan2(y).to_degrees();
        PolarPoint {
            radius,
            angle: normalize_angle(phi - self.rotational_offset - 90.0),
        }
    }
}

/// Wrap an angle in degrees into [0, 360).
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
