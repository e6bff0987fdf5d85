//! Cached per-redraw geometry.
//!
//! Everything the renderer derives from the plot size, the polar options and
//! the data extent lives in a [`DrawingContext`]. The ring count needs text
//! measurement, so the context is computed once and reused by every draw call
//! of the same cycle.

use tracing::debug;

use super::grid_fit::fit_radial_marks;
use crate::config::{HorizontalOffset, PolarOptions};

/// Inputs the drawing context depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextKey {
    pub width: f64,
    pub height: f64,
    pub options: PolarOptions,
    /// Largest data radius; values below 1 are raised to 1
    pub data_extent: f64,
}

impl ContextKey {
    /// The rotational offset is left out: it belongs to the projection and
    /// no part of the geometry depends on it.
    pub fn new(width: f64, height: f64, options: &PolarOptions, data_extent: Option<f64>) -> Self {
        let mut options = options.clone();
        options.rotational_offset = 0.0;
        Self {
            width,
            height,
            options,
            data_extent: data_extent.filter(|e| *e > 1.0).unwrap_or(1.0),
        }
    }
}

/// Derived geometry for one key.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingContext {
    /// Disc center, in plot coordinates
    pub center_left: f64,
    pub center_top: f64,
    /// Outer disc radius in pixels
    pub max_radius: f64,
    /// Largest data radius shown at the rim
    pub max_x: f64,
    /// Pixels per data unit
    pub scale: f64,
    pub angle_steps: usize,
    /// Degrees between spokes
    pub angle_step: f64,
    pub radial_steps: usize,
    /// Pixels between rings
    pub radial_step: f64,
}

impl DrawingContext {
    pub fn compute<F>(key: &ContextKey, measure: F) -> Self
    where
        F: FnMut(&str) -> f64,
    {
        let options = &key.options;
        let text_size = options.text_size as f64;

        let max_radius = ((key.width - text_size * 2.0).min(key.height) / 2.0).max(0.0);
        let center_top = key.height / 2.0 + options.offset.top as f64;
        let mut center_left = key.width / 2.0;
        if let HorizontalOffset::Pixels(px) = options.offset.left {
            center_left += px as f64;
        }
        let center_left = clamp_center(center_left, max_radius, key.width);

        let max_x = key.data_extent;
        let scale = max_radius / max_x;
        let angle_steps = options.angle_subdivision.max(1) as usize;
        let radial_steps = fit_radial_marks(
            max_radius,
            scale,
            max_x,
            options.radial_marks_spacing as f64,
            measure,
        );

        Self {
            center_left,
            center_top,
            max_radius,
            max_x,
            scale,
            angle_steps,
            angle_step: 360.0 / angle_steps as f64,
            radial_steps,
            radial_step: max_radius / radial_steps as f64,
        }
    }
}

/// Keep a disc of `radius` inside `[0, width]` horizontally.
fn clamp_center(center: f64, radius: f64, width: f64) -> f64 {
    if center < radius {
        radius
    } else if center > width - radius {
        width - radius
    } else {
        center
    }
}

/// Drawing context with explicit invalidation.
#[derive(Debug, Default)]
pub struct ContextCache {
    entry: Option<(ContextKey, DrawingContext)>,
    valid: bool,
}

impl ContextCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the cached context stale; the next access recomputes it.
    pub fn invalidate(&mut self) {
        self.valid = false;
    }

    /// The context computed for the current cycle, if any.
    pub fn current(&self) -> Option<&DrawingContext> {
        match &self.entry {
            Some((_, ctx)) if self.valid => Some(ctx),
            _ => None,
        }
    }

    /// Return the cached context, recomputing it when stale or when `key`
    /// differs from the key it was computed for.
    pub fn get_or_compute<F>(&mut self, key: ContextKey, measure: F) -> &DrawingContext
    where
        F: FnMut(&str) -> f64,
    {
        let fresh = self.valid && matches!(&self.entry, Some((cached, _)) if *cached == key);
        if !fresh {
            self.entry = None;
        }
        self.valid = true;

        let (_, ctx) = self.entry.get_or_insert_with(|| {
            let ctx = DrawingContext::compute(&key, measure);
            debug!(
                width = key.width,
                height = key.height,
                max_radius = ctx.max_radius,
                rings = ctx.radial_steps,
                spokes = ctx.angle_steps,
                "drawing context recomputed"
            );
            (key, ctx)
        });
        ctx
    }
}
