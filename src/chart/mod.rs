//! The polar chart engine.
//!
//! [`PolarChart`] owns the projection (and with it the rotational offset)
//! and the drawing-context cache. A redraw invalidates the cache, recomputes
//! it against the host's current plot size, options and data, draws the grid
//! and then hands each tessellated series to the host to stroke.

pub mod grid;
pub mod host;
pub mod label;

pub use host::{HostChart, Plot};

use tracing::debug;

use crate::color::RgbColor;
use crate::config::PolarOptions;
use crate::data::{data_extent, Series};
use crate::polar::{tessellate, ContextCache, ContextKey, DrawingContext, PolarPoint, Projection};
use crate::surface::Surface;
use grid::{draw_angle_mark, draw_background, draw_radius_mark, MarkStyle};

pub struct PolarChart {
    projection: Projection,
    cache: ContextCache,
}

impl PolarChart {
    /// Build a chart; the rotational offset is fixed for its lifetime.
    ///
    /// Later changes to `options.rotational_offset` are not picked up, and
    /// they do not invalidate the cached context either. Build a new chart
    /// to rotate.
    pub fn new(options: &PolarOptions) -> Self {
        Self {
            projection: Projection::new(options.rotational_offset),
            cache: ContextCache::new(),
        }
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Geometry of the last redraw, if it is still valid.
    pub fn context(&self) -> Option<&DrawingContext> {
        self.cache.current()
    }

    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Compute (or reuse) the drawing context for the host's current state.
    pub fn prepare<H>(&mut self, host: &H, surface: &mut dyn Surface) -> &DrawingContext
    where
        H: HostChart + ?Sized,
    {
        let (width, height) = host.plot_size();
        let options = host.options();
        let key = ContextKey::new(width, height, options, data_extent(host.series()));

        surface.save();
        surface.set_font_size(options.text_size as f64);
        let ctx = self
            .cache
            .get_or_compute(key, |text| surface.measure_text(text));
        surface.restore();
        ctx
    }

    /// Full redraw: background, rings, spokes, then every series.
    pub fn draw<H>(&mut self, host: &H, surface: &mut dyn Surface)
    where
        H: HostChart + ?Sized,
    {
        let options = host.options();
        if !options.show {
            debug!("polar chart disabled, skipping draw");
            return;
        }
        if host.series().is_empty() {
            debug!("no series to draw");
            return;
        }

        self.cache.invalidate();
        let ctx = self.prepare(host, surface).clone();
        let grid = host.grid();
        let offset = self.projection.rotational_offset();

        surface.save();
        surface.translate(ctx.center_left, ctx.center_top);

        draw_background(surface, grid.background_color, ctx.max_radius, &options.stroke);

        let style = MarkStyle {
            line_color: grid.markings_color,
            line_width: grid.markings_line_width / 2.0,
            label_color: grid.label_color,
            text_size: options.text_size as f64,
            background: false,
        };
        for i in 1..=ctx.radial_steps {
            draw_radius_mark(
                surface,
                &self.projection,
                ctx.radial_step * i as f64,
                ctx.scale,
                &style,
            );
        }
        for i in 0..ctx.angle_steps {
            let angle = ctx.angle_step * i as f64 - offset;
            draw_angle_mark(surface, &self.projection, angle, ctx.max_radius, &style, None);
        }

        let min_segment_deg = host.min_segment_deg();
        for series in host.series() {
            let points = tessellate(&series.points, &self.projection, ctx.scale, min_segment_deg);
            host.stroke_polyline(surface, &points, series.color, series.line_width);
        }

        surface.restore();
    }

    /// Polar position of a cursor given in plot coordinates.
    pub fn cursor_polar(&self, x: f64, y: f64) -> Option<PolarPoint> {
        let ctx = self.cache.current()?;
        Some(
            self.projection
                .to_polar(x - ctx.center_left, y - ctx.center_top, ctx.scale),
        )
    }

    /// Highlight the ring and spoke under a cursor given in plot coordinates.
    ///
    /// Draws nothing outside the disc or before the first redraw.
    pub fn draw_cursor<H>(&self, host: &H, surface: &mut dyn Surface, x: f64, y: f64)
    where
        H: HostChart + ?Sized,
    {
        let Some(ctx) = self.cache.current() else {
            return;
        };
        let Some(pos) = self.cursor_polar(x, y) else {
            return;
        };
        let radius = pos.radius * ctx.scale;
        if !(radius < ctx.max_radius) {
            return;
        }

        let options = host.options();
        let grid = host.grid();
        let style = MarkStyle {
            line_color: grid.cursor_color,
            line_width: 1.0,
            label_color: grid.cursor_color,
            text_size: options.text_size as f64,
            background: true,
        };

        surface.save();
        surface.translate(ctx.center_left, ctx.center_top);
        draw_radius_mark(surface, &self.projection, radius, ctx.scale, &style);
        let label = format!("{:.2}", pos.angle);
        draw_angle_mark(
            surface,
            &self.projection,
            pos.angle,
            ctx.max_radius,
            &style,
            Some(&label),
        );
        surface.restore();
    }

    /// Redraw one series over the last redraw in an override color and width.
    ///
    /// Draws nothing before the first redraw.
    pub fn draw_series_highlight<H>(
        &self,
        host: &H,
        surface: &mut dyn Surface,
        series: &Series,
        color: RgbColor,
        line_width: f64,
    ) where
        H: HostChart + ?Sized,
    {
        let Some(ctx) = self.cache.current() else {
            return;
        };
        let points = tessellate(
            &series.points,
            &self.projection,
            ctx.scale,
            host.min_segment_deg(),
        );

        surface.save();
        surface.translate(ctx.center_left, ctx.center_top);
        host.stroke_polyline(surface, &points, color, line_width);
        surface.restore();
    }
}
