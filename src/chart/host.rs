//! What the chart needs from its host: plot size, options, series, and a
//! way to stroke a polyline.

use crate::color::RgbColor;
use crate::config::{Config, GridConfig, PolarOptions};
use crate::data::Series;
use crate::polar::{CartesianPoint, DEFAULT_MIN_SEGMENT_DEG};
use crate::surface::Surface;

pub trait HostChart {
    /// Plot area in surface pixels, (width, height).
    fn plot_size(&self) -> (f64, f64);
    fn options(&self) -> &PolarOptions;
    fn grid(&self) -> &GridConfig;
    fn series(&self) -> &[Series];

    /// Widest angle drawn as one chord when tessellating series.
    fn min_segment_deg(&self) -> f64 {
        DEFAULT_MIN_SEGMENT_DEG
    }

    /// Stroke a tessellated series.
    fn stroke_polyline(
        &self,
        surface: &mut dyn Surface,
        points: &[CartesianPoint],
        color: RgbColor,
        line_width: f64,
    ) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        surface.save();
        surface.set_stroke_color(color);
        surface.set_line_width(line_width);
        surface.begin_path();
        surface.move_to(first.x, first.y);
        for p in rest {
            surface.line_to(p.x, p.y);
        }
        surface.stroke();
        surface.restore();
    }
}

/// Host backed by a loaded [`Config`] and a fixed set of series.
#[derive(Debug, Clone)]
pub struct Plot {
    pub width: f64,
    pub height: f64,
    pub config: Config,
    pub series: Vec<Series>,
}

impl Plot {
    pub fn new(width: f64, height: f64, config: Config, series: Vec<Series>) -> Self {
        Self {
            width,
            height,
            config,
            series,
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

impl HostChart for Plot {
    fn plot_size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn options(&self) -> &PolarOptions {
        &self.config.polar
    }

    fn grid(&self) -> &GridConfig {
        &self.config.grid
    }

    fn series(&self) -> &[Series] {
        &self.series
    }

    fn min_segment_deg(&self) -> f64 {
        self.config.series.min_segment_deg
    }
}
