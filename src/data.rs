//! Series data and the TOML data file they are loaded from.
//!
//! ```toml
//! [[series]]
//! label = "wind"
//! color = "#1F77B4"
//! points = [[1.0, 0.0], [2.5, 45.0], [2.0, 170.0]]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::color::{ColorScheme, RgbColor};
use crate::config::SeriesConfig;
use crate::error::{Error, Result};
use crate::polar::PolarPoint;

/// A series ready to draw: samples in order plus how to stroke them.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: Option<String>,
    pub points: Vec<PolarPoint>,
    pub color: RgbColor,
    pub line_width: f64,
}

impl Series {
    pub fn new(points: Vec<PolarPoint>, color: RgbColor, line_width: f64) -> Self {
        Self {
            label: None,
            points,
            color,
            line_width,
        }
    }

    /// Largest radius in the series, ignoring non-finite values.
    pub fn max_radius(&self) -> Option<f64> {
        self.points
            .iter()
            .map(|p| p.radius)
            .filter(|r| r.is_finite())
            .fold(None, |acc, r| Some(acc.map_or(r, |m: f64| m.max(r))))
    }
}

/// Largest radius over all series, used as the data extent of the chart.
pub fn data_extent(series: &[Series]) -> Option<f64> {
    series
        .iter()
        .filter_map(Series::max_radius)
        .fold(None, |acc, r| Some(acc.map_or(r, |m: f64| m.max(r))))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataFile {
    #[serde(default)]
    pub series: Vec<SeriesEntry>,
}

/// One `[[series]]` table as written in a data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeriesEntry {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub color: Option<RgbColor>,
    #[serde(default)]
    pub line_width: Option<f64>,
    pub points: Vec<PolarPoint>,
}

impl DataFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve colors and widths, filling gaps from the series defaults.
    pub fn into_series(self, defaults: &SeriesConfig) -> Vec<Series> {
        resolve_series(self.series, defaults.color_scheme, defaults.line_width)
    }
}

pub fn resolve_series(
    entries: Vec<SeriesEntry>,
    scheme: ColorScheme,
    line_width: f64,
) -> Vec<Series> {
    let count = entries.len();
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| Series {
            label: entry.label,
            points: entry.points,
            color: entry.color.unwrap_or_else(|| scheme.series_color(i, count)),
            line_width: entry.line_width.unwrap_or(line_width),
        })
        .collect()
}

/// Built-in data shown when no data file is given.
pub fn demo_series(defaults: &SeriesConfig) -> Vec<Series> {
    let spiral: Vec<PolarPoint> = (0..=72)
        .map(|i| PolarPoint::new(0.5 + i as f64 * 0.1, i as f64 * 10.0))
        .collect();
    let rose: Vec<PolarPoint> = (0..=36)
        .map(|i| {
            let angle = i as f64 * 10.0;
            PolarPoint::new(4.0 * (2.0 * angle.to_radians()).cos().abs() + 1.0, angle)
        })
        .collect();
    let sparse = vec![
        PolarPoint::new(6.0, 0.0),
        PolarPoint::new(6.0, 120.0),
        PolarPoint::new(3.0, 240.0),
        PolarPoint::new(6.0, 0.0),
    ];

    let entries = [("spiral", spiral), ("rose", rose), ("triangle", sparse)]
        .into_iter()
        .map(|(label, points)| SeriesEntry {
            label: Some(label.to_string()),
            color: None,
            line_width: None,
            points,
        })
        .collect();
    resolve_series(entries, defaults.color_scheme, defaults.line_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
[[series]]
label = "wind"
color = "#FF0000"
points = [[1.0, 0.0], [2.5, 45.0]]

[[series]]
line_width = 4.0
points = [[3.0, 350.0], [0.5, 10.0]]
"##;

    #[test]
    fn parses_series_tables() {
        let file: DataFile = toml::from_str(SAMPLE).unwrap();
        let series = file.into_series(&SeriesConfig::default());
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].label.as_deref(), Some("wind"));
        assert_eq!(series[0].color, RgbColor::new(255, 0, 0));
        assert_eq!(series[0].points[1], PolarPoint::new(2.5, 45.0));
        assert_eq!(series[0].line_width, 2.0);
        assert_eq!(series[1].line_width, 4.0);
        assert_eq!(series[1].color, ColorScheme::Spectrum.series_color(1, 2));
    }

    #[test]
    fn extent_is_the_largest_radius() {
        let file: DataFile = toml::from_str(SAMPLE).unwrap();
        let series = file.into_series(&SeriesConfig::default());
        assert_eq!(data_extent(&series), Some(3.0));
        assert_eq!(data_extent(&[]), None);
    }

    #[test]
    fn extent_skips_non_finite_radii() {
        let series = Series::new(
            vec![PolarPoint::new(f64::NAN, 0.0), PolarPoint::new(2.0, 0.0)],
            RgbColor::BLACK,
            1.0,
        );
        assert_eq!(series.max_radius(), Some(2.0));
    }

    #[test]
    fn malformed_points_are_rejected() {
        assert!(toml::from_str::<DataFile>("[[series]]\npoints = [[1.0]]\n").is_err());
    }

    #[test]
    fn demo_data_is_drawable() {
        let series = demo_series(&SeriesConfig::default());
        assert_eq!(series.len(), 3);
        assert!(series.iter().all(|s| s.points.len() >= 2));
    }
}
