use clap::Args;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::warn;

use crate::color::{ColorScheme, RgbColor};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub polar: PolarOptions,
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub series: SeriesConfig,
}

/// Options of the polar projection itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolarOptions {
    pub show: bool,
    pub offset: Offset,
    pub stroke: StrokeConfig,
    /// Label font size in pixels
    pub text_size: u32,
    /// Gap between ring labels used when fitting the ring count
    pub radial_marks_spacing: u32,
    /// Number of angular spokes
    pub angle_subdivision: u32,
    /// Degrees added to every angle before projection
    pub rotational_offset: f64,
}

impl Default for PolarOptions {
    fn default() -> Self {
        Self {
            show: true,
            offset: Offset::default(),
            stroke: StrokeConfig::default(),
            text_size: 11,
            radial_marks_spacing: 3,
            angle_subdivision: 8,
            rotational_offset: 0.0,
        }
    }
}

/// Shift of the disc center from the middle of the plot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Offset {
    pub top: i32,
    pub left: HorizontalOffset,
}

/// Horizontal center shift in pixels, or `auto` to stay centered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum HorizontalOffset {
    #[default]
    Auto,
    Pixels(i32),
}

impl fmt::Display for HorizontalOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizontalOffset::Auto => write!(f, "auto"),
            HorizontalOffset::Pixels(px) => write!(f, "{}", px),
        }
    }
}

impl FromStr for HorizontalOffset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(HorizontalOffset::Auto),
            other => other
                .parse::<i32>()
                .map(HorizontalOffset::Pixels)
                .map_err(|_| format!("Invalid offset '{}': expected auto or a pixel count", s)),
        }
    }
}

impl Serialize for HorizontalOffset {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            HorizontalOffset::Auto => serializer.serialize_str("auto"),
            HorizontalOffset::Pixels(px) => serializer.serialize_i32(*px),
        }
    }
}

impl<'de> Deserialize<'de> for HorizontalOffset {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Pixels(i32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Pixels(px) => Ok(HorizontalOffset::Pixels(px)),
            Raw::Text(s) => HorizontalOffset::from_str(&s).map_err(serde::de::Error::custom),
        }
    }
}

/// Outline of the background disc.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrokeConfig {
    pub color: RgbColor,
    pub width: u32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            color: RgbColor::WHITE,
            width: 1,
        }
    }
}

/// Colors and widths of the reference grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Fill of the plot area outside the disc
    pub page_color: RgbColor,
    pub background_color: RgbColor,
    pub markings_color: RgbColor,
    pub markings_line_width: f64,
    pub label_color: RgbColor,
    /// Ring and spoke drawn under the cursor
    pub cursor_color: RgbColor,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            page_color: RgbColor::WHITE,
            background_color: RgbColor::new(0xF8, 0xF8, 0xF8),
            markings_color: RgbColor::new(0xC8, 0xC8, 0xC8),
            markings_line_width: 2.0,
            label_color: RgbColor::new(0x54, 0x54, 0x54),
            cursor_color: RgbColor::new(0xD9, 0x53, 0x4F),
        }
    }
}

/// Defaults applied to every series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    pub line_width: f64,
    pub color_scheme: ColorScheme,
    /// Widest angle in degrees drawn as a single chord
    pub min_segment_deg: f64,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            line_width: 2.0,
            color_scheme: ColorScheme::Spectrum,
            min_segment_deg: 5.0,
        }
    }
}

/// Command-line overrides, applied on top of the config file.
#[derive(Debug, Clone, Default, Args)]
pub struct ConfigOverrides {
    /// Rotational offset in degrees
    #[arg(long, allow_hyphen_values = true)]
    pub rotation: Option<f64>,

    /// Label text size in pixels
    #[arg(long)]
    pub text_size: Option<u32>,

    /// Number of angular spokes
    #[arg(long)]
    pub spokes: Option<u32>,

    /// Spacing between ring labels in pixels
    #[arg(long)]
    pub marks_spacing: Option<u32>,

    /// Vertical center offset in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub offset_top: Option<i32>,

    /// Horizontal center offset in pixels, or "auto"
    #[arg(long, allow_hyphen_values = true)]
    pub offset_left: Option<HorizontalOffset>,

    /// Series color scheme: spectrum, rainbow, ocean, monochrome
    #[arg(long)]
    pub colors: Option<ColorScheme>,

    /// Series line width
    #[arg(long)]
    pub line_width: Option<f64>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        toml::from_str(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Get the default XDG config path (~/.config/polarplot/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("polarplot").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if !path.exists() {
            return None;
        }
        match Self::load(&path) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("{}; using defaults", e);
                None
            }
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path().ok_or(Error::NoConfigDir)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }

        std::fs::write(&path, Self::generate_config_template()).map_err(|e| Error::io(&path, e))?;
        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r##"# polarplot configuration
# This file is auto-generated. Edit as needed.

[polar]
# Draw the polar chart at all
show = true
# Degrees added to every angle; rotates the whole chart clockwise
rotational_offset = 0.0
# Label font size in pixels
text_size = 11
# Gap in pixels between ring labels when deciding how many rings fit
radial_marks_spacing = 3
# Number of angular spokes
angle_subdivision = 8

[polar.offset]
# Move the disc down (positive) or up (negative), in pixels
top = 0
# Move the disc right/left in pixels, or "auto" to keep it centered
left = "auto"

[polar.stroke]
# Outline of the background disc
color = "#FFFFFF"
width = 1

[grid]
page_color = "#FFFFFF"
background_color = "#F8F8F8"
markings_color = "#C8C8C8"
markings_line_width = 2.0
label_color = "#545454"
cursor_color = "#D9534F"

[series]
# Line width used when a series does not set its own
line_width = 2.0
# Colors for series without an explicit color: spectrum, rainbow, ocean, monochrome
color_scheme = "spectrum"
# Widest angle in degrees drawn as a single straight chord
min_segment_deg = 5.0
"##
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &ConfigOverrides) {
        if let Some(rotation) = args.rotation {
            self.polar.rotational_offset = rotation;
        }
        if let Some(size) = args.text_size {
            self.polar.text_size = size;
        }
        if let Some(spokes) = args.spokes {
            self.polar.angle_subdivision = spokes.max(1);
        }
        if let Some(spacing) = args.marks_spacing {
            self.polar.radial_marks_spacing = spacing;
        }
        if let Some(top) = args.offset_top {
            self.polar.offset.top = top;
        }
        if let Some(left) = args.offset_left {
            self.polar.offset.left = left;
        }
        if let Some(scheme) = args.colors {
            self.series.color_scheme = scheme;
        }
        if let Some(width) = args.line_width {
            self.series.line_width = width;
        }
    }

    /// Write the rotational offset into the config file at `path`, keeping
    /// its comments and layout. Creates the file from the template if missing.
    pub fn save_rotational_offset(path: &Path, offset: f64) -> Result<()> {
        let content = if path.exists() {
            std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?
        } else {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
            }
            Self::generate_config_template()
        };

        let mut doc = content
            .parse::<toml_edit::DocumentMut>()
            .map_err(|source| Error::Edit {
                path: path.to_path_buf(),
                source,
            })?;

        if !doc.contains_key("polar") {
            doc["polar"] = toml_edit::table();
        }
        doc["polar"]["rotational_offset"] = toml_edit::value(offset);

        std::fs::write(path, doc.to_string()).map_err(|e| Error::io(path, e))
    }
}
