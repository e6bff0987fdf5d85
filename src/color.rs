use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// RGB color, written as `#RRGGBB` in configuration and data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const WHITE: RgbColor = RgbColor::new(255, 255, 255);
    pub const BLACK: RgbColor = RgbColor::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from hex string like "#FF0000", "FF0000" or the short form "#FFF"
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self { r, g, b })
            }
            3 => {
                let digit = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|d| d * 17);
                Some(Self {
                    r: digit(0)?,
                    g: digit(1)?,
                    b: digit(2)?,
                })
            }
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for RgbColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for RgbColor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s).ok_or_else(|| Error::InvalidColor(s.to_string()))
    }
}

impl Serialize for RgbColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for RgbColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        RgbColor::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Palette used to color series that do not name a color.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Spectrum,
    Rainbow,
    Ocean,
    Monochrome,
}

impl FromStr for ColorScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "spectrum" => Ok(Self::Spectrum),
            "rainbow" => Ok(Self::Rainbow),
            "ocean" => Ok(Self::Ocean),
            "mono" | "monochrome" => Ok(Self::Monochrome),
            _ => Err(format!("Unknown color scheme: {}", s)),
        }
    }
}

impl ColorScheme {
    /// Get color for a given position (0.0 to 1.0)
    pub fn get_color(&self, position: f32) -> RgbColor {
        let (h, s, l) = match self {
            ColorScheme::Spectrum => {
                // Classic spectrum: blue -> green -> red, kept dark enough for a light disc
                let hue = 240.0 - (position * 240.0);
                (hue, 0.85, 0.42)
            }
            ColorScheme::Rainbow => (position * 360.0, 0.85, 0.5),
            ColorScheme::Ocean => (180.0 + position * 60.0, 0.8, 0.35),
            ColorScheme::Monochrome => (0.0, 0.0, 0.15 + position * 0.5),
        };

        let hsl = Hsl::new(h, s, l);
        let rgb: Srgb = hsl.into_color();

        RgbColor::new(
            (rgb.red.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.green.clamp(0.0, 1.0) * 255.0) as u8,
            (rgb.blue.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }

    /// Color for series `index` out of `count`, spread evenly over the scheme.
    pub fn series_color(&self, index: usize, count: usize) -> RgbColor {
        let position = if count > 1 {
            index as f32 / (count - 1) as f32
        } else {
            0.0
        };
        self.get_color(position)
    }
}
