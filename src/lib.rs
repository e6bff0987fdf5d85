//! Polar charts: a projection between (radius, angle) and screen space, an
//! adaptive radial grid, arc tessellation of series, and PNG or terminal
//! output.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod polar;
pub mod renderer;
pub mod surface;

#[cfg(feature = "terminal")]
pub mod display;

pub use chart::{HostChart, Plot, PolarChart};
pub use color::{ColorScheme, RgbColor};
pub use config::{Config, PolarOptions};
pub use data::Series;
pub use error::{Error, Result};
pub use polar::{CartesianPoint, PolarPoint, Projection};
pub use renderer::Canvas;
pub use surface::Surface;
