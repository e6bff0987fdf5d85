//! Polar geometry: projection, ring fitting, arc tessellation and the cached
//! drawing context.

pub mod context;
pub mod grid_fit;
pub mod projection;
pub mod tessellate;

pub use context::{ContextCache, ContextKey, DrawingContext};
pub use grid_fit::{fit_radial_marks, radius_label, MAX_RING_COUNT};
pub use projection::{normalize_angle, CartesianPoint, PolarPoint, Projection};
pub use tessellate::{
    shortest_delta, tessellate, Segment, DEFAULT_MIN_SEGMENT_DEG, MAX_SEGMENT_CHORDS,
};
