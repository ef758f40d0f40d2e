//! Pure geometry generators.
//!
//! Nothing here touches a backend: every function maps explicit inputs to
//! vertices or points, so the same code serves the frame loop, tools and tests.
//!
//! Inputs to [`thick_line`] and [`circle_fan`] are already in screen space.
//! [`rounded_line`] takes world-space endpoints and applies the [`Transform`].
//!
//! [`Transform`]: crate::coords::Transform

mod circle;
mod rounded_line;
mod thick_line;
mod turtle;

pub use circle::{circle_fan, CIRCLE_SEGMENTS};
pub use rounded_line::{push_rounded_line, rounded_line, rounded_line_vertex_count, Knobs};
pub use thick_line::{quad_triangles, thick_line};
pub use turtle::Turtle;
