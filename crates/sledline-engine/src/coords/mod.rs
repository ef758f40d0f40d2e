//! Coordinate and geometry types shared by the geometry core and assemblers.
//!
//! Two spaces are in play:
//! - world: track units, as stored by the track and the physics simulation
//! - screen: pixels, origin top-left, +X right, +Y down
//!
//! [`Transform`] maps between them. Everything handed to a backend is in screen space.

mod rect;
mod transform;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use transform::Transform;
pub use vec2::Vec2;
pub use viewport::Viewport;
