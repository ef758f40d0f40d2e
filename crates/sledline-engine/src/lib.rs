//! Sledline engine crate.
//!
//! Geometry and scene assembly for a line-rider style editor: track lines, the
//! rider and its scarf become vertex batches, submitted to a backend-agnostic
//! [`render::RenderBackend`]. A wgpu backend and a headless device are included.

pub mod batch;
pub mod coords;
pub mod device;
pub mod geom;
pub mod logging;
pub mod paint;
pub mod render;
pub mod scene;
