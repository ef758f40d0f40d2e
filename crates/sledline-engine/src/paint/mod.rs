//! Color model shared by geometry producers and backends.
//!
//! Colors are straight-alpha 8-bit RGBA on the CPU side; backends decide how
//! to blend them.

pub mod color;

pub use color::{opacity_to_alpha, Color};
