//! Vertex batching.
//!
//! Producers append screen-space vertices to a [`VertexBatch`]; the batch is
//! submitted once to a backend and then cleared for the next draw.

mod list;
mod vertex;

pub use list::VertexBatch;
pub use vertex::{TextureHandle, Vertex};
