//! wgpu implementation of [`RenderBackend`](super::RenderBackend).

mod backend;
mod common;
mod frame;

pub use backend::WgpuBackend;
pub use frame::GpuFrame;
