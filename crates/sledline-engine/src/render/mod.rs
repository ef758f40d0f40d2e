//! Backend abstraction.
//!
//! Assemblers talk to a [`RenderBackend`]: they toggle [`Capability`]s through
//! [`StateScope`] guards and submit [`VertexBatch`]es in painter's order.
//!
//! Two backends ship with the crate:
//! - [`RecordingBackend`]: records calls, used by tests and tooling
//! - [`WgpuBackend`]: records spans and encodes them into a wgpu render pass
//!
//! [`VertexBatch`]: crate::batch::VertexBatch

mod backend;
mod gpu;
mod recording;
mod scope;

pub use backend::{BlendMode, Capability, Primitive, RenderBackend};
pub use gpu::{GpuFrame, WgpuBackend};
pub use recording::{BackendCall, DrawRecord, RecordingBackend};
pub use scope::{with_capability, StateScope};
