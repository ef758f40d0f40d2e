use std::collections::BTreeSet;

use crate::batch::{TextureHandle, Vertex, VertexBatch};

use super::{BlendMode, Capability, Primitive, RenderBackend};

/// One submitted draw, with the state it was drawn under.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub primitive: Primitive,
    pub vertices: Vec<Vertex>,
    /// Batch texture; only sampled when `textured` is set.
    pub texture: TextureHandle,
    /// Active blend mode, `None` when blending was disabled.
    pub blend: Option<BlendMode>,
    pub textured: bool,
}

/// A single backend interaction, in call order.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Enable(Capability),
    Disable(Capability),
    SetBlend(BlendMode),
    Draw(DrawRecord),
}

/// In-memory backend that records every call instead of rasterizing.
///
/// Useful for tests and tooling: it makes draw order, state scoping and the
/// exact vertex stream of a frame observable.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    calls: Vec<BackendCall>,
    enabled: BTreeSet<Capability>,
    blend: BlendMode,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, in order.
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Recorded draws only, in order.
    pub fn draws(&self) -> impl Iterator<Item = &DrawRecord> {
        self.calls.iter().filter_map(|c| match c {
            BackendCall::Draw(d) => Some(d),
            _ => None,
        })
    }

    pub fn draw_count(&self) -> usize {
        self.draws().count()
    }

    pub fn vertex_count(&self) -> usize {
        self.draws().map(|d| d.vertices.len()).sum()
    }

    pub fn is_enabled(&self, cap: Capability) -> bool {
        self.enabled.contains(&cap)
    }

    /// Capabilities currently left enabled.
    pub fn enabled(&self) -> impl Iterator<Item = Capability> + '_ {
        self.enabled.iter().copied()
    }

    /// Forgets recorded calls. Current state is kept.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl RenderBackend for RecordingBackend {
    fn enable(&mut self, cap: Capability) {
        self.enabled.insert(cap);
        self.calls.push(BackendCall::Enable(cap));
    }

    fn disable(&mut self, cap: Capability) {
        self.enabled.remove(&cap);
        self.calls.push(BackendCall::Disable(cap));
    }

    fn set_blend(&mut self, mode: BlendMode) {
        self.blend = mode;
        self.calls.push(BackendCall::SetBlend(mode));
    }

    fn draw(&mut self, batch: &VertexBatch, primitive: Primitive) {
        log::trace!(
            "recording draw: {:?} x{} texture={:?}",
            primitive,
            batch.len(),
            batch.texture()
        );
        self.calls.push(BackendCall::Draw(DrawRecord {
            primitive,
            vertices: batch.vertices().to_vec(),
            texture: batch.texture(),
            blend: self.is_enabled(Capability::Blend).then_some(self.blend),
            textured: self.is_enabled(Capability::Texture2D),
        }));
    }
}
