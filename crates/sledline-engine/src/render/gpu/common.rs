//! Shared GPU types for the wgpu backend.

use bytemuck::{Pod, Zeroable};

use crate::batch::Vertex;
use crate::render::{BlendMode, Primitive};

// ── blend ─────────────────────────────────────────────────────────────────

pub(super) fn blend_state(mode: Option<BlendMode>) -> Option<wgpu::BlendState> {
    let src_factor = match mode? {
        BlendMode::Alpha => wgpu::BlendFactor::SrcAlpha,
        BlendMode::Premultiplied => wgpu::BlendFactor::One,
    };
    let component = wgpu::BlendComponent {
        src_factor,
        dst_factor: wgpu::BlendFactor::OneMinusSrcAlpha,
        operation: wgpu::BlendOperation::Add,
    };
    Some(wgpu::BlendState { color: component, alpha: component })
}

pub(super) fn topology(primitive: Primitive) -> wgpu::PrimitiveTopology {
    match primitive {
        Primitive::Triangles => wgpu::PrimitiveTopology::TriangleList,
        Primitive::Lines => wgpu::PrimitiveTopology::LineList,
    }
}

// ── viewport uniform ──────────────────────────────────────────────────────

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct ViewportUniform {
    pub viewport: [f32; 2],
    pub _pad: [f32; 2], // 16-byte alignment
}

/// Minimum binding size for the viewport uniform buffer.
pub(super) fn viewport_ubo_min_binding_size() -> std::num::NonZeroU64 {
    // ViewportUniform is 16 bytes by construction.
    std::num::NonZeroU64::new(std::mem::size_of::<ViewportUniform>() as u64)
        .unwrap_or(std::num::NonZeroU64::MIN)
}

// ── vertex ────────────────────────────────────────────────────────────────

/// Vertex layout (32 bytes):
///
///  offset  0  pos    [f32; 2]   loc 0
///  offset  8  uv     [f32; 2]   loc 1
///  offset 16  color  [f32; 4]   loc 2
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub(super) struct GpuVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
    pub color: [f32; 4],
}

impl GpuVertex {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x2, // uv
        2 => Float32x4  // color
    ];

    pub(super) fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GpuVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }

    /// Converts a CPU vertex; premultiplies when the draw blends as premultiplied.
    pub(super) fn from_vertex(v: &Vertex, blend: Option<BlendMode>) -> Self {
        let color = match blend {
            Some(BlendMode::Premultiplied) => v.color.to_premul_f32(),
            _ => {
                let c = v.color;
                [
                    c.r as f32 / 255.0,
                    c.g as f32 / 255.0,
                    c.b as f32 / 255.0,
                    c.alpha_f32(),
                ]
            }
        };
        let uv = v.uv.map_or([0.0, 0.0], |uv| [uv.x, uv.y]);
        Self { pos: [v.pos.x, v.pos.y], uv, color }
    }
}
