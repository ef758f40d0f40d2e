use crate::coords::Viewport;

/// Everything [`WgpuBackend::flush`](super::WgpuBackend::flush) needs to replay
/// one frame: the device pair, the open encoder and the color attachment.
///
/// The attachment is expected to be cleared (or otherwise prepared) already;
/// the batch pass loads it.
pub struct GpuFrame<'a> {
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub encoder: &'a mut wgpu::CommandEncoder,
    pub view: &'a wgpu::TextureView,
    pub format: wgpu::TextureFormat,
    /// Attachment size in pixels.
    pub size: (u32, u32),
}

impl GpuFrame<'_> {
    /// Pixel viewport the vertex shader maps to clip space.
    #[inline]
    pub fn viewport(&self) -> Viewport {
        let (w, h) = self.size;
        Viewport::new(w.max(1) as f32, h.max(1) as f32)
    }
}
