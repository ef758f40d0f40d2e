mod demo;

use anyhow::{Context, Result};
use sledline_engine::batch::VertexBatch;
use sledline_engine::coords::{Transform, Vec2, Viewport};
use sledline_engine::device::{GpuInit, HeadlessGpu, OffscreenTarget};
use sledline_engine::logging::{init_logging, LoggingConfig};
use sledline_engine::paint::Color;
use sledline_engine::render::{RecordingBackend, RenderBackend, WgpuBackend};
use sledline_engine::scene::{FrameCtx, Painter, TextureTable};
use wgpu::util::DeviceExt;

use demo::{DemoScene, CELL_SIZE, SPRITE_KINDS};

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let use_gpu = std::env::args().skip(1).any(|a| a == "--gpu");

    let scene = DemoScene::new();
    let textures = demo::texture_table();
    let viewport = Viewport::new(WIDTH as f32, HEIGHT as f32);
    let transform = Transform::new(2.0, Vec2::new(60.0, 40.0));
    let frame = FrameCtx::new(transform, viewport, &textures);

    record_frame(&scene, frame)?;
    if use_gpu {
        render_offscreen(&scene, frame, &textures).context("offscreen render failed")?;
    }
    Ok(())
}

/// Paints the demo scene, calling `after` with a label once each assembler is done.
fn paint<B: RenderBackend + ?Sized>(
    backend: &mut B,
    batch: &mut VertexBatch,
    frame: FrameCtx<'_>,
    scene: &DemoScene,
    mut after: impl FnMut(&str, &mut B),
) -> Result<()> {
    {
        let mut painter = Painter::new(&mut *backend, &mut *batch, frame);
        painter.draw_debug_grid(&scene.grid, CELL_SIZE);
    }
    after("debug grid", backend);

    {
        let mut painter = Painter::new(&mut *backend, &mut *batch, frame);
        for line in &scene.lines {
            painter
                .draw_track_line(line, scene.line_color, scene.style)
                .with_context(|| format!("track line {:?} -> {:?}", line.start, line.end))?;
        }
    }
    after("track lines", backend);

    {
        let mut painter = Painter::new(&mut *backend, &mut *batch, frame);
        painter.draw_rider(1.0, &scene.rider, scene.flags, Some(&scene.diagnosis));
    }
    after("rider", backend);
    Ok(())
}

fn record_frame(scene: &DemoScene, frame: FrameCtx<'_>) -> Result<()> {
    let mut backend = RecordingBackend::new();
    let mut batch = VertexBatch::new();

    paint(&mut backend, &mut batch, frame, scene, |label, rec| {
        log::info!(
            "{label:<12} {:>3} draws {:>6} vertices",
            rec.draw_count(),
            rec.vertex_count()
        );
        rec.clear();
    })?;

    let leaked: Vec<_> = backend.enabled().collect();
    anyhow::ensure!(leaked.is_empty(), "backend state left enabled: {leaked:?}");
    Ok(())
}

fn render_offscreen(scene: &DemoScene, frame: FrameCtx<'_>, textures: &TextureTable) -> Result<()> {
    let gpu = HeadlessGpu::new_blocking(GpuInit::default())?;
    let target = OffscreenTarget::new(gpu.device(), WIDTH, HEIGHT)?;

    let mut backend = WgpuBackend::new();
    for kind in SPRITE_KINDS {
        let view = solid_texture(&gpu, demo::sprite_tint(kind));
        backend.insert_texture(gpu.device(), textures.get(kind).texture, &view);
    }

    let mut batch = VertexBatch::new();
    paint(&mut backend, &mut batch, frame, scene, |_, _| {})?;
    let pending = backend.pending_draws();

    gpu.render(&target, &mut backend, Color::WHITE);
    let (w, h) = target.size();
    log::info!("offscreen frame {w}x{h}: {pending} draws on {}", gpu.adapter_info().name);
    Ok(())
}

fn solid_texture(gpu: &HeadlessGpu, color: Color) -> wgpu::TextureView {
    let texture = gpu.device().create_texture_with_data(
        gpu.queue(),
        &wgpu::TextureDescriptor {
            label: Some("studio sprite texture"),
            size: wgpu::Extent3d { width: 1, height: 1, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &[color.r, color.g, color.b, color.a],
    );
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
