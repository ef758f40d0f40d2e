use crate::batch::Vertex;
use crate::coords::{Transform, Vec2};
use crate::geom::thick_line;
use crate::paint::Color;
use crate::render::{BlendMode, Primitive, RenderBackend};

use super::Painter;

/// Ribbon width in world units.
pub const SCARF_WIDTH: f32 = 2.0;

const SCARF_COLOR: Color = Color::rgb(209, 1, 1);
const SCARF_ALT_COLOR: Color = Color::rgb(255, 100, 100);

/// One link of the scarf chain.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Segment {
    pub start: Vec2,
    pub end: Vec2,
}

impl Segment {
    #[inline]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }
}

/// Scarf triangles in screen space.
///
/// Every second segment becomes a red ribbon quad. Corner pairs of those quads
/// (skipping the first quad's leading pair) are then stitched four points at a
/// time into a lighter ribbon that fills the gaps.
pub fn gen_scarf(segments: &[Segment], opacity: f32, transform: Transform, out: &mut Vec<Vertex>) {
    let color = SCARF_COLOR.with_opacity(opacity);
    let alt = SCARF_ALT_COLOR.with_opacity(opacity);
    let width = transform.scale_len(SCARF_WIDTH);

    let mut stitches: Vec<Vec2> = Vec::with_capacity(segments.len() * 2);
    for (n, seg) in segments.iter().step_by(2).enumerate() {
        let [tl, tr, br, bl] = thick_line(
            transform.to_screen(seg.start),
            transform.to_screen(seg.end),
            width,
        );
        for p in [tl, bl, tr, bl, tr, br] {
            out.push(Vertex::new(p, color));
        }

        if n != 0 {
            stitches.extend_from_slice(&[tl, bl]);
        }
        stitches.extend_from_slice(&[br, tr]);
    }

    for quad in stitches.chunks_exact(4) {
        for p in [quad[0], quad[1], quad[2], quad[0], quad[2], quad[3]] {
            out.push(Vertex::new(p, alt));
        }
    }
}

impl<B: RenderBackend + ?Sized> Painter<'_, B> {
    /// Draws the scarf. Blending is only enabled when `opacity < 1`.
    pub fn draw_scarf(&mut self, segments: &[Segment], opacity: f32) {
        let blend = (opacity < 1.0).then_some(BlendMode::Alpha);
        self.draw_with(Primitive::Triangles, blend, false, |batch, frame| {
            gen_scarf(segments, opacity, frame.transform, batch.vertices_mut());
        });
    }
}
