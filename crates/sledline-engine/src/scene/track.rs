use crate::batch::Vertex;
use crate::coords::{Transform, Vec2};
use crate::geom::{thick_line, Knobs, Turtle};
use crate::paint::Color;
use crate::render::{BlendMode, Primitive, RenderBackend};

use super::{Painter, RenderError};

/// Width of a standard track line, in world units.
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;
/// Distance from a line at which it starts affecting the rider.
pub const DEFAULT_ZONE: f32 = 10.0;

/// Distance of the first accelerator tick from the line's second endpoint.
pub const TICK_BASE_OFFSET: f32 = 8.0;
/// Extra distance between consecutive ticks.
pub const TICK_SPACING: f32 = 2.0;
/// How far a tick sticks out from the line.
pub const TICK_LENGTH: f32 = 8.0;

/// Fill of the influence-zone overlay.
pub const WELL_COLOR: Color = Color::rgba(150, 150, 150, 150);

const PLAIN_SHADOW: Color = Color::rgb(0x00, 0x66, 0xFF);
const ACCELERATOR_SHADOW: Color = Color::rgb(0xCC, 0x00, 0x00);

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum LineType {
    Plain,
    Accelerator,
    /// Decorative line with no physics. Not drawable as a track line.
    Scenery,
}

/// A physics track line, as read from the track store.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TrackLine {
    pub start: Vec2,
    pub end: Vec2,
    pub kind: LineType,
    pub width: f32,
    /// Flips the collision side (and with it ticks, shadow and well).
    pub inverted: bool,
    /// Accelerator strength; one tick is drawn per unit.
    pub multiplier: u32,
    pub zone: f32,
}

impl TrackLine {
    pub fn new(start: Vec2, end: Vec2, kind: LineType) -> Self {
        Self {
            start,
            end,
            kind,
            width: DEFAULT_LINE_WIDTH,
            inverted: false,
            multiplier: 0,
            zone: DEFAULT_ZONE,
        }
    }

    pub fn plain(start: Vec2, end: Vec2) -> Self {
        Self::new(start, end, LineType::Plain)
    }

    pub fn accelerator(start: Vec2, end: Vec2, multiplier: u32) -> Self {
        Self { multiplier, ..Self::new(start, end, LineType::Accelerator) }
    }

    #[must_use]
    pub fn inverted(self, inverted: bool) -> Self {
        Self { inverted, ..self }
    }

    /// Unit direction from `start` to `end`; `None` for a zero-length line.
    #[inline]
    pub fn direction(&self) -> Option<Vec2> {
        (self.end - self.start).try_normalize()
    }

    /// Unit normal on the collision side: `(d.y, -d.x)`, flipped when inverted.
    /// Zero for a zero-length line.
    pub fn normal(&self) -> Vec2 {
        let Some(d) = self.direction() else {
            return Vec2::zero();
        };
        let n = Vec2::new(d.y, -d.x);
        if self.inverted { -n } else { n }
    }
}

/// Caller-controlled decorations for [`Painter::draw_track_line`].
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TrackLineStyle {
    /// Translucent overlay over the influence zone.
    pub draw_well: bool,
    /// Type-colored shadow line, plus ticks on accelerators.
    pub draw_color: bool,
    pub draw_knobs: bool,
    pub red_knobs: bool,
}

impl TrackLineStyle {
    #[inline]
    pub fn knobs(self) -> Knobs {
        Knobs::from_flags(self.draw_knobs, self.red_knobs)
    }
}

/// Secondary color identifying the line type.
pub fn shadow_color(kind: LineType) -> Result<Color, RenderError> {
    match kind {
        LineType::Plain => Ok(PLAIN_SHADOW),
        LineType::Accelerator => Ok(ACCELERATOR_SHADOW),
        LineType::Scenery => Err(RenderError::UnsupportedLineType(kind)),
    }
}

/// Shadow displacement: the collision normal rounded away from zero per axis.
pub fn shadow_offset(line: &TrackLine) -> Vec2 {
    let round = |v: f32| if v > 0.0 { v.ceil() } else { v.floor() };
    let n = line.normal();
    Vec2::new(round(n.x), round(n.y))
}

/// Accelerator tick triangles (screen space), one per multiplier unit.
///
/// Tick `i` spans from `TICK_BASE_OFFSET + TICK_SPACING * i` back along the
/// line from its end, out `TICK_LENGTH` after a +90° turn (mirrored when
/// inverted), and back to `TICK_SPACING * i` from the end.
pub fn gen_accel_ticks(line: &TrackLine, color: Color, transform: Transform, out: &mut Vec<Vertex>) {
    if line.kind != LineType::Accelerator {
        return;
    }
    let heading = (line.end - line.start).angle_degrees();
    let side = if line.inverted { -TICK_LENGTH } else { TICK_LENGTH };
    let origin = Turtle::with_heading(line.end, heading);

    out.reserve(line.multiplier as usize * 3);
    for i in 0..line.multiplier {
        let step = TICK_SPACING * i as f32;
        let base = origin.moved(0.0, -(TICK_BASE_OFFSET + step));
        let tip = base.moved(90.0, side);
        let back = origin.moved(0.0, -step);

        for p in [base.pos, tip.pos, back.pos] {
            out.push(Vertex::new(transform.to_screen(p), color));
        }
    }
}

/// Influence-zone quad (screen space) on the collision side of `line`.
pub fn well_quad(line: &TrackLine, transform: Transform) -> [Vec2; 4] {
    let p1 = transform.to_screen(line.start);
    let p2 = transform.to_screen(line.end);
    let c = thick_line(p1, p2, transform.scale_len(line.zone * 2.0));
    if line.inverted {
        [p1, p2, c[2], c[1]]
    } else {
        [p1, p2, c[3], c[0]]
    }
}

impl<B: RenderBackend + ?Sized> Painter<'_, B> {
    /// Draws a track line with its decorations.
    ///
    /// Order: accelerator ticks and shadow line (when `draw_color`), the line
    /// itself (forced opaque), then the well overlay. The line type is checked
    /// before anything is drawn, so an unsupported type draws nothing.
    pub fn draw_track_line(
        &mut self,
        line: &TrackLine,
        color: Color,
        style: TrackLineStyle,
    ) -> Result<(), RenderError> {
        let shadow = shadow_color(line.kind)?;
        let color = color.with_alpha(255);

        if style.draw_color {
            if line.kind == LineType::Accelerator {
                self.draw_with(Primitive::Triangles, None, false, |batch, frame| {
                    gen_accel_ticks(line, shadow, frame.transform, batch.vertices_mut());
                });
            }
            let offset = shadow_offset(line);
            self.render_rounded_line(
                line.start + offset,
                line.end + offset,
                shadow,
                line.width,
                Knobs::None,
            );
        }

        self.render_rounded_line(line.start, line.end, color, line.width, style.knobs());

        if style.draw_well {
            self.draw_with(Primitive::Triangles, Some(BlendMode::Alpha), false, |batch, frame| {
                batch.push_quad(well_quad(line, frame.transform), WELL_COLOR);
            });
        }
        Ok(())
    }
}
