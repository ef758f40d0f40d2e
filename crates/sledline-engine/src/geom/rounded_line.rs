use crate::batch::Vertex;
use crate::coords::{Transform, Vec2};
use crate::paint::Color;

use super::circle::{circle_fan, CIRCLE_SEGMENTS};
use super::thick_line::{quad_triangles, thick_line};

/// End-cap decoration marking an editable joint.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum Knobs {
    #[default]
    None,
    White,
    Red,
}

impl Knobs {
    /// Maps the editor's `(knobs, red_knobs)` flag pair; `red` only matters when `draw` is set.
    #[inline]
    pub fn from_flags(draw: bool, red: bool) -> Self {
        match (draw, red) {
            (false, _) => Knobs::None,
            (true, false) => Knobs::White,
            (true, true) => Knobs::Red,
        }
    }

    #[inline]
    fn color(self) -> Option<Color> {
        match self {
            Knobs::None => None,
            Knobs::White => Some(Color::WHITE),
            Knobs::Red => Some(Color::RED),
        }
    }
}

/// Vertices produced by [`rounded_line`]: the body quad, two caps and optionally two knobs.
#[inline]
pub const fn rounded_line_vertex_count(knobs: bool) -> usize {
    let circles = if knobs { 4 } else { 2 };
    6 + circles * 3 * CIRCLE_SEGMENTS
}

/// Capsule from `p1` to `p2` (world space) as a flat triangle list in screen space.
///
/// Layout: body quad (6 vertices), cap at `p1`, cap at `p2`, then the knob
/// circles (radius `thickness / 3`) at `p1` and `p2` when requested.
pub fn rounded_line(
    transform: Transform,
    p1: Vec2,
    p2: Vec2,
    color: Color,
    thickness: f32,
    knobs: Knobs,
) -> Vec<Vertex> {
    let mut out = Vec::with_capacity(rounded_line_vertex_count(knobs != Knobs::None));
    push_rounded_line(&mut out, transform, p1, p2, color, thickness, knobs);
    out
}

/// Like [`rounded_line`], appending to an existing vertex list.
pub fn push_rounded_line(
    out: &mut Vec<Vertex>,
    transform: Transform,
    p1: Vec2,
    p2: Vec2,
    color: Color,
    thickness: f32,
    knobs: Knobs,
) {
    let end1 = transform.to_screen(p1);
    let end2 = transform.to_screen(p2);
    let width = transform.scale_len(thickness);

    let body = quad_triangles(thick_line(end1, end2, width));
    out.extend(body.iter().map(|&p| Vertex::new(p, color)));

    circle_fan(end1, width / 2.0, color, out);
    circle_fan(end2, width / 2.0, color, out);

    if let Some(knob) = knobs.color() {
        circle_fan(end1, width / 3.0, knob, out);
        circle_fan(end2, width / 3.0, knob, out);
    }
}
