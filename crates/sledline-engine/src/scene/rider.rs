use crate::batch::Vertex;
use crate::coords::{Transform, Vec2};
use crate::geom::{push_rounded_line, Knobs};
use crate::paint::Color;
use crate::render::{BlendMode, Primitive, RenderBackend};

use super::{gen_sprite, BreakCause, BreakDiagnosis, Painter, Segment, SpriteKind};

/// Body point indices.
pub mod joint {
    pub const SLED_TL: usize = 0;
    pub const SLED_BL: usize = 1;
    pub const SLED_BR: usize = 2;
    pub const SLED_TR: usize = 3;
    pub const BODY_BUTT: usize = 4;
    pub const BODY_SHOULDER: usize = 5;
    pub const BODY_HAND_LEFT: usize = 6;
    pub const BODY_HAND_RIGHT: usize = 7;
    pub const BODY_FOOT_LEFT: usize = 8;
    pub const BODY_FOOT_RIGHT: usize = 9;
}

use joint::*;

pub const POINT_COUNT: usize = 10;

const CONNECTOR_THICKNESS: f32 = 0.1;
const MOMENTUM_THICKNESS: f32 = 0.5;
const CONTACT_THICKNESS: f32 = 0.25;

const SLED_FRAME_COLOR: Color = Color::from_argb(0xFFCC72B7);
const PRIMARY_BREAK_COLOR: Color = Color::from_argb(0xFFFF8C00);
const SECONDARY_BREAK_COLOR: Color = Color::from_argb(0xFF909090);

#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct BodyPoint {
    pub pos: Vec2,
    /// Displacement over the last physics step.
    pub momentum: Vec2,
}

impl BodyPoint {
    #[inline]
    pub const fn at(pos: Vec2) -> Self {
        Self { pos, momentum: Vec2::zero() }
    }
}

/// Constraint between two body points.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Bone {
    pub a: usize,
    pub b: usize,
    /// Snaps under enough strain, ending the ride.
    pub breakable: bool,
    /// Only pushes the points apart, never pulls them together.
    pub only_repel: bool,
}

impl Bone {
    pub const fn rigid(a: usize, b: usize) -> Self {
        Self { a, b, breakable: false, only_repel: false }
    }

    pub const fn breakable(a: usize, b: usize) -> Self {
        Self { a, b, breakable: true, only_repel: false }
    }

    pub const fn repel(a: usize, b: usize) -> Self {
        Self { a, b, breakable: false, only_repel: true }
    }
}

/// Bone table of the standard rider. The first four bones are the sled frame.
pub const STANDARD_BONES: [Bone; 22] = [
    Bone::rigid(SLED_TL, SLED_BL),
    Bone::rigid(SLED_BL, SLED_BR),
    Bone::rigid(SLED_BR, SLED_TR),
    Bone::rigid(SLED_TR, SLED_TL),
    Bone::rigid(SLED_TL, SLED_BR),
    Bone::rigid(SLED_TR, SLED_BL),
    Bone::breakable(SLED_TL, BODY_BUTT),
    Bone::breakable(SLED_BL, BODY_BUTT),
    Bone::breakable(SLED_BR, BODY_BUTT),
    Bone::rigid(BODY_SHOULDER, BODY_BUTT),
    Bone::rigid(BODY_SHOULDER, BODY_HAND_LEFT),
    Bone::rigid(BODY_SHOULDER, BODY_HAND_RIGHT),
    Bone::rigid(BODY_BUTT, BODY_FOOT_LEFT),
    Bone::rigid(BODY_BUTT, BODY_FOOT_RIGHT),
    Bone::rigid(BODY_SHOULDER, BODY_HAND_RIGHT),
    Bone::breakable(BODY_SHOULDER, SLED_TL),
    Bone::breakable(SLED_TR, BODY_HAND_LEFT),
    Bone::breakable(SLED_TR, BODY_HAND_RIGHT),
    Bone::breakable(BODY_FOOT_LEFT, SLED_BR),
    Bone::breakable(BODY_FOOT_RIGHT, SLED_BR),
    Bone::repel(BODY_SHOULDER, BODY_FOOT_LEFT),
    Bone::repel(BODY_SHOULDER, BODY_FOOT_RIGHT),
];

/// Rider state for one frame, as produced by the physics step.
#[derive(Debug, Clone, PartialEq)]
pub struct RiderSkeleton {
    pub points: [BodyPoint; POINT_COUNT],
    pub bones: &'static [Bone],
    pub crashed: bool,
    pub sled_broken: bool,
    pub scarf: Vec<Segment>,
}

impl RiderSkeleton {
    /// Intact rider with the standard bone table and no scarf.
    pub fn new(points: [BodyPoint; POINT_COUNT]) -> Self {
        Self {
            points,
            bones: &STANDARD_BONES,
            crashed: false,
            sled_broken: false,
            scarf: Vec::new(),
        }
    }

    #[inline]
    pub fn pos(&self, joint: usize) -> Vec2 {
        self.points[joint].pos
    }

    /// Endpoints of bone `index`, if both exist.
    pub fn bone_ends(&self, index: usize) -> Option<(Vec2, Vec2)> {
        let bone = self.bones.get(index)?;
        Some((self.points.get(bone.a)?.pos, self.points.get(bone.b)?.pos))
    }
}

/// Optional rider overlays.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct RiderFlags {
    pub scarf: bool,
    pub contact_points: bool,
    pub momentum: bool,
}

/// One red vector per body point, from its position along its momentum.
pub fn gen_momentum(rider: &RiderSkeleton, transform: Transform, out: &mut Vec<Vertex>) {
    for p in &rider.points {
        push_rounded_line(
            out,
            transform,
            p.pos,
            p.pos + p.momentum,
            Color::RED,
            MOMENTUM_THICKNESS,
            Knobs::None,
        );
    }
}

/// Bone and joint overlay, highlighting broken bones from `diagnosis`.
pub fn gen_contact_points(
    rider: &RiderSkeleton,
    diagnosis: Option<&BreakDiagnosis>,
    transform: Transform,
    out: &mut Vec<Vertex>,
) {
    let bone_line = |index: usize, color: Color, out: &mut Vec<Vertex>| {
        match rider.bone_ends(index) {
            Some((a, b)) => {
                push_rounded_line(out, transform, a, b, color, CONTACT_THICKNESS, Knobs::None)
            }
            None => log::debug!("contact points: no bone {index}"),
        }
    };

    for (i, bone) in rider.bones.iter().enumerate() {
        if bone.breakable {
            continue;
        }
        if bone.only_repel {
            bone_line(i, Color::CORNFLOWER_BLUE, out);
        } else if i <= 3 {
            bone_line(i, SLED_FRAME_COLOR, out);
        }
    }

    let diagnosis = diagnosis.filter(|d| !d.is_empty());
    if let Some(d) = diagnosis.filter(|_| !rider.crashed) {
        for bone in d.secondary().iter().filter_map(|c| c.bone()) {
            bone_line(bone, SECONDARY_BREAK_COLOR, out);
        }
        if let Some(bone) = d.primary().and_then(BreakCause::bone) {
            bone_line(bone, PRIMARY_BREAK_COLOR, out);
        }
    }

    let detached = |cause| diagnosis.is_some_and(|d| d.contains(cause));
    let sled_off = detached(BreakCause::SledDetached);
    let body_off = detached(BreakCause::BodyDetached);
    for (i, p) in rider.points.iter().enumerate() {
        let blue = match i {
            SLED_TL | SLED_BL => sled_off,
            BODY_BUTT | BODY_SHOULDER => body_off,
            _ => false,
        };
        let color = if blue { Color::BLUE } else { Color::CYAN };
        push_rounded_line(out, transform, p.pos, p.pos, color, CONTACT_THICKNESS, Knobs::None);
    }
}

impl<B: RenderBackend + ?Sized> Painter<'_, B> {
    /// Draws the rider back to front: scarf, right leg and arm, right hand
    /// connector, sled, left leg, body, left hand connector, left arm, then the
    /// requested overlays.
    pub fn draw_rider(
        &mut self,
        opacity: f32,
        rider: &RiderSkeleton,
        flags: RiderFlags,
        diagnosis: Option<&BreakDiagnosis>,
    ) {
        if flags.scarf {
            self.draw_scarf(&rider.scarf, opacity);
        }

        self.draw_sprite(SpriteKind::Leg, rider.pos(BODY_BUTT), rider.pos(BODY_FOOT_RIGHT), opacity);
        self.draw_sprite(SpriteKind::Arm, rider.pos(BODY_SHOULDER), rider.pos(BODY_HAND_RIGHT), opacity);
        if !rider.crashed {
            self.draw_connector(rider.pos(BODY_HAND_RIGHT), rider.pos(SLED_TR));
        }

        let sled = if rider.sled_broken { SpriteKind::BrokenSled } else { SpriteKind::Sled };
        self.draw_sprite(sled, rider.pos(SLED_TL), rider.pos(SLED_TR), opacity);
        self.draw_sprite(SpriteKind::Leg, rider.pos(BODY_BUTT), rider.pos(BODY_FOOT_LEFT), opacity);

        let body = if rider.crashed { SpriteKind::BodyDead } else { SpriteKind::Body };
        self.draw_sprite(body, rider.pos(BODY_BUTT), rider.pos(BODY_SHOULDER), opacity);
        if !rider.crashed {
            self.draw_connector(rider.pos(BODY_HAND_LEFT), rider.pos(SLED_TR));
        }
        self.draw_sprite(SpriteKind::Arm, rider.pos(BODY_SHOULDER), rider.pos(BODY_HAND_LEFT), opacity);

        if flags.momentum {
            self.draw_momentum(rider);
        }
        if flags.contact_points {
            self.draw_contact_points(rider, diagnosis);
        }
    }

    pub fn draw_momentum(&mut self, rider: &RiderSkeleton) {
        self.batch_mut().clear();
        let transform = self.transform();
        gen_momentum(rider, transform, self.batch_mut().vertices_mut());
        self.flush_rounded();
    }

    pub fn draw_contact_points(&mut self, rider: &RiderSkeleton, diagnosis: Option<&BreakDiagnosis>) {
        self.batch_mut().clear();
        let transform = self.transform();
        gen_contact_points(rider, diagnosis, transform, self.batch_mut().vertices_mut());
        self.flush_rounded();
    }

    fn draw_connector(&mut self, hand: Vec2, sled: Vec2) {
        self.render_rounded_line(hand, sled, Color::BLACK, CONNECTOR_THICKNESS, Knobs::None);
    }

    fn draw_sprite(&mut self, kind: SpriteKind, anchor: Vec2, toward: Vec2, opacity: f32) {
        self.draw_with(Primitive::Triangles, Some(BlendMode::Alpha), true, |batch, frame| {
            let sprite = frame.textures.get(kind);
            batch.set_texture(sprite.texture);
            batch.extend_from_slice(&gen_sprite(sprite, anchor, toward, opacity, frame.transform));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::{TextureHandle, VertexBatch};
    use crate::coords::{Rect, Viewport};
    use crate::geom::rounded_line_vertex_count;
    use crate::render::{Capability, RecordingBackend};
    use crate::scene::{FrameCtx, Sprite, TextureTable};

    fn pose() -> [BodyPoint; POINT_COUNT] {
        let at = |x: f32, y: f32| BodyPoint::at(Vec2::new(x, y));
        [
            at(0.0, 0.0),
            at(0.0, 5.0),
            at(15.0, 5.0),
            at(17.5, 0.0),
            at(5.0, 0.0),
            at(5.0, -5.5),
            at(11.5, -5.0),
            at(11.5, -5.0),
            at(10.0, 5.0),
            at(10.0, 5.0),
        ]
    }

    fn textures() -> TextureTable {
        let s = |id| Sprite::new(TextureHandle::new(id), Rect::new(0.0, -1.0, 4.0, 2.0));
        TextureTable { leg: s(1), arm: s(2), sled: s(3), broken_sled: s(4), body: s(5), body_dead: s(6) }
    }

    fn draw(rider: &RiderSkeleton, flags: RiderFlags, diagnosis: Option<&BreakDiagnosis>) -> RecordingBackend {
        let textures = textures();
        let mut backend = RecordingBackend::new();
        let mut batch = VertexBatch::new();
        let frame = FrameCtx::new(Transform::identity(), Viewport::new(800.0, 600.0), &textures);
        Painter::new(&mut backend, &mut batch, frame).draw_rider(0.8, rider, flags, diagnosis);
        backend
    }

    fn textures_drawn(backend: &RecordingBackend) -> Vec<u32> {
        backend.draws().map(|d| d.texture.0).collect()
    }

    // ── draw order ────────────────────────────────────────────────────────

    #[test]
    fn intact_rider_draw_order() {
        let rider = RiderSkeleton::new(pose());
        let backend = draw(&rider, RiderFlags::default(), None);
        // 0 = untextured hand connector
        assert_eq!(textures_drawn(&backend), vec![1, 2, 0, 3, 1, 5, 0, 2]);
        assert_eq!(backend.enabled().count(), 0);
    }

    #[test]
    fn crashed_rider_drops_connectors_and_swaps_sprites() {
        let mut rider = RiderSkeleton::new(pose());
        rider.crashed = true;
        rider.sled_broken = true;
        let backend = draw(&rider, RiderFlags::default(), None);
        assert_eq!(textures_drawn(&backend), vec![1, 2, 4, 1, 6, 2]);
    }

    #[test]
    fn scarf_is_drawn_first_and_overlays_last() {
        let mut rider = RiderSkeleton::new(pose());
        rider.scarf = vec![Segment::new(Vec2::new(5.0, -5.0), Vec2::new(1.0, -6.0))];
        let flags = RiderFlags { scarf: true, contact_points: true, momentum: true };
        let backend = draw(&rider, flags, None);

        let draws: Vec<_> = backend.draws().collect();
        assert_eq!(draws.len(), 11);
        assert_eq!(draws[0].vertices.len(), 6);
        assert!(!draws[0].textured);
        assert_eq!(
            draws[9].vertices.len(),
            POINT_COUNT * rounded_line_vertex_count(false)
        );
        assert!(draws[9].vertices.iter().all(|v| v.color == Color::RED));
    }

    #[test]
    fn sprites_use_straight_alpha_with_texturing() {
        let backend = draw(&RiderSkeleton::new(pose()), RiderFlags::default(), None);
        let sprite = backend.draws().next().unwrap();
        assert_eq!(sprite.blend, Some(BlendMode::Alpha));
        assert!(sprite.textured);
        assert!(sprite.vertices.iter().all(|v| v.color.a == 204));
        assert!(!backend.is_enabled(Capability::Texture2D));
    }

    // ── contact points ────────────────────────────────────────────────────

    fn count_color(out: &[Vertex], color: Color) -> usize {
        out.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn contact_points_without_diagnosis() {
        let rider = RiderSkeleton::new(pose());
        let mut out = Vec::new();
        gen_contact_points(&rider, None, Transform::identity(), &mut out);

        let per_line = rounded_line_vertex_count(false);
        // 4 sled frame + 2 repel bones + 10 dots
        assert_eq!(out.len(), 16 * per_line);
        assert_eq!(count_color(&out, SLED_FRAME_COLOR), 4 * per_line);
        assert_eq!(count_color(&out, Color::CORNFLOWER_BLUE), 2 * per_line);
        assert_eq!(count_color(&out, Color::CYAN), 10 * per_line);
    }

    #[test]
    fn diagnosis_highlights_broken_bones_and_detached_points() {
        let rider = RiderSkeleton::new(pose());
        let diagnosis = BreakDiagnosis::from_raw(&[6, -1, 16]);
        let mut out = Vec::new();
        gen_contact_points(&rider, Some(&diagnosis), Transform::identity(), &mut out);

        let per_line = rounded_line_vertex_count(false);
        assert_eq!(out.len(), 18 * per_line);
        assert_eq!(count_color(&out, SECONDARY_BREAK_COLOR), per_line);
        assert_eq!(count_color(&out, PRIMARY_BREAK_COLOR), per_line);
        assert_eq!(count_color(&out, Color::BLUE), 2 * per_line);

        // primary cause is drawn after the secondary ones
        let first_orange = out.iter().position(|v| v.color == PRIMARY_BREAK_COLOR).unwrap();
        let first_grey = out.iter().position(|v| v.color == SECONDARY_BREAK_COLOR).unwrap();
        assert!(first_grey < first_orange);
    }

    #[test]
    fn crashed_rider_keeps_detachment_dots_only() {
        let mut rider = RiderSkeleton::new(pose());
        rider.crashed = true;
        let diagnosis = BreakDiagnosis::from_raw(&[9, -2]);
        let mut out = Vec::new();
        gen_contact_points(&rider, Some(&diagnosis), Transform::identity(), &mut out);

        let per_line = rounded_line_vertex_count(false);
        assert_eq!(out.len(), 16 * per_line);
        assert_eq!(count_color(&out, PRIMARY_BREAK_COLOR), 0);
        assert_eq!(count_color(&out, Color::BLUE), 2 * per_line);
    }

    // ── momentum ──────────────────────────────────────────────────────────

    #[test]
    fn momentum_vector_spans_point_to_point_plus_momentum() {
        let mut points = pose();
        points[0].momentum = Vec2::new(3.0, 0.0);
        let rider = RiderSkeleton::new(points);
        let mut out = Vec::new();
        gen_momentum(&rider, Transform::identity(), &mut out);

        assert_eq!(out.len(), POINT_COUNT * rounded_line_vertex_count(false));
        // body quad of the first vector: corners at x = 0 and x = 3
        let xs: Vec<f32> = out[..6].iter().map(|v| v.pos.x).collect();
        assert!(xs.iter().all(|&x| x.abs() < 1e-5 || (x - 3.0).abs() < 1e-5));
    }
}
