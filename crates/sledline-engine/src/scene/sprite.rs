use crate::batch::{TextureHandle, Vertex};
use crate::coords::{Rect, Transform, Vec2};
use crate::paint::Color;

/// Rider sprites are authored at twice their in-world size.
pub const SPRITE_SCALE: f32 = 0.5;

/// Named rider textures supplied by the asset manager.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SpriteKind {
    Leg,
    Arm,
    Sled,
    BrokenSled,
    Body,
    BodyDead,
}

/// A texture plus the quad it is drawn on.
///
/// `rect` is in rider-model units relative to the sprite's anchor point, with
/// +X pointing along the limb. It is scaled by [`SPRITE_SCALE`] before use.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Sprite {
    pub texture: TextureHandle,
    pub rect: Rect,
}

impl Sprite {
    #[inline]
    pub const fn new(texture: TextureHandle, rect: Rect) -> Self {
        Self { texture, rect }
    }
}

/// Sprite lookup for every [`SpriteKind`].
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TextureTable {
    pub leg: Sprite,
    pub arm: Sprite,
    pub sled: Sprite,
    pub broken_sled: Sprite,
    pub body: Sprite,
    pub body_dead: Sprite,
}

impl TextureTable {
    #[inline]
    pub fn get(&self, kind: SpriteKind) -> Sprite {
        match kind {
            SpriteKind::Leg => self.leg,
            SpriteKind::Arm => self.arm,
            SpriteKind::Sled => self.sled,
            SpriteKind::BrokenSled => self.broken_sled,
            SpriteKind::Body => self.body,
            SpriteKind::BodyDead => self.body_dead,
        }
    }
}

/// The sprite quad anchored at `anchor` and rotated to face `toward`, as two
/// textured triangles in screen space.
///
/// Both points are world space. Vertex color is white at `opacity`, so the
/// texture shows through unchanged.
pub fn gen_sprite(
    sprite: Sprite,
    anchor: Vec2,
    toward: Vec2,
    opacity: f32,
    transform: Transform,
) -> [Vertex; 6] {
    const UVS: [Vec2; 4] = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(1.0, 1.0),
        Vec2::new(0.0, 1.0),
    ];
    let dir = toward - anchor;
    let angle = dir.y.atan2(dir.x);
    let color = Color::WHITE.with_opacity(opacity);

    let corners = sprite.rect.corners().map(|c| {
        transform.to_screen(anchor + (c * SPRITE_SCALE).rotated(angle))
    });

    [0, 1, 2, 0, 2, 3].map(|i| Vertex::textured(corners[i], color, UVS[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a.x - b.x).abs() < 1e-4 && (a.y - b.y).abs() < 1e-4
    }

    // ── placement ─────────────────────────────────────────────────────────

    #[test]
    fn axis_aligned_sprite_is_scaled_and_anchored() {
        let sprite = Sprite::new(TextureHandle::new(4), Rect::new(0.0, -2.0, 10.0, 4.0));
        let v = gen_sprite(
            sprite,
            Vec2::new(1.0, 1.0),
            Vec2::new(5.0, 1.0),
            1.0,
            Transform::identity(),
        );

        assert!(close(v[0].pos, Vec2::new(1.0, 0.0)));
        assert!(close(v[1].pos, Vec2::new(6.0, 0.0)));
        assert!(close(v[2].pos, Vec2::new(6.0, 2.0)));
        assert!(close(v[5].pos, Vec2::new(1.0, 2.0)));
        assert_eq!(v[2].uv, Some(Vec2::new(1.0, 1.0)));
    }

    #[test]
    fn long_axis_follows_anchor_direction() {
        let sprite = Sprite::new(TextureHandle::new(1), Rect::new(0.0, 0.0, 8.0, 0.0));
        let v = gen_sprite(sprite, Vec2::zero(), Vec2::new(0.0, 3.0), 1.0, Transform::identity());
        // +X of the sprite now points down +Y.
        assert!(close(v[1].pos, Vec2::new(0.0, 4.0)));
    }

    #[test]
    fn placement_goes_through_the_transform() {
        let sprite = Sprite::new(TextureHandle::new(1), Rect::new(0.0, 0.0, 2.0, 2.0));
        let t = Transform::new(2.0, Vec2::new(5.0, 5.0));
        let v = gen_sprite(sprite, Vec2::zero(), Vec2::new(1.0, 0.0), 1.0, t);
        assert!(close(v[0].pos, Vec2::new(10.0, 10.0)));
        assert!(close(v[2].pos, Vec2::new(12.0, 12.0)));
    }

    // ── color / lookup ────────────────────────────────────────────────────

    #[test]
    fn opacity_lands_in_vertex_alpha() {
        let v = gen_sprite(Sprite::default(), Vec2::zero(), Vec2::zero(), 0.5, Transform::identity());
        assert!(v.iter().all(|v| v.color == Color::rgba(255, 255, 255, 127)));
    }

    #[test]
    fn table_lookup_matches_fields() {
        let table = TextureTable {
            body_dead: Sprite::new(TextureHandle::new(9), Rect::default()),
            ..TextureTable::default()
        };
        assert_eq!(table.get(SpriteKind::BodyDead).texture, TextureHandle::new(9));
        assert_eq!(table.get(SpriteKind::Body).texture, TextureHandle::NONE);
    }
}
