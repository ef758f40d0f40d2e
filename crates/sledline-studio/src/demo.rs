use sledline_engine::batch::TextureHandle;
use sledline_engine::coords::{Rect, Vec2};
use sledline_engine::paint::Color;
use sledline_engine::scene::joint::*;
use sledline_engine::scene::{
    BodyPoint, BreakDiagnosis, GridIndex, GridPoint, LineType, RiderFlags, RiderSkeleton,
    Segment, Sprite, SpriteKind, TextureTable, TrackLine, TrackLineStyle, POINT_COUNT,
};

pub const CELL_SIZE: f32 = 14.0;

/// Everything drawn in one studio frame.
pub struct DemoScene {
    pub lines: Vec<TrackLine>,
    pub line_color: Color,
    pub style: TrackLineStyle,
    pub rider: RiderSkeleton,
    pub flags: RiderFlags,
    pub diagnosis: BreakDiagnosis,
    pub grid: DemoGrid,
}

impl DemoScene {
    pub fn new() -> Self {
        let lines = vec![
            TrackLine::plain(Vec2::new(-40.0, 20.0), Vec2::new(60.0, 40.0)),
            TrackLine::accelerator(Vec2::new(60.0, 40.0), Vec2::new(180.0, 40.0), 3),
            TrackLine::plain(Vec2::new(180.0, 40.0), Vec2::new(240.0, 10.0)).inverted(true),
            // zero-length: must still draw well-formed geometry
            TrackLine::plain(Vec2::new(100.0, -30.0), Vec2::new(100.0, -30.0)),
        ];

        let mut rider = RiderSkeleton::new(rider_pose(Vec2::new(70.0, 28.0)));
        rider.scarf = scarf_from(rider.pos(BODY_SHOULDER));
        for p in &mut rider.points {
            p.momentum = Vec2::new(4.0, 0.5);
        }

        let grid = DemoGrid::new(&lines, &rider, CELL_SIZE);
        Self {
            lines,
            line_color: Color::BLACK,
            style: TrackLineStyle {
                draw_well: true,
                draw_color: true,
                draw_knobs: true,
                red_knobs: false,
            },
            rider,
            flags: RiderFlags { scarf: true, contact_points: true, momentum: true },
            // primary cause: sled-to-butt bone, then a hand bone, then the sled came off
            diagnosis: BreakDiagnosis::from_raw(&[6, 16, -1]),
            grid,
        }
    }
}

fn rider_pose(origin: Vec2) -> [BodyPoint; POINT_COUNT] {
    let mut points = [BodyPoint::default(); POINT_COUNT];
    let offsets = [
        (SLED_TL, 0.0, 0.0),
        (SLED_BL, 0.0, 5.0),
        (SLED_BR, 15.0, 5.0),
        (SLED_TR, 17.5, 0.0),
        (BODY_BUTT, 5.0, 0.0),
        (BODY_SHOULDER, 5.0, -5.5),
        (BODY_HAND_LEFT, 11.5, -5.0),
        (BODY_HAND_RIGHT, 11.5, -5.0),
        (BODY_FOOT_LEFT, 10.0, 5.0),
        (BODY_FOOT_RIGHT, 10.0, 5.0),
    ];
    for (joint, x, y) in offsets {
        points[joint] = BodyPoint::at(origin + Vec2::new(x, y));
    }
    points
}

fn scarf_from(neck: Vec2) -> Vec<Segment> {
    (0..7)
        .map(|i| {
            let a = neck + Vec2::new(-2.0 * i as f32, 0.4 * i as f32);
            Segment::new(a, a + Vec2::new(-2.0, 0.4))
        })
        .collect()
}

/// Sprite layout in rider-model units (drawn at half size).
pub fn texture_table() -> TextureTable {
    TextureTable {
        leg: Sprite::new(sprite_handle(SpriteKind::Leg), Rect::new(0.0, -2.0, 20.0, 4.0)),
        arm: Sprite::new(sprite_handle(SpriteKind::Arm), Rect::new(0.0, -1.5, 14.0, 3.0)),
        sled: Sprite::new(sprite_handle(SpriteKind::Sled), Rect::new(0.0, -2.0, 36.0, 12.0)),
        broken_sled: Sprite::new(
            sprite_handle(SpriteKind::BrokenSled),
            Rect::new(0.0, -2.0, 36.0, 12.0),
        ),
        body: Sprite::new(sprite_handle(SpriteKind::Body), Rect::new(0.0, -5.0, 14.0, 10.0)),
        body_dead: Sprite::new(
            sprite_handle(SpriteKind::BodyDead),
            Rect::new(0.0, -5.0, 14.0, 10.0),
        ),
    }
}

pub const SPRITE_KINDS: [SpriteKind; 6] = [
    SpriteKind::Leg,
    SpriteKind::Arm,
    SpriteKind::Sled,
    SpriteKind::BrokenSled,
    SpriteKind::Body,
    SpriteKind::BodyDead,
];

pub fn sprite_handle(kind: SpriteKind) -> TextureHandle {
    let id = SPRITE_KINDS.iter().position(|&k| k == kind).unwrap_or(0) as u32;
    TextureHandle::new(id + 1)
}

/// Flat tint standing in for real sprite artwork.
pub fn sprite_tint(kind: SpriteKind) -> Color {
    match kind {
        SpriteKind::Leg | SpriteKind::Arm => Color::rgb(60, 60, 60),
        SpriteKind::Sled => Color::rgb(180, 120, 60),
        SpriteKind::BrokenSled => Color::rgb(120, 80, 40),
        SpriteKind::Body => Color::rgb(230, 230, 230),
        SpriteKind::BodyDead => Color::rgb(200, 200, 200),
    }
}

/// Broad-phase stand-in: line cells sampled along each line, rider cells from
/// its points.
pub struct DemoGrid {
    cell: f32,
    occupied: Vec<GridPoint>,
    active: Vec<GridPoint>,
}

impl DemoGrid {
    pub fn new(lines: &[TrackLine], rider: &RiderSkeleton, cell: f32) -> Self {
        let mut occupied = Vec::new();
        for line in lines.iter().filter(|l| l.kind != LineType::Scenery) {
            let steps = ((line.end - line.start).length() / (cell * 0.5)).ceil().max(1.0) as u32;
            for i in 0..=steps {
                let t = i as f32 / steps as f32;
                let p = line.start + (line.end - line.start) * t;
                occupied.push(GridPoint::containing(p, cell));
            }
        }
        occupied.sort_by_key(|g| (g.x, g.y));
        occupied.dedup();

        let mut active: Vec<_> = rider
            .points
            .iter()
            .map(|p| GridPoint::containing(p.pos, cell))
            .collect();
        active.sort_by_key(|g| (g.x, g.y));
        active.dedup();

        Self { cell, occupied, active }
    }
}

impl GridIndex for DemoGrid {
    fn is_active(&self, cell: GridPoint) -> bool {
        self.active.contains(&cell)
    }

    fn is_occupied(&self, world: Vec2) -> bool {
        self.occupied.contains(&GridPoint::containing(world, self.cell))
    }
}
