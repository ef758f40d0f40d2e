//! Scene assemblers.
//!
//! Responsibilities:
//! - turn track lines, the rider skeleton and its scarf into vertex batches
//! - keep the fixed draw order each shape needs for alpha compositing
//! - scope backend state around every draw so nothing leaks between calls
//!
//! Each assembler has a pure `gen_*` half (geometry only, testable without a
//! backend) and a `Painter::draw_*` half that submits it.

mod ctx;
mod diagnosis;
mod error;
mod grid;
mod painter;
mod rider;
mod scarf;
mod sprite;
mod track;

pub use ctx::FrameCtx;
pub use diagnosis::{BreakCause, BreakDiagnosis};
pub use error::RenderError;
pub use grid::{gen_grid_cells, gen_grid_lines, GridIndex, GridPoint, MAX_GRID_STEPS};
pub use painter::{submit, Painter};
pub use rider::{
    gen_contact_points, gen_momentum, joint, BodyPoint, Bone, RiderFlags, RiderSkeleton,
    POINT_COUNT, STANDARD_BONES,
};
pub use scarf::{gen_scarf, Segment, SCARF_WIDTH};
pub use sprite::{gen_sprite, Sprite, SpriteKind, TextureTable, SPRITE_SCALE};
pub use track::{
    gen_accel_ticks, shadow_color, shadow_offset, well_quad, LineType, TrackLine,
    TrackLineStyle, DEFAULT_LINE_WIDTH, DEFAULT_ZONE, TICK_BASE_OFFSET, TICK_LENGTH,
    TICK_SPACING, WELL_COLOR,
};
