use crate::batch::Vertex;
use crate::coords::{Transform, Vec2, Viewport};
use crate::geom::quad_triangles;
use crate::paint::Color;
use crate::render::{Primitive, RenderBackend};

use super::Painter;

/// Integer cell coordinate in a broad-phase grid.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing `world` for square cells of `cell_size`.
    #[inline]
    pub fn containing(world: Vec2, cell_size: f32) -> Self {
        Self::new(
            (world.x / cell_size).floor() as i32,
            (world.y / cell_size).floor() as i32,
        )
    }
}

/// Read-only view of the physics broad-phase, queried by the grid overlay.
pub trait GridIndex {
    /// The cell is in the rider's current physics bounds.
    fn is_active(&self, cell: GridPoint) -> bool;

    /// Some track line is registered in the cell containing `world`.
    fn is_occupied(&self, world: Vec2) -> bool;
}

/// Top-left world corners of every cell touching the visible area, starting one
/// cell before the top-left and aligned to the cell size.
fn visible_cells(cell: f32, transform: Transform, viewport: Viewport) -> impl Iterator<Item = Vec2> {
    let size = viewport.world_size(transform);
    let origin = transform.screen_origin();
    let base = Vec2::new(origin.x - origin.x % cell, origin.y - origin.y % cell);

    steps(cell, size.x).flat_map(move |x| {
        steps(cell, size.y).map(move |y| Vec2::new(base.x + x, base.y + y))
    })
}

/// `-cell, 0, cell, ...` while below `limit`.
fn steps(cell: f32, limit: f32) -> impl Iterator<Item = f32> + Clone {
    (-1..)
        .map(move |i| i as f32 * cell)
        .take_while(move |&v| v < limit)
}

/// Most cells walked along one axis; past this the overlay is skipped.
pub const MAX_GRID_STEPS: usize = 512;

/// Whether the overlay can be walked: a usable cell size, a non-empty view and
/// at most `MAX_GRID_STEPS` cells per axis.
fn grid_fits(cell: f32, transform: Transform, viewport: Viewport) -> bool {
    if !(cell > 0.0 && cell.is_finite()) {
        log::warn!("debug grid: invalid cell size {cell}");
        return false;
    }
    if !viewport.is_valid() {
        return false;
    }
    let size = viewport.world_size(transform);
    let steps = (size.x.max(size.y) / cell).ceil() + 1.0;
    if !(steps.is_finite() && steps <= MAX_GRID_STEPS as f32) {
        log::warn!("debug grid: {steps} cells per axis at zoom {}, skipped", transform.zoom);
        return false;
    }
    true
}

/// Filled cells (screen space): lime when active, yellow when occupied.
pub fn gen_grid_cells<G: GridIndex + ?Sized>(
    index: &G,
    cell: f32,
    transform: Transform,
    viewport: Viewport,
    out: &mut Vec<Vertex>,
) {
    if !grid_fits(cell, transform, viewport) {
        return;
    }
    for corner in visible_cells(cell, transform, viewport) {
        let color = if index.is_active(GridPoint::containing(corner, cell)) {
            Color::LIME
        } else if index.is_occupied(corner) {
            Color::YELLOW
        } else {
            continue;
        };
        let quad = [
            corner,
            corner + Vec2::new(0.0, cell),
            corner + Vec2::new(cell, cell),
            corner + Vec2::new(cell, 0.0),
        ];
        let quad = quad.map(|p| transform.to_screen(p));
        out.extend(quad_triangles(quad).iter().map(|&p| Vertex::new(p, color)));
    }
}

/// Red cell borders across the visible area, as a line list (screen space).
pub fn gen_grid_lines(cell: f32, transform: Transform, viewport: Viewport, out: &mut Vec<Vertex>) {
    if !grid_fits(cell, transform, viewport) {
        return;
    }
    let size = viewport.world_size(transform);
    let origin = transform.screen_origin();
    let base = Vec2::new(origin.x - origin.x % cell, origin.y - origin.y % cell);
    let mut line = |a: Vec2, b: Vec2| {
        out.push(Vertex::new(transform.to_screen(a), Color::RED));
        out.push(Vertex::new(transform.to_screen(b), Color::RED));
    };

    for x in steps(cell, size.x) {
        let top = Vec2::new(base.x + x, origin.y);
        line(top, top + Vec2::new(0.0, size.y));
    }
    for y in steps(cell, size.y) {
        let left = Vec2::new(origin.x, base.y + y);
        line(left, left + Vec2::new(size.x, 0.0));
    }
}

impl<B: RenderBackend + ?Sized> Painter<'_, B> {
    /// Broad-phase overlay: occupied cells, then grid lines.
    pub fn draw_debug_grid<G: GridIndex + ?Sized>(&mut self, index: &G, cell_size: f32) {
        self.draw_with(Primitive::Triangles, None, false, |batch, frame| {
            gen_grid_cells(index, cell_size, frame.transform, frame.viewport, batch.vertices_mut());
        });
        self.draw_with(Primitive::Lines, None, false, |batch, frame| {
            gen_grid_lines(cell_size, frame.transform, frame.viewport, batch.vertices_mut());
        });
    }
}
