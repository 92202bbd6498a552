//! Uniform spatial hash broad phase
//!
//! Rebuilt from scratch every tick: clear, insert every collision body,
//! then query per body. Queries return a superset of the true overlaps
//! (everything sharing a cell), so the narrow phase always re-tests; the
//! grid is only ever allowed false positives, never false negatives.

use std::collections::HashMap;

use glam::Vec2;

use crate::ecs::Entity;

/// Sparse uniform grid over unbounded 2D space. Cells exist only while
/// occupied, so off-world spawn margins cost nothing.
pub struct SpatialGrid {
    cell_size: f32,
    cells: HashMap<(i32, i32), Vec<Entity>>,
}

impl SpatialGrid {
    /// `cell_size` should sit around 2-4x a typical collider diameter:
    /// smaller cells mean more insertion duplication, larger cells mean
    /// more narrow-phase candidates.
    pub fn new(cell_size: f32) -> Self {
        debug_assert!(cell_size > 0.0);
        Self {
            cell_size,
            cells: HashMap::new(),
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Empty every cell, keeping their allocations for the next rebuild.
    pub fn clear(&mut self) {
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
    }

    #[inline]
    fn cell_coord(&self, v: f32) -> i32 {
        (v / self.cell_size).floor() as i32
    }

    /// Inclusive cell-index span covered by a circle along one axis.
    #[inline]
    fn span(&self, center: f32, radius: f32) -> (i32, i32) {
        (
            self.cell_coord(center - radius),
            self.cell_coord(center + radius),
        )
    }

    /// Record a circle in every cell its bounding square touches. A body
    /// straddling a boundary lands in each straddled cell.
    pub fn insert(&mut self, id: Entity, pos: Vec2, radius: f32) {
        let (x0, x1) = self.span(pos.x, radius);
        let (y0, y1) = self.span(pos.y, radius);
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                self.cells.entry((cx, cy)).or_default().push(id);
            }
        }
    }

    /// Every entity recorded in any cell the query circle touches, sorted
    /// ascending and duplicate-free. A superset of the true overlaps.
    pub fn query(&self, pos: Vec2, radius: f32) -> Vec<Entity> {
        let (x0, x1) = self.span(pos.x, radius);
        let (y0, y1) = self.span(pos.y, radius);
        let mut out = Vec::new();
        for cx in x0..=x1 {
            for cy in y0..=y1 {
                if let Some(bucket) = self.cells.get(&(cx, cy)) {
                    out.extend_from_slice(bucket);
                }
            }
        }
        out.sort_unstable();
        out.dedup();
        out
    }

    /// Occupied cell count, for instrumentation.
    pub fn occupied_cells(&self) -> usize {
        self.cells.values().filter(|b| !b.is_empty()).count()
    }
}
