//! Multi-source flood fill.
//!
//! Water enters at every source cell and spreads through the four axial
//! neighbours into any cell whose elevation is at or below the water height.
//! Sources are always wet, whatever their own elevation.
//!
//! A cell is marked before it is queued, so the FIFO holds each cell at most
//! once and a pass is O(rows × cols).
use std::collections::VecDeque;

use tracing::debug;

use crate::coords::{GridLocation, AXIAL_OFFSETS};
use crate::error::Result;
use crate::mask::FloodedMask;
use crate::terrain::Terrain;

/// Compute which cells are under water at `height`.
///
/// A NaN height floods nothing beyond the sources.
pub fn flooded_regions(terrain: &Terrain, height: f64) -> FloodedMask {
    let (mask, _) = spread(terrain, height, None);
    debug!(height, flooded = mask.flooded_count(), "flood pass complete");
    mask
}

/// Point query: is `target` flooded at `height`?
///
/// Runs the same traversal as [`flooded_regions`] but stops as soon as the
/// target is reached, so the answer always agrees with the full mask.
pub fn reaches(terrain: &Terrain, height: f64, target: GridLocation) -> Result<bool> {
    if !terrain.contains(target) {
        return Err(terrain.out_of_range(target));
    }
    let (_, hit) = spread(terrain, height, Some(target));
    Ok(hit)
}

/// BFS core. Returns the mask built so far and whether `target` was flooded;
/// with no target the mask is complete.
fn spread(terrain: &Terrain, height: f64, target: Option<GridLocation>) -> (FloodedMask, bool) {
    let rows = terrain.rows();
    let cols = terrain.cols();
    let mut mask = FloodedMask::new(rows, cols);
    let mut queue: VecDeque<GridLocation> = VecDeque::with_capacity(terrain.sources().len());

    for &src in terrain.sources() {
        if mask.get(src.row, src.col) {
            continue;
        }
        mask.set(src.row, src.col, true);
        if Some(src) == target {
            return (mask, true);
        }
        queue.push_back(src);
    }

    while let Some(cur) = queue.pop_front() {
        for &(dr, dc) in &AXIAL_OFFSETS {
            let Some(next) = cur.offset(dr, dc, rows, cols) else {
                continue;
            };
            let below = terrain.get(next.row, next.col) <= height;
            if !below || mask.get(next.row, next.col) {
                continue;
            }
            mask.set(next.row, next.col, true);
            if Some(next) == target {
                return (mask, true);
            }
            queue.push_back(next);
        }
    }

    (mask, false)
}
