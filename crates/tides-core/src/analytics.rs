//! Queries derived from the flood mask.
//!
//! Everything here is a pure function of a borrowed [`Terrain`]; each call
//! that depends on the water level runs its own flood pass.
use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::coords::{GridLocation, MOORE_OFFSETS};
use crate::error::Result;
use crate::flood::{flooded_regions, reaches};
use crate::mask::FloodedMask;
use crate::terrain::Terrain;

/// Summary of the terrain at one water height.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloodReport {
    pub height: f64,
    pub flooded_cells: usize,
    pub visible_land: usize,
    pub islands: usize,
    /// Cell count of the biggest island; 0 when everything is under water.
    pub largest_island: usize,
}

/// Lowest and highest elevation, in that order.
pub fn elevation_extrema(terrain: &Terrain) -> (f64, f64) {
    terrain
        .elevations()
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &z| (lo.min(z), hi.max(z)))
}

/// Whether `cell` is under water at `height`.
pub fn is_flooded(terrain: &Terrain, height: f64, cell: GridLocation) -> Result<bool> {
    reaches(terrain, height, cell)
}

/// Signed distance from the waterline to the ground at `cell`:
/// positive above the water, negative below it.
pub fn height_above_water(terrain: &Terrain, height: f64, cell: GridLocation) -> Result<f64> {
    Ok(terrain.elevation(cell)? - height)
}

/// Number of dry cells at `height`.
pub fn total_visible_land(terrain: &Terrain, height: f64) -> usize {
    flooded_regions(terrain, height).dry_count()
}

/// Change in visible land when the water moves from `height` to `new_height`.
/// Positive means land is lost, negative means land is gained.
pub fn land_delta(terrain: &Terrain, height: f64, new_height: f64) -> i64 {
    let before = total_visible_land(terrain, height) as i64;
    let after = total_visible_land(terrain, new_height) as i64;
    before - after
}

/// Number of islands (8-connected groups of dry cells) at `height`.
pub fn count_islands(terrain: &Terrain, height: f64) -> usize {
    label_islands(&flooded_regions(terrain, height)).count()
}

/// One flood pass, every summary statistic.
pub fn flood_report(terrain: &Terrain, height: f64) -> FloodReport {
    let mask = flooded_regions(terrain, height);
    let islands = label_islands(&mask);
    FloodReport {
        height,
        flooded_cells: mask.flooded_count(),
        visible_land: mask.dry_count(),
        islands: islands.count(),
        largest_island: islands.largest().unwrap_or(0),
    }
}

// ── Island labeling ───────────────────────────────────────────────────────────

/// Connected-component labels for the dry cells of a mask.
#[derive(Debug, Clone)]
pub struct IslandMap {
    /// Row-major; 0 = flooded, otherwise the 1-based island label.
    labels: Vec<u32>,
    cols: usize,
    sizes: Vec<usize>,
}

impl IslandMap {
    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Island label at `(row, col)`, or None for a flooded cell.
    /// Labels are 1-based in row-major discovery order.
    pub fn label(&self, row: usize, col: usize) -> Option<u32> {
        assert!(col < self.cols, "column {col} out of bounds for width {}", self.cols);
        match self.labels[row * self.cols + col] {
            0 => None,
            l => Some(l),
        }
    }

    /// Cells per island; index `label - 1`.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    pub fn largest(&self) -> Option<usize> {
        self.sizes.iter().copied().max()
    }
}

/// Label every 8-connected group of dry cells in `mask`.
///
/// Row-major scan; each unlabeled dry cell seeds a breadth-first walk over
/// its eight neighbours, restricted to dry unlabeled cells.
pub fn label_islands(mask: &FloodedMask) -> IslandMap {
    let rows = mask.rows();
    let cols = mask.cols();
    let mut labels = vec![0u32; rows * cols];
    let mut sizes = Vec::new();
    let mut queue = VecDeque::new();

    for r in 0..rows {
        for c in 0..cols {
            if mask.get(r, c) || labels[r * cols + c] != 0 {
                continue;
            }
            let label = sizes.len() as u32 + 1;
            let mut size = 0usize;
            labels[r * cols + c] = label;
            queue.push_back(GridLocation::new(r, c));

            while let Some(cur) = queue.pop_front() {
                size += 1;
                for &(dr, dc) in &MOORE_OFFSETS {
                    let Some(n) = cur.offset(dr, dc, rows, cols) else {
                        continue;
                    };
                    let i = n.row * cols + n.col;
                    if !mask.get(n.row, n.col) && labels[i] == 0 {
                        labels[i] = label;
                        queue.push_back(n);
                    }
                }
            }
            sizes.push(size);
        }
    }

    IslandMap { labels, cols, sizes }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn staircase() -> Terrain {
        Terrain::new(
            vec![
                vec![0.0, 1.0, 2.0, 3.0],
                vec![1.0, 2.0, 3.0, 4.0],
                vec![2.0, 3.0, 4.0, 5.0],
                vec![3.0, 4.0, 5.0, 6.0],
            ],
            vec![GridLocation::new(0, 0)],
        )
        .unwrap()
    }

    /// Sea along the left edge, with a few peaks poking out.
    fn archipelago() -> Terrain {
        Terrain::new(
            vec![
                vec![0.0, 0.0, 0.0, 0.0, 0.0],
                vec![0.0, 3.0, 0.0, 0.0, 0.0],
                vec![0.0, 0.0, 0.0, 4.0, 4.0],
                vec![0.0, 0.0, 0.0, 0.0, 4.0],
                vec![0.0, 2.0, 0.0, 0.0, 0.0],
            ],
            vec![GridLocation::new(0, 0), GridLocation::new(4, 0)],
        )
        .unwrap()
    }

    #[test]
    fn extrema_bound_and_attain() {
        let (lo, hi) = elevation_extrema(&staircase());
        assert_eq!((lo, hi), (0.0, 6.0));

        let t = Terrain::new(vec![vec![-3.5, 12.25], vec![7.0, 0.0]], vec![GridLocation::new(0, 0)])
            .unwrap();
        assert_eq!(elevation_extrema(&t), (-3.5, 12.25));
    }

    #[test]
    fn single_cell_extrema_coincide() {
        let t = Terrain::new(vec![vec![4.0]], vec![GridLocation::new(0, 0)]).unwrap();
        assert_eq!(elevation_extrema(&t), (4.0, 4.0));
    }

    #[test]
    fn visible_land_on_staircase() {
        let t = staircase();
        assert_eq!(total_visible_land(&t, 2.0), 10);
        assert_eq!(total_visible_land(&t, 0.0), 15);
        assert_eq!(total_visible_land(&t, 6.0), 0);
    }

    #[test]
    fn height_above_water_keeps_sign() {
        let t = staircase();
        assert_relative_eq!(height_above_water(&t, 2.5, GridLocation::new(3, 3)).unwrap(), 3.5);
        assert_relative_eq!(height_above_water(&t, 2.5, GridLocation::new(0, 0)).unwrap(), -2.5);
        assert!(height_above_water(&t, 2.5, GridLocation::new(0, 9)).is_err());
    }

    #[test]
    fn is_flooded_matches_mask_and_checks_bounds() {
        let t = staircase();
        assert!(is_flooded(&t, 2.0, GridLocation::new(2, 0)).unwrap());
        assert!(!is_flooded(&t, 2.0, GridLocation::new(1, 2)).unwrap());
        assert!(is_flooded(&t, 2.0, GridLocation::new(4, 4)).is_err());
    }

    #[test]
    fn land_delta_is_signed() {
        let t = staircase();
        assert_eq!(land_delta(&t, 0.0, 2.0), 5);
        assert_eq!(land_delta(&t, 2.0, 0.0), -5);
        for h in [-1.0, 0.0, 2.0, 3.5, 10.0] {
            assert_eq!(land_delta(&t, h, h), 0);
        }
    }

    #[test]
    fn diagonal_neighbours_form_one_island() {
        // Only (0,0) and (1,1) stay dry.
        let t = Terrain::new(
            vec![
                vec![5.0, 0.0, 0.0],
                vec![0.0, 5.0, 0.0],
                vec![0.0, 0.0, 0.0],
            ],
            vec![GridLocation::new(2, 2)],
        )
        .unwrap();
        let mask = flooded_regions(&t, 1.0);
        assert_eq!(mask.dry_count(), 2);
        assert_eq!(count_islands(&t, 1.0), 1);
    }

    #[test]
    fn archipelago_islands_counted_and_sized() {
        let t = archipelago();
        let mask = flooded_regions(&t, 1.0);
        let map = label_islands(&mask);
        assert_eq!(map.count(), 3);
        assert_eq!(map.sizes(), &[1, 3, 1]);
        assert_eq!(map.largest(), Some(3));
        assert_eq!(map.label(1, 1), Some(1));
        assert_eq!(map.label(2, 3), Some(2));
        assert_eq!(map.label(3, 4), Some(2));
        assert_eq!(map.label(4, 1), Some(3));
        assert_eq!(map.label(0, 0), None);

        // Raising the water sinks the two lower islands.
        assert_eq!(count_islands(&t, 3.0), 1);
        assert_eq!(count_islands(&t, 4.0), 0);
    }

    #[test]
    #[should_panic(expected = "column 5 out of bounds")]
    fn island_label_past_the_edge_panics() {
        let map = label_islands(&flooded_regions(&archipelago(), 1.0));
        map.label(1, 5);
    }

    #[test]
    fn below_minimum_only_sources_are_wet() {
        // Everything dry except the source corner; the dry ring is one island.
        let t = archipelago();
        let mask = flooded_regions(&t, -1.0);
        assert_eq!(mask.flooded_count(), 2);
        assert_eq!(count_islands(&t, -1.0), 1);

        // A source in the middle of a column splits the grid in two.
        let column = Terrain::new(
            vec![vec![1.0], vec![1.0], vec![1.0]],
            vec![GridLocation::new(1, 0)],
        )
        .unwrap();
        assert_eq!(count_islands(&column, 0.0), 2);
    }

    #[test]
    fn islands_use_real_terrain_dimensions() {
        // Wider than any fixed placeholder grid.
        let mut heights = vec![vec![0.0; 9]; 2];
        heights[1][8] = 10.0;
        heights[0][4] = 10.0;
        let t = Terrain::new(heights, vec![GridLocation::new(0, 0)]).unwrap();
        assert_eq!(count_islands(&t, 1.0), 2);
    }

    #[test]
    fn report_agrees_with_individual_queries() {
        let t = archipelago();
        let r = flood_report(&t, 1.0);
        assert_eq!(r.flooded_cells + r.visible_land, t.cell_count());
        assert_eq!(r.visible_land, total_visible_land(&t, 1.0));
        assert_eq!(r.islands, count_islands(&t, 1.0));
        assert_eq!(r.largest_island, 3);

        let drowned = flood_report(&t, 100.0);
        assert_eq!(drowned.islands, 0);
        assert_eq!(drowned.largest_island, 0);
    }
}
