//! Grid cell addressing.
//! Rows grow downward, columns grow rightward; (0, 0) is the top-left cell.
use std::fmt;

use serde::{Deserialize, Serialize};

/// A cell in a row-major grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridLocation {
    pub row: usize,
    pub col: usize,
}

/// 4-connected neighbourhood: up, down, left, right.
pub const AXIAL_OFFSETS: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// 8-connected neighbourhood: the axial offsets followed by the diagonals.
pub const MOORE_OFFSETS: [(isize, isize); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

impl GridLocation {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Step by `(dr, dc)`, returning None if the result leaves a
    /// `rows` × `cols` grid.
    #[inline]
    pub fn offset(self, dr: isize, dc: isize, rows: usize, cols: usize) -> Option<Self> {
        let r = self.row.checked_add_signed(dr)?;
        let c = self.col.checked_add_signed(dc)?;
        (r < rows && c < cols).then_some(Self { row: r, col: c })
    }
}

impl From<(usize, usize)> for GridLocation {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for GridLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn offset_stays_inside_grid() {
        let loc = GridLocation::new(0, 0);
        assert_eq!(loc.offset(-1, 0, 3, 3), None);
        assert_eq!(loc.offset(0, -1, 3, 3), None);
        assert_eq!(loc.offset(1, 1, 3, 3), Some(GridLocation::new(1, 1)));

        let corner = GridLocation::new(2, 2);
        assert_eq!(corner.offset(1, 0, 3, 3), None);
        assert_eq!(corner.offset(0, 1, 3, 3), None);
        assert_eq!(corner.offset(-1, -1, 3, 3), Some(GridLocation::new(1, 1)));
    }

    #[test]
    fn interior_cell_has_all_neighbours() {
        let loc = GridLocation::new(1, 1);
        let axial = AXIAL_OFFSETS.iter().filter_map(|&(dr, dc)| loc.offset(dr, dc, 3, 3)).count();
        let moore = MOORE_OFFSETS.iter().filter_map(|&(dr, dc)| loc.offset(dr, dc, 3, 3)).count();
        assert_eq!(axial, 4);
        assert_eq!(moore, 8);
    }

    #[test]
    fn equal_locations_hash_together() {
        let mut set = HashSet::new();
        set.insert(GridLocation::new(2, 3));
        set.insert(GridLocation::from((2, 3)));
        set.insert(GridLocation::new(3, 2));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn serde_shape_is_row_col_object() {
        let loc: GridLocation = serde_json::from_str(r#"{"row": 4, "col": 7}"#).unwrap();
        assert_eq!(loc, GridLocation::new(4, 7));
        assert_eq!(loc.to_string(), "(4, 7)");
    }
}
