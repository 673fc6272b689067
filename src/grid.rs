//! Fixed-column grid layout planning
//!
//! Maps the collection's chronological order onto row-major grid cells and
//! derives the canvas and viewport extents a scrolling view needs. Pure
//! arithmetic over the record count and the planner geometry; no hidden
//! state, so any layout can be re-derived at will.

use serde::{Deserialize, Serialize};

/// Grid cell assigned to one record index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPosition {
    pub row: usize,
    pub column: usize,
}

/// Plans row-major grid placement for a fixed column count
///
/// `visible_rows` only sizes the viewport; every record is laid out and
/// scrolling reveals the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPlanner {
    /// Number of columns
    pub columns: usize,
    /// Cell width including padding, in pixels
    pub cell_width: u32,
    /// Cell height including padding, in pixels
    pub cell_height: u32,
    /// Rows visible without scrolling
    pub visible_rows: usize,
}

impl Default for GridPlanner {
    fn default() -> Self {
        Self {
            columns: 9,
            // Thumbnail bound plus a few pixels of padding per side
            cell_width: 136,
            cell_height: 136,
            visible_rows: 5,
        }
    }
}

impl GridPlanner {
    /// Cell for the record at chronological index `i`
    ///
    /// Row-major: left-to-right, top-to-bottom, earliest record first.
    pub fn position(&self, i: usize) -> GridPosition {
        GridPosition {
            row: i / self.columns,
            column: i % self.columns,
        }
    }

    /// Positions for all `n` records in chronological order
    pub fn layout(&self, n: usize) -> impl Iterator<Item = GridPosition> + '_ {
        (0..n).map(|i| self.position(i))
    }

    /// Number of rows needed for `n` records
    pub fn rows(&self, n: usize) -> usize {
        n.div_ceil(self.columns)
    }

    /// Total canvas height needed for `n` records
    pub fn content_height(&self, n: usize) -> u64 {
        self.rows(n) as u64 * self.cell_height as u64
    }

    /// Width of the visible viewport
    pub fn viewport_width(&self) -> u64 {
        self.columns as u64 * self.cell_width as u64
    }

    /// Height of the visible viewport
    pub fn viewport_height(&self) -> u64 {
        self.visible_rows as u64 * self.cell_height as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planner() -> GridPlanner {
        GridPlanner::default()
    }

    #[test]
    fn test_position_row_major() {
        let p = planner();
        assert_eq!(p.position(0), GridPosition { row: 0, column: 0 });
        assert_eq!(p.position(8), GridPosition { row: 0, column: 8 });
        assert_eq!(p.position(9), GridPosition { row: 1, column: 0 });
        // 22 / 9 = 2, 22 % 9 = 4
        assert_eq!(p.position(22), GridPosition { row: 2, column: 4 });
    }

    #[test]
    fn test_nine_records_fill_one_row() {
        let p = planner();
        let positions: Vec<_> = p.layout(9).collect();
        assert_eq!(positions.len(), 9);
        assert!(positions.iter().all(|pos| pos.row == 0));
        assert_eq!(positions.last().unwrap().column, 8);
        assert_eq!(p.rows(9), 1);
    }

    #[test]
    fn test_empty_layout() {
        let p = planner();
        assert_eq!(p.layout(0).count(), 0);
        assert_eq!(p.rows(0), 0);
        assert_eq!(p.content_height(0), 0);
    }

    #[test]
    fn test_extents() {
        let p = planner();
        // 23 records over 9 columns need 3 rows
        assert_eq!(p.rows(23), 3);
        assert_eq!(p.content_height(23), 3 * 136);
        assert_eq!(p.viewport_width(), 9 * 136);
        assert_eq!(p.viewport_height(), 5 * 136);
    }

    #[test]
    fn test_custom_geometry() {
        let p = GridPlanner {
            columns: 4,
            cell_width: 100,
            cell_height: 80,
            visible_rows: 2,
        };
        assert_eq!(p.position(5), GridPosition { row: 1, column: 1 });
        assert_eq!(p.rows(5), 2);
        assert_eq!(p.content_height(5), 160);
        assert_eq!(p.viewport_height(), 160);
    }
}
