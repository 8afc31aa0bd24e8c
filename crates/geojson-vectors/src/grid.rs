//! Grid shapes and row-major index iteration.

use serde::{Deserialize, Serialize};

/// Shape of the 2-D coordinate grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub rows: usize,
    pub cols: usize,
}

impl GridShape {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Shape as a dimension list, for comparison with variable shapes.
    pub fn dims(&self) -> [usize; 2] {
        [self.rows, self.cols]
    }
}

/// One cell of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridIndex {
    pub row: usize,
    pub col: usize,
}

impl GridIndex {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major offset of this cell in a flattened array of `shape`.
    pub fn offset(&self, shape: GridShape) -> usize {
        self.row * shape.cols + self.col
    }
}

impl From<(usize, usize)> for GridIndex {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Lazy row-major iterator over grid indices.
///
/// Cloning the iterator (or calling [`iterate`] again) starts a fresh pass.
#[derive(Debug, Clone)]
pub struct GridIter {
    shape: GridShape,
    next: usize,
    end: usize,
}

impl Iterator for GridIter {
    type Item = GridIndex;

    fn next(&mut self) -> Option<GridIndex> {
        if self.next >= self.end {
            return None;
        }
        let offset = self.next;
        self.next += 1;
        Some(GridIndex::new(offset / self.shape.cols, offset % self.shape.cols))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter {}

impl std::iter::FusedIterator for GridIter {}

/// Iterate over `shape` in row-major order, stopping after `max_records`
/// indices when a limit is given.
pub fn iterate(shape: GridShape, max_records: Option<usize>) -> GridIter {
    let total = if shape.is_empty() { 0 } else { shape.len() };
    let end = max_records.map_or(total, |max| max.min(total));
    GridIter {
        shape,
        next: 0,
        end,
    }
}
