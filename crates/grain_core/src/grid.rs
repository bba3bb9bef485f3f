//! Label grid for a 2D microstructure.
//!
//! Cells are addressed as `(x, y)` with `x` the column (outer dimension) and
//! `y` the row (inner dimension). Storage is a single flat vector in
//! column-major order, `x * rows + y`, so one column is one contiguous slice.

use std::collections::BTreeSet;
use std::fmt;

/// Grain id stored in a cell.
pub type Label = u32;

/// Label of a cell that no grain has reached.
pub const UNASSIGNED: Label = 0;

/// Error type for building a grid from nested columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Wrong number of columns
    ColumnCount { expected: usize, found: usize },
    /// A column has the wrong number of rows
    ColumnLength {
        column: usize,
        expected: usize,
        found: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::ColumnCount { expected, found } => {
                write!(f, "expected {} columns, found {}", expected, found)
            }
            GridError::ColumnLength {
                column,
                expected,
                found,
            } => write!(
                f,
                "column {} has {} rows, expected {}",
                column, found, expected
            ),
        }
    }
}

impl std::error::Error for GridError {}

/// `cols x rows` matrix of grain labels, zero-initialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    labels: Vec<Label>,
}

impl Grid {
    /// Create an all-unassigned grid.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            labels: vec![UNASSIGNED; cols * rows],
        }
    }

    /// Build a grid from `cols` columns of `rows` labels each.
    pub fn from_columns(
        cols: usize,
        rows: usize,
        columns: &[Vec<Label>],
    ) -> Result<Self, GridError> {
        if columns.len() != cols {
            return Err(GridError::ColumnCount {
                expected: cols,
                found: columns.len(),
            });
        }
        let mut labels = Vec::with_capacity(cols * rows);
        for (column, values) in columns.iter().enumerate() {
            if values.len() != rows {
                return Err(GridError::ColumnLength {
                    column,
                    expected: rows,
                    found: values.len(),
                });
            }
            labels.extend_from_slice(values);
        }
        Ok(Self { cols, rows, labels })
    }

    // === Dimensions ===

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    // === Cell access ===

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.cols && y < self.rows,
            "cell ({}, {}) out of bounds for {}x{} grid",
            x,
            y,
            self.cols,
            self.rows
        );
        x * self.rows + y
    }

    /// Label at `(x, y)`. Callers guarantee the coordinate is in bounds.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Label {
        self.labels[self.index(x, y)]
    }

    /// Set the label at `(x, y)`. Callers guarantee the coordinate is in bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, label: Label) {
        let idx = self.index(x, y);
        self.labels[idx] = label;
    }

    /// Bounds-checked read.
    pub fn try_get(&self, x: usize, y: usize) -> Option<Label> {
        if x < self.cols && y < self.rows {
            Some(self.labels[x * self.rows + y])
        } else {
            None
        }
    }

    /// All labels in column-major order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// One slice per column, in column order.
    pub fn columns(&self) -> impl Iterator<Item = &[Label]> {
        self.labels.chunks(self.rows.max(1))
    }

    /// Nested copy of the grid, `cols` vectors of `rows` labels.
    pub fn to_columns(&self) -> Vec<Vec<Label>> {
        self.columns().map(<[Label]>::to_vec).collect()
    }

    // === Summary ===

    /// Number of cells still holding `UNASSIGNED`.
    pub fn unassigned_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == UNASSIGNED).count()
    }

    /// Number of distinct non-zero labels present.
    pub fn distinct_labels(&self) -> usize {
        self.labels
            .iter()
            .filter(|&&l| l != UNASSIGNED)
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Debug dump: every label followed by ", ", one column per line.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for column in self.columns() {
            for label in column {
                write!(f, "{}, ", label)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
