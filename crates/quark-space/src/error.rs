//! Error types for grid construction.

use std::fmt;

/// Errors arising from [`CellGrid`](crate::CellGrid) construction.
#[derive(Debug, Clone, PartialEq)]
pub enum SpaceError {
    /// The grid has zero dimensions.
    ZeroDimensions,
    /// The characteristic length is NaN, infinite, zero or negative.
    InvalidLength {
        /// The rejected length.
        value: f64,
    },
    /// The cutoff radius is NaN, infinite, zero or negative.
    InvalidCutoff {
        /// The rejected cutoff.
        value: f64,
    },
    /// The cutoff radius exceeds the domain length, which would collapse
    /// the grid to a single cell.
    CutoffExceedsLength {
        /// Configured cutoff radius.
        cutoff: f64,
        /// Configured domain length.
        length: f64,
    },
    /// `cells_per_axis ^ dims` does not fit the index types or exceeds
    /// [`MAX_CELLS`](crate::grid::MAX_CELLS).
    TooManyCells {
        /// Cells along each axis.
        cells_per_axis: usize,
        /// Number of dimensions.
        dims: usize,
    },
}

impl fmt::Display for SpaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimensions => write!(f, "grid must have at least one dimension"),
            Self::InvalidLength { value } => {
                write!(f, "length must be finite and positive, got {value}")
            }
            Self::InvalidCutoff { value } => {
                write!(f, "cutoff radius must be finite and positive, got {value}")
            }
            Self::CutoffExceedsLength { cutoff, length } => {
                write!(f, "cutoff radius {cutoff} exceeds domain length {length}")
            }
            Self::TooManyCells {
                cells_per_axis,
                dims,
            } => {
                write!(
                    f,
                    "{cells_per_axis}^{dims} cells exceed the grid limit of {}",
                    crate::grid::MAX_CELLS
                )
            }
        }
    }
}

impl std::error::Error for SpaceError {}
