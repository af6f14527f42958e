//! The uniform cell list.

use crate::cell::Cell;
use crate::error::SpaceError;
use quark_core::{CellCoord, Vector};
use smallvec::SmallVec;

/// Linear indices of the valid cells around a cell, itself included.
///
/// 27 inline slots cover the full 3D neighbourhood without allocating.
pub type Neighbours = SmallVec<[usize; 27]>;

/// Upper bound on `C^D`. Every cell owns three index sets, so larger grids
/// are refused up front rather than exhausting memory.
pub const MAX_CELLS: usize = 1 << 20;

/// A regular grid of `C^D` cells of side `R` covering `[0, L)^D`, with
/// `C = ceil(L / R)`.
///
/// Cells are stored in row-major order (the last axis varies fastest).
/// The grid shape and the `3^D` neighbour offset table are fixed at
/// construction; only cell membership changes afterwards, and only through
/// the stage/flush protocol of [`Cell`].
///
/// # Examples
///
/// ```
/// use quark_core::Vector;
/// use quark_space::CellGrid;
///
/// let grid = CellGrid::<2>::new(10.0, 2.5).unwrap();
/// assert_eq!(grid.cells_per_axis(), 4);
/// assert_eq!(grid.cell_count(), 16);
///
/// // A corner cell sees itself and three neighbours.
/// let corner = grid.locate(&Vector::new([0.1, 0.1]));
/// assert_eq!(grid.neighbours(corner).len(), 4);
///
/// // An interior cell sees the full 3x3 block.
/// let inner = grid.locate(&Vector::new([3.0, 6.0]));
/// assert_eq!(grid.neighbours(inner).len(), 9);
/// ```
#[derive(Clone, Debug)]
pub struct CellGrid<const D: usize> {
    length: f64,
    cutoff: f64,
    cells_per_axis: usize,
    cells: Vec<Cell<D>>,
    offsets: Vec<CellCoord<D>>,
}

impl<const D: usize> CellGrid<D> {
    /// Build an empty grid over `[0, length)^D` with cells of side `cutoff`.
    ///
    /// # Errors
    ///
    /// - [`SpaceError::ZeroDimensions`] if `D == 0`
    /// - [`SpaceError::InvalidLength`] / [`SpaceError::InvalidCutoff`] for
    ///   non-finite or non-positive values
    /// - [`SpaceError::CutoffExceedsLength`] if `cutoff > length`
    /// - [`SpaceError::TooManyCells`] if the cell count overflows the index
    ///   types or exceeds [`MAX_CELLS`]
    pub fn new(length: f64, cutoff: f64) -> Result<Self, SpaceError> {
        if D == 0 {
            return Err(SpaceError::ZeroDimensions);
        }
        if !length.is_finite() || length <= 0.0 {
            return Err(SpaceError::InvalidLength { value: length });
        }
        if !cutoff.is_finite() || cutoff <= 0.0 {
            return Err(SpaceError::InvalidCutoff { value: cutoff });
        }
        if cutoff > length {
            return Err(SpaceError::CutoffExceedsLength { cutoff, length });
        }

        let cells_per_axis = (length / cutoff).ceil() as usize;
        let too_many = || SpaceError::TooManyCells {
            cells_per_axis,
            dims: D,
        };
        if i32::try_from(cells_per_axis).is_err() {
            return Err(too_many());
        }
        let dims = u32::try_from(D).map_err(|_| too_many())?;
        let cell_count = cells_per_axis
            .checked_pow(dims)
            .filter(|&n| n <= MAX_CELLS)
            .ok_or_else(too_many)?;
        let offset_count = 3usize.checked_pow(dims).ok_or_else(too_many)?;

        let cells = (0..cell_count)
            .map(|i| Cell::new(coord_of(i, cells_per_axis)))
            .collect();

        // Base-3 digits of k, shifted to {-1, 0, 1}, one digit per axis.
        let offsets = (0..offset_count)
            .map(|k| {
                let mut rest = k;
                std::array::from_fn(|_| {
                    let o = (rest % 3) as i32 - 1;
                    rest /= 3;
                    o
                })
            })
            .collect();

        Ok(Self {
            length,
            cutoff,
            cells_per_axis,
            cells,
            offsets,
        })
    }

    /// Side length `L` of the domain.
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Cell side, equal to the interaction cutoff radius `R`.
    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    /// Cells along each axis (`C`).
    pub fn cells_per_axis(&self) -> usize {
        self.cells_per_axis
    }

    /// Total number of cells (`C^D`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The `3^D` neighbour offsets, zero offset included.
    pub fn offsets(&self) -> &[CellCoord<D>] {
        &self.offsets
    }

    /// Borrow a cell by linear index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    pub fn cell(&self, index: usize) -> &Cell<D> {
        &self.cells[index]
    }

    /// All cells in linear order.
    pub fn cells(&self) -> &[Cell<D>] {
        &self.cells
    }

    /// Number of committed memberships across all cells.
    pub fn occupancy(&self) -> usize {
        self.cells.iter().map(Cell::len).sum()
    }

    /// Linear index of `coord`, or `None` if any axis is out of bounds.
    pub fn linear_index(&self, coord: &CellCoord<D>) -> Option<usize> {
        let c = self.cells_per_axis;
        coord.iter().try_fold(0usize, |idx, &x| {
            let x = usize::try_from(x).ok().filter(|&x| x < c)?;
            Some(idx * c + x)
        })
    }

    /// Grid coordinate of the cell at `index`.
    pub fn coord_of(&self, index: usize) -> CellCoord<D> {
        coord_of(index, self.cells_per_axis)
    }

    /// The cell containing `position`: `floor(x / R)` per axis, clamped to
    /// `[0, C - 1]`.
    ///
    /// Border policies are applied by the caller; a position outside the
    /// domain lands in the nearest edge cell.
    pub fn locate(&self, position: &Vector<D>) -> usize {
        let max = (self.cells_per_axis - 1) as f64;
        position.iter().fold(0usize, |idx, &x| {
            let k = (x / self.cutoff).floor().clamp(0.0, max) as usize;
            idx * self.cells_per_axis + k
        })
    }

    /// Cells reachable from `index` through the offset table.
    ///
    /// An offset is kept only if the shifted coordinate is in bounds on
    /// every axis, so the neighbourhood never wraps across a grid edge.
    pub fn neighbours(&self, index: usize) -> Neighbours {
        let base = self.cells[index].coord();
        self.offsets
            .iter()
            .filter_map(|o| {
                let shifted: CellCoord<D> = std::array::from_fn(|a| base[a] + o[a]);
                self.linear_index(&shifted)
            })
            .collect()
    }

    /// Whether cells `a` and `b` are equal or adjacent (Chebyshev distance
    /// at most 1).
    pub fn are_adjacent(&self, a: usize, b: usize) -> bool {
        let ca = self.coord_of(a);
        let cb = self.coord_of(b);
        ca.iter().zip(cb.iter()).all(|(x, y)| (x - y).abs() <= 1)
    }

    /// The cell currently holding `particle` as a committed member.
    ///
    /// Linear scan over every cell.
    pub fn cell_of(&self, particle: usize) -> Option<usize> {
        self.cells.iter().position(|c| c.contains(particle))
    }

    /// Stage `particle` for insertion into `cell`.
    pub fn stage_insert(&mut self, particle: usize, cell: usize) {
        self.cells[cell].stage_insert(particle);
    }

    /// Stage a move of `particle` out of `from` and, if `to` is `Some`, into
    /// `to`. `to == None` drops the particle from the grid.
    pub fn stage_move(&mut self, particle: usize, from: usize, to: Option<usize>) {
        self.cells[from].stage_remove(particle);
        if let Some(to) = to {
            self.cells[to].stage_insert(particle);
        }
    }

    /// Flush one cell.
    pub fn flush_cell(&mut self, index: usize) {
        self.cells[index].flush();
    }

    /// Flush every cell.
    pub fn flush(&mut self) {
        for cell in &mut self.cells {
            cell.flush();
        }
    }
}

/// Row-major decomposition of a linear cell index.
fn coord_of<const D: usize>(mut index: usize, cells_per_axis: usize) -> CellCoord<D> {
    let mut coord = [0i32; D];
    for axis in (0..D).rev() {
        coord[axis] = (index % cells_per_axis) as i32;
        index /= cells_per_axis;
    }
    coord
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cells_per_axis_rounds_up() {
        let grid = CellGrid::<2>::new(10.0, 3.0).unwrap();
        assert_eq!(grid.cells_per_axis(), 4);
        assert_eq!(grid.cell_count(), 16);
    }

    #[test]
    fn cutoff_equal_to_length_is_single_cell() {
        let grid = CellGrid::<3>::new(1.0, 1.0).unwrap();
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(grid.neighbours(0).as_slice(), &[0]);
    }

    #[test]
    fn offsets_cover_three_to_the_d() {
        let grid = CellGrid::<3>::new(9.0, 1.0).unwrap();
        assert_eq!(grid.offsets().len(), 27);
        assert!(grid.offsets().contains(&[0, 0, 0]));
        let mut sorted = grid.offsets().to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 27);
    }

    #[test]
    fn neighbour_counts_2d() {
        let grid = CellGrid::<2>::new(4.0, 1.0).unwrap();
        let at = |r, c| grid.linear_index(&[r, c]).unwrap();
        assert_eq!(grid.neighbours(at(0, 0)).len(), 4);
        assert_eq!(grid.neighbours(at(0, 2)).len(), 6);
        assert_eq!(grid.neighbours(at(2, 1)).len(), 9);
    }

    #[test]
    fn neighbour_count_3d_interior() {
        let grid = CellGrid::<3>::new(3.0, 1.0).unwrap();
        let centre = grid.linear_index(&[1, 1, 1]).unwrap();
        assert_eq!(grid.neighbours(centre).len(), 27);
    }

    #[test]
    fn neighbours_do_not_wrap_rows() {
        // (0, 2) + (0, +1) would be linear index 3 == (1, 0) if bounds were
        // only checked on the linear index.
        let grid = CellGrid::<2>::new(3.0, 1.0).unwrap();
        let edge = grid.linear_index(&[0, 2]).unwrap();
        let wrapped = grid.linear_index(&[1, 0]).unwrap();
        assert!(!grid.neighbours(edge).contains(&wrapped));
        for n in grid.neighbours(edge) {
            assert!(grid.are_adjacent(edge, n));
        }
    }

    #[test]
    fn coord_and_index_agree() {
        let grid = CellGrid::<3>::new(5.0, 1.0).unwrap();
        for i in 0..grid.cell_count() {
            assert_eq!(grid.linear_index(&grid.coord_of(i)), Some(i));
            assert_eq!(grid.cell(i).coord(), grid.coord_of(i));
        }
    }

    #[test]
    fn locate_clamps_out_of_domain() {
        let grid = CellGrid::<2>::new(4.0, 1.0).unwrap();
        assert_eq!(grid.locate(&Vector::new([-3.0, 0.5])), 0);
        let far = grid.locate(&Vector::new([100.0, 100.0]));
        assert_eq!(grid.coord_of(far), [3, 3]);
        let mid = grid.locate(&Vector::new([1.5, 2.0]));
        assert_eq!(grid.coord_of(mid), [1, 2]);
    }

    #[test]
    fn linear_index_rejects_out_of_bounds() {
        let grid = CellGrid::<2>::new(4.0, 1.0).unwrap();
        assert_eq!(grid.linear_index(&[-1, 0]), None);
        assert_eq!(grid.linear_index(&[0, 4]), None);
    }

    #[test]
    fn construction_errors() {
        assert_eq!(
            CellGrid::<0>::new(1.0, 1.0).unwrap_err(),
            SpaceError::ZeroDimensions
        );
        assert!(matches!(
            CellGrid::<2>::new(f64::NAN, 1.0),
            Err(SpaceError::InvalidLength { .. })
        ));
        assert!(matches!(
            CellGrid::<2>::new(1.0, 0.0),
            Err(SpaceError::InvalidCutoff { .. })
        ));
        assert!(matches!(
            CellGrid::<2>::new(1.0, 2.0),
            Err(SpaceError::CutoffExceedsLength { .. })
        ));
        assert!(matches!(
            CellGrid::<8>::new(1e6, 1.0),
            Err(SpaceError::TooManyCells { .. })
        ));
    }

    #[test]
    fn oversized_grid_is_refused_before_allocating() {
        match CellGrid::<3>::new(1000.0, 1.0) {
            Err(SpaceError::TooManyCells {
                cells_per_axis,
                dims,
            }) => assert_eq!((cells_per_axis, dims), (1000, 3)),
            other => panic!("expected TooManyCells, got {:?}", other.map(|g| g.cell_count())),
        }
    }

    #[test]
    fn cell_limit_applies_to_a_single_axis() {
        let over = (MAX_CELLS + 1) as f64;
        assert!(matches!(
            CellGrid::<1>::new(over, 1.0),
            Err(SpaceError::TooManyCells { .. })
        ));
    }

    #[test]
    fn stage_move_applies_on_flush() {
        let mut grid = CellGrid::<1>::new(3.0, 1.0).unwrap();
        grid.stage_insert(5, 0);
        grid.flush();
        assert_eq!(grid.cell_of(5), Some(0));

        grid.stage_move(5, 0, Some(2));
        assert_eq!(grid.cell_of(5), Some(0));
        grid.flush();
        assert_eq!(grid.cell_of(5), Some(2));

        grid.stage_move(5, 2, None);
        grid.flush();
        assert_eq!(grid.cell_of(5), None);
        assert_eq!(grid.occupancy(), 0);
    }

    proptest! {
        #[test]
        fn points_within_cutoff_share_a_neighbourhood(
            ax in 0.0f64..10.0, ay in 0.0f64..10.0,
            dx in -1.0f64..1.0, dy in -1.0f64..1.0,
            cutoff in 0.5f64..3.0,
        ) {
            let grid = CellGrid::<2>::new(10.0, cutoff).unwrap();
            let a = Vector::new([ax, ay]);
            let delta = Vector::new([dx, dy]) * cutoff;
            prop_assume!(delta.sq_magnitude() <= cutoff * cutoff);
            let b = a + delta;
            prop_assume!(b.iter().all(|&c| (0.0..10.0).contains(&c)));

            let ca = grid.locate(&a);
            let cb = grid.locate(&b);
            prop_assert!(grid.neighbours(ca).contains(&cb));
        }
    }
}
