//! The mutable board model: placement legality, constraint bookkeeping, connectivity.

use ndarray::Array2;

use crate::error::{Result, TrainTracksError};
use crate::geom::{Move, Point};
use crate::piece::{PieceType, PLACEABLE};

/// A single fixed (pre-placed) piece given as part of a puzzle.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct FixedPiece {
    /// The cell this piece occupies.
    pub at: Point,
    /// The piece placed there.
    pub piece: PieceType,
}

/// The board: a `rows` x `cols` array of [`PieceType`], the per-row/column required piece
/// counts, and the derived counters and entry/exit points described in §3.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    rows: i32,
    cols: i32,
    board: Array2<PieceType>,
    row_counts: Vec<u32>,
    col_counts: Vec<u32>,
    placed_in_row: Vec<u32>,
    placed_in_col: Vec<u32>,
    total_count: u32,
    entry: Option<Point>,
    exit: Option<Point>,
}

impl Grid {
    /// Builds an empty grid with the given dimensions and row/column clue counts, with no
    /// fixed pieces and no entry/exit derived yet.
    ///
    /// Returns [`TrainTracksError::ClueSumMismatch`] if `Σ row_counts != Σ col_counts`.
    pub fn new_empty(rows: i32, cols: i32, row_counts: Vec<u32>, col_counts: Vec<u32>) -> Result<Grid> {
        assert_eq!(row_counts.len(), rows as usize);
        assert_eq!(col_counts.len(), cols as usize);

        let row_sum: u32 = row_counts.iter().sum();
        let col_sum: u32 = col_counts.iter().sum();
        if row_sum != col_sum {
            return Err(TrainTracksError::ClueSumMismatch { row_sum, col_sum });
        }

        Ok(Grid {
            rows,
            cols,
            board: Array2::from_elem((rows as usize, cols as usize), PieceType::Empty),
            row_counts,
            col_counts,
            placed_in_row: vec![0; rows as usize],
            placed_in_col: vec![0; cols as usize],
            total_count: row_sum,
            entry: None,
            exit: None,
        })
    }

    /// Builds a grid with the given fixed pieces already placed, then derives `entry`/`exit`.
    ///
    /// Returns [`TrainTracksError::FixedOutOfBounds`] if a fixed piece sits outside the grid,
    /// or [`TrainTracksError::BadEntryExitCount`] if the resulting board does not have exactly
    /// two edge cells with a single off-grid connection.
    pub fn with_fixed(
        rows: i32,
        cols: i32,
        row_counts: Vec<u32>,
        col_counts: Vec<u32>,
        fixed: &[FixedPiece],
    ) -> Result<Grid> {
        let mut grid = Grid::new_empty(rows, cols, row_counts, col_counts)?;
        for f in fixed {
            if !grid.in_bounds(f.at.row, f.at.col) {
                return Err(TrainTracksError::FixedOutOfBounds {
                    row: f.at.row,
                    col: f.at.col,
                    height: rows,
                    width: cols,
                });
            }
            grid.place(f.at.row, f.at.col, f.piece);
        }
        grid.find_entry_exit()?;
        Ok(grid)
    }

    /// The number of rows (height) of the board.
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// The number of columns (width) of the board.
    pub fn cols(&self) -> i32 {
        self.cols
    }

    /// The derived entry point, once [`Grid::find_entry_exit`] has run.
    pub fn entry(&self) -> Option<Point> {
        self.entry
    }

    /// The derived exit point, once [`Grid::find_entry_exit`] has run.
    pub fn exit(&self) -> Option<Point> {
        self.exit
    }

    /// The total number of pieces the solved board must contain, `Σ row_counts`.
    pub fn total_count(&self) -> u32 {
        self.total_count
    }

    /// Whether `(r, c)` lies within `[0, rows) x [0, cols)`.
    #[inline]
    pub fn in_bounds(&self, r: i32, c: i32) -> bool {
        0 <= r && r < self.rows && 0 <= c && c < self.cols
    }

    /// Whether `(r, c)` is in bounds and lies on the outer border of the board.
    #[inline]
    pub fn on_edge(&self, r: i32, c: i32) -> bool {
        self.in_bounds(r, c) && (r == 0 || r == self.rows - 1 || c == 0 || c == self.cols - 1)
    }

    /// Whether `(r, c)` currently holds [`PieceType::Empty`].
    #[inline]
    pub fn is_empty(&self, r: i32, c: i32) -> bool {
        self.get(r, c) == PieceType::Empty
    }

    /// Whether `(r, c)` currently holds a non-empty piece.
    #[inline]
    pub fn is_filled(&self, r: i32, c: i32) -> bool {
        self.get(r, c) != PieceType::Empty
    }

    /// The piece currently occupying `(r, c)`.
    #[inline]
    pub fn get(&self, r: i32, c: i32) -> PieceType {
        self.board[(r as usize, c as usize)]
    }

    /// The number of pieces currently placed in row `r`.
    #[inline]
    pub fn track_count_in_row(&self, r: i32) -> u32 {
        self.placed_in_row[r as usize]
    }

    /// The number of pieces currently placed in column `c`.
    #[inline]
    pub fn track_count_in_col(&self, c: i32) -> u32 {
        self.placed_in_col[c as usize]
    }

    /// The required piece count for row `r`.
    #[inline]
    pub fn row_count(&self, r: i32) -> u32 {
        self.row_counts[r as usize]
    }

    /// The required piece count for column `c`.
    #[inline]
    pub fn col_count(&self, c: i32) -> u32 {
        self.col_counts[c as usize]
    }

    /// Tests whether `piece` may legally occupy `(r, c)` right now. Never panics.
    pub fn can_place(&self, r: i32, c: i32, piece: PieceType) -> bool {
        if piece == PieceType::Empty || !self.in_bounds(r, c) || !self.is_empty(r, c) {
            return false;
        }
        if self.placed_in_row[r as usize] >= self.row_counts[r as usize]
            || self.placed_in_col[c as usize] >= self.col_counts[c as usize]
        {
            return false;
        }

        for dir in piece.connections() {
            let (nr, nc) = (r + dir.dr, c + dir.dc);
            if !self.in_bounds(nr, nc) {
                return false;
            }
        }

        if !self.neighbours_align(r, c, piece) {
            return false;
        }

        self.has_look_ahead_capacity(r, c, piece)
    }

    fn neighbours_align(&self, r: i32, c: i32, piece: PieceType) -> bool {
        let mut any_neighbour = false;
        let mut any_match = false;
        for dir in Move::ALL {
            let (nr, nc) = (r + dir.dr, c + dir.dc);
            if !self.in_bounds(nr, nc) || self.is_empty(nr, nc) {
                continue;
            }
            any_neighbour = true;
            let neighbour = self.get(nr, nc);
            let piece_connects = piece.connects_to(dir);
            let neighbour_connects_back = neighbour.connects_to(dir.opposite());
            if piece_connects != neighbour_connects_back {
                return false;
            }
            if piece_connects {
                any_match = true;
            }
        }
        !any_neighbour || any_match
    }

    fn has_look_ahead_capacity(&self, r: i32, c: i32, piece: PieceType) -> bool {
        for dir in piece.connections() {
            let (nr, nc) = (r + dir.dr, c + dir.dc);
            if self.is_empty(nr, nc) {
                let row_inc = if nr == r { 1 } else { 0 };
                if self.placed_in_row[nr as usize] + row_inc > self.row_counts[nr as usize] {
                    return false;
                }
                let col_inc = if nc == c { 1 } else { 0 };
                if self.placed_in_col[nc as usize] + col_inc > self.col_counts[nc as usize] {
                    return false;
                }
            }
        }
        true
    }

    /// Places `piece` at `(r, c)`, updating the row/column counters.
    ///
    /// Panics (programmer misuse, §7) if `piece` is [`PieceType::Empty`], `(r, c)` is out
    /// of bounds, or the cell is already filled.
    pub fn place(&mut self, r: i32, c: i32, piece: PieceType) {
        assert_ne!(piece, PieceType::Empty, "cannot place PieceType::Empty");
        assert!(self.in_bounds(r, c), "place out of bounds: ({r}, {c})");
        assert!(self.is_empty(r, c), "cell ({r}, {c}) is already filled");

        log::trace!("placing {piece:?} at ({r}, {c})");
        self.board[(r as usize, c as usize)] = piece;
        self.placed_in_row[r as usize] += 1;
        self.placed_in_col[c as usize] += 1;
    }

    /// Clears `(r, c)` if non-empty, updating the row/column counters. A no-op if the cell
    /// is already empty.
    pub fn remove(&mut self, r: i32, c: i32) {
        if self.is_empty(r, c) {
            return;
        }
        log::trace!("removing {:?} from ({r}, {c})", self.get(r, c));
        self.board[(r as usize, c as usize)] = PieceType::Empty;
        self.placed_in_row[r as usize] -= 1;
        self.placed_in_col[c as usize] -= 1;
    }

    /// The non-empty pieces that [`Grid::can_place`] accepts at `(r, c)`, in a fixed,
    /// deterministic order.
    pub fn legal_pieces(&self, r: i32, c: i32) -> Vec<PieceType> {
        PLACEABLE
            .into_iter()
            .filter(|&p| self.can_place(r, c, p))
            .collect()
    }

    /// True iff every row and column could still reach its required count.
    pub fn can_still_satisfy(&self) -> bool {
        for r in 0..self.rows {
            let placed = self.placed_in_row[r as usize];
            let empty = self.cols as u32 - placed;
            let required = self.row_counts[r as usize];
            if !(placed <= required && required <= placed + empty) {
                return false;
            }
        }
        for c in 0..self.cols {
            let placed = self.placed_in_col[c as usize];
            let empty = self.rows as u32 - placed;
            let required = self.col_counts[c as usize];
            if !(placed <= required && required <= placed + empty) {
                return false;
            }
        }
        true
    }

    /// True iff every row and column has exactly its required count placed.
    pub fn track_counts_match(&self) -> bool {
        (0..self.rows).all(|r| self.placed_in_row[r as usize] == self.row_counts[r as usize])
            && (0..self.cols).all(|c| self.placed_in_col[c as usize] == self.col_counts[c as usize])
    }

    /// All currently non-empty cells, in row-major order.
    pub fn fixed_points(&self) -> Vec<Point> {
        itertools::iproduct!(0..self.rows, 0..self.cols)
            .filter(|&(r, c)| self.is_filled(r, c))
            .map(|(r, c)| Point::new(r, c))
            .collect()
    }

    /// True iff the non-empty cells form exactly one connected component under the
    /// "both cells connect to each other" relation. False if no non-empty cell exists.
    pub fn is_single_connected_path(&self) -> bool {
        let points = self.fixed_points();
        let Some(&seed) = points.first() else {
            return false;
        };

        let mut seen = std::collections::HashSet::new();
        let mut stack = vec![seed];
        seen.insert(seed);
        while let Some(p) = stack.pop() {
            let piece = self.get(p.row, p.col);
            for dir in piece.connections() {
                let n = p + *dir;
                if !self.in_bounds(n.row, n.col) || self.is_empty(n.row, n.col) {
                    continue;
                }
                let neighbour = self.get(n.row, n.col);
                if neighbour.connects_to(dir.opposite()) && seen.insert(n) {
                    stack.push(n);
                }
            }
        }

        seen.len() == points.len()
    }

    /// Overwrites `other`'s board and counters with this grid's, in place. Dimensions must
    /// already match.
    pub fn copy_into(&self, other: &mut Grid) {
        assert_eq!(self.rows, other.rows, "dimension mismatch in copy_into");
        assert_eq!(self.cols, other.cols, "dimension mismatch in copy_into");
        other.board.assign(&self.board);
        other.placed_in_row.copy_from_slice(&self.placed_in_row);
        other.placed_in_col.copy_from_slice(&self.placed_in_col);
        other.entry = self.entry;
        other.exit = self.exit;
        other.total_count = self.total_count;
    }

    /// Scans the edges for cells whose piece has exactly one off-grid connection, and
    /// records the first two (in row-major, then column-major order among edges) as
    /// `entry`/`exit`.
    ///
    /// Returns [`TrainTracksError::BadEntryExitCount`] if the count is not exactly 2.
    pub fn find_entry_exit(&mut self) -> Result<()> {
        let mut candidates = Vec::new();
        for r in 0..self.rows {
            for c in 0..self.cols {
                if !self.on_edge(r, c) || self.is_empty(r, c) {
                    continue;
                }
                let piece = self.get(r, c);
                let off_grid = piece
                    .connections()
                    .iter()
                    .filter(|dir| !self.in_bounds(r + dir.dr, c + dir.dc))
                    .count();
                if off_grid == 1 {
                    candidates.push(Point::new(r, c));
                }
            }
        }

        if candidates.len() != 2 {
            return Err(TrainTracksError::BadEntryExitCount(candidates.len()));
        }

        self.entry = Some(candidates[0]);
        self.exit = Some(candidates[1]);
        Ok(())
    }

    /// The connection direction of the piece at `p` that points off-grid.
    ///
    /// Panics if `p` is empty or its piece has no off-grid connection; callers use this
    /// only at a cell already identified as `entry`/`exit` by [`Grid::find_entry_exit`].
    pub fn off_grid_connection(&self, p: Point) -> Move {
        self.get(p.row, p.col)
            .connections()
            .iter()
            .copied()
            .find(|dir| !self.in_bounds(p.row + dir.dr, p.col + dir.dc))
            .expect("entry/exit cell must have exactly one off-grid connection")
    }
}
