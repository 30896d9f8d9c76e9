//! Errors surfaced while constructing a [`Puzzle`](crate::puzzle::Puzzle) or [`Grid`](crate::grid::Grid).
//!
//! Programmer-misuse conditions (placing [`Empty`](crate::piece::PieceType::Empty), placing
//! out of bounds, placing on a filled cell) are `assert!`/`debug_assert!` panics, not part of
//! this enum — §7 treats them as conditions that must never occur during a correct search.

use thiserror::Error;

/// Errors that can arise while parsing or constructing a puzzle.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TrainTracksError {
    /// The text form was empty, or had no non-comment, non-blank lines.
    #[error("cannot parse puzzle from empty input")]
    Empty,

    /// The `ROWS:` line was missing.
    #[error("missing ROWS line")]
    MissingRows,

    /// The `COLS:` line was missing.
    #[error("missing COLS line")]
    MissingCols,

    /// `ROWS` or `COLS` contained a count that failed to parse or was negative.
    #[error("invalid clue count: {0:?}")]
    InvalidClueCount(String),

    /// The length of `ROWS` did not match the declared/implied height, or `COLS` the width.
    #[error("clue line length mismatch: expected {expected} values, found {found}")]
    ClueLengthMismatch {
        /// The expected number of values.
        expected: usize,
        /// The number of values actually found.
        found: usize,
    },

    /// `Σ ROWS != Σ COLS`.
    #[error("sum of row clues ({row_sum}) does not equal sum of column clues ({col_sum})")]
    ClueSumMismatch {
        /// `Σ ROWS`.
        row_sum: u32,
        /// `Σ COLS`.
        col_sum: u32,
    },

    /// A `FIXED:` line referenced a piece name outside the closed set of piece names.
    #[error("unrecognized piece name: {0:?}")]
    UnknownPieceName(String),

    /// A `FIXED:` line referenced a `(row, col)` position outside the grid.
    #[error("fixed piece position ({row}, {col}) is out of bounds for a {height}x{width} grid")]
    FixedOutOfBounds {
        /// The offending row.
        row: i32,
        /// The offending column.
        col: i32,
        /// The grid height.
        height: i32,
        /// The grid width.
        width: i32,
    },

    /// A `FIXED:` or structured-form line could not be parsed at all.
    #[error("malformed line: {0:?}")]
    MalformedLine(String),

    /// After construction, the grid did not have exactly two entry/exit candidates.
    #[error("puzzle is not well-formed: found {0} edge cells with exactly one off-grid connection, expected 2")]
    BadEntryExitCount(usize),
}

/// Convenience alias for the parse/construction result type.
pub type Result<T> = std::result::Result<T, TrainTracksError>;
