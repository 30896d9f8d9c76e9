#![warn(missing_docs)]

//! # `railtrace`
//!
//! A solver for the "Train Tracks" logic puzzle: complete a single continuous train track
//! from one edge entry to another edge exit, satisfying per-row and per-column piece
//! counts and any pre-placed clue pieces.
//!
//! Start from a [`Puzzle`](puzzle::Puzzle), either parsed from its text form (`ROWS:`/
//! `COLS:`/`FIXED:` lines) or deserialized from its structured JSON form, and call
//! [`Puzzle::build_grid`](puzzle::Puzzle::build_grid) to get a [`Grid`](grid::Grid). Hand
//! that grid to one of the three solvers:
//!
//! - [`backtracker::solve`] — a constrained backtracker (DFS with minimum-remaining-values
//!   cell selection).
//! - [`path_builder::solve`] — a path builder that grows a single chain from the entry.
//! - [`astar::solve`] — a best-first search over partial-path states.
//!
//! All three mutate (or, for the A\* solver, eventually overwrite) the `Grid` they are
//! given and return whether a solution was found.
//!
//! # Internals
//!
//! The three solvers share the same [`grid::Grid`] model and [`piece::PieceType`]
//! connection table; they differ only in how they decide which cell to fill next and how
//! they explore alternatives. The backtracker and path builder mutate one grid in place and
//! undo placements on backtrack; the A\* solver keeps one cloned grid per open search state,
//! trading memory for the ability to compare states out of order.

pub mod astar;
pub mod backtracker;
pub mod error;
pub mod geom;
pub mod grid;
pub mod limits;
pub mod path_builder;
pub mod piece;
pub mod puzzle;

pub use error::{Result, TrainTracksError};
pub use grid::{FixedPiece, Grid};
pub use limits::{NullSink, ProgressSink, SolverLimits};
pub use piece::PieceType;
pub use puzzle::Puzzle;
