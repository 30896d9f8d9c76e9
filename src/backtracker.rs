//! Constrained Backtracker (CB): DFS that repeatedly branches on the empty cell with the
//! fewest legal pieces.

use crate::geom::{Move, Point};
use crate::grid::Grid;
use crate::limits::{NullSink, Progress, ProgressSink, SolverLimits};

/// Solves `grid` in place using the default [`SolverLimits`] and no progress reporting.
/// Returns whether a solution was found; on failure `grid` is restored to its initial state.
pub fn solve(grid: &mut Grid) -> bool {
    solve_with(grid, SolverLimits::default(), &mut NullSink)
}

/// Solves `grid` in place, reporting progress to `sink` per `limits`.
pub fn solve_with(grid: &mut Grid, limits: SolverLimits, sink: &mut dyn ProgressSink) -> bool {
    let mut progress = Progress::new(limits, sink);
    step(grid, &mut progress)
}

fn step(grid: &mut Grid, progress: &mut Progress) -> bool {
    if !progress.tick(grid) {
        return false;
    }
    if !grid.can_still_satisfy() {
        return false;
    }
    if grid.track_counts_match() && grid.is_single_connected_path() {
        return true;
    }

    let candidates = candidate_cells(grid);
    let Some((r, c, legal)) = select_cell(grid, &candidates) else {
        return false;
    };

    log::trace!("CB branching at ({r}, {c}) with {} options", legal.len());
    for piece in legal {
        grid.place(r, c, piece);
        if step(grid, progress) {
            return true;
        }
        grid.remove(r, c);
    }
    false
}

/// The empty cells that are 4-neighbours of some non-empty cell, or (if none) all empty
/// cells, in row-major scan order.
fn candidate_cells(grid: &Grid) -> Vec<Point> {
    let mut touching = Vec::new();
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if grid.is_empty(r, c) && has_filled_neighbour(grid, r, c) {
                touching.push(Point::new(r, c));
            }
        }
    }
    if !touching.is_empty() {
        return touching;
    }

    let mut all = Vec::new();
    for r in 0..grid.rows() {
        for c in 0..grid.cols() {
            if grid.is_empty(r, c) {
                all.push(Point::new(r, c));
            }
        }
    }
    all
}

fn has_filled_neighbour(grid: &Grid, r: i32, c: i32) -> bool {
    Move::ALL.iter().any(|d| {
        let (nr, nc) = (r + d.dr, c + d.dc);
        grid.in_bounds(nr, nc) && grid.is_filled(nr, nc)
    })
}

/// The candidate cell with the smallest positive legal-piece count, ties broken by scan
/// order. `None` if every candidate has zero legal pieces.
fn select_cell(grid: &Grid, candidates: &[Point]) -> Option<(i32, i32, Vec<crate::piece::PieceType>)> {
    let mut best: Option<(Point, Vec<crate::piece::PieceType>)> = None;
    for &p in candidates {
        let legal = grid.legal_pieces(p.row, p.col);
        if legal.is_empty() {
            continue;
        }
        match &best {
            Some((_, best_legal)) if best_legal.len() <= legal.len() => {}
            _ => best = Some((p, legal)),
        }
    }
    best.map(|(p, legal)| (p.row, p.col, legal))
}
