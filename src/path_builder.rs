//! Path Builder (PB): DFS that grows a single directed chain from `entry`, placing or
//! confirming pieces cell-by-cell along outgoing connections.

use std::collections::HashSet;

use crate::geom::{Move, Point};
use crate::grid::Grid;
use crate::limits::{NullSink, Progress, ProgressSink, SolverLimits};
use crate::piece::{PieceType, PLACEABLE};

/// Solves `grid` in place using the default [`SolverLimits`] and no progress reporting.
///
/// Panics if `grid` has no derived `entry` (a grid must be built through
/// [`Grid::with_fixed`](crate::grid::Grid::with_fixed) or
/// [`Grid::find_entry_exit`](crate::grid::Grid::find_entry_exit) first).
pub fn solve(grid: &mut Grid) -> bool {
    solve_with(grid, SolverLimits::default(), &mut NullSink)
}

/// Solves `grid` in place, reporting progress to `sink` per `limits`.
pub fn solve_with(grid: &mut Grid, limits: SolverLimits, sink: &mut dyn ProgressSink) -> bool {
    let entry = grid.entry().expect("grid has no derived entry point");
    let incoming = grid.off_grid_connection(entry).opposite();
    let fixed_positions = grid.fixed_points();
    let total_fixed_count = fixed_positions.len() as u32;

    let mut progress = Progress::new(limits, sink);
    let mut visited = HashSet::new();
    step(grid, entry, incoming, &mut visited, 0, &fixed_positions, total_fixed_count, &mut progress)
}

#[allow(clippy::too_many_arguments)]
fn step(
    grid: &mut Grid,
    pos: Point,
    incoming: Move,
    visited: &mut HashSet<Point>,
    mut fixed_hit: u32,
    fixed_positions: &[Point],
    total_fixed_count: u32,
    progress: &mut Progress,
) -> bool {
    if !progress.tick(grid) {
        return false;
    }
    if !grid.in_bounds(pos.row, pos.col) || visited.contains(&pos) || visited.len() as u32 >= grid.total_count() {
        return false;
    }

    let existing = grid.get(pos.row, pos.col);
    let back = incoming.opposite();
    if existing != PieceType::Empty {
        if !existing.connects_to(back) {
            return false;
        }
        fixed_hit += 1;
    }

    visited.insert(pos);

    if fixed_hit == total_fixed_count && grid.track_counts_match() && grid.is_single_connected_path() {
        return true;
    }

    let remaining: Vec<Point> = fixed_positions.iter().copied().filter(|p| !visited.contains(p)).collect();

    let candidates: Vec<PieceType> = if existing != PieceType::Empty {
        vec![existing]
    } else {
        PLACEABLE
            .iter()
            .rev()
            .copied()
            .filter(|p| p.connects_to(back) && grid.can_place(pos.row, pos.col, *p))
            .collect()
    };

    for piece in candidates {
        if existing == PieceType::Empty {
            grid.place(pos.row, pos.col, piece);
        }

        let mut outgoing: Vec<Move> = piece.connections().iter().copied().filter(|d| *d != back).collect();
        outgoing.sort_by_key(|d| nearest_distance(pos + *d, &remaining));

        let mut succeeded = false;
        for d in outgoing {
            if step(grid, pos + d, d, visited, fixed_hit, fixed_positions, total_fixed_count, progress) {
                succeeded = true;
                break;
            }
        }

        if succeeded {
            return true;
        }
        if existing == PieceType::Empty {
            grid.remove(pos.row, pos.col);
        }
    }

    visited.remove(&pos);
    false
}

fn nearest_distance(from: Point, remaining: &[Point]) -> u32 {
    remaining.iter().map(|p| from.manhattan(*p)).min().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::FixedPiece;

    fn three_by_three_vertical() -> Grid {
        Grid::with_fixed(
            3,
            3,
            vec![1, 1, 1],
            vec![0, 3, 0],
            &[
                FixedPiece { at: Point::new(0, 1), piece: PieceType::Vertical },
                FixedPiece { at: Point::new(2, 1), piece: PieceType::Vertical },
            ],
        )
        .unwrap()
    }

    #[test]
    fn solves_the_straight_vertical_scenario() {
        let mut grid = three_by_three_vertical();
        assert!(solve(&mut grid));
        assert_eq!(grid.get(1, 1), PieceType::Vertical);
        assert!(grid.track_counts_match());
        assert!(grid.is_single_connected_path());
    }

    #[test]
    fn solves_the_horizontal_line_scenario() {
        let mut row_counts = vec![0; 10];
        row_counts[5] = 10;
        let col_counts = vec![1; 10];
        let mut grid = Grid::with_fixed(
            10,
            10,
            row_counts,
            col_counts,
            &[
                FixedPiece { at: Point::new(5, 0), piece: PieceType::Horizontal },
                FixedPiece { at: Point::new(5, 9), piece: PieceType::Horizontal },
            ],
        )
        .unwrap();
        assert!(solve(&mut grid));
        for c in 0..10 {
            assert_eq!(grid.get(5, c), PieceType::Horizontal);
        }
        for r in 0..10 {
            if r != 5 {
                for c in 0..10 {
                    assert_eq!(grid.get(r, c), PieceType::Empty);
                }
            }
        }
    }

    #[test]
    fn fails_and_restores_state_for_unsolvable_puzzles() {
        let mut grid = Grid::with_fixed(
            3,
            3,
            vec![1, 1, 1],
            vec![1, 1, 1],
            &[
                FixedPiece { at: Point::new(0, 0), piece: PieceType::Horizontal },
                FixedPiece { at: Point::new(2, 2), piece: PieceType::Horizontal },
            ],
        )
        .unwrap();
        let before = grid.clone();
        assert!(!solve(&mut grid));
        assert_eq!(grid, before);
    }
}
