//! A\* Path Solver (AS): best-first search over `(grid, pos, incoming, visited, fixedHit, g)`
//! states, each owning its own cloned [`Grid`].

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::hash::{Hash, Hasher};

use crate::geom::{Move, Point};
use crate::grid::Grid;
use crate::limits::{NullSink, Progress, ProgressSink, SolverLimits};
use crate::piece::{PieceType, PLACEABLE};

/// A signature used to prune duplicate states: position, incoming direction, fixed-hit
/// count, and a stable hash over the sorted visited set (see `signature` below).
type Signature = (Point, Move, u32, u64);

struct State {
    grid: Grid,
    pos: Point,
    incoming: Move,
    visited: HashSet<Point>,
    fixed_hit: u32,
    g: u32,
}

struct QueueEntry {
    f: u32,
    state: State,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    // Reversed so `BinaryHeap` (a max-heap) behaves as a min-heap over `f`.
    fn cmp(&self, other: &Self) -> Ordering {
        other.f.cmp(&self.f)
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Solves `grid` in place using the default [`SolverLimits`] and no progress reporting.
///
/// Panics if `grid` has no derived `entry`/`exit`.
pub fn solve(grid: &mut Grid) -> bool {
    solve_with(grid, SolverLimits::default(), &mut NullSink)
}

/// Solves `grid` in place, reporting progress to `sink` per `limits`. On success `grid` is
/// overwritten with the winning state's board; on failure it is left untouched.
pub fn solve_with(grid: &mut Grid, limits: SolverLimits, sink: &mut dyn ProgressSink) -> bool {
    let entry = grid.entry().expect("grid has no derived entry point");
    let exit = grid.exit().expect("grid has no derived exit point");
    let off = grid.off_grid_connection(entry);
    let fixed_positions = grid.fixed_points();
    let total_fixed_count = fixed_positions.len() as u32;

    let mut visited = HashSet::new();
    visited.insert(entry);
    let start = State {
        grid: grid.clone(),
        pos: entry,
        incoming: off.opposite(),
        visited,
        fixed_hit: 1,
        g: 0,
    };

    let mut progress = Progress::new(limits, sink);
    let mut open = BinaryHeap::new();
    let mut best_g: HashMap<Signature, u32> = HashMap::new();

    best_g.insert(signature(&start), start.g);
    let h = heuristic(&start, &fixed_positions, exit);
    open.push(QueueEntry { f: start.g + h, state: start });

    while let Some(QueueEntry { state, .. }) = open.pop() {
        // A better path to this signature may have been queued after this entry; skip the
        // now-stale copy rather than re-expanding it.
        if matches!(best_g.get(&signature(&state)), Some(&best) if state.g > best) {
            continue;
        }

        if !progress.tick(&state.grid) {
            return false;
        }

        if state.fixed_hit == total_fixed_count
            && state.grid.on_edge(state.pos.row, state.pos.col)
            && state.grid.track_counts_match()
        {
            state.grid.copy_into(grid);
            return true;
        }

        for next in expand(&state) {
            if !next.grid.can_still_satisfy() || !can_reach_all_fixed(&next, &fixed_positions) {
                continue;
            }
            let sig = signature(&next);
            let is_improvement = match best_g.get(&sig) {
                Some(&best) => next.g < best,
                None => true,
            };
            if !is_improvement {
                continue;
            }
            best_g.insert(sig, next.g);
            let h = heuristic(&next, &fixed_positions, exit);
            open.push(QueueEntry { f: next.g + h, state: next });
        }
    }

    false
}

fn signature(state: &State) -> Signature {
    let mut sorted: Vec<Point> = state.visited.iter().copied().collect();
    sorted.sort();
    let mut hasher = DefaultHasher::new();
    sorted.hash(&mut hasher);
    (state.pos, state.incoming, state.fixed_hit, hasher.finish())
}

fn expand(state: &State) -> Vec<State> {
    let existing = state.grid.get(state.pos.row, state.pos.col);
    let candidates: Vec<PieceType> = if existing != PieceType::Empty {
        vec![existing]
    } else {
        PLACEABLE
            .iter()
            .copied()
            .filter(|p| state.grid.can_place(state.pos.row, state.pos.col, *p))
            .collect()
    };

    let back = state.incoming.opposite();
    let mut out = Vec::new();
    for p in candidates {
        let mut clone = state.grid.clone();
        if existing == PieceType::Empty {
            clone.place(state.pos.row, state.pos.col, p);
        }

        let mut visited_next = state.visited.clone();
        visited_next.insert(state.pos);

        for d in p.connections().iter().copied().filter(|d| *d != back) {
            let next = state.pos + d;
            if !clone.in_bounds(next.row, next.col) || visited_next.contains(&next) {
                continue;
            }
            let next_piece = clone.get(next.row, next.col);
            let fixed_hit = state.fixed_hit + u32::from(next_piece != PieceType::Empty);
            out.push(State {
                grid: clone.clone(),
                pos: next,
                incoming: d,
                visited: visited_next.clone(),
                fixed_hit,
                g: state.g + 1,
            });
        }
    }
    out
}

/// BFS from `state.pos` over the whole grid (no obstacles) verifying every not-yet-visited
/// fixed position is reachable. A cheap lower-bound check, not a geometric proof.
fn can_reach_all_fixed(state: &State, fixed_positions: &[Point]) -> bool {
    let remaining: Vec<Point> = fixed_positions.iter().copied().filter(|p| !state.visited.contains(p)).collect();
    if remaining.is_empty() {
        return true;
    }

    let rows = state.grid.rows();
    let cols = state.grid.cols();
    let idx = |p: Point| (p.row * cols + p.col) as usize;

    let mut seen = vec![false; (rows * cols) as usize];
    let mut queue = VecDeque::new();
    seen[idx(state.pos)] = true;
    queue.push_back(state.pos);
    while let Some(p) = queue.pop_front() {
        for d in Move::ALL {
            let n = p + d;
            if state.grid.in_bounds(n.row, n.col) && !seen[idx(n)] {
                seen[idx(n)] = true;
                queue.push_back(n);
            }
        }
    }

    remaining.iter().all(|p| seen[idx(*p)])
}

fn heuristic(state: &State, fixed_positions: &[Point], exit: Point) -> u32 {
    let remaining: Vec<Point> = fixed_positions.iter().copied().filter(|p| !state.visited.contains(p)).collect();

    let mst = if remaining.is_empty() { 0 } else { mst_cost(&remaining, state.pos) };
    let exit_dist = if remaining.is_empty() {
        state.pos.manhattan(exit)
    } else {
        remaining.iter().map(|p| p.manhattan(exit)).min().unwrap()
    };
    let mismatch = mismatch_cost(&state.grid);

    mst + exit_dist + mismatch
}

/// Greedy nearest-in-tree (Prim-style) MST cost over `remaining ∪ {from}` under Manhattan
/// distance.
fn mst_cost(remaining: &[Point], from: Point) -> u32 {
    let mut nodes = remaining.to_vec();
    nodes.push(from);
    if nodes.len() <= 1 {
        return 0;
    }

    let mut in_tree = vec![false; nodes.len()];
    let mut best_dist: Vec<u32> = nodes.iter().map(|p| nodes[0].manhattan(*p)).collect();
    in_tree[0] = true;

    let mut total = 0;
    for _ in 1..nodes.len() {
        let (next, dist) = best_dist
            .iter()
            .enumerate()
            .filter(|(i, _)| !in_tree[*i])
            .min_by_key(|(_, &d)| d)
            .map(|(i, &d)| (i, d))
            .expect("at least one node remains outside the tree");
        in_tree[next] = true;
        total += dist;
        for (i, slot) in best_dist.iter_mut().enumerate() {
            if !in_tree[i] {
                *slot = (*slot).min(nodes[next].manhattan(nodes[i]));
            }
        }
    }
    total
}

fn mismatch_cost(grid: &Grid) -> u32 {
    let mut total: i64 = 0;
    for r in 0..grid.rows() {
        total += (grid.row_count(r) as i64 - grid.track_count_in_row(r) as i64).abs();
    }
    for c in 0..grid.cols() {
        total += (grid.col_count(c) as i64 - grid.track_count_in_col(c) as i64).abs();
    }
    total as u32
}
