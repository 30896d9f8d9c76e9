//! Puzzle input: the text format and the structured (serde) form from §6, and the
//! translation of either into a constructed [`Grid`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrainTracksError};
use crate::geom::Point;
use crate::grid::{FixedPiece, Grid};
use crate::piece::PieceType;

/// The external puzzle shape: dimensions, row/column clues, and the (mostly-[`Empty`]
/// (PieceType::Empty)) starting grid of fixed pieces, indexed row-major.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Puzzle {
    /// The board width (number of columns).
    #[serde(rename = "gridWidth")]
    pub grid_width: i32,
    /// The board height (number of rows).
    #[serde(rename = "gridHeight")]
    pub grid_height: i32,
    /// Row (horizontal) piece counts, length `grid_height`.
    #[serde(rename = "horizontalClues")]
    pub horizontal_clues: Vec<u32>,
    /// Column (vertical) piece counts, length `grid_width`.
    #[serde(rename = "verticalClues")]
    pub vertical_clues: Vec<u32>,
    /// The starting board, indexed row-major; mostly [`PieceType::Empty`] apart from
    /// the fixed clue pieces.
    #[serde(rename = "startingGrid")]
    pub starting_grid: Vec<PieceType>,
}

impl Puzzle {
    /// Builds an all-[`Empty`](PieceType::Empty) puzzle with the given dimensions and clues.
    pub fn new(grid_width: i32, grid_height: i32, horizontal_clues: Vec<u32>, vertical_clues: Vec<u32>) -> Puzzle {
        let starting_grid = vec![PieceType::Empty; (grid_width * grid_height) as usize];
        Puzzle {
            grid_width,
            grid_height,
            horizontal_clues,
            vertical_clues,
            starting_grid,
        }
    }

    #[inline]
    fn index(&self, r: i32, c: i32) -> usize {
        (r * self.grid_width + c) as usize
    }

    /// The starting piece at `(r, c)`.
    pub fn piece_at(&self, r: i32, c: i32) -> PieceType {
        self.starting_grid[self.index(r, c)]
    }

    /// Sets the starting piece at `(r, c)`.
    pub fn set_piece(&mut self, r: i32, c: i32, piece: PieceType) {
        let idx = self.index(r, c);
        self.starting_grid[idx] = piece;
    }

    /// The non-[`Empty`](PieceType::Empty) starting pieces, in row-major order.
    pub fn fixed_pieces(&self) -> Vec<FixedPiece> {
        let mut out = Vec::new();
        for r in 0..self.grid_height {
            for c in 0..self.grid_width {
                let piece = self.piece_at(r, c);
                if piece != PieceType::Empty {
                    out.push(FixedPiece { at: Point::new(r, c), piece });
                }
            }
        }
        out
    }

    /// Builds the [`Grid`] this puzzle describes: validates the clue sums, places the
    /// fixed pieces, and derives `entry`/`exit`.
    pub fn build_grid(&self) -> Result<Grid> {
        Grid::with_fixed(
            self.grid_height,
            self.grid_width,
            self.horizontal_clues.clone(),
            self.vertical_clues.clone(),
            &self.fixed_pieces(),
        )
    }
}

impl FromStr for Puzzle {
    type Err = TrainTracksError;

    fn from_str(s: &str) -> Result<Puzzle> {
        let mut rows = None;
        let mut cols = None;
        let mut fixed = Vec::new();
        let mut in_fixed = false;
        let mut saw_any_line = false;

        for raw_line in s.lines() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }
            saw_any_line = true;

            if let Some(rest) = line.strip_prefix("ROWS:") {
                rows = Some(parse_clue_line(rest)?);
            } else if let Some(rest) = line.strip_prefix("COLS:") {
                cols = Some(parse_clue_line(rest)?);
            } else if line.eq_ignore_ascii_case("FIXED:") {
                in_fixed = true;
            } else if in_fixed {
                fixed.push(parse_fixed_line(line)?);
            } else {
                return Err(TrainTracksError::MalformedLine(line.to_string()));
            }
        }

        if !saw_any_line {
            return Err(TrainTracksError::Empty);
        }

        let horizontal_clues: Vec<u32> = rows.ok_or(TrainTracksError::MissingRows)?;
        let vertical_clues: Vec<u32> = cols.ok_or(TrainTracksError::MissingCols)?;
        let grid_height = horizontal_clues.len() as i32;
        let grid_width = vertical_clues.len() as i32;

        let mut puzzle = Puzzle::new(grid_width, grid_height, horizontal_clues, vertical_clues);
        for (r, c, piece) in fixed {
            if !(0 <= r && r < grid_height && 0 <= c && c < grid_width) {
                return Err(TrainTracksError::FixedOutOfBounds {
                    row: r,
                    col: c,
                    height: grid_height,
                    width: grid_width,
                });
            }
            puzzle.set_piece(r, c, piece);
        }

        Ok(puzzle)
    }
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ROWS: {}", join_clues(&self.horizontal_clues))?;
        writeln!(f, "COLS: {}", join_clues(&self.vertical_clues))?;

        let fixed = self.fixed_pieces();
        if fixed.is_empty() {
            return Ok(());
        }
        writeln!(f, "FIXED:")?;
        for fp in fixed {
            writeln!(f, "{},{}: {}", fp.at.row, fp.at.col, fp.piece.name())?;
        }
        Ok(())
    }
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(idx) => &line[..idx],
        None => line,
    }
}

fn parse_clue_line(rest: &str) -> Result<Vec<u32>> {
    rest.split_whitespace()
        .map(|tok| tok.parse::<u32>().map_err(|_| TrainTracksError::InvalidClueCount(tok.to_string())))
        .collect()
}

fn parse_fixed_line(line: &str) -> Result<(i32, i32, PieceType)> {
    let malformed = || TrainTracksError::MalformedLine(line.to_string());
    let (coord, name) = line.split_once(':').ok_or_else(malformed)?;
    let (r_str, c_str) = coord.split_once(',').ok_or_else(malformed)?;
    let r: i32 = r_str.trim().parse().map_err(|_| malformed())?;
    let c: i32 = c_str.trim().parse().map_err(|_| malformed())?;
    let piece = PieceType::parse_name(name.trim())
        .ok_or_else(|| TrainTracksError::UnknownPieceName(name.trim().to_string()))?;
    Ok((r, c, piece))
}

#[cfg(test)]
mod tests {
    use super::*;

    const THREE_BY_THREE: &str = "\
        ROWS: 1 1 1\n\
        COLS: 0 3 0\n\
        FIXED:\n\
        0,1: Vertical\n\
        2,1: Vertical\n\
    ";

    #[test]
    fn parses_text_form() {
        let puzzle: Puzzle = THREE_BY_THREE.parse().unwrap();
        assert_eq!(puzzle.grid_height, 3);
        assert_eq!(puzzle.grid_width, 3);
        assert_eq!(puzzle.horizontal_clues, vec![1, 1, 1]);
        assert_eq!(puzzle.vertical_clues, vec![0, 3, 0]);
        assert_eq!(puzzle.piece_at(0, 1), PieceType::Vertical);
        assert_eq!(puzzle.piece_at(2, 1), PieceType::Vertical);
        assert_eq!(puzzle.piece_at(1, 1), PieceType::Empty);
    }

    #[test]
    fn ignores_comments_and_blank_lines() {
        let text = "# a comment\n\nROWS: 1\nCOLS: 1\n\n# another\n";
        let puzzle: Puzzle = text.parse().unwrap();
        assert_eq!(puzzle.horizontal_clues, vec![1]);
        assert_eq!(puzzle.vertical_clues, vec![1]);
    }

    #[test]
    fn display_then_parse_round_trips() {
        let puzzle: Puzzle = THREE_BY_THREE.parse().unwrap();
        let rendered = puzzle.to_string();
        let reparsed: Puzzle = rendered.parse().unwrap();
        assert_eq!(puzzle, reparsed);
    }

    #[test]
    fn structured_form_round_trips_through_json() {
        let puzzle: Puzzle = THREE_BY_THREE.parse().unwrap();
        let json = serde_json::to_string(&puzzle).unwrap();
        let reparsed: Puzzle = serde_json::from_str(&json).unwrap();
        assert_eq!(puzzle, reparsed);
    }

    #[test]
    fn missing_rows_is_an_error() {
        let err = "COLS: 1 1".parse::<Puzzle>().unwrap_err();
        assert_eq!(err, TrainTracksError::MissingRows);
    }

    #[test]
    fn missing_cols_is_an_error() {
        let err = "ROWS: 1 1".parse::<Puzzle>().unwrap_err();
        assert_eq!(err, TrainTracksError::MissingCols);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = "   \n# nothing but comments\n".parse::<Puzzle>().unwrap_err();
        assert_eq!(err, TrainTracksError::Empty);
    }

    #[test]
    fn unknown_piece_name_is_an_error() {
        let text = "ROWS: 1\nCOLS: 1\nFIXED:\n0,0: Diagonal\n";
        let err = text.parse::<Puzzle>().unwrap_err();
        assert_eq!(err, TrainTracksError::UnknownPieceName("Diagonal".to_string()));
    }

    #[test]
    fn fixed_out_of_bounds_is_an_error() {
        let text = "ROWS: 1\nCOLS: 1\nFIXED:\n0,5: Horizontal\n";
        let err = text.parse::<Puzzle>().unwrap_err();
        assert_eq!(
            err,
            TrainTracksError::FixedOutOfBounds { row: 0, col: 5, height: 1, width: 1 }
        );
    }

    #[test]
    fn build_grid_derives_entry_and_exit() {
        let puzzle: Puzzle = THREE_BY_THREE.parse().unwrap();
        let grid = puzzle.build_grid().unwrap();
        assert_eq!(grid.entry(), Some(Point::new(0, 1)));
        assert_eq!(grid.exit(), Some(Point::new(2, 1)));
    }
}
