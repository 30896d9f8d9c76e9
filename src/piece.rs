//! The six track pieces and the directions each connects to.

use serde::{Deserialize, Serialize};
use strum::VariantArray;

use crate::geom::Move;

/// A single cell's contents: either empty, or one of the six track shapes.
///
/// Each non-[`Empty`](PieceType::Empty) variant connects to exactly two of the four
/// cardinal [`Move`]s; see [`PieceType::connections`].
///
/// Serializes as its piece name (§6), the same string `name`/`parse_name` use, so the
/// structured JSON form and the text form agree on vocabulary.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, VariantArray, Serialize, Deserialize)]
pub enum PieceType {
    #[default]
    Empty,
    Horizontal,
    Vertical,
    CornerNE,
    CornerNW,
    CornerSE,
    CornerSW,
}

/// The six placeable (non-[`Empty`](PieceType::Empty)) pieces, in a fixed order used by
/// the backtracker and path builder for deterministic candidate enumeration.
pub const PLACEABLE: [PieceType; 6] = [
    PieceType::Horizontal,
    PieceType::Vertical,
    PieceType::CornerNE,
    PieceType::CornerNW,
    PieceType::CornerSE,
    PieceType::CornerSW,
];

impl PieceType {
    /// The two unit directions this piece connects to, or `[]` for [`PieceType::Empty`].
    #[inline]
    pub fn connections(self) -> &'static [Move] {
        match self {
            PieceType::Empty => &[],
            PieceType::Horizontal => &[Move::LEFT, Move::RIGHT],
            PieceType::Vertical => &[Move::UP, Move::DOWN],
            PieceType::CornerNE => &[Move::UP, Move::RIGHT],
            PieceType::CornerNW => &[Move::UP, Move::LEFT],
            PieceType::CornerSE => &[Move::DOWN, Move::RIGHT],
            PieceType::CornerSW => &[Move::DOWN, Move::LEFT],
        }
    }

    /// Whether this piece connects in direction `dir`.
    #[inline]
    pub fn connects_to(self, dir: Move) -> bool {
        self.connections().contains(&dir)
    }

    /// Returns the non-empty piece whose connection set is exactly `{a, b}`.
    ///
    /// `a` and `b` must be distinct, non-opposite-free cardinal directions drawn from
    /// [`Move::ALL`] that actually correspond to one of the six pieces (this is an
    /// internal helper used only with pairs already known to be valid; a mismatched pair
    /// is a programmer error, not a recoverable one).
    pub fn for_dirs(a: Move, b: Move) -> PieceType {
        PLACEABLE
            .iter()
            .copied()
            .find(|p| {
                let conns = p.connections();
                (conns[0] == a && conns[1] == b) || (conns[0] == b && conns[1] == a)
            })
            .unwrap_or_else(|| panic!("no piece connects {:?} and {:?}", a, b))
    }

    /// The piece name as used by the text puzzle format (§6).
    pub fn name(self) -> &'static str {
        match self {
            PieceType::Empty => "Empty",
            PieceType::Horizontal => "Horizontal",
            PieceType::Vertical => "Vertical",
            PieceType::CornerNE => "CornerNE",
            PieceType::CornerNW => "CornerNW",
            PieceType::CornerSE => "CornerSE",
            PieceType::CornerSW => "CornerSW",
        }
    }

    /// Parses a piece name as used by the text puzzle format (§6), case-insensitively.
    pub fn parse_name(s: &str) -> Option<PieceType> {
        let s = s.trim();
        PieceType::VARIANTS
            .iter()
            .copied()
            .find(|p: &PieceType| p.name().eq_ignore_ascii_case(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connections_have_exactly_two_entries_for_non_empty_pieces() {
        for p in PLACEABLE {
            assert_eq!(p.connections().len(), 2);
        }
        assert!(PieceType::Empty.connections().is_empty());
    }

    #[test]
    fn for_dirs_round_trips_through_connects_to() {
        for p in PLACEABLE {
            let conns = p.connections();
            let reconstructed = PieceType::for_dirs(conns[0], conns[1]);
            assert!(reconstructed.connects_to(conns[0]));
            assert!(reconstructed.connects_to(conns[1]));
        }
    }

    #[test]
    fn straight_and_corner_pairs_map_correctly() {
        assert_eq!(PieceType::for_dirs(Move::LEFT, Move::RIGHT), PieceType::Horizontal);
        assert_eq!(PieceType::for_dirs(Move::RIGHT, Move::LEFT), PieceType::Horizontal);
        assert_eq!(PieceType::for_dirs(Move::UP, Move::DOWN), PieceType::Vertical);
        assert_eq!(PieceType::for_dirs(Move::UP, Move::RIGHT), PieceType::CornerNE);
        assert_eq!(PieceType::for_dirs(Move::DOWN, Move::LEFT), PieceType::CornerSW);
    }

    #[test]
    fn name_round_trips() {
        for p in PLACEABLE.iter().copied().chain([PieceType::Empty]) {
            assert_eq!(PieceType::parse_name(p.name()), Some(p));
        }
        assert_eq!(PieceType::parse_name("empty"), Some(PieceType::Empty));
        assert_eq!(PieceType::parse_name("cornerNE"), Some(PieceType::CornerNE));
        assert_eq!(PieceType::parse_name("bogus"), None);
    }
}
