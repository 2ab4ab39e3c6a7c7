//! Player pieces.

use serde::{Deserialize, Serialize};

/// One of the two players' pieces.
///
/// Empty cells are represented as `Option<Piece>::None` on the board, so
/// there is no third state here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Piece {
    One,
    Two,
}

/// Both pieces in mark order.
pub const ALL_PIECES: [Piece; 2] = [Piece::One, Piece::Two];

impl Piece {
    /// Returns the opposing piece.
    pub const fn other(self) -> Piece {
        match self {
            Piece::One => Piece::Two,
            Piece::Two => Piece::One,
        }
    }

    /// Returns the harness mark (1 or 2).
    pub const fn mark(self) -> u8 {
        match self {
            Piece::One => 1,
            Piece::Two => 2,
        }
    }

    /// Parses a harness mark. 0 (empty) and anything above 2 are rejected.
    pub fn from_mark(mark: u8) -> Option<Piece> {
        match mark {
            1 => Some(Piece::One),
            2 => Some(Piece::Two),
            _ => None,
        }
    }

    /// Returns the diagram character for this piece.
    pub const fn diagram_char(self) -> char {
        match self {
            Piece::One => 'x',
            Piece::Two => 'o',
        }
    }

    /// Parses a diagram character (case-insensitive).
    pub fn from_diagram_char(c: char) -> Option<Piece> {
        match c {
            'x' | 'X' => Some(Piece::One),
            'o' | 'O' => Some(Piece::Two),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn other_is_an_involution() {
        for p in ALL_PIECES {
            assert_ne!(p.other(), p);
            assert_eq!(p.other().other(), p);
        }
    }

    #[test]
    fn mark_roundtrip() {
        for p in ALL_PIECES {
            assert_eq!(Piece::from_mark(p.mark()), Some(p));
        }
        assert_eq!(Piece::from_mark(0), None);
        assert_eq!(Piece::from_mark(3), None);
    }

    #[test]
    fn diagram_chars() {
        assert_eq!(Piece::from_diagram_char('X'), Some(Piece::One));
        assert_eq!(Piece::from_diagram_char('o'), Some(Piece::Two));
        assert_eq!(Piece::from_diagram_char('.'), None);
    }
}
