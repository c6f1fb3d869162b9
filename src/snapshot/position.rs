//! Device-agnostic board snapshots.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::chess::{Piece, Square};

/// FEN placement field could not be read.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    /// The placement field is missing.
    #[error("empty FEN")]
    Empty,

    /// A rank describes more or fewer than 8 squares, or there are not 8 ranks.
    #[error("malformed placement field: {0}")]
    Malformed(String),

    /// Unknown piece letter.
    #[error("unknown piece symbol {0:?}")]
    UnknownPiece(char),
}

/// Occupancy of all 64 squares, a1 first.
///
/// Built only from the placement field of a FEN, so two exports that agree
/// on piece placement give equal snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardSnapshot {
    squares: [Option<Piece>; 64],
}

impl BoardSnapshot {
    /// An empty board.
    pub const fn empty() -> Self {
        Self { squares: [None; 64] }
    }

    /// Parse the placement field of a FEN export.
    pub fn from_fen(fen: &str) -> Result<Self, SnapshotError> {
        let placement = fen.split_whitespace().next().ok_or(SnapshotError::Empty)?;
        let malformed = || SnapshotError::Malformed(placement.to_string());

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(malformed());
        }

        let mut snapshot = Self::empty();
        for (row, rank_text) in ranks.iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let rank = 7 - row as u8;
            let mut file: u8 = 0;
            for c in rank_text.chars() {
                if let Some(skip) = c.to_digit(10) {
                    #[allow(clippy::cast_possible_truncation)]
                    let skip = skip as u8;
                    if skip == 0 || skip > 8 {
                        return Err(malformed());
                    }
                    file += skip;
                } else {
                    let piece = Piece::from_symbol(c).ok_or(SnapshotError::UnknownPiece(c))?;
                    let square = Square::new(file, rank).ok_or_else(malformed)?;
                    snapshot.squares[square.index() as usize] = Some(piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(malformed());
                }
            }
            if file != 8 {
                return Err(malformed());
            }
        }
        Ok(snapshot)
    }

    /// Piece on a square.
    #[inline]
    pub const fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index() as usize]
    }

    /// Number of occupied squares.
    pub fn piece_count(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }

    /// Squares whose contents differ between two snapshots.
    pub fn diff(&self, other: &Self) -> Vec<Square> {
        Square::all()
            .filter(|&sq| self.piece_at(sq) != other.piece_at(sq))
            .collect()
    }
}

impl Default for BoardSnapshot {
    fn default() -> Self {
        Self::empty()
    }
}

impl FromStr for BoardSnapshot {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_fen(s)
    }
}

impl fmt::Display for BoardSnapshot {
    /// Writes the placement field back out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(piece) => {
                        if empty > 0 {
                            write!(f, "{empty}")?;
                            empty = 0;
                        }
                        write!(f, "{}", piece.symbol())?;
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                write!(f, "{empty}")?;
            }
            if rank > 0 {
                f.write_str("/")?;
            }
        }
        Ok(())
    }
}

/// Snapshot a position from its FEN export.
pub fn snapshot(fen: &str) -> Result<BoardSnapshot, SnapshotError> {
    BoardSnapshot::from_fen(fen)
}
