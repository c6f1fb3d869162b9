//! Value types shared between agents and the rules collaborator.
//!
//! These mirror just enough of a chess library's vocabulary for rendering
//! and messaging: colors, pieces, squares and UCI moves.

use std::fmt;
use std::str::FromStr;

use super::GameError;

/// Side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// White.
    White,
    /// Black.
    Black,
}

impl Color {
    /// The other side.
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }
}

/// Piece kind without color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// Pawn.
    Pawn,
    /// Knight.
    Knight,
    /// Bishop.
    Bishop,
    /// Rook.
    Rook,
    /// Queen.
    Queen,
    /// King.
    King,
}

impl PieceKind {
    const ALL: [Self; 6] = [
        Self::Pawn,
        Self::Knight,
        Self::Bishop,
        Self::Rook,
        Self::Queen,
        Self::King,
    ];

    /// Lowercase ascii letter (`p`, `n`, `b`, `r`, `q`, `k`).
    pub const fn letter(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    /// Parse a piece letter, either case.
    pub fn from_letter(c: char) -> Option<Self> {
        let lower = c.to_ascii_lowercase();
        Self::ALL.into_iter().find(|kind| kind.letter() == lower)
    }

    const fn index(self) -> usize {
        match self {
            Self::Pawn => 0,
            Self::Knight => 1,
            Self::Bishop => 2,
            Self::Rook => 3,
            Self::Queen => 4,
            Self::King => 5,
        }
    }
}

const WHITE_FIGURES: [char; 6] = ['♙', '♘', '♗', '♖', '♕', '♔'];
const BLACK_FIGURES: [char; 6] = ['♟', '♞', '♝', '♜', '♛', '♚'];

/// A colored piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Piece kind.
    pub kind: PieceKind,
    /// Owner.
    pub color: Color,
}

impl Piece {
    /// Create a new piece.
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN letter: uppercase for White, lowercase for Black.
    pub const fn symbol(self) -> char {
        let c = self.kind.letter();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Unicode chess figure.
    ///
    /// With `invert_color` the figure of the opposite color is returned,
    /// which reads better on dark terminal backgrounds.
    pub const fn unicode_symbol(self, invert_color: bool) -> char {
        let color = if invert_color {
            self.color.opposite()
        } else {
            self.color
        };
        match color {
            Color::White => WHITE_FIGURES[self.kind.index()],
            Color::Black => BLACK_FIGURES[self.kind.index()],
        }
    }

    /// Parse a FEN piece letter.
    pub fn from_symbol(c: char) -> Option<Self> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self::new(kind, color))
    }
}

const FILE_NAMES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// A board square, `a1 = 0` through `h8 = 63`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Square from file (0 = a) and rank (0 = first rank).
    ///
    /// Returns `None` when either coordinate is off the board.
    pub const fn new(file: u8, rank: u8) -> Option<Self> {
        if file < 8 && rank < 8 {
            Some(Self(rank * 8 + file))
        } else {
            None
        }
    }

    /// Square from its 0..64 index.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Self(index))
        } else {
            None
        }
    }

    /// Iterate all 64 squares, a1 first.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..64).map(Self)
    }

    /// 0..64 index.
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// File, 0 = a.
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Rank, 0 = first rank.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", FILE_NAMES[self.file() as usize], self.rank() + 1)
    }
}

impl FromStr for Square {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return Err(GameError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        Self::new(file, rank).ok_or_else(|| GameError::InvalidSquare(s.to_string()))
    }
}

/// A move in from/to/promotion form, printed as UCI (`e2e4`, `e7e8q`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    /// Origin square.
    pub from: Square,
    /// Destination square.
    pub to: Square,
    /// Promotion piece, if any.
    pub promotion: Option<PieceKind>,
}

impl Move {
    /// Create a non-promoting move.
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Builder-style promotion.
    #[must_use]
    pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    /// UCI notation.
    pub fn uci(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || GameError::InvalidMove(s.to_string());
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(invalid());
        }
        let from: Square = s[0..2].parse().map_err(|_| invalid())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid())?;
        let promotion = match s[4..].chars().next() {
            None => None,
            Some(c) => match PieceKind::from_letter(c) {
                Some(kind) if !matches!(kind, PieceKind::Pawn | PieceKind::King) => Some(kind),
                _ => return Err(invalid()),
            },
        };
        Ok(Self {
            from,
            to,
            promotion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_square_names() {
        assert_eq!(Square::new(0, 0).unwrap().to_string(), "a1");
        assert_eq!(Square::new(7, 7).unwrap().to_string(), "h8");
        assert_eq!("e4".parse::<Square>().unwrap(), Square::new(4, 3).unwrap());
        assert!("i9".parse::<Square>().is_err());
        assert!(Square::new(8, 0).is_none());
    }

    #[test]
    fn test_move_uci() {
        let mv: Move = "e7e8q".parse().unwrap();
        assert_eq!(mv.promotion, Some(PieceKind::Queen));
        assert_eq!(mv.uci(), "e7e8q");
        assert!("e2".parse::<Move>().is_err());
        assert!("e7e8k".parse::<Move>().is_err());
    }

    #[test]
    fn test_piece_symbols() {
        let knight = Piece::new(PieceKind::Knight, Color::White);
        assert_eq!(knight.symbol(), 'N');
        assert_eq!(knight.unicode_symbol(false), '♘');
        assert_eq!(knight.unicode_symbol(true), '♞');
        assert_eq!(Piece::from_symbol('q'), Some(Piece::new(PieceKind::Queen, Color::Black)));
        assert_eq!(Piece::from_symbol('x'), None);
    }
}
