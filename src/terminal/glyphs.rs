//! Glyph tables for board and move rendering.

use bitflags::bitflags;

use crate::chess::Piece;

/// Character set used for pieces and move annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GlyphMode {
    /// Unicode chess figures.
    #[default]
    Unicode,
    /// FEN letters.
    Ascii,
}

bitflags! {
    /// Annotations on a rendered half-move.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MoveFlags: u8 {
        /// A piece was taken.
        const CAPTURE = 0b0001;
        /// The move gives check.
        const CHECK = 0b0010;
        /// The move gives mate.
        const MATE = 0b0100;
        /// A pawn promoted.
        const PROMOTION = 0b1000;
    }
}

/// Separator and marker strings for one glyph mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSymbols {
    /// Between squares of a quiet move.
    pub quiet: &'static str,
    /// Between squares of a capture.
    pub capture: &'static str,
    /// After a checking move.
    pub check: &'static str,
    /// After a mating move.
    pub mate: &'static str,
}

const UNICODE_SYMBOLS: MoveSymbols = MoveSymbols {
    quiet: "-",
    capture: "×",
    check: "+",
    mate: "#",
};

const ASCII_SYMBOLS: MoveSymbols = MoveSymbols {
    quiet: "-",
    capture: "x",
    check: "+",
    mate: "#",
};

impl MoveSymbols {
    /// Separator between origin and destination.
    pub const fn separator(&self, flags: MoveFlags) -> &'static str {
        if flags.contains(MoveFlags::CAPTURE) {
            self.capture
        } else {
            self.quiet
        }
    }

    /// Trailing check or mate marker, possibly empty.
    pub const fn marker(&self, flags: MoveFlags) -> &'static str {
        if flags.contains(MoveFlags::MATE) {
            self.mate
        } else if flags.contains(MoveFlags::CHECK) {
            self.check
        } else {
            ""
        }
    }
}

impl GlyphMode {
    /// Pick a mode from the unicode preference flag.
    pub const fn from_unicode(unicode: bool) -> Self {
        if unicode {
            Self::Unicode
        } else {
            Self::Ascii
        }
    }

    /// Annotation symbols for this mode.
    pub const fn symbols(self) -> &'static MoveSymbols {
        match self {
            Self::Unicode => &UNICODE_SYMBOLS,
            Self::Ascii => &ASCII_SYMBOLS,
        }
    }

    /// Glyph for a piece. `invert_color` only affects unicode figures.
    pub const fn piece(self, piece: Piece, invert_color: bool) -> char {
        match self {
            Self::Unicode => piece.unicode_symbol(invert_color),
            Self::Ascii => piece.symbol(),
        }
    }
}
