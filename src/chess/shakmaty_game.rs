//! [`ChessGame`] backed by shakmaty.

use shakmaty::{
    fen::Fen, uci::UciMove as ShakmatyUciMove, CastlingMode, Chess, EnPassantMode, Position, Role,
};

use super::{ChessGame, Color, GameError, Move, Piece, PieceKind, Square};

/// A shakmaty position plus the move stack that produced it.
///
/// Shakmaty positions are immutable values, so `pop` restores the position
/// saved before the matching `push`.
#[derive(Debug, Clone)]
pub struct ShakmatyGame {
    position: Chess,
    moves: Vec<Move>,
    previous: Vec<Chess>,
}

impl ShakmatyGame {
    /// Standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Position from a FEN string, with an empty move stack.
    pub fn from_fen(fen: &str) -> Result<Self, GameError> {
        let fen: Fen = fen
            .parse()
            .map_err(|e| GameError::InvalidFen(format!("{e}")))?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| GameError::InvalidFen(format!("{e}")))?;
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Self {
        Self {
            position,
            moves: Vec::new(),
            previous: Vec::new(),
        }
    }

    /// Parse and play a UCI move.
    pub fn push_uci(&mut self, uci: &str) -> Result<(), GameError> {
        self.push(uci.parse()?)
    }

    /// Play a sequence of UCI moves, stopping at the first failure.
    pub fn push_all<'a>(
        &mut self,
        moves: impl IntoIterator<Item = &'a str>,
    ) -> Result<(), GameError> {
        for uci in moves {
            self.push_uci(uci)?;
        }
        Ok(())
    }

    /// All legal moves in the current position.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        self.position
            .legal_moves()
            .iter()
            .filter_map(|m| match ShakmatyUciMove::from_move(m, CastlingMode::Standard) {
                ShakmatyUciMove::Normal {
                    from,
                    to,
                    promotion,
                } => {
                    let mv = Move::new(from_square(from)?, from_square(to)?);
                    Some(promotion.map_or(mv, |role| mv.with_promotion(from_role(role))))
                }
                _ => None,
            })
            .collect()
    }

    /// Parse one of our moves into a legal shakmaty move.
    fn to_shakmaty(&self, mv: Move) -> Result<shakmaty::Move, GameError> {
        let uci: ShakmatyUciMove = mv
            .uci()
            .parse()
            .map_err(|_| GameError::InvalidMove(mv.uci()))?;
        let m = uci
            .to_move(&self.position)
            .map_err(|_| GameError::IllegalMove(mv.uci()))?;
        if self.position.is_legal(&m) {
            Ok(m)
        } else {
            Err(GameError::IllegalMove(mv.uci()))
        }
    }
}

impl Default for ShakmatyGame {
    fn default() -> Self {
        Self::new()
    }
}

const fn from_role(role: Role) -> PieceKind {
    match role {
        Role::Pawn => PieceKind::Pawn,
        Role::Knight => PieceKind::Knight,
        Role::Bishop => PieceKind::Bishop,
        Role::Rook => PieceKind::Rook,
        Role::Queen => PieceKind::Queen,
        Role::King => PieceKind::King,
    }
}

fn from_square(square: shakmaty::Square) -> Option<Square> {
    u8::try_from(u32::from(square))
        .ok()
        .and_then(Square::from_index)
}

const fn from_color(color: shakmaty::Color) -> Color {
    match color {
        shakmaty::Color::White => Color::White,
        shakmaty::Color::Black => Color::Black,
    }
}

impl ChessGame for ShakmatyGame {
    fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    fn turn(&self) -> Color {
        from_color(self.position.turn())
    }

    fn fullmove_number(&self) -> u32 {
        self.position.fullmoves().get()
    }

    fn is_check(&self) -> bool {
        self.position.is_check()
    }

    fn is_checkmate(&self) -> bool {
        self.position.is_checkmate()
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        let sq = shakmaty::Square::new(u32::from(square.index()));
        self.position
            .board()
            .piece_at(sq)
            .map(|p| Piece::new(from_role(p.role), from_color(p.color)))
    }

    fn piece_count(&self) -> usize {
        self.position.board().occupied().count()
    }

    fn move_stack(&self) -> &[Move] {
        &self.moves
    }

    fn push(&mut self, mv: Move) -> Result<(), GameError> {
        let m = self.to_shakmaty(mv)?;
        let next = self
            .position
            .clone()
            .play(&m)
            .map_err(|_| GameError::IllegalMove(mv.uci()))?;
        self.previous
            .push(std::mem::replace(&mut self.position, next));
        self.moves.push(mv);
        Ok(())
    }

    fn pop(&mut self) -> Option<Move> {
        let mv = self.moves.pop()?;
        if let Some(position) = self.previous.pop() {
            self.position = position;
        }
        Some(mv)
    }
}
