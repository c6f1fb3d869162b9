//! Text rendering of the board, the move history and the status line.
//!
//! Everything here returns plain strings (with inline ANSI reverse-video for
//! dark squares); writing them to the terminal is left to [`super::output`].

use tracing::error;
use unicode_width::UnicodeWidthStr;

use super::glyphs::{GlyphMode, MoveFlags};
use crate::agent::EngineInfo;
use crate::chess::{ChessGame, Color, Move, Piece, PieceKind, Square};
use crate::snapshot::{Fingerprint, Rewind};

/// Lines produced by [`render_board`].
pub const BOARD_LINES: usize = 11;

/// Display columns reserved for one half-move in the history panel.
pub const MOVE_FIELD_WIDTH: usize = 10;

const BORDER: &str = "  +------------------------+";
const FILE_LABELS: &str = "    A  B  C  D  E  F  G  H  ";

const REVERSE_VIDEO: &str = "\x1b[7m";
const RESET_ATTRS: &str = "\x1b[m";

/// Draw the board, rank 8 at the top and file A on the left.
///
/// Dark squares (`a1` parity) are drawn in reverse video. On those squares
/// unicode figures keep their own color; elsewhere they are inverted so they
/// read correctly on a dark background.
pub fn render_board<G: ChessGame + ?Sized>(game: &G, mode: GlyphMode) -> Vec<String> {
    let mut lines = Vec::with_capacity(BOARD_LINES);
    lines.push(BORDER.to_string());

    for rank in (0..8u8).rev() {
        let mut line = format!("{} |", rank + 1);
        for square in Square::all().filter(|sq| sq.rank() == rank) {
            let dark = (square.file() + square.rank()) % 2 == 0;
            let invert = !(dark && mode == GlyphMode::Unicode);
            let glyph = game
                .piece_at(square)
                .map_or(' ', |piece| mode.piece(piece, invert));
            if dark {
                line.push_str(REVERSE_VIDEO);
                line.push(' ');
                line.push(glyph);
                line.push(' ');
                line.push_str(RESET_ATTRS);
            } else {
                line.push(' ');
                line.push(glyph);
                line.push(' ');
            }
        }
        line.push('|');
        lines.push(line);
    }

    lines.push(BORDER.to_string());
    lines.push(FILE_LABELS.to_string());
    lines
}

/// Render the most recent moves, two half-moves per line.
///
/// Always returns exactly `lines` entries, the latest move on the last one
/// and unused leading lines empty. `score` is appended to the latest move.
///
/// Each move is inspected by taking it back, so the game is rewound up to
/// `2 * lines` half-moves (one fewer with Black to move, keeping White's
/// move at the start of each line) and replayed before returning.
///
/// # Panics
///
/// Panics if the game cannot be put back into its original state.
pub fn render_move_history<G: ChessGame + ?Sized>(
    game: &mut G,
    lines: usize,
    score: Option<&str>,
    mode: GlyphMode,
) -> Vec<String> {
    let mut history = vec![String::new(); lines];
    if lines == 0 {
        return history;
    }

    let window = match game.turn() {
        Color::Black => 2 * lines - 1,
        Color::White => 2 * lines,
    };
    let count = game.move_stack().len().min(window);
    let before = Fingerprint::capture(&*game);

    {
        let mut rewind = Rewind::new(&mut *game);
        let mut score = score;
        let mut row = Some(lines - 1);

        for _ in 0..count {
            let Some(index) = row else {
                error!("move history ran out of lines");
                break;
            };

            let mut flags = MoveFlags::empty();
            if rewind.game().is_checkmate() {
                flags |= MoveFlags::MATE;
            } else if rewind.game().is_check() {
                flags |= MoveFlags::CHECK;
            }
            let pieces_after = rewind.game().piece_count();

            let Some(mv) = rewind.pop() else {
                break;
            };
            let game = rewind.game();
            if game.piece_count() != pieces_after {
                flags |= MoveFlags::CAPTURE;
            }
            if mv.promotion.is_some() {
                flags |= MoveFlags::PROMOTION;
            }

            let mut token = move_token(mv, game.piece_at(mv.from), flags, mode);
            if index == lines - 1 {
                if let Some(score) = score.take() {
                    token = format!("{token} ({score})");
                }
            }
            history[index].insert_str(0, &token);

            if game.turn() == Color::White {
                history[index].insert_str(0, &format!("{:3}. ", game.fullmove_number()));
                row = index.checked_sub(1);
            }
        }
    }

    before.assert_restored(&*game, "move history");
    history
}

/// One half-move, `glyph from-to[promotion][marker]`, padded to
/// [`MOVE_FIELD_WIDTH`] columns.
fn move_token(mv: Move, mover: Option<Piece>, flags: MoveFlags, mode: GlyphMode) -> String {
    let symbols = mode.symbols();
    let color = mover.map_or(Color::White, |piece| piece.color);

    let (figure, promotion) = match mv.promotion {
        Some(kind) if flags.contains(MoveFlags::PROMOTION) => {
            let pawn = mode.piece(Piece::new(PieceKind::Pawn, color), true);
            let promoted = match mode {
                GlyphMode::Unicode => Piece::new(kind, color).unicode_symbol(true),
                GlyphMode::Ascii => kind.letter(),
            };
            (pawn, Some(promoted))
        }
        _ => (mover.map_or('?', |piece| mode.piece(piece, true)), None),
    };

    let mut token = format!(
        "{figure} {}{}{}",
        mv.from,
        symbols.separator(flags),
        mv.to
    );
    if let Some(promoted) = promotion {
        token.push(promoted);
    }
    token.push_str(symbols.marker(flags));
    pad(token, MOVE_FIELD_WIDTH)
}

fn pad(mut text: String, width: usize) -> String {
    let used = text.width();
    if used < width {
        text.extend(std::iter::repeat(' ').take(width - used));
    }
    text
}

/// Build the one-line search summary from whichever fields are present,
/// showing at most `max_plies` moves of the variant.
pub fn render_info(info: &EngineInfo, max_plies: usize) -> String {
    let mut fields = Vec::new();
    if let Some(score) = info.score {
        fields.push(format!("Eval: {score}"));
    }
    if let Some(nps) = info.nps {
        fields.push(format!("Nps: {nps}"));
    }
    if let Some(depth) = info.depth {
        match info.seldepth {
            Some(seldepth) => fields.push(format!("Depth: {depth}/{seldepth}")),
            None => fields.push(format!("Depth: {depth}")),
        }
    }
    if let Some(variant) = &info.variant {
        fields.extend(variant.iter().take(max_plies).map(Move::uci));
    }
    format!("[{}]", fields.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Score;
    use crate::chess::ShakmatyGame;

    fn played(moves: &[&str]) -> ShakmatyGame {
        let mut game = ShakmatyGame::new();
        game.push_all(moves.iter().copied()).unwrap();
        game
    }

    #[test]
    fn test_board_shape() {
        let game = ShakmatyGame::new();
        let lines = render_board(&game, GlyphMode::Ascii);
        assert_eq!(lines.len(), BOARD_LINES);
        assert_eq!(lines[0], BORDER);
        assert_eq!(lines[9], BORDER);
        assert_eq!(lines[10], FILE_LABELS);
        assert!(lines[1].starts_with("8 |"));
        assert!(lines[8].starts_with("1 |"));
        assert!(lines[8].ends_with('|'));
    }

    #[test]
    fn test_board_squares() {
        let game = ShakmatyGame::new();
        let lines = render_board(&game, GlyphMode::Ascii);
        // a1 is dark, b1 light.
        assert!(lines[8].starts_with("1 |\x1b[7m R \x1b[m N "));
        // a8 is light, b8 dark.
        assert!(lines[1].starts_with("8 | r \x1b[7m n \x1b[m"));
        // Empty rank 4: e4 light, d4 dark.
        assert_eq!(lines[5].matches("\x1b[7m   \x1b[m").count(), 4);
    }

    #[test]
    fn test_board_unicode_inversion() {
        let game = ShakmatyGame::new();
        let lines = render_board(&game, GlyphMode::Unicode);
        // White rook on dark a1 keeps its figure, knight on light b1 is inverted.
        assert!(lines[8].starts_with("1 |\x1b[7m ♖ \x1b[m ♞ "));
    }

    #[test]
    fn test_history_always_has_requested_lines() {
        for moves in [0usize, 1, 2, 5, 40] {
            let line: Vec<&str> = ["g1f3", "g8f6", "f3g1", "f6g8"]
                .iter()
                .copied()
                .cycle()
                .take(moves)
                .collect();
            let mut game = played(&line);
            for lines in [1usize, 3, 11] {
                let history = render_move_history(&mut game, lines, None, GlyphMode::Ascii);
                assert_eq!(history.len(), lines);
            }
        }
    }

    #[test]
    fn test_history_leading_lines_empty() {
        let mut game = played(&["e2e4", "e7e5", "g1f3"]);
        let history = render_move_history(&mut game, 4, None, GlyphMode::Ascii);
        assert_eq!(history[0], "");
        assert_eq!(history[1], "");
        assert_eq!(history[2], "  1. P e2-e4   p e7-e5   ");
        assert_eq!(history[3], "  2. N g1-f3   ");
    }

    #[test]
    fn test_history_window_keeps_pairs_aligned() {
        let mut game = played(&["g1f3", "g8f6", "f3g1", "f6g8", "g1f3", "g8f6", "f3g1"]);
        // Black to move: 2 * 2 - 1 = 3 half-moves shown, White's first.
        let history = render_move_history(&mut game, 2, None, GlyphMode::Ascii);
        assert_eq!(history[0], "  3. N g1-f3   n g8-f6   ");
        assert_eq!(history[1], "  4. N f3-g1   ");
    }

    #[test]
    fn test_history_restores_game() {
        let mut game = played(&["e2e4", "d7d5", "e4d5", "d8d5", "b1c3", "d5a5"]);
        let fen = game.fen();
        let stack = game.move_stack().to_vec();
        let turn = game.turn();

        for lines in [1usize, 2, 11] {
            render_move_history(&mut game, lines, Some("0.3"), GlyphMode::Unicode);
            assert_eq!(game.fen(), fen);
            assert_eq!(game.move_stack(), stack.as_slice());
            assert_eq!(game.turn(), turn);
        }
    }

    #[test]
    fn test_capture_with_check() {
        let mut game = ShakmatyGame::from_fen("3k4/8/8/3p4/4Q3/8/8/4K3 w - - 0 1").unwrap();
        game.push_uci("e4d5").unwrap();

        let unicode = render_move_history(&mut game, 1, None, GlyphMode::Unicode);
        assert!(unicode[0].contains("e4×d5+"), "{:?}", unicode[0]);
        assert_eq!(unicode[0], "  1. ♛ e4×d5+  ");

        let ascii = render_move_history(&mut game, 1, None, GlyphMode::Ascii);
        assert_eq!(ascii[0], "  1. Q e4xd5+  ");
    }

    #[test]
    fn test_mate_marker_and_score() {
        let mut game = played(&["f2f3", "e7e5", "g2g4", "d8h4"]);
        let history = render_move_history(&mut game, 3, Some("#0"), GlyphMode::Ascii);
        assert_eq!(history[0], "");
        assert_eq!(history[1], "  1. P f2-f3   p e7-e5   ");
        assert_eq!(history[2], "  2. P g2-g4   q d8-h4#   (#0)");
    }

    #[test]
    fn test_promotion() {
        let mut game = ShakmatyGame::from_fen("8/4P3/8/8/8/8/k7/4K3 w - - 0 1").unwrap();
        game.push_uci("e7e8q").unwrap();
        let ascii = render_move_history(&mut game, 1, None, GlyphMode::Ascii);
        assert_eq!(ascii[0], "  1. P e7-e8q  ");
        let unicode = render_move_history(&mut game, 1, None, GlyphMode::Unicode);
        assert_eq!(unicode[0], "  1. ♟ e7-e8♛  ");
    }

    #[test]
    fn test_info_line() {
        let info = EngineInfo::new()
            .with_score(Score::Centipawns(35))
            .with_nps(120_000)
            .with_depth(12, Some(18))
            .with_variant(
                ["e2e4", "e7e5", "g1f3"]
                    .iter()
                    .map(|m| m.parse().unwrap())
                    .collect(),
            );
        assert_eq!(
            render_info(&info, 2),
            "[Eval: 0.35 Nps: 120000 Depth: 12/18 e2e4 e7e5]"
        );
        assert_eq!(render_info(&EngineInfo::new().with_depth(7, None), 6), "[Depth: 7]");
        assert_eq!(render_info(&EngineInfo::new(), 6), "[]");
    }
}
