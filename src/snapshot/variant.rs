//! Snapshot sequences for a principal variation.

use tracing::debug;

use super::guard::{Advance, Fingerprint};
use crate::chess::{ChessGame, GameError, Move};

/// Snapshot the current position followed by each position reached along
/// `moves`, looking at most `max_plies` moves ahead.
///
/// `to_snapshot` receives the FEN of each position, so equal positions give
/// equal snapshots. The result always has `min(moves.len(), max_plies) + 1`
/// entries, the current position first.
///
/// The game is advanced transiently and restored before returning. If a
/// move fails to apply, the moves already played are undone and the error
/// is returned.
///
/// # Panics
///
/// Panics if the game cannot be put back into its original state.
pub fn variant_snapshots<G, P, F>(
    game: &mut G,
    moves: &[Move],
    max_plies: usize,
    mut to_snapshot: F,
) -> Result<Vec<P>, GameError>
where
    G: ChessGame + ?Sized,
    F: FnMut(&str) -> P,
{
    let plies = moves.len().min(max_plies);
    let before = Fingerprint::capture(&*game);

    let result: Result<Vec<P>, GameError> = {
        let mut advance = Advance::new(&mut *game);
        let mut positions = Vec::with_capacity(plies + 1);
        positions.push(to_snapshot(&advance.game().fen()));

        let mut outcome = Ok(());
        for &mv in &moves[..plies] {
            if let Err(e) = advance.push(mv) {
                outcome = Err(e);
                break;
            }
            positions.push(to_snapshot(&advance.game().fen()));
        }
        outcome.map(|()| positions)
    };

    before.assert_restored(&*game, "variant snapshot");
    if let Err(e) = &result {
        debug!(error = %e, "variant snapshot aborted");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::ShakmatyGame;
    use crate::snapshot::BoardSnapshot;

    fn moves(list: &[&str]) -> Vec<Move> {
        list.iter().map(|m| m.parse().unwrap()).collect()
    }

    fn fens(game: &mut ShakmatyGame, mvs: &[Move], plies: usize) -> Vec<String> {
        variant_snapshots(game, mvs, plies, |fen| fen.to_string()).unwrap()
    }

    #[test]
    fn test_clamped_length() {
        let mut game = ShakmatyGame::new();
        let line = moves(&["e2e4", "e7e5", "g1f3", "b8c6", "f1b5"]);
        for plies in 0..8 {
            let snaps = fens(&mut game, &line, plies);
            assert_eq!(snaps.len(), line.len().min(plies) + 1);
        }
    }

    #[test]
    fn test_empty_moves_is_current_position() {
        let mut game = ShakmatyGame::new();
        let start = game.fen();
        assert_eq!(fens(&mut game, &[], 4), vec![start.clone()]);
        assert_eq!(fens(&mut game, &moves(&["e2e4"]), 0), vec![start]);
    }

    #[test]
    fn test_positions_follow_line_and_restore() {
        let mut game = ShakmatyGame::new();
        game.push_all(["d2d4", "d7d5"]).unwrap();
        let before = game.fen();
        let stack = game.move_stack().to_vec();

        let snaps = variant_snapshots(
            &mut game,
            &moves(&["c2c4", "e7e6"]),
            3,
            |fen| BoardSnapshot::from_fen(fen).unwrap(),
        )
        .unwrap();

        assert_eq!(snaps.len(), 3);
        assert_eq!(snaps[0].diff(&snaps[1]).len(), 2);
        assert!(snaps[2].piece_at("e6".parse().unwrap()).is_some());
        assert_eq!(game.fen(), before);
        assert_eq!(game.move_stack(), stack.as_slice());
    }

    #[test]
    fn test_illegal_move_reports_and_restores() {
        let mut game = ShakmatyGame::new();
        let before = game.fen();
        let err = variant_snapshots(
            &mut game,
            &moves(&["e2e4", "e7e5", "e4e5"]),
            4,
            |fen| fen.to_string(),
        )
        .unwrap_err();
        assert!(matches!(err, GameError::IllegalMove(_)));
        assert_eq!(game.fen(), before);
        assert!(game.move_stack().is_empty());
    }
}
