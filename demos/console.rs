//! Console demo: a minimal controller driving the terminal agent.
//!
//! Type legal moves in UCI (`e2e4`), `b` to take back, `n` for a new game,
//! `fen <fen>` to set up a position, `help` for the rest. End input (Ctrl-D)
//! to quit. Engine commands are only echoed as JSON.
//!
//! Usage: `cargo run --example console [config.yml]`

use std::path::PathBuf;
use std::time::Duration;

use chess_agents::snapshot::Advance;
use chess_agents::{
    init_logging, message_queue, Agent, AgentsConfig, ChessGame, Command, EngineInfo, Move,
    MoveMap, Result, ShakmatyGame, TerminalAgent,
};
use tracing::{info, warn};

fn offer_moves(agent: &mut TerminalAgent, game: &ShakmatyGame) -> Result<()> {
    let moves: MoveMap = game.legal_moves().into_iter().enumerate().collect();
    agent.set_valid_moves(game, Some(&moves))
}

/// A stand-in for an engine line: the first legal move, `plies` times.
fn first_moves(game: &mut ShakmatyGame, plies: usize) -> Vec<Move> {
    let mut advance = Advance::new(game);
    for _ in 0..plies {
        let Some(mv) = advance.game().legal_moves().first().copied() else {
            break;
        };
        if advance.push(mv).is_err() {
            break;
        }
    }
    let line = advance.game().move_stack();
    line[line.len() - advance.applied()..].to_vec()
}

fn redraw(agent: &mut TerminalAgent, game: &mut ShakmatyGame) -> Result<()> {
    agent.display_board(game)?;
    offer_moves(agent, game)
}

fn main() -> Result<()> {
    init_logging(std::env::var("CHESS_AGENTS_LOG").ok().as_deref());

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AgentsConfig::load(config_path.as_deref())?;

    let (tx, rx) = message_queue();
    let mut terminal = TerminalAgent::spawn(tx, config.terminal)?;
    let mut game = ShakmatyGame::new();
    redraw(&mut terminal, &mut game)?;

    while !terminal.input_finished() || !rx.is_empty() {
        let Some(message) = rx.recv_timeout(Duration::from_millis(200)) else {
            continue;
        };
        info!(actor = %message.actor, key = message.key(), "received");

        match &message.command {
            Command::Move { uci } => {
                if let Err(e) = game.push_uci(uci) {
                    warn!(uci = %uci, error = %e, "move rejected");
                }
                redraw(&mut terminal, &mut game)?;
            }
            Command::Back => {
                game.pop();
                redraw(&mut terminal, &mut game)?;
            }
            Command::NewGame => {
                game = ShakmatyGame::new();
                redraw(&mut terminal, &mut game)?;
            }
            Command::Fen(fen) => match ShakmatyGame::from_fen(fen) {
                Ok(position) => {
                    game = position;
                    redraw(&mut terminal, &mut game)?;
                }
                Err(e) => warn!(error = %e, "bad position"),
            },
            Command::Hint { ply } => {
                let variant = first_moves(&mut game, usize::from(*ply));
                let info = EngineInfo::new()
                    .with_depth(u32::from(*ply), None)
                    .with_variant(variant);
                terminal.display_info(&mut game, &info)?;
            }
            _ => println!("{}\r", message.to_json()),
        }
    }

    info!("input closed");
    Ok(())
}
