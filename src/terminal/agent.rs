//! The terminal agent: board display, status line and keyboard commands.

use std::io::{self, BufRead, BufReader, Write};
use std::sync::PoisonError;

use tracing::debug;

use super::glyphs::GlyphMode;
use super::input::{InputActor, InputContext, PendingMoves};
use super::output::OutputBuffer;
use super::render::{render_board, render_info, render_move_history};
use crate::agent::{Agent, AgentState, EngineInfo, MoveMap, SharedState};
use crate::chess::ChessGame;
use crate::config::TerminalAgentConfig;
use crate::error::Result;
use crate::queue::MessageSender;

/// Agent drawing on stdout and reading commands from a line source.
pub struct TerminalAgent {
    config: TerminalAgentConfig,
    state: SharedState,
    pending: PendingMoves,
    input: InputActor,
    output: OutputBuffer,
}

impl TerminalAgent {
    /// Start an agent reading commands from stdin.
    pub fn spawn(queue: MessageSender, config: TerminalAgentConfig) -> Result<Self> {
        Self::with_reader(BufReader::new(io::stdin()), queue, config)
    }

    /// Start an agent reading commands from `reader`.
    pub fn with_reader<R>(
        reader: R,
        queue: MessageSender,
        config: TerminalAgentConfig,
    ) -> Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let state = SharedState::new();
        let pending = PendingMoves::default();
        let input = InputActor::spawn(
            reader,
            InputContext {
                actor: config.name.clone(),
                queue,
                state: state.clone(),
                pending: pending.clone(),
                backoff: config.read_backoff(),
            },
        )?;
        debug!(actor = %config.name, "terminal agent started");

        Ok(Self {
            config,
            state,
            pending,
            input,
            output: OutputBuffer::new(),
        })
    }

    /// Current configuration.
    pub const fn config(&self) -> &TerminalAgentConfig {
        &self.config
    }

    /// Lifecycle state, driven by the input thread.
    pub fn state(&self) -> AgentState {
        self.state.get()
    }

    /// Glyph set chosen by the configuration.
    pub const fn glyph_mode(&self) -> GlyphMode {
        GlyphMode::from_unicode(self.config.unicode_figures)
    }

    /// Moves currently accepted from the keyboard.
    pub fn pending_moves(&self) -> Vec<String> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Whether the input thread has reached end of input.
    pub fn input_finished(&self) -> bool {
        self.input.is_finished()
    }

    /// Wait for end of input.
    pub fn join_input(self) {
        self.input.join();
    }

    /// Write the board and move history to `out`.
    pub fn write_board<W: Write>(&mut self, out: &mut W, game: &mut dyn ChessGame) -> Result<()> {
        let mode = self.glyph_mode();
        let board = render_board(game, mode);
        let history = render_move_history(game, board.len(), None, mode);

        self.output.clear();
        self.output.board_frame(&board, &history);
        self.output.flush_to(out)?;
        Ok(())
    }

    /// Write the status line for `info` to `out`.
    pub fn write_info<W: Write>(&mut self, out: &mut W, info: &EngineInfo) -> Result<()> {
        let line = render_info(info, self.config.max_plies);

        self.output.clear();
        self.output.status_line(&line);
        self.output.flush_to(out)?;
        Ok(())
    }
}

impl Agent for TerminalAgent {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn agent_ready(&self) -> bool {
        self.state() == AgentState::Active
    }

    fn display_board(&mut self, game: &mut dyn ChessGame) -> Result<()> {
        self.write_board(&mut io::stdout().lock(), game)
    }

    fn display_info(&mut self, _game: &mut dyn ChessGame, info: &EngineInfo) -> Result<()> {
        self.write_info(&mut io::stdout().lock(), info)
    }

    fn set_valid_moves(&mut self, _game: &dyn ChessGame, moves: Option<&MoveMap>) -> Result<()> {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        pending.clear();
        if let Some(moves) = moves {
            pending.extend(moves.values().map(|mv| mv.uci()));
        }
        debug!(actor = %self.config.name, count = pending.len(), "valid moves updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::Score;
    use crate::chess::{Move, ShakmatyGame};
    use crate::queue::{message_queue, Command, Message, MessageReceiver};
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use std::io::Read;
    use std::time::{Duration, Instant};

    const WAIT: Duration = Duration::from_secs(5);

    /// Line source fed from the test; dropping the sender is end of input.
    struct ScriptedInput {
        rx: Receiver<io::Result<String>>,
        buf: Vec<u8>,
        pos: usize,
    }

    impl Read for ScriptedInput {
        fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
            let available = self.fill_buf()?;
            let n = available.len().min(out.len());
            out[..n].copy_from_slice(&available[..n]);
            self.consume(n);
            Ok(n)
        }
    }

    impl BufRead for ScriptedInput {
        fn fill_buf(&mut self) -> io::Result<&[u8]> {
            if self.pos >= self.buf.len() {
                self.pos = 0;
                self.buf = match self.rx.recv() {
                    Ok(Ok(line)) => line.into_bytes(),
                    Ok(Err(e)) => {
                        self.buf.clear();
                        return Err(e);
                    }
                    Err(_) => Vec::new(),
                };
            }
            Ok(&self.buf[self.pos..])
        }

        fn consume(&mut self, amt: usize) {
            self.pos += amt;
        }
    }

    struct Harness {
        agent: TerminalAgent,
        keys: Sender<io::Result<String>>,
        queue: MessageReceiver,
    }

    impl Harness {
        fn new(unicode: bool) -> Self {
            let (keys, rx) = unbounded();
            let (tx, queue) = message_queue();
            let config = TerminalAgentConfig {
                unicode_figures: unicode,
                read_backoff_ms: 1,
                ..TerminalAgentConfig::default()
            };
            let input = ScriptedInput {
                rx,
                buf: Vec::new(),
                pos: 0,
            };
            let agent = TerminalAgent::with_reader(input, tx, config).unwrap();
            Self { agent, keys, queue }
        }

        fn type_line(&self, line: &str) {
            self.keys.send(Ok(format!("{line}\n"))).unwrap();
        }

        fn next_message(&self) -> Message {
            self.queue.recv_timeout(WAIT).expect("no message queued")
        }
    }

    fn move_map(moves: &[&str]) -> MoveMap {
        moves
            .iter()
            .enumerate()
            .map(|(i, m)| (i, m.parse::<Move>().unwrap()))
            .collect()
    }

    #[test]
    fn test_becomes_active_on_first_line() {
        let harness = Harness::new(true);
        assert!(!harness.agent.agent_ready());

        harness.type_line("n");
        let message = harness.next_message();
        assert_eq!(message, Message::new("TerminalAgent", Command::NewGame));
        assert!(harness.agent.agent_ready());
    }

    #[test]
    fn test_commands_keep_order() {
        let harness = Harness::new(true);
        for line in ["", "l 2.5", "h 9", "gw", "fen 8/8/8/8/8/8/k7/4K3 w - - 0 1"] {
            harness.type_line(line);
        }

        let keys: Vec<&str> = (0..4).map(|_| harness.next_message().key()).collect();
        assert_eq!(keys, ["level", "hint", "go", "fen"]);
    }

    #[test]
    fn test_bad_input_is_skipped() {
        let harness = Harness::new(true);
        harness.type_line("xyz");
        harness.type_line("l fast");
        harness.type_line("help");
        harness.type_line("p");

        assert_eq!(harness.next_message().command, Command::Position);
        assert!(harness.queue.is_empty());
    }

    #[test]
    fn test_read_error_is_retried() {
        let harness = Harness::new(true);
        harness
            .keys
            .send(Err(io::Error::new(io::ErrorKind::Other, "glitch")))
            .unwrap();
        harness.type_line("b");

        assert_eq!(harness.next_message().command, Command::Back);
    }

    #[test]
    fn test_pending_move_is_queued_once() {
        let mut harness = Harness::new(true);
        let game = ShakmatyGame::new();
        harness
            .agent
            .set_valid_moves(&game, Some(&move_map(&["e2e4", "g1f3"])))
            .unwrap();
        assert_eq!(harness.agent.pending_moves(), ["e2e4", "g1f3"]);

        harness.type_line("e2e4");
        harness.type_line("e2e4");
        harness.type_line("s");

        let message = harness.next_message();
        assert_eq!(message.command, Command::Move { uci: "e2e4".into() });
        assert_eq!(
            message.to_json(),
            serde_json::json!({"move": {"uci": "e2e4", "actor": "TerminalAgent"}})
        );
        // The second e2e4 is no longer on offer.
        assert_eq!(harness.next_message().command, Command::Stop);
        assert!(harness.agent.pending_moves().is_empty());
    }

    #[test]
    fn test_withdrawing_moves() {
        let mut harness = Harness::new(true);
        let game = ShakmatyGame::new();
        harness
            .agent
            .set_valid_moves(&game, Some(&move_map(&["e2e4"])))
            .unwrap();
        harness.agent.set_valid_moves(&game, None).unwrap();
        assert!(harness.agent.pending_moves().is_empty());

        harness
            .agent
            .set_valid_moves(&game, Some(&MoveMap::new()))
            .unwrap();
        assert!(harness.agent.pending_moves().is_empty());
    }

    #[test]
    fn test_end_of_input_stops_reader() {
        let harness = Harness::new(true);
        harness.type_line("n");
        assert_eq!(harness.next_message().command, Command::NewGame);

        let Harness { agent, keys, .. } = harness;
        drop(keys);

        let deadline = Instant::now() + WAIT;
        while !agent.input_finished() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(5));
        }
        assert!(agent.input_finished());
        agent.join_input();
    }

    #[test]
    fn test_board_output() {
        let mut harness = Harness::new(true);
        let mut game = ShakmatyGame::new();
        game.push_all(["e2e4", "e7e5"]).unwrap();
        let fen = game.fen();

        let mut out = Vec::new();
        harness.agent.write_board(&mut out, &mut game).unwrap();
        assert_eq!(game.fen(), fen);

        let mut parser = vt100::Parser::new(24, 100, 0);
        parser.process(&out);
        let screen = parser.screen();

        // Rank 1 is on row 8; a1 is dark, b1 light.
        let a1 = screen.cell(8, 4).unwrap();
        assert_eq!(a1.contents(), "♖");
        assert!(a1.inverse());
        let b1 = screen.cell(8, 7).unwrap();
        assert_eq!(b1.contents(), "♞");
        assert!(!b1.inverse());

        let rows: Vec<String> = screen.rows(0, 100).take(11).collect();
        assert!(
            rows[10].ends_with("    1. ♟ e2-e4   ♙ e7-e5   "),
            "{:?}",
            rows[10]
        );
        assert!(rows[9].starts_with("  +---"));
    }

    #[test]
    fn test_ascii_board_output() {
        let mut harness = Harness::new(false);
        let mut game = ShakmatyGame::new();

        let mut out = Vec::new();
        harness.agent.write_board(&mut out, &mut game).unwrap();

        let mut parser = vt100::Parser::new(24, 100, 0);
        parser.process(&out);
        assert_eq!(parser.screen().cell(8, 4).unwrap().contents(), "R");
        assert_eq!(parser.screen().cell(1, 4).unwrap().contents(), "r");
    }

    #[test]
    fn test_info_output() {
        let mut harness = Harness::new(true);
        let info = EngineInfo::new()
            .with_score(Score::Mate(2))
            .with_depth(9, None);

        let mut out = Vec::new();
        harness.agent.write_info(&mut out, &info).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("[Eval: #2 Depth: 9]\r"));
        assert!(!text.contains('\n'));
    }
}
