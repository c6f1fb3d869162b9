//! Keyboard command table.
//!
//! A line of input is matched against the pending moves first, then against
//! [`COMMANDS`] in order. The first matching row decides the outcome.

use std::num::IntErrorKind;

use thiserror::Error;

use crate::config::HINT_MAX_PLIES;
use crate::queue::{AnalyzeSide, Command, GoSide};

/// Lines printed for `help`.
pub const HELP_TEXT: &[&str] = &[
    "a - analyze current position, ab: analyze black, aw: analyze white",
    "c - change cable orientation (eboard cable left/right)",
    "b - take back move",
    "e - switch board encoding",
    "g - go, current player (default white)",
    "gw - go, force white move",
    "gb - go, force black move",
    "h <ply> - show hints for <ply> levels on board",
    "l <n> - level: engine think-time in sec (float)",
    "m <n> - max plies shown during look-ahead",
    "n - new game",
    "p - import eboard position",
    "s - stop",
    "w - write current preferences as default",
    "fen <fen> - set up a position",
    "e2e4 - valid move",
];

/// A command argument that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The numeric argument is malformed.
    #[error("{command}: expected {expected}, got {arg:?}")]
    InvalidNumber {
        /// Command name.
        command: &'static str,
        /// The offending argument.
        arg: String,
        /// What was expected.
        expected: &'static str,
    },
}

/// Outcome of classifying one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Dispatch {
    /// One of the offered moves.
    Move(String),
    /// A queueable command.
    Command(Command),
    /// Print [`HELP_TEXT`].
    Help,
    /// Nothing matched.
    Unknown,
    /// A command matched but its argument was bad.
    Invalid(CommandError),
}

/// How a table row matches the input.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    /// The whole line.
    Exact(&'static str),
    /// A leading prefix; the remainder is the argument.
    Prefix(&'static str),
}

impl Matcher {
    /// The argument part of `input` if it matches.
    fn matches<'a>(&self, input: &'a str) -> Option<&'a str> {
        match *self {
            Self::Exact(word) => (input == word).then_some(""),
            Self::Prefix(prefix) => input.strip_prefix(prefix),
        }
    }
}

/// What a matching row produces.
#[derive(Debug, Clone, Copy)]
pub enum Handler {
    /// Always the same command.
    Fixed(fn() -> Command),
    /// Built from the argument.
    Parse(fn(&str) -> Result<Command, CommandError>),
    /// Show help.
    Help,
}

/// The dispatch table.
pub static COMMANDS: &[(Matcher, Handler)] = &[
    (Matcher::Exact("n"), Handler::Fixed(|| Command::NewGame)),
    (Matcher::Exact("b"), Handler::Fixed(|| Command::Back)),
    (Matcher::Exact("c"), Handler::Fixed(|| Command::TurnOrientation)),
    (Matcher::Exact("a"), Handler::Fixed(|| Command::Analyze(AnalyzeSide::Current))),
    (Matcher::Exact("ab"), Handler::Fixed(|| Command::Analyze(AnalyzeSide::Black))),
    (Matcher::Exact("aw"), Handler::Fixed(|| Command::Analyze(AnalyzeSide::White))),
    (Matcher::Exact("e"), Handler::Fixed(|| Command::Encoding)),
    (Matcher::Prefix("l "), Handler::Parse(parse_level)),
    (Matcher::Prefix("m "), Handler::Parse(parse_max_ply)),
    (Matcher::Exact("p"), Handler::Fixed(|| Command::Position)),
    (Matcher::Exact("g"), Handler::Fixed(|| Command::Go(GoSide::Current))),
    (Matcher::Exact("gw"), Handler::Fixed(|| Command::Go(GoSide::White))),
    (Matcher::Exact("gb"), Handler::Fixed(|| Command::Go(GoSide::Black))),
    (Matcher::Exact("w"), Handler::Fixed(|| Command::WritePrefs)),
    (Matcher::Prefix("h "), Handler::Parse(parse_hint)),
    (Matcher::Exact("s"), Handler::Fixed(|| Command::Stop)),
    (Matcher::Prefix("fen "), Handler::Parse(parse_fen)),
    (Matcher::Exact("help"), Handler::Help),
];

/// Classify a trimmed, non-empty input line.
pub fn classify(input: &str, pending: &[String]) -> Dispatch {
    if pending.iter().any(|mv| mv == input) {
        return Dispatch::Move(input.to_string());
    }

    for (matcher, handler) in COMMANDS {
        let Some(arg) = matcher.matches(input) else {
            continue;
        };
        return match handler {
            Handler::Fixed(build) => Dispatch::Command(build()),
            Handler::Parse(parse) => match parse(arg) {
                Ok(command) => Dispatch::Command(command),
                Err(e) => Dispatch::Invalid(e),
            },
            Handler::Help => Dispatch::Help,
        };
    }

    Dispatch::Unknown
}

fn parse_level(arg: &str) -> Result<Command, CommandError> {
    match arg.trim().parse::<f64>() {
        Ok(movetime) if movetime.is_finite() => Ok(Command::Level { movetime }),
        _ => Err(invalid("level", arg, "a number of seconds")),
    }
}

fn parse_max_ply(arg: &str) -> Result<Command, CommandError> {
    arg.trim()
        .parse::<i64>()
        .map(Command::MaxPly)
        .map_err(|_| invalid("max_ply", arg, "an integer"))
}

fn parse_hint(arg: &str) -> Result<Command, CommandError> {
    let ply = match arg.trim().parse::<i64>() {
        Ok(ply) => ply.clamp(0, HINT_MAX_PLIES),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => HINT_MAX_PLIES,
            IntErrorKind::NegOverflow => 0,
            _ => return Err(invalid("hint", arg, "an integer")),
        },
    };
    let ply = u8::try_from(ply).unwrap_or(0);
    Ok(Command::Hint { ply })
}

fn parse_fen(arg: &str) -> Result<Command, CommandError> {
    Ok(Command::Fen(arg.to_string()))
}

fn invalid(command: &'static str, arg: &str, expected: &'static str) -> CommandError {
    CommandError::InvalidNumber {
        command,
        arg: arg.to_string(),
        expected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(input: &str) -> Command {
        match classify(input, &[]) {
            Dispatch::Command(command) => command,
            other => panic!("{input:?} classified as {other:?}"),
        }
    }

    #[test]
    fn test_fixed_commands() {
        assert_eq!(command("n"), Command::NewGame);
        assert_eq!(command("b"), Command::Back);
        assert_eq!(command("c"), Command::TurnOrientation);
        assert_eq!(command("a"), Command::Analyze(AnalyzeSide::Current));
        assert_eq!(command("ab"), Command::Analyze(AnalyzeSide::Black));
        assert_eq!(command("aw"), Command::Analyze(AnalyzeSide::White));
        assert_eq!(command("e"), Command::Encoding);
        assert_eq!(command("p"), Command::Position);
        assert_eq!(command("g"), Command::Go(GoSide::Current));
        assert_eq!(command("gw"), Command::Go(GoSide::White));
        assert_eq!(command("gb"), Command::Go(GoSide::Black));
        assert_eq!(command("w"), Command::WritePrefs);
        assert_eq!(command("s"), Command::Stop);
    }

    #[test]
    fn test_numeric_arguments() {
        assert_eq!(command("l 2.5"), Command::Level { movetime: 2.5 });
        assert_eq!(command("l 10"), Command::Level { movetime: 10.0 });
        assert_eq!(command("m 7"), Command::MaxPly(7));
        assert_eq!(command("m -1"), Command::MaxPly(-1));
    }

    #[test]
    fn test_hint_is_clamped() {
        assert_eq!(command("h 2"), Command::Hint { ply: 2 });
        assert_eq!(command("h 9"), Command::Hint { ply: 4 });
        assert_eq!(command("h -3"), Command::Hint { ply: 0 });
    }

    #[test]
    fn test_hint_out_of_range_integers_clamp() {
        assert_eq!(command("h 99999999999999999999"), Command::Hint { ply: 4 });
        assert_eq!(command("h -99999999999999999999"), Command::Hint { ply: 0 });
        assert!(matches!(
            classify("h 9x", &[]),
            Dispatch::Invalid(CommandError::InvalidNumber { command: "hint", .. })
        ));
    }

    #[test]
    fn test_malformed_arguments() {
        for input in ["l fast", "l ", "l inf", "m x", "h 1.5", "h "] {
            assert!(
                matches!(classify(input, &[]), Dispatch::Invalid(_)),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_fen_takes_rest_of_line() {
        let fen = "8/8/8/8/8/8/k7/4K3 w - - 0 1";
        assert_eq!(command(&format!("fen {fen}")), Command::Fen(fen.to_string()));
    }

    #[test]
    fn test_unknown_and_help() {
        assert_eq!(classify("xyz", &[]), Dispatch::Unknown);
        assert_eq!(classify("l", &[]), Dispatch::Unknown);
        assert_eq!(classify("e2e4", &[]), Dispatch::Unknown);
        assert_eq!(classify("help", &[]), Dispatch::Help);
    }

    #[test]
    fn test_pending_moves_first() {
        let pending = vec!["e2e4".to_string(), "b1c3".to_string()];
        assert_eq!(classify("e2e4", &pending), Dispatch::Move("e2e4".into()));
        assert_eq!(classify("n", &pending), Dispatch::Command(Command::NewGame));
    }
}
