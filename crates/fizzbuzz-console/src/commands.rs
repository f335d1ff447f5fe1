//! Line-oriented console commands.
//!
//! Each stdin line is parsed into a [`Command`] and applied to the
//! [`PresentationController`] by [`execute`], which returns the text to show
//! the user (if any) and whether the loop should continue.

use std::str::FromStr;

use crate::controller::PresentationController;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
commands:
  start            begin advancing every 500 ms
  confirm <text>   type \"stop\" here to enable the stop command
  stop             stop advancing (requires confirmation)
  reset            clear the list and restart from 1
  status           show engine state
  help             show this text
  quit             stop and exit";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the sequence.
    Start,
    /// Stop the sequence (gated).
    Stop,
    /// Reset the list and cursor.
    Reset,
    /// Set the confirmation input to the given text.
    Confirm(String),
    /// Print engine state.
    Status,
    /// Print the command list.
    Help,
    /// Dispose the controller and exit.
    Quit,
}

/// Errors produced while parsing a console line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The line was blank.
    #[error("empty command")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command: {0} (type \"help\" for the list)")]
    Unknown(String),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(word, rest)| (word, rest.trim_start()));

        match word.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "reset" => Ok(Self::Reset),
            "confirm" => Ok(Self::Confirm(rest.to_owned())),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_owned())),
        }
    }
}

/// What the command loop should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Keep reading; optionally show a reply.
    Continue(Option<String>),
    /// Leave the loop.
    Quit,
}

/// Apply `command` to `controller`.
pub fn execute(controller: &mut PresentationController, command: Command) -> Outcome {
    match command {
        Command::Start => {
            controller.start();
            Outcome::Continue(None)
        }
        Command::Stop => match controller.stop() {
            Ok(()) => Outcome::Continue(Some("stopped".to_owned())),
            Err(e) => Outcome::Continue(Some(e.to_string())),
        },
        Command::Reset => {
            controller.reset();
            Outcome::Continue(None)
        }
        Command::Confirm(text) => {
            controller.set_confirmation(&text);
            let reply = if controller.can_stop() {
                "stop enabled"
            } else {
                "stop disabled"
            };
            Outcome::Continue(Some(reply.to_owned()))
        }
        Command::Status => {
            let status = controller.status();
            Outcome::Continue(Some(format!(
                "{} | next index {} | {} items | stop {}",
                if status.running { "running" } else { "idle" },
                status.next_index,
                status.items,
                if status.stop_enabled {
                    "enabled"
                } else {
                    "disabled"
                },
            )))
        }
        Command::Help => Outcome::Continue(Some(HELP.to_owned())),
        Command::Quit => Outcome::Quit,
    }
}

#[cfg(test)]
mod tests {
    use fizzbuzz_core::engine::SequenceEngine;
    use fizzbuzz_types::SequenceItem;
    use tokio::runtime::Handle;

    use super::*;

    fn parse(line: &str) -> Result<Command, CommandError> {
        line.parse()
    }

    fn controller() -> PresentationController {
        let engine = SequenceEngine::new(Handle::current());
        PresentationController::attach(engine, |_: &[SequenceItem]| {})
    }

    #[test]
    fn parses_keywords() {
        assert_eq!(parse("start"), Ok(Command::Start));
        assert_eq!(parse("  STOP \n"), Ok(Command::Stop));
        assert_eq!(parse("reset"), Ok(Command::Reset));
        assert_eq!(parse("status"), Ok(Command::Status));
        assert_eq!(parse("?"), Ok(Command::Help));
        assert_eq!(parse("exit"), Ok(Command::Quit));
    }

    #[test]
    fn confirm_keeps_its_argument() {
        assert_eq!(parse("confirm Stop"), Ok(Command::Confirm("Stop".to_owned())));
        assert_eq!(parse("confirm    stop"), Ok(Command::Confirm("stop".to_owned())));
        assert_eq!(parse("confirm"), Ok(Command::Confirm(String::new())));
    }

    #[test]
    fn rejects_blank_and_unknown() {
        assert_eq!(parse("   "), Err(CommandError::Empty));
        assert_eq!(parse("go"), Err(CommandError::Unknown("go".to_owned())));
    }

    #[tokio::test]
    async fn stop_requires_confirm_first() {
        let mut controller = controller();
        let _ = execute(&mut controller, Command::Start);

        let denied = execute(&mut controller, Command::Stop);
        assert!(matches!(denied, Outcome::Continue(Some(ref msg)) if msg.contains("disabled")));
        assert!(controller.status().running);

        let _ = execute(&mut controller, Command::Confirm("stop".to_owned()));
        let stopped = execute(&mut controller, Command::Stop);
        assert_eq!(stopped, Outcome::Continue(Some("stopped".to_owned())));
        assert!(!controller.status().running);
    }

    #[tokio::test]
    async fn status_and_quit() {
        let mut controller = controller();
        let status = execute(&mut controller, Command::Status);
        assert_eq!(
            status,
            Outcome::Continue(Some("idle | next index 1 | 0 items | stop disabled".to_owned()))
        );
        assert_eq!(execute(&mut controller, Command::Quit), Outcome::Quit);
    }
}
