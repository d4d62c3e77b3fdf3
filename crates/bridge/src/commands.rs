//! Forwards text commands into the host engine's builtin command handler.
//!
//! Protocol glue only: the engine parses and executes its own commands; this
//! module maps the issuing actor to the engine's issuer id and joins the
//! argument tail.

use crate::error::CommandError;

/// Who issued a forwarded command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandActor {
    /// The server console.
    Console,
    /// A connected client, by session id.
    Client(u64),
}

impl CommandActor {
    /// Engine-side issuer id. The console issues under the nil id.
    pub fn issuer_id(self) -> u64 {
        match self {
            Self::Console => 0,
            Self::Client(id) => id,
        }
    }
}

/// Capability for pushing a builtin command into the engine.
///
/// Invoked on the engine's call thread; the engine executes synchronously.
pub trait CommandSink {
    fn run_command(&mut self, issuer: u64, name: &str, args: &str) -> Result<(), CommandError>;
}

/// Adapter around one registered engine command.
#[derive(Clone, Debug)]
pub struct BuiltinCommand {
    name: String,
}

impl BuiltinCommand {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Forwards the command line to the engine.
    ///
    /// `tokens` is the full line as typed; the first token is the command
    /// name and is dropped, the rest is joined into the engine's single
    /// argument string.
    pub fn execute<S: CommandSink>(
        &self,
        sink: &mut S,
        actor: CommandActor,
        tokens: &[&str],
    ) -> Result<(), CommandError> {
        let args = tokens
            .iter()
            .skip(1)
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        sink.run_command(actor.issuer_id(), &self.name, &args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        calls: Vec<(u64, String, String)>,
    }

    impl CommandSink for RecordingSink {
        fn run_command(
            &mut self,
            issuer: u64,
            name: &str,
            args: &str,
        ) -> Result<(), CommandError> {
            if name == "missing" {
                return Err(CommandError::UnknownCommand(name.to_string()));
            }
            self.calls.push((issuer, name.to_string(), args.to_string()));
            Ok(())
        }
    }

    #[test]
    fn forwards_name_and_joined_tail() {
        let mut sink = RecordingSink::default();
        let command = BuiltinCommand::new("give");

        command
            .execute(&mut sink, CommandActor::Client(7), &["give", "ammo", "30"])
            .unwrap();

        assert_eq!(sink.calls, [(7, "give".to_string(), "ammo 30".to_string())]);
    }

    #[test]
    fn console_issues_under_nil_id() {
        let mut sink = RecordingSink::default();
        let command = BuiltinCommand::new("save");

        command
            .execute(&mut sink, CommandActor::Console, &["save"])
            .unwrap();

        assert_eq!(sink.calls, [(0, "save".to_string(), String::new())]);
    }

    #[test]
    fn unknown_command_propagates() {
        let mut sink = RecordingSink::default();
        let command = BuiltinCommand::new("missing");

        let err = command
            .execute(&mut sink, CommandActor::Console, &["missing"])
            .unwrap_err();

        assert_eq!(err, CommandError::UnknownCommand("missing".to_string()));
    }
}
