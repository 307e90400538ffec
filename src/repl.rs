//! Read-eval-print loop over the pokedex commands

use std::io::{self, Write};

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use tracing::debug;

use crate::api::Transport;
use crate::commands::{Command, CommandError, ControlFlow};
use crate::state::State;

const PROMPT: &str = "Pokedex > ";

/// Splits a raw input line into lowercase words
pub fn clean_input(input: &str) -> Vec<String> {
    input.split_whitespace().map(str::to_lowercase).collect()
}

/// Runs one input line: looks up the command named by its first word and
/// passes it the remaining words
///
/// Blank lines do nothing and unknown commands get a hint.
pub async fn dispatch_line<T, W>(
    state: &mut State<T>,
    line: &str,
    out: &mut W,
) -> Result<ControlFlow, CommandError>
where
    T: Transport,
    W: Write,
{
    let words = clean_input(line);
    let Some((name, args)) = words.split_first() else {
        return Ok(ControlFlow::Continue);
    };

    match Command::from_name(name) {
        Some(cmd) => {
            debug!(command = cmd.name(), ?args, "dispatching");
            cmd.run(state, args, out).await
        }
        None => {
            writeln!(out, "Unknown command: \"{name}\". Type \"help\" for a list of commands.")?;
            Ok(ControlFlow::Continue)
        }
    }
}

/// Interactive prompt reading commands from the terminal
pub struct Repl {
    editor: Editor<(), DefaultHistory>,
}

impl Repl {
    pub fn new() -> Result<Self, ReadlineError> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();

        Ok(Self {
            editor: Editor::with_config(config)?,
        })
    }

    /// Reads and runs commands until `exit` or end of input
    ///
    /// Command failures are printed and the loop carries on.
    pub async fn run<T: Transport>(&mut self, state: &mut State<T>) -> Result<(), ReadlineError> {
        let mut stdout = io::stdout();

        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => match dispatch_line(state, &line, &mut stdout).await {
                    Ok(ControlFlow::Continue) => {}
                    Ok(ControlFlow::Exit) => break,
                    Err(e) => eprintln!("Error: {e}"),
                },
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C clears the line but keeps the session
                    println!("(Interrupted - type exit to quit)");
                }
                Err(ReadlineError::Eof) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
