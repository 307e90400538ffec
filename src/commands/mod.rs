//! REPL commands
//!
//! Each command reads its arguments from the cleaned input line, talks to
//! the catalog through [`State::api`] and writes its report to `out`.

mod catch;
mod explore;
mod map;
mod pokedex;

pub use catch::{attempt_catch, catch_chance};

use std::io::{self, Write};

use thiserror::Error;

use crate::api::{FetchError, Transport};
use crate::state::State;

/// What the REPL should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    Exit,
}

/// Errors reported by a command back to the REPL
#[derive(Debug, Error)]
pub enum CommandError {
    /// A required argument was not given
    #[error("usage: {usage}")]
    MissingArgument { usage: &'static str },

    /// The catalog has no resource by that name
    #[error("no {kind} named '{name}'")]
    NotFound { kind: &'static str, name: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl CommandError {
    /// Maps a 404 for `name` to [`CommandError::NotFound`]
    fn from_lookup(err: FetchError, kind: &'static str, name: &str) -> Self {
        if err.is_not_found() {
            CommandError::NotFound {
                kind,
                name: name.to_string(),
            }
        } else {
            CommandError::Fetch(err)
        }
    }
}

/// All commands the REPL understands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Map,
    MapBack,
    Explore,
    Catch,
    Inspect,
    Pokedex,
}

impl Command {
    /// Every command, in the order `help` lists them
    pub const ALL: [Command; 8] = [
        Command::Help,
        Command::Exit,
        Command::Map,
        Command::MapBack,
        Command::Explore,
        Command::Catch,
        Command::Inspect,
        Command::Pokedex,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Command::Help => "help",
            Command::Exit => "exit",
            Command::Map => "map",
            Command::MapBack => "mapb",
            Command::Explore => "explore",
            Command::Catch => "catch",
            Command::Inspect => "inspect",
            Command::Pokedex => "pokedex",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Command::Help => "Shows how to use the pokedex cli tool",
            Command::Exit => "Exits the pokedex",
            Command::Map => "Lists the next page of location areas",
            Command::MapBack => "Lists the previous page of location areas",
            Command::Explore => "Lists the pokemon found in a location area: explore <area>",
            Command::Catch => "Throws a Pokeball at a pokemon: catch <pokemon>",
            Command::Inspect => "Shows details of a caught pokemon: inspect <pokemon>",
            Command::Pokedex => "Lists every pokemon you have caught",
        }
    }

    /// Looks a command up by its typed name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }

    /// Runs the command against `state`, writing its output to `out`
    pub async fn run<T, W>(
        self,
        state: &mut State<T>,
        args: &[String],
        out: &mut W,
    ) -> Result<ControlFlow, CommandError>
    where
        T: Transport,
        W: Write,
    {
        match self {
            Command::Help => help(out)?,
            Command::Exit => {
                writeln!(out, "Closing the Pokedex... Goodbye!")?;
                return Ok(ControlFlow::Exit);
            }
            Command::Map => map::map(state, out).await?,
            Command::MapBack => map::map_back(state, out).await?,
            Command::Explore => explore::explore(state, args, out).await?,
            Command::Catch => catch::catch(state, args, out).await?,
            Command::Inspect => pokedex::inspect(state, args, out)?,
            Command::Pokedex => pokedex::pokedex(state, out)?,
        }
        Ok(ControlFlow::Continue)
    }
}

fn help<W: Write>(out: &mut W) -> Result<(), CommandError> {
    writeln!(out, "Welcome to the Pokedex!")?;
    writeln!(out, "Usage:")?;
    writeln!(out)?;
    for cmd in Command::ALL {
        writeln!(out, "{}: {}", cmd.name(), cmd.description())?;
    }
    Ok(())
}

/// Returns the first argument or a usage error
fn required_arg<'a>(args: &'a [String], usage: &'static str) -> Result<&'a str, CommandError> {
    args.first()
        .map(String::as_str)
        .ok_or(CommandError::MissingArgument { usage })
}
