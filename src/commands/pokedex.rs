//! `inspect` and `pokedex`: read back caught pokemon. Neither touches the network.

use std::io::Write;

use super::{required_arg, CommandError};
use crate::state::State;

pub(super) fn inspect<T, W: Write>(
    state: &State<T>,
    args: &[String],
    out: &mut W,
) -> Result<(), CommandError> {
    let name = required_arg(args, "inspect <pokemon>")?;

    let Some(caught) = state.pokedex.get(name) else {
        writeln!(out, "you have not caught that pokemon")?;
        return Ok(());
    };
    let pokemon = &caught.pokemon;

    writeln!(out, "Name: {}", pokemon.name)?;
    writeln!(out, "Height: {}", pokemon.height)?;
    writeln!(out, "Weight: {}", pokemon.weight)?;
    writeln!(out, "Caught: {}", caught.caught_at.format("%Y-%m-%d %H:%M"))?;
    writeln!(out, "Stats:")?;
    for stat in &pokemon.stats {
        writeln!(out, "  -{}: {}", stat.stat.name, stat.base_stat)?;
    }
    writeln!(out, "Types:")?;
    for kind in &pokemon.types {
        writeln!(out, "  - {}", kind.kind.name)?;
    }
    Ok(())
}

pub(super) fn pokedex<T, W: Write>(state: &State<T>, out: &mut W) -> Result<(), CommandError> {
    if state.pokedex.is_empty() {
        writeln!(out, "Your Pokedex is empty. Try catching something!")?;
        return Ok(());
    }

    writeln!(out, "Your Pokedex:")?;
    for name in state.pokedex.keys() {
        writeln!(out, " - {name}")?;
    }
    Ok(())
}
