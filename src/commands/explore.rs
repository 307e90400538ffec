//! `explore`: list the pokemon found in a location area

use std::io::Write;

use super::{required_arg, CommandError};
use crate::api::Transport;
use crate::state::State;

pub(super) async fn explore<T: Transport, W: Write>(
    state: &mut State<T>,
    args: &[String],
    out: &mut W,
) -> Result<(), CommandError> {
    let name = required_arg(args, "explore <area>")?;
    writeln!(out, "Exploring {name}...")?;

    let area = state
        .api
        .location_area(name)
        .await
        .map_err(|e| CommandError::from_lookup(e, "location area", name))?;

    if area.pokemon_encounters.is_empty() {
        writeln!(out, "No pokemon found.")?;
        return Ok(());
    }

    writeln!(out, "Found Pokemon:")?;
    for encounter in &area.pokemon_encounters {
        writeln!(out, " - {}", encounter.pokemon.name)?;
    }
    Ok(())
}
