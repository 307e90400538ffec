//! `catch`: throw a Pokeball, with odds falling as base experience rises

use std::io::Write;

use chrono::Local;
use rand::{Rng, RngCore};

use super::{required_arg, CommandError};
use crate::api::Transport;
use crate::state::{CaughtPokemon, State};

const MIN_EXP: f64 = 40.0;
const MAX_EXP: f64 = 255.0;
const MIN_CHANCE: f64 = 0.05;
const MAX_CHANCE: f64 = 0.95;
/// Steepness of the difficulty curve
const CURVE_FACTOR: i32 = 2;

/// Probability of catching a pokemon with the given base experience
///
/// Falls off quadratically from 40 to 255 experience and is clamped to
/// `[0.05, 0.95]`. Unknown experience counts as the easiest case.
pub fn catch_chance(base_experience: Option<u32>) -> f64 {
    let exp = base_experience.map_or(MIN_EXP, f64::from);
    let difficulty = (exp - MIN_EXP) / (MAX_EXP - MIN_EXP);
    (1.0 - difficulty)
        .max(0.0)
        .powi(CURVE_FACTOR)
        .clamp(MIN_CHANCE, MAX_CHANCE)
}

/// Rolls once against [`catch_chance`]
pub fn attempt_catch<R: RngCore + ?Sized>(rng: &mut R, base_experience: Option<u32>) -> bool {
    rng.gen::<f64>() < catch_chance(base_experience)
}

pub(super) async fn catch<T: Transport, W: Write>(
    state: &mut State<T>,
    args: &[String],
    out: &mut W,
) -> Result<(), CommandError> {
    let name = required_arg(args, "catch <pokemon>")?;
    writeln!(out, "Throwing a Pokeball at {name}...")?;

    let pokemon = state
        .api
        .pokemon(name)
        .await
        .map_err(|e| CommandError::from_lookup(e, "pokemon", name))?;

    if attempt_catch(state.rng.as_mut(), pokemon.base_experience) {
        writeln!(out, "{name} was caught!")?;
        // Keyed by what the user typed so `inspect` finds it the same way
        state.pokedex.insert(
            name.to_string(),
            CaughtPokemon {
                pokemon,
                caught_at: Local::now(),
            },
        );
    } else {
        writeln!(out, "{name} escaped!")?;
    }
    Ok(())
}
