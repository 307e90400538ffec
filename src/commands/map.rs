//! `map` and `mapb`: page through location areas

use std::io::Write;

use super::CommandError;
use crate::api::{NamedApiResourceList, Transport};
use crate::state::State;

pub(super) async fn map<T, W>(state: &mut State<T>, out: &mut W) -> Result<(), CommandError>
where
    T: Transport,
    W: Write,
{
    if state.locations_shown && state.next_locations_url.is_none() {
        writeln!(out, "you're on the last page")?;
        return Ok(());
    }

    let page = state
        .api
        .location_areas(state.next_locations_url.as_deref())
        .await?;
    show_page(state, page, out)
}

pub(super) async fn map_back<T, W>(state: &mut State<T>, out: &mut W) -> Result<(), CommandError>
where
    T: Transport,
    W: Write,
{
    let Some(prev) = state.prev_locations_url.clone() else {
        writeln!(out, "you're on the first page")?;
        return Ok(());
    };

    let page = state.api.location_areas(Some(&prev)).await?;
    show_page(state, page, out)
}

fn show_page<T, W: Write>(
    state: &mut State<T>,
    page: NamedApiResourceList,
    out: &mut W,
) -> Result<(), CommandError> {
    for area in &page.results {
        writeln!(out, "{}", area.name)?;
    }
    state.next_locations_url = page.next;
    state.prev_locations_url = page.previous;
    state.locations_shown = true;
    Ok(())
}
