use anyhow::Result;
use daybook_core::{EventId, EventStore, Storage};
use owo_colors::OwoColorize;

use crate::render::pluralize;

pub fn run<S: Storage>(store: &mut EventStore<S>, id: &EventId) -> Result<()> {
    let removed = store.delete_event(id)?;

    if removed == 0 {
        println!("{}", format!("No event with id {}", id).dimmed());
    } else {
        println!("{} {} {}", "Deleted".red(), removed, pluralize("event", removed));
    }

    Ok(())
}
