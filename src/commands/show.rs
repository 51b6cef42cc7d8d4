use anyhow::Result;
use daybook_core::{EventId, EventStore, Storage};
use owo_colors::OwoColorize;

use crate::render::render_details;

pub fn run<S: Storage>(store: &mut EventStore<S>, id: &EventId) -> Result<()> {
    store.selection_mut().selected_event = Some(id.clone());

    match store.selected() {
        Some(event) => println!("{}", render_details(event)),
        None => println!("{}", format!("No event with id {}", id).dimmed()),
    }

    Ok(())
}
