use anyhow::Result;
use daybook_core::{EventId, EventStore, Storage};
use owo_colors::OwoColorize;

pub fn run<S: Storage>(store: &mut EventStore<S>, id: &EventId, date: &str) -> Result<()> {
    super::parse_date_arg(date)?;

    let moved = store.drag_edit_event(id, date)?;

    if moved == 0 {
        println!("{}", format!("No event with id {}", id).dimmed());
    } else {
        println!("{} #{} to {}", "Moved".yellow(), id, date);
    }

    Ok(())
}
