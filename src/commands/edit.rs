use anyhow::Result;
use daybook_core::{Event, EventId, EventStore, FieldValue, PriorityLevel, Storage};
use owo_colors::OwoColorize;

use crate::render::render_field_diffs;

/// Fields to change; `None` keeps the current value.
#[derive(Default)]
pub struct EventChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub priority: Option<u8>,
    /// `Some(None)` removes the attachment.
    pub file: Option<Option<String>>,
}

impl EventChanges {
    pub fn apply(self, event: &Event) -> Result<Event> {
        if let Some(date) = &self.date {
            super::parse_date_arg(date)?;
        }
        if let Some(time) = &self.time {
            super::check_time_arg(time)?;
        }

        Ok(Event {
            id: event.id.clone(),
            title: self.title.unwrap_or_else(|| event.title.clone()),
            description: self.description.unwrap_or_else(|| event.description.clone()),
            time: self.time.map_or_else(|| event.time.clone(), FieldValue::from),
            date: self.date.map_or_else(|| event.date.clone(), FieldValue::from),
            priority: match self.priority {
                Some(level) => PriorityLevel::new(level)?,
                None => event.priority,
            },
            file: match self.file {
                Some(file) => file.map(FieldValue::from),
                None => event.file.clone(),
            },
        })
    }
}

pub fn run<S: Storage>(store: &mut EventStore<S>, id: &EventId, changes: EventChanges) -> Result<()> {
    let Some(current) = store.find(id).cloned() else {
        println!("{}", format!("No event with id {}", id).dimmed());
        return Ok(());
    };

    let updated = changes.apply(&current)?;
    let diffs = render_field_diffs(&current, &updated);

    store.selection_mut().selected_event = Some(id.clone());
    store.selection_mut().is_editing = true;
    let saved = store.edit_event(&updated, id);
    store.selection_mut().is_editing = false;
    saved?;

    if diffs.is_empty() {
        println!("{}", "Nothing changed".dimmed());
    } else {
        println!("{} {}", "Updated".yellow(), updated.title);
        for line in diffs {
            println!("   {}", line);
        }
    }

    Ok(())
}
