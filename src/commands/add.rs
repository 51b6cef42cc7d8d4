use anyhow::{Result, bail};
use daybook_core::{Event, EventId, EventStore, FieldValue, PriorityLevel, Storage};
use owo_colors::OwoColorize;

use crate::render::Render;

/// Fields for a new event as given on the command line.
pub struct NewEvent {
    pub id: Option<EventId>,
    pub title: String,
    pub description: String,
    pub date: String,
    pub time: Option<String>,
    pub priority: u8,
    pub file: Option<String>,
}

impl NewEvent {
    /// Validate the fields and turn them into an `Event`, allocating the next
    /// free numeric id unless one was given.
    pub fn into_event<S: Storage>(self, store: &EventStore<S>) -> Result<Event> {
        super::parse_date_arg(&self.date)?;
        if let Some(time) = &self.time {
            super::check_time_arg(time)?;
        }

        let id = match self.id {
            Some(id) if store.contains(&id) => bail!("An event with id {} already exists", id),
            Some(id) => id,
            None => store.next_numeric_id()?,
        };

        Ok(Event {
            id,
            title: self.title,
            description: self.description,
            time: self.time.unwrap_or_default().into(),
            date: self.date.into(),
            priority: PriorityLevel::new(self.priority)?,
            file: self.file.map(FieldValue::from),
        })
    }
}

pub fn run<S: Storage>(store: &mut EventStore<S>, new_event: NewEvent) -> Result<()> {
    let event = new_event.into_event(store)?;
    let date = event.date.clone();
    let line = event.render();

    store.add_event(event)?;

    println!("{} {} {}", "Added".green(), date, line);

    Ok(())
}
