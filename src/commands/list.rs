use anyhow::Result;
use chrono::{Datelike, Local, NaiveDate};
use daybook_core::{Event, EventStore, FieldValue, Storage};
use owo_colors::OwoColorize;

use crate::render::Render;

/// Which events to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    All,
    Date(NaiveDate),
    Month { year: i32, month: u32 },
}

impl Filter {
    pub fn from_args(date: Option<&str>, month: Option<u32>, year: Option<i32>) -> Result<Self> {
        if let Some(date) = date {
            return Ok(Filter::Date(super::parse_date_arg(date)?));
        }
        Ok(match month {
            Some(month) => Filter::Month {
                year: year.unwrap_or_else(|| Local::now().year()),
                month,
            },
            None => Filter::All,
        })
    }

    /// Events whose date can't be parsed only show up unfiltered.
    pub fn matches(&self, event: &Event) -> bool {
        match self {
            Filter::All => true,
            Filter::Date(d) => event.naive_date().is_ok_and(|date| date == *d),
            Filter::Month { year, month } => event
                .naive_date()
                .is_ok_and(|date| date.year() == *year && date.month() == *month),
        }
    }
}

/// Filtered events ordered by date then time, with unparseable dates last.
/// Ties keep collection order.
pub fn select<'a>(events: &'a [Event], filter: Filter) -> Vec<&'a Event> {
    let mut selected: Vec<&Event> = events.iter().filter(|e| filter.matches(e)).collect();
    selected.sort_by_key(|e| {
        let date = e.naive_date().ok();
        (date.is_none(), date, e.time.to_string())
    });
    selected
}

pub fn run<S: Storage>(store: &EventStore<S>, filter: Filter) -> Result<()> {
    let events = select(store.events(), filter);

    if events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    let mut current_date: Option<&FieldValue> = None;

    for event in events {
        if current_date != Some(&event.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", format_date_label(event).bold());
            current_date = Some(&event.date);
        }

        println!("  {}", event.render());
    }

    Ok(())
}

/// "Today", "Tomorrow" or e.g. "Wed Jan 10"; the raw date if it doesn't parse.
fn format_date_label(event: &Event) -> String {
    let Ok(date) = event.naive_date() else {
        return event.date.to_string();
    };
    let today = Local::now().date_naive();

    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ => date.format("%a %b %-d, %Y").to_string(),
    }
}
