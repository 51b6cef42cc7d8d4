//! Terminal rendering traits for daybook types.
//!
//! Extension traits that add colored output to daybook-core types using
//! owo_colors.

use daybook_core::{Event, FieldValue, PriorityLevel};
use owo_colors::OwoColorize;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for PriorityLevel {
    /// A colored swatch in the priority's display color.
    fn render(&self) -> String {
        let (r, g, b) = self.info().rgb();
        "●".truecolor(r, g, b).to_string()
    }
}

impl Render for Event {
    /// One line: swatch, time, title and id.
    fn render(&self) -> String {
        let id_tag = format!("#{}", self.id);
        format!(
            "{} {} {} {}",
            self.priority.render(),
            format_time(&self.time),
            self.title,
            id_tag.dimmed()
        )
    }
}

/// Right-aligned time column, "all-day" when no time was given.
pub fn format_time(time: &FieldValue) -> String {
    if time.is_blank() {
        format!("{:>7}", "all-day")
    } else {
        format!("{:>7}", time.to_string())
    }
}

/// Multi-line detail view of an event.
pub fn render_details(event: &Event) -> String {
    let mut lines = vec![
        format!("{} {}", event.priority.render(), event.title.bold()),
        format!("   {}: {}", "id".dimmed(), event.id),
        format!("   {}: {}", "date".dimmed(), event.date),
        format!("   {}: {}", "time".dimmed(), format_time(&event.time).trim_start()),
        format!(
            "   {}: {} ({})",
            "priority".dimmed(),
            event.priority.id(),
            event.priority.color()
        ),
    ];

    if !event.description.is_empty() {
        lines.push(format!("   {}: {}", "description".dimmed(), event.description));
    }
    if let Some(file) = &event.file {
        lines.push(format!("   {}: {}", "file".dimmed(), file));
    }

    lines.join("\n")
}

/// Field-by-field differences between two versions of an event.
pub fn render_field_diffs(old: &Event, new: &Event) -> Vec<String> {
    let mut lines = Vec::new();

    if old.id != new.id {
        lines.push(diff_line("id", &old.id.to_string(), &new.id.to_string()));
    }
    if old.title != new.title {
        lines.push(diff_line("title", &old.title, &new.title));
    }
    if old.description != new.description {
        lines.push(diff_line("description", &old.description, &new.description));
    }
    if old.date != new.date {
        lines.push(diff_line("date", &old.date.to_string(), &new.date.to_string()));
    }
    if old.time != new.time {
        lines.push(diff_line("time", &old.time.to_string(), &new.time.to_string()));
    }
    if old.priority != new.priority {
        lines.push(diff_line(
            "priority",
            &old.priority.id().to_string(),
            &new.priority.id().to_string(),
        ));
    }
    if old.file != new.file {
        let show = |f: &Option<FieldValue>| {
            f.as_ref().map_or_else(|| "(none)".to_string(), |v| v.to_string())
        };
        lines.push(diff_line("file", &show(&old.file), &show(&new.file)));
    }

    lines
}

fn diff_line(field: &str, old: &str, new: &str) -> String {
    format!("{}: {} → {}", field.dimmed(), old.red(), new.green())
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
