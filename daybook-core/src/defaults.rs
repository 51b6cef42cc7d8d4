//! Built-in dataset used when nothing usable has been persisted yet.

use crate::event::{Event, EventId, PriorityLevel};

fn sample(id: i64, title: &str, description: &str, time: &str, date: &str, level: u8) -> Event {
    Event {
        id: EventId::Number(id),
        title: title.to_string(),
        description: description.to_string(),
        time: time.into(),
        date: date.into(),
        priority: PriorityLevel::new(level).unwrap_or_default(),
        file: None,
    }
}

pub fn default_events() -> Vec<Event> {
    vec![
        sample(1, "Team meeting", "Weekly planning", "10:00", "2024-01-08", 4),
        sample(2, "Doctor", "Annual checkup", "14:30", "2024-01-10", 1),
        sample(3, "Birthday", "Buy a cake", "18:00", "2024-01-14", 2),
        sample(4, "Gym", "Leg day", "07:00", "2024-01-16", 3),
    ]
}
