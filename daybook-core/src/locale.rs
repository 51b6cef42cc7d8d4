//! Static locale tables: weekday names, month names and priority colors.
//!
//! These are shipped as-is and never change at runtime.

use chrono::Weekday;
use serde::Serialize;

/// Weekday names, Monday first.
pub const WEEKDAYS: [&str; 7] = [
    "Dushanba",
    "Seshanba",
    "Chorshanba",
    "Payshanba",
    "Juma",
    "Shanba",
    "Yakshanba",
];

/// A month name with its 0-based index (January = 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Month {
    pub name: &'static str,
    pub id: u32,
}

pub const MONTHS: [Month; 12] = [
    Month { name: "Yanvar", id: 0 },
    Month { name: "Fevral", id: 1 },
    Month { name: "Mart", id: 2 },
    Month { name: "Aprel", id: 3 },
    Month { name: "May", id: 4 },
    Month { name: "Iyun", id: 5 },
    Month { name: "Iyul", id: 6 },
    Month { name: "Avgust", id: 7 },
    Month { name: "Sentabr", id: 8 },
    Month { name: "Octabr", id: 9 },
    Month { name: "Noyabr", id: 10 },
    Month { name: "Dekabr", id: 11 },
];

/// A priority level with its display color (`#RRGGBB`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Priority {
    pub id: u8,
    pub color: &'static str,
}

/// Priority levels, 1-based.
pub const PRIORITIES: [Priority; 6] = [
    Priority { id: 1, color: "#E05454" },
    Priority { id: 2, color: "#DE54E0" },
    Priority { id: 3, color: "#39C54F" },
    Priority { id: 4, color: "#5462E0" },
    Priority { id: 5, color: "#E08F54" },
    Priority { id: 6, color: "#E0CA54" },
];

impl Priority {
    /// Decode the hex color into RGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        let hex = self.color.trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}

/// Look up a month by its 0-based id.
pub fn month(id: u32) -> Option<&'static Month> {
    MONTHS.get(id as usize)
}

/// Look up a priority level by its 1-based id.
pub fn priority(id: u8) -> Option<&'static Priority> {
    PRIORITIES.iter().find(|p| p.id == id)
}
