//! Printing of the static locale tables.

use anyhow::Result;
use daybook_core::locale::{MONTHS, PRIORITIES, WEEKDAYS};
use daybook_core::PriorityLevel;
use owo_colors::OwoColorize;

use crate::render::Render;

pub fn priorities() -> Result<()> {
    for priority in PRIORITIES {
        let level = PriorityLevel::new(priority.id)?;
        println!("{} {} {}", level.render(), priority.id, priority.color.dimmed());
    }
    Ok(())
}

pub fn weekdays() -> Result<()> {
    for (i, name) in WEEKDAYS.iter().enumerate() {
        println!("{} {}", (i + 1).dimmed(), name);
    }
    Ok(())
}

pub fn months() -> Result<()> {
    for month in MONTHS {
        println!("{:>2} {}", month.id.dimmed(), month.name);
    }
    Ok(())
}
