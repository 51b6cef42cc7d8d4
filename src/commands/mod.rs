pub mod add;
pub mod config;
pub mod delete;
pub mod edit;
pub mod list;
pub mod month;
pub mod move_event;
pub mod show;
pub mod tables;

use anyhow::Result;
use chrono::NaiveDate;
use daybook_core::event;

/// Parse and validate a YYYY-MM-DD date given on the command line.
pub fn parse_date_arg(s: &str) -> Result<NaiveDate> {
    Ok(event::parse_date(s)?)
}

/// Validate an HH:MM time given on the command line.
pub fn check_time_arg(s: &str) -> Result<()> {
    event::parse_time(s)?;
    Ok(())
}
