use std::collections::HashMap;

use anyhow::{Result, anyhow};
use chrono::{Datelike, Local, NaiveDate};
use daybook_core::locale::{self, WEEKDAYS};
use daybook_core::{EventStore, Storage};
use owo_colors::OwoColorize;

/// One calendar row, Monday first. `None` pads days outside the month.
pub type Week = [Option<u32>; 7];

/// Weeks covering `month` (1-12) of `year`, or `None` for an invalid month.
pub fn month_grid(year: i32, month: u32) -> Option<Vec<Week>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let days = days_in_month(year, month)?;

    let mut weeks = Vec::new();
    let mut week: Week = [None; 7];
    let mut col = first.weekday().num_days_from_monday() as usize;

    for day in 1..=days {
        week[col] = Some(day);
        col += 1;
        if col == 7 {
            weeks.push(week);
            week = [None; 7];
            col = 0;
        }
    }
    if col > 0 {
        weeks.push(week);
    }

    Some(weeks)
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(next.pred_opt()?.day())
}

pub fn run<S: Storage>(store: &EventStore<S>, month: Option<u32>, year: Option<i32>) -> Result<()> {
    let today = Local::now().date_naive();
    let month = month.unwrap_or_else(|| today.month());
    let year = year.unwrap_or_else(|| today.year());

    let weeks = month_grid(year, month).ok_or_else(|| anyhow!("Invalid month {}/{}", month, year))?;
    let name = locale::month(month - 1).map(|m| m.name).unwrap_or_default();

    // Day of month -> number of events
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for date in store.events().iter().filter_map(|e| e.naive_date().ok()) {
        if date.year() == year && date.month() == month {
            *counts.entry(date.day()).or_default() += 1;
        }
    }

    println!("{}", format!("{} {}", name, year).bold());

    let header: Vec<String> = WEEKDAYS
        .iter()
        .map(|d| format!("{:>4}", d.chars().take(2).collect::<String>()))
        .collect();
    println!("{}", header.join("").dimmed());

    for week in weeks {
        let mut line = String::new();
        for cell in week {
            let text = match cell {
                None => "    ".to_string(),
                Some(day) => {
                    let label = format!("{:>3}", day);
                    let is_today =
                        today.year() == year && today.month() == month && today.day() == day;
                    let label = match counts.get(&day) {
                        Some(_) if is_today => label.green().bold().to_string(),
                        Some(_) => label.bold().to_string(),
                        None if is_today => label.green().to_string(),
                        None => label.dimmed().to_string(),
                    };
                    let marker = if counts.contains_key(&day) { "*" } else { " " };
                    format!("{}{}", label, marker.yellow())
                }
            };
            line.push_str(&text);
        }
        println!("{}", line);
    }

    let total: usize = counts.values().sum();
    println!();
    println!(
        "{}",
        format!("{} {} this month", total, crate::render::pluralize("event", total)).dimmed()
    );

    Ok(())
}
