mod commands;
mod render;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daybook_core::daybook_config::DaybookConfig;
use daybook_core::{EventId, EventStore, FileStorage, LoadSource};
use owo_colors::OwoColorize;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "daybook")]
#[command(about = "Keep a small local calendar of events")]
struct Cli {
    /// Directory holding events.json (overrides data_dir from config.toml)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List events, grouped by date
    List {
        /// Only events on this date (YYYY-MM-DD)
        #[arg(short, long, conflicts_with_all = ["month", "year"])]
        date: Option<String>,

        /// Only events in this month (1-12)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Year for --month (defaults to the current year)
        #[arg(short, long, requires = "month")]
        year: Option<i32>,
    },
    /// Show a month grid with event counts
    Month {
        /// Month (1-12), defaults to the current month
        #[arg(value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,

        /// Year, defaults to the current year
        year: Option<i32>,
    },
    /// Add a new event
    Add {
        title: String,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: String,

        /// Time of day (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        #[arg(long, default_value = "")]
        description: String,

        /// Priority level (1-6)
        #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=6))]
        priority: u8,

        /// Attachment file name or path
        #[arg(short, long)]
        file: Option<String>,

        /// Explicit id (defaults to the next free number)
        #[arg(long)]
        id: Option<EventId>,
    },
    /// Edit an existing event, keeping unspecified fields
    Edit {
        id: EventId,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        /// Date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,

        /// Time of day (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        /// Priority level (1-6)
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=6))]
        priority: Option<u8>,

        /// Attachment file name or path
        #[arg(short, long, conflicts_with = "no_file")]
        file: Option<String>,

        /// Remove the attachment
        #[arg(long)]
        no_file: bool,
    },
    /// Delete an event
    Delete { id: EventId },
    /// Move an event to another date
    Move {
        id: EventId,

        /// New date (YYYY-MM-DD)
        date: String,
    },
    /// Show one event in detail
    Show { id: EventId },
    /// Show config paths, or change them
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
    /// Print the priority levels and their colors
    Priorities,
    /// Print the weekday names
    Weekdays,
    /// Print the month names
    Months,
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Store events in DIR from now on
    SetDataDir { dir: PathBuf },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("DAYBOOK_LOG").unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Config { action: None } => return commands::config::run(),
        Commands::Config {
            action: Some(ConfigAction::SetDataDir { dir }),
        } => return commands::config::set_data_dir(dir),
        Commands::Priorities => return commands::tables::priorities(),
        Commands::Weekdays => return commands::tables::weekdays(),
        Commands::Months => return commands::tables::months(),
        _ => {}
    }

    let mut store = open_store(cli.data_dir)?;

    match cli.command {
        Commands::List { date, month, year } => {
            let filter = commands::list::Filter::from_args(date.as_deref(), month, year)?;
            commands::list::run(&store, filter)
        }
        Commands::Month { month, year } => commands::month::run(&store, month, year),
        Commands::Add {
            title,
            date,
            time,
            description,
            priority,
            file,
            id,
        } => commands::add::run(
            &mut store,
            commands::add::NewEvent {
                id,
                title,
                description,
                date,
                time,
                priority,
                file,
            },
        ),
        Commands::Edit {
            id,
            title,
            description,
            date,
            time,
            priority,
            file,
            no_file,
        } => commands::edit::run(
            &mut store,
            &id,
            commands::edit::EventChanges {
                title,
                description,
                date,
                time,
                priority,
                file: if no_file { Some(None) } else { file.map(Some) },
            },
        ),
        Commands::Delete { id } => commands::delete::run(&mut store, &id),
        Commands::Move { id, date } => commands::move_event::run(&mut store, &id, &date),
        Commands::Show { id } => commands::show::run(&mut store, &id),
        Commands::Config { .. }
        | Commands::Priorities
        | Commands::Weekdays
        | Commands::Months => Ok(()),
    }
}

fn open_store(data_dir: Option<PathBuf>) -> Result<EventStore<FileStorage>> {
    let storage = match data_dir {
        Some(dir) => FileStorage::new(dir),
        None => DaybookConfig::load()
            .context("Failed to load ~/.config/daybook/config.toml")?
            .storage(),
    };

    let path = storage.slot_path(daybook_core::store::EVENTS_KEY);
    let store = EventStore::open(storage)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    tracing::debug!(path = %path.display(), source = ?store.load_source(), "event store ready");

    if store.load_source() == LoadSource::DefaultMalformed {
        eprintln!(
            "{} {} could not be read, starting from the sample events. \
            It will be overwritten on the next change.",
            "warning:".yellow().bold(),
            path.display()
        );
    }

    Ok(store)
}
