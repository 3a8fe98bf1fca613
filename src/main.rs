mod commands;
mod data;
mod render;
mod utils;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use remindr_core::config::RemindrConfig;
use remindr_core::{EventId, Priority};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::data::DataFile;

#[derive(Parser)]
#[command(name = "remindr")]
#[command(about = "Keep track of reminders and events from the command line")]
struct Cli {
    /// Use this data file instead of the one from the config
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// Print debug logs to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new event
    Add {
        /// Event title
        title: String,

        /// When the event happens (e.g. "2025-03-20 15:00" or "tomorrow 3pm")
        #[arg(short, long)]
        at: String,

        /// Event description
        #[arg(short, long, default_value = "")]
        description: String,

        /// Priority: high, medium, low (or 1, 2, 3)
        #[arg(short, long, default_value = "medium")]
        priority: Priority,
    },
    /// List events, ordered by priority then time
    List {
        /// Only events that are still ahead
        #[arg(long, conflicts_with_all = ["due", "priority", "by_time"])]
        upcoming: bool,

        /// Only events whose time has passed and are not completed
        #[arg(long, conflicts_with_all = ["priority", "by_time"])]
        due: bool,

        /// Only events with this priority
        #[arg(short, long, conflicts_with = "by_time")]
        priority: Option<Priority>,

        /// Order by time instead of priority
        #[arg(long)]
        by_time: bool,
    },
    /// Find events by title or by date
    Search {
        /// Text the title must contain (case-sensitive)
        #[arg(required_unless_present = "date", conflicts_with = "date")]
        text: Option<String>,

        /// Local date the event falls on (e.g. "2025-03-20" or "friday")
        #[arg(long)]
        date: Option<String>,
    },
    /// Show a single event
    Show { id: EventId },
    /// Change an event. Fields that are not given keep their current value.
    Update {
        id: EventId,

        #[arg(long)]
        title: Option<String>,

        #[arg(short, long)]
        description: Option<String>,

        #[arg(short, long)]
        at: Option<String>,

        #[arg(short, long)]
        priority: Option<Priority>,
    },
    /// Delete an event
    Delete {
        id: EventId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Mark an event as completed
    Done { id: EventId },
    /// Show due events and events coming up soon
    Reminders {
        /// How many hours ahead to look (defaults to upcoming_hours from config)
        #[arg(long)]
        hours: Option<u32>,
    },
    /// Copy the data file to <file>.backup
    Backup,
    /// Replace the data file with its backup
    Restore,
    /// Rewrite the data file
    Save {
        /// Write even if the existing file could not be read
        #[arg(long)]
        force: bool,
    },
    /// Read the data file and report what it contains
    Reload,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = RemindrConfig::load()?;
    let path = cli.file.unwrap_or_else(|| config.data_path());

    match cli.command {
        Commands::Add {
            title,
            at,
            description,
            priority,
        } => {
            let mut data = DataFile::open(path, config.max_events);
            commands::add::run(&mut data, title, description, &at, priority)
        }
        Commands::List {
            upcoming,
            due,
            priority,
            by_time,
        } => {
            let data = DataFile::open(path, config.max_events);
            let view = commands::list::View::from_flags(upcoming, due, priority, by_time);
            commands::list::run(&data, view)
        }
        Commands::Search { text, date } => {
            let data = DataFile::open(path, config.max_events);
            commands::search::run(&data, text.as_deref(), date.as_deref())
        }
        Commands::Show { id } => {
            let data = DataFile::open(path, config.max_events);
            commands::show::run(&data, id)
        }
        Commands::Update {
            id,
            title,
            description,
            at,
            priority,
        } => {
            let mut data = DataFile::open(path, config.max_events);
            let changes = commands::update::Changes {
                title,
                description,
                at,
                priority,
            };
            commands::update::run(&mut data, id, changes)
        }
        Commands::Delete { id, force } => {
            let mut data = DataFile::open(path, config.max_events);
            commands::delete::run(&mut data, id, force)
        }
        Commands::Done { id } => {
            let mut data = DataFile::open(path, config.max_events);
            commands::done::run(&mut data, id)
        }
        Commands::Reminders { hours } => {
            let data = DataFile::open(path, config.max_events);
            commands::reminders::run(&data, hours.unwrap_or(config.upcoming_hours))
        }
        Commands::Backup => commands::backup::create(&path),
        Commands::Restore => commands::backup::restore(&path),
        Commands::Save { force } => {
            let data = DataFile::open(path, config.max_events);
            commands::save::run(&data, force)
        }
        Commands::Reload => commands::save::reload(&path),
    }
}

/// Logs go to stderr so command output stays clean.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("remindr=debug,remindr_core=debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("remindr=warn,remindr_core=warn"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
