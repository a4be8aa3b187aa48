//! `slot` CLI — add activities to a day schedule, resolving conflicts automatically.
//!
//! ## Usage
//!
//! ```sh
//! # Add an activity for today; it is moved past any conflict
//! slot add --title "Evening walk" --start 18:00 --end 18:45
//!
//! # Add for a specific date, using a different schedule file
//! slot --store ~/wellness.json add --title Yoga --start 07:00 --end 07:30 --date 2026-03-01
//!
//! # See what a proposal would collide with, without saving it
//! slot check --start 09:30 --end 10:30
//!
//! # Show the schedule, grouped by date
//! slot agenda
//!
//! # Free slots of at least 45 minutes
//! slot free --min 45
//!
//! # Mark an item done, or delete it
//! slot toggle --id <ID>
//! slot remove --id <ID>
//!
//! # Reminders still due after a given instant
//! slot reminders --now 2026-03-01T08:00
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{ArgAction, Parser, Subcommand};
use slot_engine::clock::parse_date;
use slot_engine::{group_by_date, JsonFileStore, NewActivity, Scheduler, SchedulerConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slot",
    version,
    about = "Conflict-aware day scheduler for wellness activities"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Schedule file (JSON array of items); created on first write
    #[arg(long, global = true, default_value = "schedule.json")]
    store: PathBuf,

    /// Scheduler configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Schedule an activity, moving it past conflicts, and save it
    Add {
        #[arg(long)]
        title: String,
        /// Start time (HH:MM)
        #[arg(long)]
        start: String,
        /// End time (HH:MM)
        #[arg(long)]
        end: String,
        /// Date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<String>,
    },
    /// List conflicts a proposed activity would have, without saving
    Check {
        #[arg(long, default_value = "proposed activity")]
        title: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        date: Option<String>,
    },
    /// Show scheduled items grouped by date
    Agenda {
        /// Only this date (YYYY-MM-DD); all dates if omitted
        #[arg(long)]
        date: Option<String>,
    },
    /// Show free slots for a date
    Free {
        #[arg(long)]
        date: Option<String>,
        /// Minimum slot length in minutes
        #[arg(long, default_value_t = 1)]
        min: u32,
    },
    /// Flip the completed flag of an item
    Toggle {
        #[arg(long)]
        id: String,
    },
    /// Delete an item
    Remove {
        #[arg(long)]
        id: String,
    },
    /// Show reminders that have not fired yet
    Reminders {
        /// Current instant (YYYY-MM-DDTHH:MM); defaults to now
        #[arg(long)]
        now: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let config = load_config(cli.config.as_deref())?;
    let scheduler = Scheduler::with_config(JsonFileStore::new(&cli.store), config);

    match cli.command {
        Commands::Add {
            title,
            start,
            end,
            date,
        } => {
            let activity = NewActivity::new(title, &start, &end)?;
            let date = resolve_date(date.as_deref())?;
            let scheduled = scheduler
                .schedule(activity, date)
                .context("Failed to schedule activity")?;
            println!("{}", scheduled.message());
            println!("{}", serde_json::to_string_pretty(&scheduled.item)?);
        }
        Commands::Check {
            title,
            start,
            end,
            date,
        } => {
            let activity = NewActivity::new(title, &start, &end)?;
            let date = resolve_date(date.as_deref())?;
            let conflicts = scheduler.check(&activity, date)?;
            if conflicts.is_empty() {
                println!("No conflicts on {}", date);
            }
            for conflict in conflicts {
                println!(
                    "Conflicts with \"{}\" {}-{} ({} min overlap)",
                    conflict.existing.title,
                    conflict.existing.start_time,
                    conflict.existing.end_time,
                    conflict.overlap_minutes
                );
            }
        }
        Commands::Agenda { date } => {
            let date = date.as_deref().map(parse_date).transpose()?;
            let items = scheduler.agenda(date)?;
            if items.is_empty() {
                println!("Nothing scheduled");
            }
            for (day, bucket) in group_by_date(&items) {
                println!("{}", day);
                for item in bucket {
                    let mark = if item.completed { "x" } else { " " };
                    println!(
                        "  [{}] {}-{}  {}  ({})",
                        mark, item.start_time, item.end_time, item.title, item.id
                    );
                }
            }
        }
        Commands::Free { date, min } => {
            let date = resolve_date(date.as_deref())?;
            for slot in scheduler.free_slots(date, min)? {
                println!("{}-{} ({} min)", slot.start, slot.end, slot.duration_minutes);
            }
        }
        Commands::Toggle { id } => {
            let item = scheduler
                .toggle_completed(&id)
                .with_context(|| format!("Failed to toggle item {}", id))?;
            println!("{}", serde_json::to_string_pretty(&item)?);
        }
        Commands::Remove { id } => {
            scheduler
                .remove(&id)
                .with_context(|| format!("Failed to remove item {}", id))?;
            println!("Removed {}", id);
        }
        Commands::Reminders { now } => {
            let now = match now {
                Some(raw) => NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M")
                    .with_context(|| format!("Invalid --now value: {}", raw))?,
                None => Local::now().naive_local(),
            };
            for reminder in scheduler.pending_reminders(now)? {
                println!(
                    "{}  {}",
                    reminder.fire_at.format("%Y-%m-%d %H:%M"),
                    reminder.message()
                );
            }
        }
    }

    Ok(())
}

/// Install the stderr tracing subscriber. `RUST_LOG` overrides `-v`.
fn init_tracing(verbose: u8) -> Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow::anyhow!("Failed to initialize logging: {}", err))
}

fn load_config(path: Option<&Path>) -> Result<SchedulerConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            SchedulerConfig::from_json(&raw)
                .with_context(|| format!("Invalid config: {}", path.display()))
        }
        None => Ok(SchedulerConfig::default()),
    }
}

fn resolve_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(raw) => Ok(parse_date(raw)?),
        None => Ok(Local::now().date_naive()),
    }
}
