//! Parish calendar CLI
//!
//! Month grid, day panel and weekly load on the terminal, plus the event
//! write path against a local JSON store.

#![allow(clippy::print_stdout)]

mod app;
mod render;

use std::path::PathBuf;

use anyhow::{Context, bail};
use application::{PanelMode, PanelState};
use clap::{Args, Parser, Subcommand};
use domain::{DateKey, EventId, EventKind, EventRecord, YearMonth, time_of_day};
use infrastructure::{AppConfig, init_telemetry};
use tracing::debug;

use crate::app::{App, Overrides};

/// Parish calendar CLI
#[derive(Parser)]
#[command(name = "parish-calendar")]
#[command(author, version, about = "Parish liturgical calendar", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, env = "PARISH_CONFIG")]
    config: Option<PathBuf>,

    /// JSON event store, overriding `store.events_path`
    #[arg(long)]
    events: Option<PathBuf>,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long)]
    today: Option<DateKey>,

    /// Act with edit privilege
    #[arg(long)]
    can_edit: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a month grid
    Month {
        /// Month to show (YYYY-MM); defaults to the configured or current month
        month: Option<YearMonth>,

        /// Step one month back
        #[arg(long, conflicts_with = "next")]
        prev: bool,

        /// Step one month forward
        #[arg(long)]
        next: bool,

        /// Draw dots instead of labeled pills
        #[arg(long)]
        compact: bool,
    },

    /// Open the day panel
    Day {
        /// Day to open (YYYY-MM-DD); defaults to today
        date: Option<DateKey>,

        /// Open in edit mode (needs edit privilege)
        #[arg(long)]
        edit: bool,

        /// Switch mode once after opening
        #[arg(long)]
        toggle: bool,
    },

    /// Show events per weekday for a week
    Week {
        /// First day of the week (YYYY-MM-DD); defaults to today
        from: Option<DateKey>,
    },

    /// Create an approved event (needs edit privilege)
    Create(EventArgs),

    /// Submit an event for approval
    Submit(EventArgs),

    /// Approve a pending event (needs edit privilege)
    Approve {
        /// Event id
        id: String,
    },

    /// Delete an event (needs edit privilege)
    Delete {
        /// Event id
        id: String,
    },
}

#[derive(Args)]
struct EventArgs {
    /// Day of the event (YYYY-MM-DD)
    date: DateKey,

    /// Title shown in the calendar
    title: String,

    /// liturgy, meeting, pastoral-visit, social-event or any other tag
    #[arg(short, long, default_value = "meeting")]
    kind: EventKind,

    /// Start time (HH:MM)
    #[arg(short, long)]
    time: Option<String>,

    #[arg(long)]
    location: Option<String>,

    /// Liturgical season label
    #[arg(long)]
    season: Option<String>,

    /// Liturgical color code (e.g. #8b0000)
    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    solemnity: bool,
}

impl EventArgs {
    fn into_record(self) -> anyhow::Result<EventRecord> {
        let mut event = EventRecord::new(EventId::generate(), self.date, self.kind, self.title)?;
        if let Some(raw) = self.time {
            let time = time_of_day::parse(&raw).with_context(|| format!("invalid time: {raw}"))?;
            event = event.with_start_time(time);
        }
        if let Some(location) = self.location {
            event = event.with_location(location);
        }
        if let Some(season) = self.season {
            event = event.with_season(season);
        }
        if let Some(color) = self.color {
            event = event.with_color_hint(color);
        }
        if self.solemnity {
            event = event.solemnity();
        }
        Ok(event)
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load_from(cli.config.as_deref())?;

    // Set up logging; -v wins over the configured filter
    let telemetry = match log_filter_from_verbosity(cli.verbose) {
        Some(filter) => config.telemetry.clone().with_log_filter(filter),
        None => config.telemetry.clone(),
    };
    init_telemetry(&telemetry)?;

    let compact = matches!(cli.command, Commands::Month { compact: true, .. });
    let mut app = App::build(
        &config,
        Overrides {
            events_path: cli.events,
            today: cli.today,
            can_edit: cli.can_edit,
            compact,
        },
    )
    .await?;

    match cli.command {
        Commands::Month {
            month, prev, next, ..
        } => {
            if let Some(month) = month {
                app.navigator.go_to(month);
            }
            if prev {
                app.navigator.previous();
            } else if next {
                app.navigator.next();
            }
            let view = app
                .calendar
                .render_month(app.navigator.current(), app.viewport)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print!("{}", render::month(&view, app.today()));
        },

        Commands::Day { date, edit, toggle } => {
            let date = date.unwrap_or_else(|| app.today());
            let mode = if edit { PanelMode::Edit } else { PanelMode::View };
            let mut outcome = app.panel.open(date, mode).await;
            if toggle && !app.panel.can_edit() {
                println!("Sem permissão para editar; mantendo visualização.");
            } else if toggle {
                outcome = app.panel.toggle_mode().await;
            }
            debug!(?outcome, stats = ?app.cache.stats(), "Day panel resolved");

            let state = app.panel.state();
            print!("{}", render::panel(&state));
            if let PanelState::Error { reason, .. } = state {
                bail!("failed to load {date}: {reason}");
            }
        },

        Commands::Week { from } => {
            let from = from.unwrap_or_else(|| app.today());
            let load = app
                .calendar
                .weekly_load(from)
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            print!("{}", render::week(&load, from));
        },

        Commands::Create(args) => {
            let event = app.agenda.create_event(args.into_record()?).await?;
            println!("Evento criado: {} [{}] em {}", event.title, event.id, event.date_key);
        },

        Commands::Submit(args) => {
            let event = app.agenda.submit_event(args.into_record()?).await?;
            println!(
                "Evento enviado para aprovação: {} [{}] em {}",
                event.title, event.id, event.date_key
            );
        },

        Commands::Approve { id } => {
            let event = app.agenda.approve_event(&EventId::new(id)).await?;
            println!("Evento aprovado: {} em {}", event.title, event.date_key);
        },

        Commands::Delete { id } => {
            let date = app.agenda.delete_event(&EventId::new(id)).await?;
            println!("Evento removido de {date}");
        },
    }

    Ok(())
}
