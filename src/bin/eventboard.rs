//! eventboard CLI
//!
//! Browse an events file the way the upcoming-events page does: search,
//! filter, sort and paginate, inspect facets and dashboard statistics, and
//! watch a live countdown to an event.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use console::Term;

use eventboard::cli::{
    check_draft_command, countdown_output, facets_command, load_draft, load_events, load_joined,
    query_command, related_command, stats_command, CliConfig, CommandOutput, OutputFormat,
    OutputFormatter, QueryOptions, StatsScope,
};
use eventboard::core::{Event, EventDate};
use eventboard::countdown::{create_countdown, CountdownState};
use eventboard::query::SortKey;

/// eventboard - community events listing and countdowns
#[derive(Parser)]
#[command(name = "eventboard")]
#[command(version = eventboard::VERSION)]
#[command(about = "Query community events and run event countdowns", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Events JSON file (bare array or API envelope) [env: EVENTBOARD_EVENTS_FILE]
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    /// Output format: text, json or json-pretty [env: EVENTBOARD_FORMAT]
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search, filter, sort and paginate events
    Query {
        /// Case-insensitive text matched against title, description and location
        #[arg(short, long)]
        search: Option<String>,

        /// Exact event type
        #[arg(short = 't', long = "type")]
        event_type: Option<String>,

        /// Exact location
        #[arg(short, long)]
        location: Option<String>,

        /// dateAsc, dateDesc, titleAsc or titleDesc
        #[arg(long, default_value = "dateAsc")]
        sort: SortKey,

        /// Page number (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Events per page [env: EVENTBOARD_PAGE_SIZE]
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// List the event types and locations present in the file
    Facets,

    /// Dashboard statistics
    Stats {
        /// Reference instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,

        /// Only count events created by this email
        #[arg(long)]
        creator: Option<String>,

        /// Joined-events JSON file (bare array or `joinedEvents` envelope)
        #[arg(long)]
        joined: Option<PathBuf>,
    },

    /// Events of the same type as the given one
    Related {
        /// Event id
        #[arg(long)]
        id: String,
    },

    /// Live countdown to an instant
    Countdown {
        /// Target instant (RFC 3339 or YYYY-MM-DD[ HH:MM])
        #[arg(long)]
        at: String,

        /// Single-line form without seconds
        #[arg(short, long)]
        compact: bool,

        /// Stop after this many frames
        #[arg(long)]
        ticks: Option<usize>,
    },

    /// Validate an event draft JSON file
    CheckDraft {
        /// Draft file
        draft: PathBuf,

        /// Reference instant (RFC 3339), defaults to now
        #[arg(long)]
        now: Option<DateTime<Utc>>,
    },
}

// ═══════════════════════════════════════════════════════════════════════════════
// MAIN
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging; stderr keeps JSON output clean
    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(level.into()),
        )
        .init();

    let config = build_config(&cli);
    let term = Term::stdout();

    match run_command(&cli, &config, &term).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(e) => {
            eprintln!("{}", formatter(&config).error(&format!("{:#}", e)));
            std::process::exit(1);
        }
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let mut config = CliConfig::from_env();
    if let Some(file) = &cli.file {
        config = config.with_events_file(file);
    }
    if let Some(format) = cli.format {
        config = config.with_format(format);
    }
    if cli.no_color || !Term::stdout().is_term() {
        config.color = false;
    }
    config
}

fn formatter(config: &CliConfig) -> OutputFormatter {
    let formatter = OutputFormatter::new(config.format);
    if config.color {
        formatter
    } else {
        formatter.without_color()
    }
}

/// Returns `false` when a check ran and failed
async fn run_command(cli: &Cli, config: &CliConfig, term: &Term) -> anyhow::Result<bool> {
    config.validate()?;
    let out = formatter(config);
    let now = Utc::now();

    let output = match &cli.command {
        Commands::Query {
            search,
            event_type,
            location,
            sort,
            page,
            page_size,
        } => {
            let options = QueryOptions {
                search: search.clone(),
                event_type: event_type.clone(),
                location: location.clone(),
                sort: *sort,
                page: *page,
                page_size: *page_size,
            };
            query_command(&events(config)?, &options, &config.engine, now)?
        }

        Commands::Facets => facets_command(&events(config)?),

        Commands::Stats {
            now: at,
            creator,
            joined,
        } => {
            let joined = match joined {
                Some(path) => load_joined(path)
                    .with_context(|| format!("loading joined events from {}", path.display()))?,
                None => Vec::new(),
            };
            let scope = StatsScope {
                creator: creator.as_deref(),
                joined: &joined,
            };
            stats_command(&events(config)?, scope, &config.engine, at.unwrap_or(now))
        }

        Commands::Related { id } => related_command(&events(config)?, id, &config.engine)?,

        Commands::Countdown { at, compact, ticks } => {
            let target = EventDate::parse_strict(at)?;
            return cmd_countdown(target, *compact, *ticks, &out, term).await;
        }

        Commands::CheckDraft { draft, now: at } => {
            let draft = load_draft(draft)?;
            check_draft_command(&draft, at.unwrap_or(now))
        }
    };

    emit(&output, &out, term)?;
    Ok(output.success)
}

fn events(config: &CliConfig) -> anyhow::Result<Vec<Event>> {
    let events = load_events(&config.events_file)
        .with_context(|| format!("loading events from {}", config.events_file.display()))?;
    tracing::debug!("Loaded {} events from {}", events.len(), config.events_file.display());
    Ok(events)
}

fn emit(output: &CommandOutput, out: &OutputFormatter, term: &Term) -> anyhow::Result<()> {
    term.write_line(&out.render(output)?)?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// COUNTDOWN
// ═══════════════════════════════════════════════════════════════════════════════

async fn cmd_countdown(
    target: DateTime<Utc>,
    compact: bool,
    ticks: Option<usize>,
    out: &OutputFormatter,
    term: &Term,
) -> anyhow::Result<bool> {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let handle = create_countdown(target, move |state: &CountdownState| {
        let _ = tx.send(*state);
    })?;

    let live = !out.format().is_json() && term.is_term();
    let mut frames = 0usize;

    loop {
        tokio::select! {
            state = rx.recv() => {
                let Some(state) = state else { break };
                let frame = countdown_output(target, &state, compact);

                if live && frames > 0 {
                    term.clear_last_lines(1)?;
                }
                emit(&frame, out, term)?;
                frames += 1;

                if state.is_expired() || ticks.is_some_and(|limit| frames >= limit) {
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::debug!("Interrupted");
                break;
            }
        }
    }

    drop(handle);
    Ok(true)
}
