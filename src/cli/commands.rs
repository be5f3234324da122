//! CLI command implementations.
//!
//! Each command takes already-loaded inputs and returns a [`CommandOutput`];
//! file access and terminal I/O stay in the binary.

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::cli::output::{event_rows, event_table, table};
use crate::cli::{CliError, CliResult, CommandOutput};
use crate::core::config::EngineConfig;
use crate::core::draft::EventDraft;
use crate::core::event::Event;
use crate::core::joined::JoinedEvent;
use crate::countdown::remaining::{compute_state, CountdownState};
use crate::countdown::render::{compact, full};
use crate::insights::dashboard::{
    event_stats, events_by_creator, events_by_month, joined_by_month, recent_events,
    type_distribution,
};
use crate::insights::related::{featured_events, find_event, related_events};
use crate::query::engine::{facets, run_query};
use crate::query::sort::SortKey;
use crate::query::state::QueryState;

// ═══════════════════════════════════════════════════════════════════════════════
// QUERY
// ═══════════════════════════════════════════════════════════════════════════════

/// Arguments of the `query` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    /// Search text
    pub search: Option<String>,
    /// Exact event type
    pub event_type: Option<String>,
    /// Exact location
    pub location: Option<String>,
    /// Sort key
    pub sort: SortKey,
    /// 1-based page
    pub page: usize,
    /// Page size override
    pub page_size: Option<usize>,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            search: None,
            event_type: None,
            location: None,
            sort: SortKey::default(),
            page: 1,
            page_size: None,
        }
    }
}

impl QueryOptions {
    /// Build the query state the way the list view would
    pub fn to_state(&self, config: &EngineConfig) -> CliResult<QueryState> {
        let mut state = QueryState::with_config(config);
        if let Some(size) = self.page_size {
            state.set_page_size(size)?;
        }
        state.set_search_text(self.search.clone().unwrap_or_default());
        state.set_type_filter(self.event_type.clone().unwrap_or_default());
        state.set_location_filter(self.location.clone().unwrap_or_default());
        state.set_sort_key(self.sort);
        state.set_page(self.page)?;
        Ok(state)
    }
}

/// One page of the filtered, sorted list with a countdown column
pub fn query_command(
    events: &[Event],
    options: &QueryOptions,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> CliResult<CommandOutput> {
    let state = options.to_state(config)?;
    let result = run_query(events, &state)?;

    let message = format!(
        "{} of {} events match (page {} of {}, {})",
        result.filtered_count,
        events.len(),
        result.page_number,
        result.total_pages,
        state.sort_key().label()
    );

    let rows: Vec<Vec<String>> = event_rows(result.page_items.iter().copied())
        .into_iter()
        .zip(&result.page_items)
        .map(|(mut row, event)| {
            row.push(starts_in(event, now));
            row
        })
        .collect();

    let data = json!({ "query": state, "result": result });
    let mut output = CommandOutput::new(message, data);

    if result.is_empty() {
        output = output.with_line("No events match the current filters");
    } else if result.page_items.is_empty() {
        output = output.with_warning(format!(
            "Page {} is past the last page ({})",
            result.page_number, result.total_pages
        ));
    } else {
        output = output.with_lines(table(
            &["ID", "Title", "Type", "Location", "Date", "Starts in"],
            &rows,
        ));
    }

    Ok(output)
}

fn starts_in(event: &Event, now: DateTime<Utc>) -> String {
    match event.starts_at() {
        Some(start) => compact(&compute_state(start, now)),
        None => "-".to_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// FACETS
// ═══════════════════════════════════════════════════════════════════════════════

/// Filter values available across the whole collection
pub fn facets_command(events: &[Event]) -> CommandOutput {
    let facets = facets(events);
    let message = format!(
        "{} types, {} locations",
        facets.available_types.len(),
        facets.available_locations.len()
    );

    CommandOutput::new(message, json!(facets))
        .with_line(format!("Types: {}", facets.available_types.join(", ")))
        .with_line(format!("Locations: {}", facets.available_locations.join(", ")))
}

// ═══════════════════════════════════════════════════════════════════════════════
// STATS
// ═══════════════════════════════════════════════════════════════════════════════

/// Narrows the `stats` command to one user
#[derive(Debug, Clone, Copy, Default)]
pub struct StatsScope<'a> {
    /// Only count events created by this email
    pub creator: Option<&'a str>,
    /// The user's joined-event records
    pub joined: &'a [JoinedEvent],
}

/// Dashboard view: counts, type distribution, events per month, recent events
/// and joined events per month
pub fn stats_command(
    events: &[Event],
    scope: StatsScope<'_>,
    config: &EngineConfig,
    now: DateTime<Utc>,
) -> CommandOutput {
    let owned;
    let events = match scope.creator {
        Some(email) => {
            owned = events_by_creator(events, email);
            owned.as_slice()
        }
        None => events,
    };

    let stats = event_stats(events, now, config.running_window_hours);
    let types = type_distribution(events);
    let months = events_by_month(events);
    let joined_months = joined_by_month(scope.joined);
    let recent = recent_events(events, config.recent_limit);
    let featured = featured_events(events, config.featured_limit);

    let type_rows: Vec<_> = types
        .iter()
        .map(|(t, n)| json!({ "name": t, "value": n }))
        .collect();
    let month_rows: Vec<_> = months
        .iter()
        .map(|(m, n)| json!({ "month": m, "events": n }))
        .collect();
    let joined_rows: Vec<_> = joined_months
        .iter()
        .map(|(m, n)| json!({ "month": m, "count": n }))
        .collect();

    let data = json!({
        "creator": scope.creator,
        "stats": stats,
        "joinedEvents": scope.joined.len(),
        "typeDistribution": type_rows,
        "eventsByMonth": month_rows,
        "joinedByMonth": joined_rows,
        "recentEvents": recent,
        "featuredEvents": featured.iter().map(|e| &e.id).collect::<Vec<_>>(),
    });

    let message = match scope.creator {
        Some(email) => format!("{} events created by {}", stats.total, email),
        None => format!("{} events", stats.total),
    };
    let mut output = CommandOutput::new(message, data)
        .with_line(format!("Upcoming: {}", stats.upcoming))
        .with_line(format!("Past:     {}", stats.past))
        .with_line(format!(
            "Running:  {} (within {}h of start)",
            stats.running, config.running_window_hours
        ));
    if !scope.joined.is_empty() {
        output = output.with_line(format!("Joined:   {}", scope.joined.len()));
    }

    if !types.is_empty() {
        output = output.with_line(String::new()).with_lines(table(
            &["Type", "Events"],
            &types.iter().map(|(t, n)| vec![t.clone(), n.to_string()]).collect::<Vec<_>>(),
        ));
    }
    if !months.is_empty() {
        output = output.with_line(String::new()).with_lines(table(
            &["Month", "Events"],
            &months.iter().map(|(m, n)| vec![m.to_string(), n.to_string()]).collect::<Vec<_>>(),
        ));
    }
    if !joined_months.is_empty() {
        output = output.with_line(String::new()).with_lines(table(
            &["Month", "Joined"],
            &joined_months
                .iter()
                .map(|(m, n)| vec![m.to_string(), n.to_string()])
                .collect::<Vec<_>>(),
        ));
    }
    if !recent.is_empty() {
        output = output
            .with_line(String::new())
            .with_line("Recent:")
            .with_lines(event_table(recent));
    }
    if stats.undated > 0 {
        output = output.with_warning(format!("{} events have no parseable date", stats.undated));
    }

    output
}

// ═══════════════════════════════════════════════════════════════════════════════
// RELATED
// ═══════════════════════════════════════════════════════════════════════════════

/// Other events of the same type as `id`
pub fn related_command(
    events: &[Event],
    id: &str,
    config: &EngineConfig,
) -> CliResult<CommandOutput> {
    let event = find_event(events, id).ok_or_else(|| CliError::NotFound(format!("event {}", id)))?;
    let related = related_events(events, event, config.related_limit);

    let message = format!(
        "{} related to \"{}\" ({})",
        related.len(),
        event.title,
        event.event_type
    );
    let mut output = CommandOutput::new(message, json!({ "event": event, "related": related }));
    if related.is_empty() {
        output = output.with_line("No other events of this type");
    } else {
        output = output.with_lines(event_table(related.iter().copied()));
    }
    Ok(output)
}

// ═══════════════════════════════════════════════════════════════════════════════
// DRAFT CHECK
// ═══════════════════════════════════════════════════════════════════════════════

/// Validate an event draft; a rejected draft is a failed output, not an error
pub fn check_draft_command(draft: &EventDraft, now: DateTime<Utc>) -> CommandOutput {
    match draft.validate(now) {
        Ok(starts_at) => {
            let countdown = compact(&compute_state(starts_at, now));
            CommandOutput::new(
                "Draft is valid",
                json!({ "valid": true, "startsAt": starts_at.to_rfc3339() }),
            )
            .with_line(format!(
                "Starts {} (in {})",
                starts_at.format("%Y-%m-%d %H:%M UTC"),
                countdown
            ))
        }
        Err(e) => CommandOutput::new(
            "Draft rejected",
            json!({ "valid": false, "code": e.code(), "error": e.to_string() }),
        )
        .with_line(e.to_string())
        .failed(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COUNTDOWN
// ═══════════════════════════════════════════════════════════════════════════════

/// One countdown frame
pub fn countdown_output(
    target: DateTime<Utc>,
    state: &CountdownState,
    compact_form: bool,
) -> CommandOutput {
    let rendered = if compact_form {
        compact(state)
    } else {
        full(state).to_string()
    };

    CommandOutput::new(
        rendered,
        json!({
            "target": target.to_rfc3339(),
            "countdown": state,
            "compact": compact(state),
            "full": full(state),
        }),
    )
}
