//! The event query engine.
//!
//! A pure function of `(events, query)`: filter, stable sort, paginate, and
//! report the facet values for the filter controls. Facets are taken from
//! the whole collection, not from the filtered subset, so a user can always
//! pivot to any other type or location.

use serde::Serialize;
use std::collections::BTreeSet;

use crate::core::event::Event;
use crate::error::Result;
use crate::query::filter::filter_events;
use crate::query::sort::sort_events;
use crate::query::state::QueryState;

// ═══════════════════════════════════════════════════════════════════════════════
// FACETS
// ═══════════════════════════════════════════════════════════════════════════════

/// Distinct filter values present in a collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Facets {
    /// Sorted distinct event types
    pub available_types: Vec<String>,
    /// Sorted distinct locations
    pub available_locations: Vec<String>,
}

/// Collect sorted, deduplicated types and locations.
///
/// Empty values are skipped: an empty filter means "all", so an empty option
/// could never select the events that carry it.
pub fn facets(events: &[Event]) -> Facets {
    let mut types = BTreeSet::new();
    let mut locations = BTreeSet::new();

    for event in events {
        if !event.event_type.is_empty() {
            types.insert(event.event_type.as_str());
        }
        if !event.location.is_empty() {
            locations.insert(event.location.as_str());
        }
    }

    Facets {
        available_types: types.into_iter().map(String::from).collect(),
        available_locations: locations.into_iter().map(String::from).collect(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// QUERY RESULT
// ═══════════════════════════════════════════════════════════════════════════════

/// One page of the event list plus everything the filter controls need
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryResult<'a> {
    /// Events on the requested page
    pub page_items: Vec<&'a Event>,
    /// Events matching the filters, before pagination
    pub filtered_count: usize,
    /// Number of pages, at least 1
    pub total_pages: usize,
    /// Requested page
    pub page_number: usize,
    /// Page size used
    pub page_size: usize,
    /// Types across the unfiltered collection
    pub available_types: Vec<String>,
    /// Locations across the unfiltered collection
    pub available_locations: Vec<String>,
}

impl QueryResult<'_> {
    /// True when nothing matched the filters
    pub fn is_empty(&self) -> bool {
        self.filtered_count == 0
    }

    /// Whether a later page has items
    pub fn has_more(&self) -> bool {
        self.page_number.saturating_mul(self.page_size) < self.filtered_count
    }

    /// Whether an earlier page exists
    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }

    /// Ids of the events on this page
    pub fn page_ids(&self) -> Vec<&str> {
        self.page_items.iter().map(|e| e.id.as_str()).collect()
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// ENGINE
// ═══════════════════════════════════════════════════════════════════════════════

/// Run a query over an event collection.
///
/// Fails only on caller contract violations (zero page size or page number).
/// A page past the end yields an empty `page_items`, not an error.
pub fn run_query<'a>(events: &'a [Event], query: &QueryState) -> Result<QueryResult<'a>> {
    query.validate()?;

    let Facets {
        available_types,
        available_locations,
    } = facets(events);

    let mut matched = filter_events(events, query);
    sort_events(&mut matched, query.sort_key());

    let filtered_count = matched.len();
    let page_size = query.page_size();
    let page_number = query.page_number();
    let total_pages = filtered_count.div_ceil(page_size).max(1);
    let page_items = page_slice(&matched, page_number, page_size).to_vec();

    tracing::debug!(
        "Query matched {} of {} events (sort {}, page {}/{}, {} shown)",
        filtered_count,
        events.len(),
        query.sort_key(),
        page_number,
        total_pages,
        page_items.len()
    );

    Ok(QueryResult {
        page_items,
        filtered_count,
        total_pages,
        page_number,
        page_size,
        available_types,
        available_locations,
    })
}

/// `[(page - 1) * size, page * size)` clipped to the slice; empty when out of range
fn page_slice<T>(items: &[T], page_number: usize, page_size: usize) -> &[T] {
    let start = match page_number.saturating_sub(1).checked_mul(page_size) {
        Some(start) if start < items.len() => start,
        _ => return &[],
    };
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}
