//! Query state for the upcoming-events list.
//!
//! Owned by the presentation layer and read by [`run_query`](super::run_query).
//! Setters enforce the list's lifecycle: any change to the search text,
//! filters or sort key sends the user back to page 1.

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::error::Result;
use crate::query::sort::SortKey;
use crate::utils::constants::DEFAULT_PAGE_SIZE;
use crate::utils::validation::{validate_page_number, validate_page_size};

/// Search, filter, sort and page parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryState {
    search_text: String,
    type_filter: String,
    location_filter: String,
    sort_key: SortKey,
    page_number: usize,
    page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            type_filter: String::new(),
            location_filter: String::new(),
            sort_key: SortKey::default(),
            page_number: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl QueryState {
    /// Create with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the configured page size
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            page_size: config.page_size,
            ..Self::default()
        }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // BUILDERS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Set search text
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.set_search_text(text);
        self
    }

    /// Set type filter
    pub fn with_type(mut self, event_type: impl Into<String>) -> Self {
        self.set_type_filter(event_type);
        self
    }

    /// Set location filter
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.set_location_filter(location);
        self
    }

    /// Set sort key
    pub fn with_sort(mut self, key: SortKey) -> Self {
        self.set_sort_key(key);
        self
    }

    /// Set page number (validated when the query runs)
    pub fn with_page(mut self, page_number: usize) -> Self {
        self.page_number = page_number;
        self
    }

    /// Set page size (validated when the query runs)
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Raw search text
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Type filter, empty for all types
    pub fn type_filter(&self) -> &str {
        &self.type_filter
    }

    /// Location filter, empty for all locations
    pub fn location_filter(&self) -> &str {
        &self.location_filter
    }

    /// Sort key
    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Current 1-based page
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    /// Events per page
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// True if any of search, type or location narrows the list
    pub fn has_active_filters(&self) -> bool {
        !self.search_text.trim().is_empty()
            || !self.type_filter.is_empty()
            || !self.location_filter.is_empty()
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // MUTATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Update the search text; returns to page 1 if it changed
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.search_text {
            self.search_text = text;
            self.page_number = 1;
        }
    }

    /// Update the type filter; returns to page 1 if it changed
    pub fn set_type_filter(&mut self, event_type: impl Into<String>) {
        let event_type = event_type.into();
        if event_type != self.type_filter {
            self.type_filter = event_type;
            self.page_number = 1;
        }
    }

    /// Update the location filter; returns to page 1 if it changed
    pub fn set_location_filter(&mut self, location: impl Into<String>) {
        let location = location.into();
        if location != self.location_filter {
            self.location_filter = location;
            self.page_number = 1;
        }
    }

    /// Update the sort key; returns to page 1 if it changed
    pub fn set_sort_key(&mut self, key: SortKey) {
        if key != self.sort_key {
            self.sort_key = key;
            self.page_number = 1;
        }
    }

    /// Jump to a page; filters are untouched
    pub fn set_page(&mut self, page_number: usize) -> Result<()> {
        validate_page_number(page_number)?;
        self.page_number = page_number;
        Ok(())
    }

    /// Change the page size; page boundaries move, so returns to page 1
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        validate_page_size(page_size)?;
        if page_size != self.page_size {
            self.page_size = page_size;
            self.page_number = 1;
        }
        Ok(())
    }

    /// Advance one page if `total_pages` allows it
    pub fn next_page(&mut self, total_pages: usize) -> bool {
        if self.page_number < total_pages {
            self.page_number += 1;
            true
        } else {
            false
        }
    }

    /// Go back one page unless already on the first
    pub fn previous_page(&mut self) -> bool {
        if self.page_number > 1 {
            self.page_number -= 1;
            true
        } else {
            false
        }
    }

    /// Reset search, filters, sort and page; the page size is kept
    pub fn clear_filters(&mut self) {
        *self = Self {
            page_size: self.page_size,
            ..Self::default()
        };
    }

    /// Check the caller-supplied page parameters
    pub fn validate(&self) -> Result<()> {
        validate_page_size(self.page_size)?;
        validate_page_number(self.page_number)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn on_page_three() -> QueryState {
        let mut state = QueryState::new();
        state.set_page(3).unwrap();
        state
    }

    #[test]
    fn test_defaults() {
        let state = QueryState::new();
        assert_eq!(state.page_number(), 1);
        assert_eq!(state.page_size(), 12);
        assert_eq!(state.sort_key(), SortKey::DateAsc);
        assert!(!state.has_active_filters());
        assert!(state.validate().is_ok());
    }

    #[test]
    fn test_filter_changes_reset_page() {
        let mut state = on_page_three();
        state.set_search_text("river");
        assert_eq!(state.page_number(), 1);

        let mut state = on_page_three();
        state.set_type_filter("Cleanup");
        assert_eq!(state.page_number(), 1);

        let mut state = on_page_three();
        state.set_location_filter("Dhaka");
        assert_eq!(state.page_number(), 1);

        let mut state = on_page_three();
        state.set_sort_key(SortKey::TitleDesc);
        assert_eq!(state.page_number(), 1);
    }

    #[test]
    fn test_unchanged_value_keeps_page() {
        let mut state = on_page_three();
        state.set_sort_key(SortKey::DateAsc);
        state.set_search_text("");
        assert_eq!(state.page_number(), 3);
    }

    #[test]
    fn test_set_page_keeps_filters() {
        let mut state = QueryState::new().with_type("Donation").with_search("books");
        state.set_page(2).unwrap();
        assert_eq!(state.type_filter(), "Donation");
        assert_eq!(state.search_text(), "books");
        assert_eq!(state.set_page(0), Err(Error::InvalidPageNumber(0)));
    }

    #[test]
    fn test_clear_filters() {
        let mut state = QueryState::new()
            .with_page_size(4)
            .with_search("tree")
            .with_type("Plantation")
            .with_location("Sylhet")
            .with_sort(SortKey::TitleAsc)
            .with_page(5);

        state.clear_filters();
        assert_eq!(state, QueryState::new().with_page_size(4));
    }

    #[test]
    fn test_page_navigation() {
        let mut state = QueryState::new();
        assert!(!state.previous_page());
        assert!(state.next_page(2));
        assert!(!state.next_page(2));
        assert_eq!(state.page_number(), 2);
        assert!(state.previous_page());
        assert_eq!(state.page_number(), 1);
    }

    #[test]
    fn test_set_page_size() {
        let mut state = on_page_three();
        assert_eq!(state.set_page_size(0), Err(Error::InvalidPageSize(0)));
        state.set_page_size(6).unwrap();
        assert_eq!(state.page_number(), 1);
    }

    #[test]
    fn test_deserialize_rejects_unknown_sort() {
        let ok: QueryState =
            serde_json::from_str(r#"{"typeFilter": "Cleanup", "sortKey": "titleAsc"}"#).unwrap();
        assert_eq!(ok.sort_key(), SortKey::TitleAsc);
        assert_eq!(ok.page_size(), 12);

        assert!(serde_json::from_str::<QueryState>(r#"{"sortKey": "random"}"#).is_err());
    }
}
