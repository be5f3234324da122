//! eventboard command line interface.
//!
//! Library side of the `eventboard` binary: configuration, command
//! implementations and output formatting. The binary only parses arguments
//! and writes to the terminal.

pub mod commands;
pub mod config;
pub mod output;

pub use commands::*;
pub use config::*;
pub use output::*;

use std::path::Path;

use crate::core::draft::EventDraft;
use crate::core::event::Event;
use crate::core::feed::{parse_feed, parse_joined_feed};
use crate::core::joined::JoinedEvent;
use crate::error::Error;

// ═══════════════════════════════════════════════════════════════════════════════
// CLI RESULT
// ═══════════════════════════════════════════════════════════════════════════════

/// CLI Error types
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    /// Configuration error
    Config(String),
    /// IO error
    Io(String),
    /// Input file could not be decoded
    Input(String),
    /// Not found
    NotFound(String),
    /// Output could not be rendered
    Output(String),
    /// Error raised by the library
    Engine(Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Io(msg) => write!(f, "IO error: {}", msg),
            CliError::Input(msg) => write!(f, "Invalid input: {}", msg),
            CliError::NotFound(msg) => write!(f, "Not found: {}", msg),
            CliError::Output(msg) => write!(f, "Output error: {}", msg),
            CliError::Engine(err) => write!(f, "{} (code {})", err, err.code()),
        }
    }
}

impl std::error::Error for CliError {}

impl From<Error> for CliError {
    fn from(err: Error) -> Self {
        CliError::Engine(err)
    }
}

/// CLI Result type
pub type CliResult<T> = std::result::Result<T, CliError>;

// ═══════════════════════════════════════════════════════════════════════════════
// COMMAND OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Result of one command, renderable as text or JSON
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// False when the command ran but reports a failed check
    pub success: bool,
    /// Headline
    pub message: String,
    /// Structured data (JSON output)
    pub data: serde_json::Value,
    /// Body lines (text output)
    pub lines: Vec<String>,
    /// Warnings
    pub warnings: Vec<String>,
}

impl CommandOutput {
    /// Create output with a headline and its JSON payload
    pub fn new(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            lines: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Mark the result as a failed check
    pub fn failed(mut self) -> Self {
        self.success = false;
        self
    }

    /// Add a body line
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    /// Add several body lines
    pub fn with_lines(mut self, lines: impl IntoIterator<Item = String>) -> Self {
        self.lines.extend(lines);
        self
    }

    /// Add warning
    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// INPUT FILES
// ═══════════════════════════════════════════════════════════════════════════════

/// Read an events file (bare array or `{ok, events, message}` envelope)
pub fn load_events(path: &Path) -> CliResult<Vec<Event>> {
    let content = read_file(path)?;
    parse_feed(&content).map_err(|e| feed_error(path, e))
}

/// Read a joined-events file (bare array or `{ok, joinedEvents}` envelope)
pub fn load_joined(path: &Path) -> CliResult<Vec<JoinedEvent>> {
    let content = read_file(path)?;
    parse_joined_feed(&content).map_err(|e| feed_error(path, e))
}

fn feed_error(path: &Path, err: Error) -> CliError {
    match err {
        Error::FeedRejected(_) => CliError::Engine(err),
        other => CliError::Input(format!("{}: {}", path.display(), other)),
    }
}

/// Read an event draft JSON file
pub fn load_draft(path: &Path) -> CliResult<EventDraft> {
    let content = read_file(path)?;
    serde_json::from_str(&content)
        .map_err(|e| CliError::Input(format!("{}: {}", path.display(), e)))
}

fn read_file(path: &Path) -> CliResult<String> {
    if !path.exists() {
        return Err(CliError::NotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path).map_err(|e| CliError::Io(format!("{}: {}", path.display(), e)))
}

// ═══════════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_command_output_builder() {
        let output = CommandOutput::new("Stats", serde_json::json!({"total": 3}))
            .with_line("Total: 3")
            .with_lines(vec!["Past: 1".to_string()])
            .with_warning("1 event without a date");
        assert!(output.success);
        assert_eq!(output.lines.len(), 2);
        assert_eq!(output.warnings.len(), 1);
        assert!(!output.failed().success);
    }

    #[test]
    fn test_cli_error_display() {
        let err = CliError::Config("bad config".into());
        assert!(err.to_string().contains("Configuration error"));

        let err: CliError = Error::InvalidPageSize(0).into();
        assert!(err.to_string().contains("code 1002"));
    }

    #[test]
    fn test_load_events_envelope_and_array() {
        let envelope = write_temp(r#"{"ok": true, "events": [{"_id": "1", "title": "Cleanup"}]}"#);
        assert_eq!(load_events(envelope.path()).unwrap().len(), 1);

        let bare = write_temp(r#"[{"id": "1", "title": "A"}, {"id": "2", "title": "B"}]"#);
        assert_eq!(load_events(bare.path()).unwrap().len(), 2);
    }

    #[test]
    fn test_load_events_errors() {
        let rejected = write_temp(r#"{"ok": false, "message": "Database unavailable"}"#);
        assert_eq!(
            load_events(rejected.path()),
            Err(CliError::Engine(Error::FeedRejected("Database unavailable".into())))
        );

        let garbage = write_temp("not json");
        assert!(matches!(load_events(garbage.path()), Err(CliError::Input(_))));

        assert!(matches!(
            load_events(Path::new("/nonexistent/events.json")),
            Err(CliError::NotFound(_))
        ));
    }

    #[test]
    fn test_load_events_skips_bad_entries() {
        let file = write_temp(
            r#"{"ok": true, "events": [
                {"_id": "1", "title": "Cleanup", "eventDate": 1893456000000},
                {"_id": "2"}
            ]}"#,
        );
        let events = load_events(file.path()).unwrap();
        assert_eq!(events.len(), 1);
        assert!(!events[0].event_date.is_malformed());
    }

    #[test]
    fn test_load_joined() {
        let file =
            write_temp(r#"{"ok": true, "joinedEvents": [{"_id": "j1", "eventTitle": "Drive"}]}"#);
        assert_eq!(load_joined(file.path()).unwrap()[0].id, "j1");

        let rejected = write_temp(r#"{"ok": false}"#);
        assert!(matches!(load_joined(rejected.path()), Err(CliError::Engine(_))));
    }

    #[test]
    fn test_load_draft() {
        let file = write_temp(r#"{"title": "Tree planting", "eventType": "Plantation"}"#);
        let draft = load_draft(file.path()).unwrap();
        assert_eq!(draft.title, "Tree planting");
    }
}
