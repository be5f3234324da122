//! CLI output formatting.
//!
//! Commands produce a [`CommandOutput`](super::CommandOutput); the formatter
//! turns it into text or JSON. Rendering returns strings so the binary owns
//! the terminal.

use console::style;
use serde::Serialize;

use crate::cli::{CliError, CliResult, CommandOutput};
use crate::core::event::Event;

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT FORMAT
// ═══════════════════════════════════════════════════════════════════════════════

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// Compact JSON
    Json,
    /// Indented JSON
    JsonPretty,
}

impl OutputFormat {
    /// True for either JSON variant
    pub fn is_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::JsonPretty)
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "json-pretty" | "jsonpretty" => Ok(OutputFormat::JsonPretty),
            _ => Err(format!("Unknown format: {} (expected text, json or json-pretty)", s)),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT FORMATTER
// ═══════════════════════════════════════════════════════════════════════════════

/// Renders command results
#[derive(Debug, Clone, Copy)]
pub struct OutputFormatter {
    format: OutputFormat,
    color: bool,
}

impl Default for OutputFormatter {
    fn default() -> Self {
        Self::new(OutputFormat::Text)
    }
}

impl OutputFormatter {
    /// Create new formatter
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: true,
        }
    }

    /// Disable color
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    /// Get format
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Render a command result
    pub fn render(&self, output: &CommandOutput) -> CliResult<String> {
        if self.format.is_json() {
            return self.json(&output.data);
        }

        let mut text = self.heading(&output.message);
        for line in &output.lines {
            text.push('\n');
            text.push_str(line);
        }
        for warning in &output.warnings {
            text.push('\n');
            text.push_str(&self.warning(warning));
        }
        Ok(text)
    }

    /// Serialize in the configured JSON flavour
    pub fn json<T: Serialize>(&self, data: &T) -> CliResult<String> {
        let rendered = if matches!(self.format, OutputFormat::JsonPretty) {
            serde_json::to_string_pretty(data)
        } else {
            serde_json::to_string(data)
        };
        rendered.map_err(|e| CliError::Output(e.to_string()))
    }

    /// Bold section heading
    pub fn heading(&self, title: &str) -> String {
        if self.color {
            style(title).bold().cyan().to_string()
        } else {
            title.to_string()
        }
    }

    /// Warning line
    pub fn warning(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", style("⚠").yellow(), message)
        } else {
            format!("WARNING: {}", message)
        }
    }

    /// Error line
    pub fn error(&self, message: &str) -> String {
        if self.color {
            format!("{} {}", style("✗").red(), message)
        } else {
            format!("ERROR: {}", message)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// TEXT LAYOUT
// ═══════════════════════════════════════════════════════════════════════════════

/// Fixed-width table with a header row and separator
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    if headers.is_empty() {
        return Vec::new();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:width$}", cell, width = *width))
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(line(headers.to_vec()));
    lines.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-"));
    for row in rows {
        lines.push(line(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// One table row per event
pub fn event_rows<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<Vec<String>> {
    events
        .into_iter()
        .map(|event| {
            vec![
                event.id.clone(),
                event.title.clone(),
                event.event_type.clone(),
                event.location.clone(),
                event.event_date.to_string(),
            ]
        })
        .collect()
}

/// Table of events with the standard columns
pub fn event_table<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<String> {
    table(&["ID", "Title", "Type", "Location", "Date"], &event_rows(events))
}
