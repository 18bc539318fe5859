//! Terminal output formatting.
//!
//! Human-readable output uses colored symbols and aligned fields. JSON mode
//! emits one `{"type": ..., "payload": ...}` object per line for scripting.
//! Quiet mode keeps only the primary result of a command.

use std::fmt::Display;

use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use serde_json::json;

use crate::error::Result;

/// Output settings from the global CLI flags, passed to every handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct Output {
    json: bool,
    quiet: bool,
}

impl Output {
    #[must_use]
    pub const fn new(json: bool, quiet: bool) -> Self {
        Self { json, quiet }
    }

    /// Whether machine-readable JSON output is enabled.
    #[must_use]
    pub const fn is_json(&self) -> bool {
        self.json
    }

    /// Whether only the primary result should be printed.
    #[must_use]
    pub const fn is_quiet(&self) -> bool {
        !self.json && self.quiet
    }

    /// Print a serializable result as a JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` fails to serialize.
    pub fn record<T: Serialize>(&self, kind: &str, value: &T) -> Result<()> {
        let payload = serde_json::to_value(value)?;
        emit_json_line(kind, payload);
        Ok(())
    }

    /// Print the primary value of a command in quiet mode.
    pub fn primary(&self, value: impl Display) {
        if self.is_quiet() {
            println!("{value}");
        }
    }

    /// Print the application header with name and version.
    pub fn header(&self, version: &str) {
        if self.json || self.quiet {
            return;
        }
        println!(
            "{} {}",
            "wagerline".if_supports_color(Stream::Stdout, |t| t.bold()),
            version.if_supports_color(Stream::Stdout, |t| t.dimmed())
        );
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        if self.json || self.quiet {
            return;
        }
        println!();
        println!("{}", title.if_supports_color(Stream::Stdout, |t| t.bold()));
    }

    /// Print a labeled value.
    pub fn field(&self, label: &str, value: impl Display) {
        if self.json || self.quiet {
            return;
        }
        println!(
            "  {:<14} {}",
            label.if_supports_color(Stream::Stdout, |t| t.dimmed()),
            value
        );
    }

    /// Print a success line.
    pub fn success(&self, message: &str) {
        if self.json {
            emit_json_line("success", json!({ "message": message }));
            return;
        }
        if self.quiet {
            return;
        }
        println!(
            "  {} {}",
            "✓".if_supports_color(Stream::Stdout, |t| t.green()),
            message
        );
    }

    /// Print a warning line.
    pub fn warning(&self, message: &str) {
        if self.json {
            emit_json_line("warning", json!({ "message": message }));
            return;
        }
        println!(
            "  {} {}",
            "⚠".if_supports_color(Stream::Stdout, |t| t.yellow()),
            message
        );
    }

    /// Print an error line to stderr.
    pub fn error(&self, message: &str) {
        if self.json {
            eprintln!(
                "{}",
                json!({
                    "type": "error",
                    "payload": { "message": message },
                })
            );
            return;
        }
        eprintln!(
            "  {} {}",
            "×".if_supports_color(Stream::Stderr, |t| t.red()),
            message
        );
    }

    /// Print a note/hint.
    pub fn note(&self, message: &str) {
        if self.json || self.quiet {
            return;
        }
        println!("  {}", message.if_supports_color(Stream::Stdout, |t| t.dimmed()));
    }

    /// Print a pre-rendered block such as a table.
    pub fn block(&self, content: impl Display) {
        if self.json || self.quiet {
            return;
        }
        println!("{content}");
    }
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Color a signed percentage green when positive and red when negative.
#[must_use]
pub fn signed(value: impl Display, sign: std::cmp::Ordering) -> String {
    let text = value.to_string();
    match sign {
        std::cmp::Ordering::Greater => text
            .if_supports_color(Stream::Stdout, |t| t.green())
            .to_string(),
        std::cmp::Ordering::Less => text
            .if_supports_color(Stream::Stdout, |t| t.red())
            .to_string(),
        std::cmp::Ordering::Equal => text,
    }
}

/// Dimmed text for secondary details.
#[must_use]
pub fn muted(value: impl Display) -> String {
    value
        .to_string()
        .if_supports_color(Stream::Stdout, |t| t.dimmed())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_is_ignored_in_json_mode() {
        assert!(Output::new(false, true).is_quiet());
        assert!(!Output::new(true, true).is_quiet());
        assert!(Output::new(true, false).is_json());
    }

    #[test]
    fn neutral_values_are_unstyled() {
        assert_eq!(signed("0.00%", std::cmp::Ordering::Equal), "0.00%");
    }
}
