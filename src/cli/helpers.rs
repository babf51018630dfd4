//! Shared helper functions for CLI commands
//!
//! This module contains utility functions that are used across multiple
//! command modules and views to avoid code duplication.

use miette::{IntoDiagnostic, Result};
use serde::Serialize;

use crate::cli::OutputFormat;

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape a string for CSV output
///
/// Handles commas, quotes, and newlines according to RFC 4180.
pub fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Wrap text to fit within a maximum width, breaking at word boundaries
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    // Don't wrap if text already fits or width is too small to be useful
    if text.chars().count() <= max_width || max_width < 5 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        let current_len = current_line.chars().count();
        if !current_line.is_empty() && current_len + 1 + word_len <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            continue;
        }
        if !current_line.is_empty() {
            lines.push(std::mem::take(&mut current_line));
        }
        // Force-break words longer than the line
        let chars: Vec<char> = word.chars().collect();
        let mut chunks = chars.chunks(max_width).peekable();
        while let Some(chunk) = chunks.next() {
            if chunks.peek().is_some() {
                lines.push(chunk.iter().collect());
            } else {
                current_line = chunk.iter().collect();
            }
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// Print a value as JSON or YAML
pub fn print_structured<T: Serialize + ?Sized>(value: &T, format: OutputFormat) -> Result<()> {
    let out = match format {
        OutputFormat::Yaml => serde_yml::to_string(value).into_diagnostic()?,
        _ => serde_json::to_string_pretty(value).into_diagnostic()?,
    };
    println!("{}", out.trim_end());
    Ok(())
}
