// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Rendering of records into default, pretty and JSON text.

use colored::Colorize;

use crate::format::Format;
use crate::level::Level;
use crate::record::{format_timestamp, unmarshal_record, Record};

/// Width the upper-cased level tag is padded to.
const LEVEL_WIDTH: usize = 6;

/// Stateless formatter for a (format, colour) combination.
///
/// Writers keep one instance around and rebuild it only when their settings
/// change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
	format: Format,
	no_color: bool,
}

impl Renderer {
	pub fn new(format: Format, no_color: bool) -> Self {
		Self { format, no_color }
	}

	pub fn format(&self) -> Format {
		self.format
	}

	pub fn no_color(&self) -> bool {
		self.no_color
	}

	/// Render a record into newline-terminated lines.
	///
	/// A message containing line breaks yields one line per segment. Empty
	/// segments survive only in Default format. Error text is rendered on the
	/// last line.
	pub fn render(&self, record: &Record) -> String {
		let mut segments = self.segments(&record.message);
		if segments.is_empty() && record.error.is_some() {
			segments.push("");
		}

		let last = segments.len().saturating_sub(1);
		let mut out = String::new();
		for (i, segment) in segments.into_iter().enumerate() {
			let error = if i == last {
				record.error.as_deref()
			} else {
				None
			};

			let mut line = String::new();
			match self.format {
				Format::Default => self.render_default(&mut line, record.level, segment, error),
				Format::Pretty => self.render_pretty(&mut line, record, segment, error),
				Format::Json => self.render_json(&mut line, record, segment, error),
			}
			out.push_str(&line);
			out.push('\n');
		}
		out
	}

	/// Re-render bytes holding encoded event lines.
	///
	/// Lines that do not decode as events are copied through untouched, so
	/// raw text written to a writer keeps its exact bytes.
	pub fn render_event(&self, bytes: &[u8]) -> Vec<u8> {
		let mut out = Vec::with_capacity(bytes.len());
		for chunk in bytes.split_inclusive(|b| *b == b'\n') {
			let body = chunk.strip_suffix(b"\n").unwrap_or(chunk);
			match unmarshal_record(body) {
				Ok(record) => out.extend_from_slice(self.render(&record).as_bytes()),
				Err(_) => out.extend_from_slice(chunk),
			}
		}
		out
	}

	fn segments<'a>(&self, message: &'a str) -> Vec<&'a str> {
		if !message.contains('\n') {
			return vec![message];
		}

		message
			.split('\n')
			.filter(|s| self.format == Format::Default || !s.is_empty())
			.collect()
	}

	fn render_default(&self, out: &mut String, level: Level, message: &str, error: Option<&str>) {
		if !matches!(level, Level::Info | Level::NoLevel) {
			let tag = format!("{:<width$}", level.as_str().to_uppercase(), width = LEVEL_WIDTH);
			out.push_str(&self.paint_level(level, tag));
			out.push(' ');
		}
		out.push_str(message);
		self.push_error(out, error);
	}

	fn render_pretty(&self, out: &mut String, record: &Record, message: &str, error: Option<&str>) {
		let timestamp = format_timestamp(&record.time);
		let tag = format!(
			"| {:<width$} |",
			record.level.as_str().to_uppercase(),
			width = LEVEL_WIDTH
		);

		if self.no_color {
			out.push_str(&timestamp);
		} else {
			out.push_str(&timestamp.bright_black().to_string());
		}
		out.push(' ');
		out.push_str(&self.paint_level(record.level, tag));
		out.push(' ');
		out.push_str(message);
		self.push_error(out, error);
	}

	fn render_json(&self, out: &mut String, record: &Record, message: &str, error: Option<&str>) {
		let line = Record {
			level: record.level,
			time: record.time,
			message: message.to_string(),
			error: error.map(str::to_string),
		};

		if let Ok(bytes) = line.to_event_line() {
			let encoded = String::from_utf8_lossy(&bytes);
			out.push_str(encoded.trim_end_matches('\n'));
		}
	}

	fn push_error(&self, out: &mut String, error: Option<&str>) {
		let Some(error) = error else {
			return;
		};

		if !out.is_empty() && !out.ends_with(' ') {
			out.push(' ');
		}
		if self.no_color {
			out.push_str("error=");
			out.push_str(error);
		} else {
			out.push_str(&"error=".cyan().to_string());
			out.push_str(&error.red().to_string());
		}
	}

	fn paint_level(&self, level: Level, tag: String) -> String {
		if self.no_color {
			return tag;
		}

		let styled = match level {
			Level::Trace => tag.magenta(),
			Level::Debug => tag.yellow(),
			Level::Info => tag.green(),
			Level::Warn => tag.red(),
			Level::Error | Level::Fatal | Level::Panic => tag.red().bold(),
			Level::NoLevel | Level::Disabled => tag.normal(),
		};
		styled.to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use regex::Regex;

	fn plain(format: Format) -> Renderer {
		Renderer::new(format, true)
	}

	#[test]
	fn test_default_info_is_bare_message() {
		let record = Record::new(Level::Info, "This is an info log");
		assert_eq!(plain(Format::Default).render(&record), "This is an info log\n");
	}

	#[test]
	fn test_default_tags() {
		let cases = [
			(Level::Debug, "DEBUG  debug message"),
			(Level::Warn, "WARN   warn message"),
			(Level::Error, "ERROR  error message"),
			(Level::Fatal, "FATAL  fatal message"),
		];

		for (level, expected) in cases {
			let message = format!("{} message", level);
			let record = Record::new(level, message);
			assert_eq!(
				plain(Format::Default).render(&record),
				format!("{expected}\n")
			);
		}
	}

	#[test]
	fn test_default_error_field() {
		let record = Record::new(Level::Error, "Error message").with_error("error");
		assert_eq!(
			plain(Format::Default).render(&record),
			"ERROR  Error message error=error\n"
		);

		let record = Record::new(Level::Info, "info message").with_error("info");
		assert_eq!(
			plain(Format::Default).render(&record),
			"info message error=info\n"
		);
	}

	#[test]
	fn test_pretty_line() {
		let record = Record::new(Level::Warn, "Warning");
		let rendered = plain(Format::Pretty).render(&record);

		let pattern =
			Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}(Z|[+-]\d{2}:\d{2}) \| WARN   \| Warning\n$")
				.unwrap();
		assert!(pattern.is_match(&rendered), "got: {rendered:?}");
	}

	#[test]
	fn test_pretty_error_field() {
		let record = Record::new(Level::Debug, "debug message").with_error("debug");
		let rendered = plain(Format::Pretty).render(&record);
		assert!(
			rendered.ends_with(" | DEBUG  | debug message error=debug\n"),
			"got: {rendered:?}"
		);
	}

	#[test]
	fn test_json_line() {
		let record = Record::new(Level::Debug, "Testing level debug");
		let rendered = plain(Format::Json).render(&record);

		let decoded = unmarshal_record(rendered.trim_end().as_bytes()).unwrap();
		assert_eq!(decoded.level, Level::Debug);
		assert_eq!(decoded.message, "Testing level debug");
	}

	#[test]
	fn test_multiline_default_keeps_empty_lines() {
		let record = Record::new(Level::Info, "multiline\n\ninput");
		assert_eq!(
			plain(Format::Default).render(&record),
			"multiline\n\ninput\n"
		);
	}

	#[test]
	fn test_multiline_pretty_drops_empty_lines() {
		let record = Record::new(Level::Info, "multiline\n\ninput").with_error("x");
		let rendered = plain(Format::Pretty).render(&record);
		let lines: Vec<_> = rendered.lines().collect();

		assert_eq!(lines.len(), 2);
		assert!(lines[0].ends_with("| INFO   | multiline"));
		assert!(lines[1].ends_with("| INFO   | input error=x"));
	}

	#[test]
	fn test_multiline_json_one_object_per_line() {
		let record = Record::new(Level::Warn, "first\n\nsecond");
		let rendered = plain(Format::Json).render(&record);
		let messages: Vec<_> = rendered
			.lines()
			.map(|l| unmarshal_record(l.as_bytes()).unwrap().message)
			.collect();

		assert_eq!(messages, vec!["first", "second"]);
	}

	#[test]
	fn test_error_on_empty_last_line_has_no_leading_space() {
		let record = Record::new(Level::Info, "a\n").with_error("boom");
		assert_eq!(plain(Format::Default).render(&record), "a\nerror=boom\n");

		let record = Record::new(Level::Warn, "a\n").with_error("boom");
		assert_eq!(
			plain(Format::Default).render(&record),
			"WARN   a\nWARN   error=boom\n"
		);
	}

	#[test]
	fn test_render_event_rerenders_json() {
		let record = Record::new(Level::Error, "Error message");
		let line = record.to_event_line().unwrap();

		let rendered = plain(Format::Default).render_event(&line);
		assert_eq!(rendered, b"ERROR  Error message\n");
	}

	#[test]
	fn test_render_event_passes_raw_text_through() {
		let rendered = plain(Format::Pretty).render_event(b"multiline\n\ninput");
		assert_eq!(rendered, b"multiline\n\ninput");
	}

	#[test]
	fn test_no_color_has_no_escape_codes() {
		let record = Record::new(Level::Error, "Error message").with_error("boom");
		for format in [Format::Default, Format::Pretty, Format::Json] {
			let rendered = plain(format).render(&record);
			assert!(!rendered.contains('\u{1b}'), "{format}: {rendered:?}");
		}
	}

	#[test]
	fn test_color_never_touches_json() {
		let record = Record::new(Level::Error, "Error message").with_error("boom");
		let colored = Renderer::new(Format::Json, false).render(&record);
		assert!(!colored.contains('\u{1b}'));
	}

	#[test]
	fn test_color_keeps_message_text() {
		let record = Record::new(Level::Warn, "Warning");
		let rendered = Renderer::new(Format::Default, false).render(&record);
		assert!(rendered.contains("WARN"));
		assert!(rendered.ends_with("Warning\n"));
	}
}
