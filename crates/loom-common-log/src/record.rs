// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Log records and their JSON event encoding.
//!
//! Every record handed to a writer travels as one JSON event line:
//!
//! ```text
//! {"level":"warn","time":"2020-12-17T07:12:57+01:00","message":"Warning","error":"disk full"}
//! ```
//!
//! JSON writers pass the line through unchanged; console writers decode it
//! again and render it in their own format.

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, SecondsFormat, SubsecRound};
use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};
use crate::level::Level;

/// Timestamp profile shared by Pretty and JSON output: RFC 3339 with second
/// precision and a numeric offset (`Z` for UTC).
pub const TIME_LAYOUT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// A single logged event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
	pub level: Level,
	pub time: DateTime<FixedOffset>,
	pub message: String,
	/// Text of the attached error, if any.
	pub error: Option<String>,
}

impl Record {
	/// Create a record stamped with the current local time.
	pub fn new(level: Level, message: impl Into<String>) -> Self {
		Self {
			level,
			time: now(),
			message: message.into(),
			error: None,
		}
	}

	/// Attach error text to the record.
	pub fn with_error(mut self, error: impl Into<String>) -> Self {
		self.error = Some(error.into());
		self
	}

	/// Encode the record as a newline-terminated JSON event line.
	pub fn to_event_line(&self) -> LogResult<Vec<u8>> {
		let event = EventLine {
			level: self.level,
			time: format_timestamp(&self.time),
			message: &self.message,
			error: self.error.as_deref(),
		};

		let mut line =
			serde_json::to_vec(&event).map_err(|e| LogError::parse(e.to_string()))?;
		line.push(b'\n');
		Ok(line)
	}
}

#[derive(Serialize)]
struct EventLine<'a> {
	level: Level,
	time: String,
	message: &'a str,
	#[serde(skip_serializing_if = "Option::is_none")]
	error: Option<&'a str>,
}

/// Looser shape used while decoding, so level and time can be validated
/// with precise error messages.
#[derive(Deserialize)]
struct RawEvent {
	#[serde(default)]
	level: String,
	#[serde(default)]
	time: String,
	#[serde(default)]
	message: String,
	#[serde(default)]
	error: Option<String>,
}

/// Current local time truncated to whole seconds.
pub fn now() -> DateTime<FixedOffset> {
	Local::now().fixed_offset().trunc_subsecs(0)
}

/// Format a timestamp using [`TIME_LAYOUT`].
pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
	time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a timestamp that must match [`TIME_LAYOUT`] exactly.
pub fn parse_timestamp(s: &str) -> LogResult<DateTime<FixedOffset>> {
	let parsed = match s.strip_suffix('Z') {
		Some(naive) => NaiveDateTime::parse_from_str(naive, "%Y-%m-%dT%H:%M:%S")
			.map(|t| t.and_utc().fixed_offset()),
		None => DateTime::parse_from_str(s, TIME_LAYOUT),
	};

	parsed.map_err(|_| {
		LogError::parse(format!(
			"cannot parse datetime format, got {s}, want {TIME_LAYOUT}"
		))
	})
}

/// Reconstruct a [`Record`] from a JSON event line.
///
/// Fails when the input is not JSON, when `time` does not match the
/// timestamp profile, or when `level` is not a known token.
pub fn unmarshal_record(bytes: &[u8]) -> LogResult<Record> {
	let raw: RawEvent =
		serde_json::from_slice(bytes).map_err(|e| LogError::parse(e.to_string()))?;

	let time = parse_timestamp(&raw.time)?;
	let level: Level = raw
		.level
		.parse()
		.map_err(|_| LogError::parse(format!("cannot parse level: {}", raw.level)))?;

	Ok(Record {
		level,
		time,
		message: raw.message,
		error: raw.error.filter(|e| !e.is_empty()),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn test_event_line_shape() {
		let record = Record::new(Level::Debug, "Testing level debug");
		let line = record.to_event_line().unwrap();

		assert_eq!(line.last(), Some(&b'\n'));

		let value: serde_json::Value = serde_json::from_slice(&line).unwrap();
		assert_eq!(value["level"], "debug");
		assert_eq!(value["message"], "Testing level debug");
		assert!(value.get("time").is_some());
		assert!(value.get("error").is_none());
	}

	#[test]
	fn test_event_line_with_error() {
		let record = Record::new(Level::Error, "error message").with_error("error");
		let line = record.to_event_line().unwrap();

		let value: serde_json::Value = serde_json::from_slice(&line).unwrap();
		assert_eq!(value["error"], "error");
	}

	#[test]
	fn test_unmarshal_record() {
		let line = br#"{"level":"info","time":"2020-12-17T07:12:57+01:00","message":"Listing snapshots"}"#;
		let record = unmarshal_record(line).unwrap();

		assert_eq!(record.level, Level::Info);
		assert_eq!(record.message, "Listing snapshots");
		assert_eq!(record.error, None);
		assert_eq!(format_timestamp(&record.time), "2020-12-17T07:12:57+01:00");
	}

	#[test]
	fn test_unmarshal_record_utc() {
		let line = br#"{"level":"warn","time":"2006-01-02T15:04:05Z","message":"Warning","error":"boom"}"#;
		let record = unmarshal_record(line).unwrap();

		assert_eq!(record.level, Level::Warn);
		assert_eq!(record.error.as_deref(), Some("boom"));
		assert_eq!(format_timestamp(&record.time), "2006-01-02T15:04:05Z");
	}

	#[test]
	fn test_unmarshal_rejects_bad_time() {
		let cases: [&[u8]; 3] = [
			br#"{"level":"info","time":"2020-12-17 07:12:57","message":"x"}"#,
			br#"{"level":"info","time":"2020-12-17T07:12:57.123+01:00","message":"x"}"#,
			br#"{"level":"info","message":"x"}"#,
		];

		for line in cases {
			let err = unmarshal_record(line).unwrap_err();
			assert!(matches!(err, LogError::Parse(_)), "{err}");
		}
	}

	#[test]
	fn test_unmarshal_rejects_bad_level() {
		let line = br#"{"level":"loud","time":"2020-12-17T07:12:57+01:00","message":"x"}"#;
		let err = unmarshal_record(line).unwrap_err();
		assert_eq!(err.to_string(), "cannot parse log record: cannot parse level: loud");
	}

	#[test]
	fn test_unmarshal_rejects_garbage() {
		assert!(matches!(
			unmarshal_record(b"not json").unwrap_err(),
			LogError::Parse(_)
		));
	}

	proptest! {
		/// Encoding then decoding recovers level, message and error text.
		#[test]
		fn event_line_round_trip(
			idx in 0usize..9,
			message in "[^\n]{0,64}",
			error in proptest::option::of("[a-z ]{1,24}"),
		) {
			let mut record = Record::new(Level::ALL[idx], message);
			record.error = error;

			let line = record.to_event_line().unwrap();
			let decoded = unmarshal_record(&line).unwrap();

			prop_assert_eq!(decoded, record);
		}
	}
}
