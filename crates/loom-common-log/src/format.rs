// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Output formats.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LogError;

/// Rendering mode applied by writers.
///
/// - `Default` prints plain console lines without timestamp. Info records
///   show the bare message, other levels a padded level tag:
///   `ERROR  Error message`
/// - `Pretty` adds an RFC 3339 timestamp and a bracketed level:
///   `2020-12-17T07:12:57+01:00 | INFO   | Listing snapshots`
/// - `Json` prints one JSON object per record:
///   `{"level":"info","time":"2020-12-17T07:12:57+01:00","message":"Listing snapshots"}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Format {
	#[default]
	Default,
	Pretty,
	Json,
}

impl Format {
	/// Get the string representation.
	pub fn as_str(&self) -> &'static str {
		match self {
			Format::Default => "default",
			Format::Pretty => "pretty",
			Format::Json => "json",
		}
	}
}

impl std::fmt::Display for Format {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for Format {
	type Err = LogError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"default" => Ok(Format::Default),
			"pretty" => Ok(Format::Pretty),
			"json" => Ok(Format::Json),
			_ => Err(LogError::UnknownFormat(s.to_string())),
		}
	}
}

/// Convert a format token into a typed [`Format`].
///
/// Callers that need a value regardless can fall back with
/// `parse_format(s).unwrap_or_default()`, which yields [`Format::Default`].
pub fn parse_format(s: &str) -> Result<Format, LogError> {
	s.parse()
}

impl Serialize for Format {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Format {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_format_string() {
		assert_eq!(Format::Default.to_string(), "default");
		assert_eq!(Format::Pretty.to_string(), "pretty");
		assert_eq!(Format::Json.to_string(), "json");
	}

	#[test]
	fn test_parse_format() {
		let cases = [
			("default", Format::Default),
			("pretty", Format::Pretty),
			("json", Format::Json),
			("DEFAULT", Format::Default),
			("PRETTY", Format::Pretty),
			("JSON", Format::Json),
		];

		for (input, expected) in cases {
			assert_eq!(parse_format(input).unwrap(), expected, "input: {input}");
		}
	}

	#[test]
	fn test_parse_format_unknown() {
		let err = parse_format("xml").unwrap_err();
		assert_eq!(err.to_string(), "unknown log format: 'xml'");
		assert_eq!(parse_format("xml").unwrap_or_default(), Format::Default);

		let err = parse_format("unknown").unwrap_err();
		assert_eq!(err.to_string(), "unknown log format: 'unknown'");
	}

	#[test]
	fn test_format_serde() {
		#[derive(Deserialize)]
		struct Wrapper {
			format: Format,
		}

		let w: Wrapper = toml::from_str("format = \"Pretty\"").unwrap();
		assert_eq!(w.format, Format::Pretty);
		assert_eq!(serde_json::to_string(&Format::Json).unwrap(), "\"json\"");
	}
}
