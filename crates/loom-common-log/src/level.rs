// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Log levels.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LogError;

/// Severity of a log record.
///
/// Variants are declared in filter order: a record is emitted when its level
/// is greater than or equal to the active minimum level. `NoLevel` and
/// `Disabled` sit above every real severity, so setting either as the minimum
/// silences all regular output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
	Trace,
	Debug,
	#[default]
	Info,
	Warn,
	Error,
	/// Always emitted; terminates the process afterwards.
	Fatal,
	/// Always emitted; panics afterwards.
	Panic,
	NoLevel,
	Disabled,
}

impl Level {
	pub const ALL: [Level; 9] = [
		Level::Trace,
		Level::Debug,
		Level::Info,
		Level::Warn,
		Level::Error,
		Level::Fatal,
		Level::Panic,
		Level::NoLevel,
		Level::Disabled,
	];

	/// Get the string representation.
	pub fn as_str(&self) -> &'static str {
		match self {
			Level::Trace => "trace",
			Level::Debug => "debug",
			Level::Info => "info",
			Level::Warn => "warn",
			Level::Error => "error",
			Level::Fatal => "fatal",
			Level::Panic => "panic",
			Level::NoLevel => "",
			Level::Disabled => "disabled",
		}
	}

	/// Whether records at this level end the process after being written.
	pub fn is_terminal(&self) -> bool {
		matches!(self, Level::Fatal | Level::Panic)
	}

	/// Convert from tracing Level.
	pub fn from_tracing(level: &tracing::Level) -> Self {
		match *level {
			tracing::Level::TRACE => Level::Trace,
			tracing::Level::DEBUG => Level::Debug,
			tracing::Level::INFO => Level::Info,
			tracing::Level::WARN => Level::Warn,
			tracing::Level::ERROR => Level::Error,
		}
	}
}

impl std::fmt::Display for Level {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl std::str::FromStr for Level {
	type Err = LogError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"trace" => Ok(Level::Trace),
			"debug" => Ok(Level::Debug),
			"info" => Ok(Level::Info),
			"warn" => Ok(Level::Warn),
			"error" => Ok(Level::Error),
			"fatal" => Ok(Level::Fatal),
			"panic" => Ok(Level::Panic),
			"" => Ok(Level::NoLevel),
			"disabled" => Ok(Level::Disabled),
			_ => Err(LogError::UnknownLevel(s.to_string())),
		}
	}
}

/// Convert a level token into a typed [`Level`].
pub fn parse_level(s: &str) -> Result<Level, LogError> {
	s.parse()
}

impl Serialize for Level {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(self.as_str())
	}
}

impl<'de> Deserialize<'de> for Level {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = String::deserialize(deserializer)?;
		s.parse().map_err(serde::de::Error::custom)
	}
}
