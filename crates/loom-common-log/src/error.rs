// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Error types for the logging facade.

use thiserror::Error;

/// Result type alias for logging operations.
pub type LogResult<T> = Result<T, LogError>;

/// Errors returned by parsing, writer management and settings loading.
///
/// None of these are fatal to the process; only Fatal/Panic level records
/// terminate it.
#[derive(Error, Debug)]
pub enum LogError {
	#[error("unknown log format: '{0}'")]
	UnknownFormat(String),

	#[error("unknown log level: '{0}'")]
	UnknownLevel(String),

	#[error("cannot update logger stream, current stream not found")]
	NotFound,

	#[error("cannot parse log record: {0}")]
	Parse(String),

	/// A settings value could not be interpreted
	#[error("invalid value for {field}: {message}")]
	InvalidSetting { field: String, message: String },

	#[error("I/O error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

impl LogError {
	/// Create a parse error
	pub fn parse(msg: impl Into<String>) -> Self {
		Self::Parse(msg.into())
	}

	/// Create an invalid setting error
	pub fn invalid_setting(field: impl Into<String>, message: impl Into<String>) -> Self {
		Self::InvalidSetting {
			field: field.into(),
			message: message.into(),
		}
	}
}
