// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Logger settings from TOML files and environment variables.
//!
//! Settings are collected as layers and merged in precedence order (later
//! layers win), then resolved into a concrete [`LogSettings`]:
//!
//! ```toml
//! [logging]
//! format = "pretty"
//! level = "debug"
//! no_color = true
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{LogError, LogResult};
use crate::format::Format;
use crate::global;
use crate::level::Level;
use crate::logger::Logger;

pub const ENV_FORMAT: &str = "LOOM_LOG_FORMAT";
pub const ENV_LEVEL: &str = "LOOM_LOG_LEVEL";
pub const ENV_NO_COLOR: &str = "LOOM_LOG_NO_COLOR";
/// Conventional opt-out honoured by many terminal tools.
pub const ENV_NO_COLOR_STANDARD: &str = "NO_COLOR";

/// Resolved logger settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
	pub format: Format,
	pub level: Level,
	pub no_color: bool,
}

/// A partial set of settings from one source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct LogSettingsLayer {
	pub format: Option<Format>,
	pub level: Option<Level>,
	pub no_color: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
	#[serde(default)]
	logging: Option<LogSettingsLayer>,
}

impl LogSettingsLayer {
	/// Parse the `[logging]` table of a TOML document. Other tables are
	/// ignored.
	pub fn from_toml_str(content: &str) -> LogResult<Self> {
		let file: SettingsFile = toml::from_str(content)?;
		Ok(file.logging.unwrap_or_default())
	}

	/// Read a TOML file. A missing file yields an empty layer.
	pub fn load(path: &Path) -> LogResult<Self> {
		if !path.exists() {
			debug!(path = %path.display(), "log settings file not found, skipping");
			return Ok(Self::default());
		}

		debug!(path = %path.display(), "loading log settings file");
		let content = std::fs::read_to_string(path)?;
		Self::from_toml_str(&content)
	}

	/// Read the process environment.
	pub fn from_env() -> LogResult<Self> {
		Self::from_vars(std::env::vars())
	}

	/// Build a layer from `(name, value)` pairs shaped like environment
	/// variables. Empty values are ignored.
	pub fn from_vars<I, K, V>(vars: I) -> LogResult<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut layer = Self::default();
		let mut standard_no_color = false;

		for (key, value) in vars {
			let key = key.as_ref();
			let value = value.as_ref().trim();
			if value.is_empty() {
				continue;
			}

			match key {
				ENV_FORMAT => layer.format = Some(value.parse()?),
				ENV_LEVEL => layer.level = Some(value.parse()?),
				ENV_NO_COLOR => layer.no_color = Some(parse_bool(ENV_NO_COLOR, value)?),
				ENV_NO_COLOR_STANDARD => standard_no_color = true,
				_ => continue,
			}
			trace!(key, "applied log setting from environment");
		}

		if standard_no_color && layer.no_color.is_none() {
			layer.no_color = Some(true);
		}
		Ok(layer)
	}

	/// Overlay `other` on top of `self`.
	pub fn merge(&mut self, other: LogSettingsLayer) {
		if other.format.is_some() {
			self.format = other.format;
		}
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.no_color.is_some() {
			self.no_color = other.no_color;
		}
	}

	/// Fill unset values from the defaults.
	pub fn resolve(self) -> LogSettings {
		let defaults = LogSettings::default();
		LogSettings {
			format: self.format.unwrap_or(defaults.format),
			level: self.level.unwrap_or(defaults.level),
			no_color: self.no_color.unwrap_or(defaults.no_color),
		}
	}
}

fn parse_bool(field: &str, value: &str) -> LogResult<bool> {
	match value.to_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		_ => Err(LogError::invalid_setting(
			field,
			format!("expected a boolean, got '{value}'"),
		)),
	}
}

impl LogSettings {
	/// Merge layers in order and resolve the result.
	pub fn from_layers(layers: impl IntoIterator<Item = LogSettingsLayer>) -> Self {
		let mut merged = LogSettingsLayer::default();
		for layer in layers {
			merged.merge(layer);
		}
		merged.resolve()
	}

	pub fn from_toml_str(content: &str) -> LogResult<Self> {
		Ok(LogSettingsLayer::from_toml_str(content)?.resolve())
	}

	pub fn from_env() -> LogResult<Self> {
		Ok(LogSettingsLayer::from_env()?.resolve())
	}

	/// Load `path` (if present) and overlay the environment on top.
	pub fn load(path: &Path) -> LogResult<Self> {
		let file = LogSettingsLayer::load(path)?;
		let env = LogSettingsLayer::from_env()?;
		Ok(Self::from_layers([file, env]))
	}

	/// Configure the process-wide logger with a stdout console writer.
	pub fn apply(&self) {
		global::init_logger_with_writer(self.format, self.no_color, Vec::new());
		global::set_global_level(self.level);
	}

	/// Configure `logger`, keeping its writers.
	pub fn apply_to(&self, logger: &mut Logger) {
		logger.set_formatting(self.format, self.no_color);
		logger.set_level(self.level);
	}
}
