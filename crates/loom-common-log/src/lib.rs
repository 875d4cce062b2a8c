// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Leveled logging facade for Loom command line tools.
//!
//! This crate provides:
//! - Free functions for leveled, formatted and error-annotated logging
//!   against a process-wide [`Logger`]
//! - Three renderings selected by [`Format`]: plain console lines, a
//!   timestamped pretty layout and one JSON object per line
//! - [`Logger::hold`]/[`Logger::flush`] to defer output, e.g. while a
//!   progress display owns the terminal
//! - [`BufferedWriter`] - an in-memory writer for capturing output
//! - [`LogSettings`] - configuration from TOML files and `LOOM_LOG_*`
//!   environment variables
//! - [`LogBridgeLayer`] - a tracing Layer routing events into a logger
//!
//! # Usage
//!
//! ```ignore
//! use loom_common_log::{self as log, Format, Level};
//!
//! log::init_logger(Format::Pretty);
//! log::set_global_level(Level::Debug);
//!
//! log::info("Listing snapshots");
//! log::debugf!("Testing level {}", "debug");
//! log::error_e(&err, "cannot open repository");
//!
//! log::hold();
//! log::info("shown after the progress bar finishes");
//! log::flush();
//! ```

mod buffer;
mod error;
mod format;
mod global;
mod layer;
mod level;
mod logger;
mod record;
mod render;
mod settings;
mod termination;
mod writer;

pub use buffer::{BufferedWriter, LineBuffer};
pub use error::{LogError, LogResult};
pub use format::{parse_format, Format};
pub use global::{
	append_writer, bypass, debug, debug_e, debugf, error, error_e, errorf, fatal, fatal_e, fatalf,
	flush, global_format, global_level, hold, info, info_e, infof, init_logger,
	init_logger_with_writer, is_holding, msg, msg_e, msgf, panic_msg, remove_writer,
	set_formatting, set_global_level, set_termination, shared, trace, trace_e, tracef,
	update_writer, warn, warn_e, warnf, write_lines, SharedLogger,
};
pub use layer::LogBridgeLayer;
pub use level::{parse_level, Level};
pub use logger::Logger;
pub use record::{format_timestamp, parse_timestamp, unmarshal_record, Record, TIME_LAYOUT};
pub use render::Renderer;
pub use settings::{LogSettings, LogSettingsLayer};
pub use termination::{ProcessTermination, SuppressTermination, Termination};
pub use writer::{ConsoleWriter, LogWriter};

/// Log a formatted message at Trace on the process-wide logger.
#[macro_export]
macro_rules! tracef {
	($($arg:tt)*) => {
		$crate::tracef(format_args!($($arg)*))
	};
}

/// Log a formatted message at Debug on the process-wide logger.
#[macro_export]
macro_rules! debugf {
	($($arg:tt)*) => {
		$crate::debugf(format_args!($($arg)*))
	};
}

/// Log a formatted message at Info on the process-wide logger.
#[macro_export]
macro_rules! infof {
	($($arg:tt)*) => {
		$crate::infof(format_args!($($arg)*))
	};
}

/// Log a formatted message at Warn on the process-wide logger.
#[macro_export]
macro_rules! warnf {
	($($arg:tt)*) => {
		$crate::warnf(format_args!($($arg)*))
	};
}

/// Log a formatted message at Error on the process-wide logger.
#[macro_export]
macro_rules! errorf {
	($($arg:tt)*) => {
		$crate::errorf(format_args!($($arg)*))
	};
}

/// Log a formatted message at Fatal, then terminate.
#[macro_export]
macro_rules! fatalf {
	($($arg:tt)*) => {
		$crate::fatalf(format_args!($($arg)*))
	};
}

/// Log a formatted message at the given [`Level`].
#[macro_export]
macro_rules! msgf {
	($level:expr, $($arg:tt)*) => {
		$crate::msgf($level, format_args!($($arg)*))
	};
}
