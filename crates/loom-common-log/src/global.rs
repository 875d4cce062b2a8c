// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! The process-wide logger and the free functions operating on it.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::error::LogResult;
use crate::format::Format;
use crate::level::Level;
use crate::logger::Logger;
use crate::record::Record;
use crate::termination::Termination;
use crate::writer::LogWriter;

/// A logger shared between threads.
pub type SharedLogger = Arc<Mutex<Logger>>;

static LOGGER: Lazy<SharedLogger> =
	Lazy::new(|| Arc::new(Mutex::new(Logger::new(Format::Default, false, Vec::new()))));

/// Handle to the process-wide logger.
pub fn shared() -> SharedLogger {
	Arc::clone(&LOGGER)
}

fn submit(record: Record) {
	let terminal = LOGGER.lock().log_deferred(record);
	if let Some((termination, record)) = terminal {
		termination.terminate(record.level, &record.message);
	}
}

fn submit_error(level: Level, err: &dyn Error, message: impl Into<String>) {
	submit(Record::new(level, message).with_error(err.to_string()));
}

/// Reset the global logger to a stdout console writer with colour.
pub fn init_logger(format: Format) {
	init_logger_with_writer(format, false, Vec::new());
}

/// Reset the global logger's format, colour and writers.
///
/// An empty `writers` list installs a stdout console writer. Queued records,
/// hold state and minimum level are kept.
pub fn init_logger_with_writer(format: Format, no_color: bool, writers: Vec<Arc<dyn LogWriter>>) {
	LOGGER.lock().reinitialize(format, no_color, writers);
}

pub fn set_formatting(format: Format, no_color: bool) {
	LOGGER.lock().set_formatting(format, no_color);
}

pub fn global_format() -> Format {
	LOGGER.lock().format()
}

pub fn set_global_level(level: Level) {
	LOGGER.lock().set_level(level);
}

pub fn global_level() -> Level {
	LOGGER.lock().level()
}

/// Replace what happens after fatal and panic records.
pub fn set_termination(termination: Arc<dyn Termination>) {
	LOGGER.lock().set_termination(termination);
}

pub fn append_writer(writer: Arc<dyn LogWriter>) {
	LOGGER.lock().append_writer(writer);
}

pub fn remove_writer(writer: &Arc<dyn LogWriter>) {
	LOGGER.lock().remove_writer(writer);
}

pub fn update_writer(old: &Arc<dyn LogWriter>, new: Arc<dyn LogWriter>) -> LogResult<()> {
	LOGGER.lock().update_writer(old, new)
}

/// Queue records until [`flush`] is called.
pub fn hold() {
	LOGGER.lock().hold();
}

/// Write every queued record and resume live logging.
pub fn flush() {
	LOGGER.lock().flush();
}

pub fn is_holding() -> bool {
	LOGGER.lock().is_holding()
}

/// Print `message` as plain text, whatever the current format, level or
/// hold state.
pub fn bypass(message: impl Into<String>) {
	LOGGER.lock().bypass(message);
}

/// Log every line of `bytes` at the global minimum level.
pub fn write_lines(bytes: &[u8]) {
	let mut logger = LOGGER.lock();
	logger.write_lines(bytes);
}

pub fn msg(level: Level, message: impl Into<String>) {
	submit(Record::new(level, message));
}

pub fn msgf(level: Level, args: fmt::Arguments<'_>) {
	submit(Record::new(level, fmt::format(args)));
}

pub fn msg_e(level: Level, err: &dyn Error, message: impl Into<String>) {
	submit_error(level, err, message);
}

pub fn trace(message: impl Into<String>) {
	msg(Level::Trace, message);
}

pub fn tracef(args: fmt::Arguments<'_>) {
	msgf(Level::Trace, args);
}

pub fn trace_e(err: &dyn Error, message: impl Into<String>) {
	submit_error(Level::Trace, err, message);
}

pub fn debug(message: impl Into<String>) {
	msg(Level::Debug, message);
}

pub fn debugf(args: fmt::Arguments<'_>) {
	msgf(Level::Debug, args);
}

pub fn debug_e(err: &dyn Error, message: impl Into<String>) {
	submit_error(Level::Debug, err, message);
}

pub fn info(message: impl Into<String>) {
	msg(Level::Info, message);
}

pub fn infof(args: fmt::Arguments<'_>) {
	msgf(Level::Info, args);
}

pub fn info_e(err: &dyn Error, message: impl Into<String>) {
	submit_error(Level::Info, err, message);
}

pub fn warn(message: impl Into<String>) {
	msg(Level::Warn, message);
}

pub fn warnf(args: fmt::Arguments<'_>) {
	msgf(Level::Warn, args);
}

pub fn warn_e(err: &dyn Error, message: impl Into<String>) {
	submit_error(Level::Warn, err, message);
}

pub fn error(message: impl Into<String>) {
	msg(Level::Error, message);
}

pub fn errorf(args: fmt::Arguments<'_>) {
	msgf(Level::Error, args);
}

pub fn error_e(err: &dyn Error, message: impl Into<String>) {
	submit_error(Level::Error, err, message);
}

/// Log at Fatal, then exit with status 1 unless termination is replaced.
pub fn fatal(message: impl Into<String>) {
	msg(Level::Fatal, message);
}

pub fn fatalf(args: fmt::Arguments<'_>) {
	msgf(Level::Fatal, args);
}

pub fn fatal_e(err: &dyn Error, message: impl Into<String>) {
	submit_error(Level::Fatal, err, message);
}

/// Log at Panic, then panic with the message unless termination is replaced.
pub fn panic_msg(message: impl Into<String>) {
	msg(Level::Panic, message);
}
