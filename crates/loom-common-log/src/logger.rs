// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Logger state: settings, writers and the hold/flush queue.

use std::io;
use std::sync::Arc;

use crate::error::{LogError, LogResult};
use crate::format::Format;
use crate::level::Level;
use crate::record::Record;
use crate::termination::{ProcessTermination, Termination};
use crate::writer::{ConsoleWriter, LogWriter};

/// A logger instance.
///
/// A logger is either live, writing every record straight to its writers,
/// or holding, queueing records until [`Logger::flush`]. Fatal and panic
/// records skip the queue, are written immediately and then handed to the
/// termination policy.
pub struct Logger {
	format: Format,
	level: Level,
	no_color: bool,
	writers: Vec<Arc<dyn LogWriter>>,
	hold: bool,
	pending: Vec<Record>,
	termination: Arc<dyn Termination>,
}

impl Logger {
	/// Create a live logger at level Info.
	///
	/// An empty `writers` list installs a stdout [`ConsoleWriter`].
	pub fn new(format: Format, no_color: bool, writers: Vec<Arc<dyn LogWriter>>) -> Self {
		Self {
			format,
			level: Level::Info,
			no_color,
			writers: adopt_writers(format, no_color, writers),
			hold: false,
			pending: Vec::new(),
			termination: Arc::new(ProcessTermination),
		}
	}

	pub fn with_termination(mut self, termination: Arc<dyn Termination>) -> Self {
		self.termination = termination;
		self
	}

	pub fn set_termination(&mut self, termination: Arc<dyn Termination>) {
		self.termination = termination;
	}

	pub fn format(&self) -> Format {
		self.format
	}

	pub fn level(&self) -> Level {
		self.level
	}

	pub fn no_color(&self) -> bool {
		self.no_color
	}

	pub fn writers(&self) -> &[Arc<dyn LogWriter>] {
		&self.writers
	}

	pub fn is_holding(&self) -> bool {
		self.hold
	}

	pub fn pending_len(&self) -> usize {
		self.pending.len()
	}

	pub fn set_level(&mut self, level: Level) {
		self.level = level;
	}

	/// Replace format, colour and writers.
	///
	/// Minimum level, hold state, pending records and termination policy are
	/// kept.
	pub fn reinitialize(
		&mut self,
		format: Format,
		no_color: bool,
		writers: Vec<Arc<dyn LogWriter>>,
	) {
		self.format = format;
		self.no_color = no_color;
		self.writers = adopt_writers(format, no_color, writers);
		tracing::debug!(
			%format,
			no_color,
			writers = self.writers.len(),
			"logger reinitialized"
		);
	}

	/// Change format and colour in place, reconfiguring every writer.
	pub fn set_formatting(&mut self, format: Format, no_color: bool) {
		self.format = format;
		self.no_color = no_color;
		for writer in &self.writers {
			writer.set_formatting(format, no_color);
		}
	}

	/// Add a writer. Writers already registered are not added twice.
	pub fn append_writer(&mut self, writer: Arc<dyn LogWriter>) {
		if self.position(&writer).is_some() {
			return;
		}

		let mut writers = self.writers.clone();
		writers.push(writer);
		self.reinitialize(self.format, self.no_color, writers);
	}

	/// Remove a writer by identity. Unknown writers are ignored.
	pub fn remove_writer(&mut self, writer: &Arc<dyn LogWriter>) {
		let Some(index) = self.position(writer) else {
			return;
		};

		let mut writers = self.writers.clone();
		writers.remove(index);
		self.reinitialize(self.format, self.no_color, writers);
	}

	/// Swap `old` for `new`, keeping its position in the writer list.
	///
	/// When `new` is already registered elsewhere, `old` is dropped instead
	/// so the list never holds the same writer twice.
	pub fn update_writer(
		&mut self,
		old: &Arc<dyn LogWriter>,
		new: Arc<dyn LogWriter>,
	) -> LogResult<()> {
		let index = self.position(old).ok_or(LogError::NotFound)?;

		let mut writers = self.writers.clone();
		match self.position(&new) {
			Some(existing) if existing == index => return Ok(()),
			Some(_) => {
				writers.remove(index);
			}
			None => writers[index] = new,
		}
		self.reinitialize(self.format, self.no_color, writers);
		Ok(())
	}

	fn position(&self, writer: &Arc<dyn LogWriter>) -> Option<usize> {
		self.writers.iter().position(|w| Arc::ptr_eq(w, writer))
	}

	/// Start queueing records instead of writing them.
	pub fn hold(&mut self) {
		self.hold = true;
	}

	/// Stop holding and write every queued record in order.
	pub fn flush(&mut self) {
		self.hold = false;

		let pending = std::mem::take(&mut self.pending);
		if pending.is_empty() {
			return;
		}

		tracing::debug!(count = pending.len(), "flushing held log records");
		for record in &pending {
			self.emit(record);
		}
	}

	/// Write `message` at Info in Default format without colour, ignoring
	/// hold state and minimum level. Settings are restored afterwards.
	pub fn bypass(&mut self, message: impl Into<String>) {
		let (format, no_color, level) = (self.format, self.no_color, self.level);

		self.set_formatting(Format::Default, true);
		self.level = Level::Info;
		self.emit(&Record::new(Level::Info, message));

		self.set_formatting(format, no_color);
		self.level = level;
	}

	/// Log a record, running the termination policy for fatal and panic
	/// records.
	pub fn log(&mut self, record: Record) {
		if let Some(record) = self.route(record) {
			self.termination.terminate(record.level, &record.message);
		}
	}

	/// Like [`Logger::log`], but hands a terminal record back together with
	/// the policy so the caller can terminate after releasing its lock.
	pub(crate) fn log_deferred(
		&mut self,
		record: Record,
	) -> Option<(Arc<dyn Termination>, Record)> {
		self.route(record)
			.map(|record| (Arc::clone(&self.termination), record))
	}

	/// Log every line of `bytes` as its own record at the logger's minimum
	/// level. Empty lines are kept only in Default format.
	pub fn write_lines(&mut self, bytes: &[u8]) {
		let text = String::from_utf8_lossy(bytes);
		for line in text.split('\n') {
			if line.is_empty() && self.format != Format::Default {
				continue;
			}
			self.log(Record::new(self.level, line));
		}
	}

	pub fn msg(&mut self, level: Level, message: impl Into<String>) {
		self.log(Record::new(level, message));
	}

	pub fn msg_e(&mut self, level: Level, err: &dyn std::error::Error, message: impl Into<String>) {
		self.log(Record::new(level, message).with_error(err.to_string()));
	}

	pub fn debug(&mut self, message: impl Into<String>) {
		self.msg(Level::Debug, message);
	}

	pub fn info(&mut self, message: impl Into<String>) {
		self.msg(Level::Info, message);
	}

	pub fn warn(&mut self, message: impl Into<String>) {
		self.msg(Level::Warn, message);
	}

	pub fn error(&mut self, message: impl Into<String>) {
		self.msg(Level::Error, message);
	}

	fn route(&mut self, record: Record) -> Option<Record> {
		if record.level.is_terminal() {
			self.emit(&record);
			return Some(record);
		}

		if self.hold {
			self.pending.push(record);
		} else {
			self.emit(&record);
		}
		None
	}

	fn emit(&self, record: &Record) {
		if record.level == Level::Disabled {
			return;
		}
		if !record.level.is_terminal() && record.level < self.level {
			return;
		}

		let line = match record.to_event_line() {
			Ok(line) => line,
			Err(e) => {
				tracing::warn!(error = %e, "failed to encode log record");
				return;
			}
		};

		for writer in &self.writers {
			if let Err(e) = writer.write(&line) {
				tracing::warn!(error = %e, "log writer failed");
			}
		}
	}
}

/// Lets output of other code, such as a child process, be redirected into
/// the logger line by line.
impl io::Write for Logger {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.write_lines(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

fn adopt_writers(
	format: Format,
	no_color: bool,
	writers: Vec<Arc<dyn LogWriter>>,
) -> Vec<Arc<dyn LogWriter>> {
	if writers.is_empty() {
		return vec![Arc::new(ConsoleWriter::stdout(format, no_color))];
	}

	for writer in &writers {
		writer.set_formatting(format, no_color);
	}
	writers
}
