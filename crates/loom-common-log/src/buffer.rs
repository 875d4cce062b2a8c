// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! In-memory capture of rendered log output.

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::format::Format;
use crate::writer::{ConsoleWriter, LogWriter};

/// An ordered, shared list of captured output lines.
///
/// Clones share the same storage.
#[derive(Clone, Default)]
pub struct LineBuffer {
	inner: Arc<Mutex<LineBufferInner>>,
}

#[derive(Default)]
struct LineBufferInner {
	lines: Vec<String>,
	context: Format,
}

impl LineBuffer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a buffer whose [`io::Write`] impl captures in `context` mode.
	pub fn with_context(context: Format) -> Self {
		let buffer = Self::default();
		buffer.set_context(context);
		buffer
	}

	pub fn context(&self) -> Format {
		self.inner.lock().context
	}

	pub fn set_context(&self, context: Format) {
		self.inner.lock().context = context;
	}

	/// Split `bytes` into lines and append them.
	///
	/// One trailing newline is ignored. Input that starts with two or more
	/// newlines loses all of them. Empty lines are kept only when `context`
	/// is [`Format::Default`].
	pub fn write_lines(&self, bytes: &[u8], context: Format) {
		capture(&mut self.inner.lock().lines, bytes, context);
	}

	/// Copy of every line captured so far, oldest first.
	pub fn lines(&self) -> Vec<String> {
		self.inner.lock().lines.clone()
	}

	pub fn len(&self) -> usize {
		self.inner.lock().lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.lock().lines.is_empty()
	}

	pub fn clear(&self) {
		self.inner.lock().lines.clear();
	}
}

fn capture(lines: &mut Vec<String>, bytes: &[u8], context: Format) {
	let text = String::from_utf8_lossy(bytes);
	let text = text.strip_suffix('\n').unwrap_or(&text);
	let text = if text.starts_with("\n\n") {
		text.trim_start_matches('\n')
	} else {
		text
	};

	lines.extend(
		text.split('\n')
			.filter(|line| context == Format::Default || !line.is_empty())
			.map(str::to_string),
	);
}

impl io::Write for LineBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		let mut inner = self.inner.lock();
		let context = inner.context;
		capture(&mut inner.lines, buf, context);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// A [`LogWriter`] that renders records like a console but keeps the output
/// in memory, one entry per line.
pub struct BufferedWriter {
	inner: Mutex<BufferedWriterInner>,
}

struct BufferedWriterInner {
	buffer: LineBuffer,
	writer: ConsoleWriter,
}

impl BufferedWriter {
	pub fn new(format: Format, no_color: bool) -> Self {
		Self {
			inner: Mutex::new(Self::fresh(format, no_color)),
		}
	}

	fn fresh(format: Format, no_color: bool) -> BufferedWriterInner {
		let buffer = LineBuffer::with_context(format);
		let writer = ConsoleWriter::new(format, no_color, buffer.clone());
		BufferedWriterInner { buffer, writer }
	}

	/// Captured lines, oldest first.
	pub fn snapshot(&self) -> Vec<String> {
		self.inner.lock().buffer.lines()
	}

	/// Drop every captured line, keeping the current format settings.
	pub fn reset(&self) {
		let mut inner = self.inner.lock();
		let renderer = inner.writer.renderer();
		*inner = Self::fresh(renderer.format(), renderer.no_color());
	}

	pub fn format(&self) -> Format {
		self.inner.lock().writer.format()
	}
}

impl LogWriter for BufferedWriter {
	fn write(&self, buf: &[u8]) -> io::Result<usize> {
		self.inner.lock().writer.write(buf)
	}

	fn set_formatting(&self, format: Format, no_color: bool) {
		let inner = self.inner.lock();
		inner.writer.set_formatting(format, no_color);
		inner.buffer.set_context(format);
	}
}
