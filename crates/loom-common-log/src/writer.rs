// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Writers that receive encoded records from a [`Logger`](crate::Logger).

use std::io::{self, Write};

use parking_lot::Mutex;

use crate::format::Format;
use crate::render::Renderer;

/// A destination for log records.
///
/// Loggers hand every writer one JSON event line per record and tell each
/// writer which format to use whenever their own settings change. Writers
/// are shared behind `Arc` and compared by identity, so both methods take
/// `&self`.
pub trait LogWriter: Send + Sync {
	/// Accept encoded bytes. Returns the number of input bytes consumed.
	fn write(&self, buf: &[u8]) -> io::Result<usize>;

	/// Switch to a new format and colour setting.
	fn set_formatting(&self, format: Format, no_color: bool);
}

/// A writer that renders records in the configured format before passing
/// them to an underlying byte stream.
pub struct ConsoleWriter {
	inner: Mutex<ConsoleWriterInner>,
}

struct ConsoleWriterInner {
	renderer: Renderer,
	output: Box<dyn Write + Send>,
}

impl ConsoleWriter {
	pub fn new(format: Format, no_color: bool, output: impl Write + Send + 'static) -> Self {
		Self {
			inner: Mutex::new(ConsoleWriterInner {
				renderer: Renderer::new(format, no_color),
				output: Box::new(output),
			}),
		}
	}

	/// Create a writer targeting standard output.
	pub fn stdout(format: Format, no_color: bool) -> Self {
		Self::new(format, no_color, io::stdout())
	}

	pub fn format(&self) -> Format {
		self.inner.lock().renderer.format()
	}

	pub fn no_color(&self) -> bool {
		self.inner.lock().renderer.no_color()
	}

	pub(crate) fn renderer(&self) -> Renderer {
		self.inner.lock().renderer
	}
}

impl LogWriter for ConsoleWriter {
	/// Always reports the full input length, even though the rendered output
	/// usually differs in size.
	fn write(&self, buf: &[u8]) -> io::Result<usize> {
		let mut guard = self.inner.lock();
		let inner = &mut *guard;

		let rendered = inner.renderer.render_event(buf);
		inner.output.write_all(&rendered)?;
		inner.output.flush()?;
		Ok(buf.len())
	}

	fn set_formatting(&self, format: Format, no_color: bool) {
		let mut inner = self.inner.lock();
		if inner.renderer.format() != format || inner.renderer.no_color() != no_color {
			inner.renderer = Renderer::new(format, no_color);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::level::Level;
	use crate::record::Record;
	use std::sync::Arc;

	#[derive(Clone, Default)]
	struct MockOutput {
		output: Arc<std::sync::Mutex<Vec<u8>>>,
	}

	impl MockOutput {
		fn text(&self) -> String {
			String::from_utf8(self.output.lock().unwrap().clone()).unwrap()
		}
	}

	impl Write for MockOutput {
		fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
			self.output.lock().unwrap().extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	#[test]
	fn test_write_renders_event_line() {
		let out = MockOutput::default();
		let writer = ConsoleWriter::new(Format::Default, true, out.clone());

		let line = Record::new(Level::Warn, "Warning").to_event_line().unwrap();
		let n = writer.write(&line).unwrap();

		assert_eq!(n, line.len());
		assert_eq!(out.text(), "WARN   Warning\n");
	}

	#[test]
	fn test_json_writer_keeps_event_line() {
		let out = MockOutput::default();
		let writer = ConsoleWriter::new(Format::Json, true, out.clone());

		let line = Record::new(Level::Info, "hello").to_event_line().unwrap();
		writer.write(&line).unwrap();

		assert_eq!(out.text().as_bytes(), line.as_slice());
	}

	#[test]
	fn test_set_formatting_switches_renderer() {
		let out = MockOutput::default();
		let writer = ConsoleWriter::new(Format::Json, false, out.clone());

		writer.set_formatting(Format::Default, true);
		assert_eq!(writer.format(), Format::Default);
		assert!(writer.no_color());

		let line = Record::new(Level::Info, "plain").to_event_line().unwrap();
		writer.write(&line).unwrap();
		assert_eq!(out.text(), "plain\n");
	}

	#[test]
	fn test_set_formatting_same_settings_keeps_renderer() {
		let writer = ConsoleWriter::new(Format::Pretty, true, io::sink());
		let before = writer.renderer();

		writer.set_formatting(Format::Pretty, true);
		assert_eq!(writer.renderer(), before);
	}
}
