// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Tracing layer that forwards events into a [`Logger`](crate::Logger).

use std::fmt;

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::Layer;

use crate::global::{self, SharedLogger};
use crate::level::Level;
use crate::record::Record;

const OWN_CRATE: &str = env!("CARGO_CRATE_NAME");

/// A tracing Layer that logs every event through a shared logger.
///
/// The `message` field becomes the record message and an `error` field the
/// record's error text. Events emitted by this crate are ignored.
#[derive(Clone)]
pub struct LogBridgeLayer {
	logger: SharedLogger,
}

impl LogBridgeLayer {
	pub fn new(logger: SharedLogger) -> Self {
		Self { logger }
	}

	/// Bridge into the process-wide logger.
	pub fn global() -> Self {
		Self::new(global::shared())
	}
}

impl<S> Layer<S> for LogBridgeLayer
where
	S: Subscriber + for<'a> LookupSpan<'a>,
{
	fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
		let metadata = event.metadata();
		if metadata.target().split("::").next() == Some(OWN_CRATE) {
			return;
		}

		let mut visitor = FieldVisitor::default();
		event.record(&mut visitor);

		let mut record = Record::new(
			Level::from_tracing(metadata.level()),
			visitor.message.unwrap_or_default(),
		);
		record.error = visitor.error;

		self.logger.lock().log(record);
	}
}

#[derive(Default)]
struct FieldVisitor {
	message: Option<String>,
	error: Option<String>,
}

impl FieldVisitor {
	fn set(&mut self, field: &Field, value: String) {
		match field.name() {
			"message" => self.message = Some(value),
			"error" => self.error = Some(value),
			_ => {}
		}
	}
}

impl Visit for FieldVisitor {
	fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
		self.set(field, format!("{:?}", value));
	}

	fn record_str(&mut self, field: &Field, value: &str) {
		self.set(field, value.to_string());
	}

	fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
		self.set(field, value.to_string());
	}
}
