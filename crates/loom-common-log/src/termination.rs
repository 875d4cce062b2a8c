// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! What happens after a fatal or panic record has been written.

use crate::level::Level;

/// Hook invoked once a terminal record has reached every writer.
pub trait Termination: Send + Sync {
	fn terminate(&self, level: Level, message: &str);
}

/// Exits the process with status 1 for fatal records and panics with the
/// message for panic records.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessTermination;

impl Termination for ProcessTermination {
	fn terminate(&self, level: Level, message: &str) {
		match level {
			Level::Panic => panic!("{message}"),
			_ => std::process::exit(1),
		}
	}
}

/// Does nothing. Lets tests exercise fatal paths without losing the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SuppressTermination;

impl Termination for SuppressTermination {
	fn terminate(&self, _level: Level, _message: &str) {}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	#[should_panic(expected = "Panic message")]
	fn test_process_termination_panics() {
		ProcessTermination.terminate(Level::Panic, "Panic message");
	}

	#[test]
	fn test_suppress_termination_returns() {
		SuppressTermination.terminate(Level::Fatal, "Fatal message");
		SuppressTermination.terminate(Level::Panic, "Panic message");
	}
}
