// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

//! Builder for the process-wide tracing subscriber

use tracing::Level;
use tracing_subscriber::{
	EnvFilter,
	filter::Directive,
	fmt::{
		self,
		writer::{BoxMakeWriter, TestWriter},
	},
	layer::SubscriberExt,
	util::SubscriberInitExt,
};

use crate::error::TracingError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TracingFormat {
	/// Single-line human readable output.
	Compact,
	/// One JSON object per event.
	Json,
}

/// Configures and installs a `tracing-subscriber` registry.
///
/// The `RUST_LOG` environment variable takes precedence over the configured
/// level when `from_env` is enabled.
#[derive(Debug, Clone)]
pub struct TracingBuilder {
	level: Level,
	directives: Vec<String>,
	format: TracingFormat,
	with_target: bool,
	from_env: bool,
	test_writer: bool,
}

impl TracingBuilder {
	pub fn new() -> Self {
		Self {
			level: Level::INFO,
			directives: Vec::new(),
			format: TracingFormat::Compact,
			with_target: true,
			from_env: true,
			test_writer: false,
		}
	}

	pub fn with_level(mut self, level: Level) -> Self {
		self.level = level;
		self
	}

	/// Adds an env-filter directive such as `tessera_engine=trace`.
	pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
		self.directives.push(directive.into());
		self
	}

	pub fn with_format(mut self, format: TracingFormat) -> Self {
		self.format = format;
		self
	}

	pub fn json(self) -> Self {
		self.with_format(TracingFormat::Json)
	}

	pub fn with_target(mut self, with_target: bool) -> Self {
		self.with_target = with_target;
		self
	}

	pub fn from_env(mut self, from_env: bool) -> Self {
		self.from_env = from_env;
		self
	}

	/// Writes through the test harness so output is captured per test.
	pub fn for_tests(mut self) -> Self {
		self.test_writer = true;
		self
	}

	pub fn level(&self) -> Level {
		self.level
	}

	pub fn format(&self) -> TracingFormat {
		self.format
	}

	/// Builds the filter from the environment (when enabled), the level and
	/// the extra directives.
	pub fn filter(&self) -> crate::Result<EnvFilter> {
		let base = self.level.to_string().to_lowercase();
		let mut filter = if self.from_env {
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&base))
		} else {
			EnvFilter::new(&base)
		};

		for directive in &self.directives {
			let parsed = directive.parse::<Directive>().map_err(|err| TracingError::InvalidDirective {
				directive: directive.clone(),
				reason: err.to_string(),
			})?;
			filter = filter.add_directive(parsed);
		}
		Ok(filter)
	}

	/// Installs the subscriber globally. Fails when one is already set.
	pub fn try_init(self) -> crate::Result<()> {
		let filter = self.filter()?;
		let writer = if self.test_writer {
			BoxMakeWriter::new(TestWriter::new())
		} else {
			BoxMakeWriter::new(std::io::stderr)
		};
		let layer = fmt::layer().with_writer(writer).with_target(self.with_target);
		let registry = tracing_subscriber::registry().with(filter);

		let installed = match self.format {
			TracingFormat::Compact => registry.with(layer.compact()).try_init(),
			TracingFormat::Json => registry.with(layer.json()).try_init(),
		};

		installed.map_err(|_| TracingError::AlreadyInitialized)?;
		Ok(())
	}
}

impl Default for TracingBuilder {
	fn default() -> Self {
		Self::new()
	}
}
