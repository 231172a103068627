// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tessera_type::{Diagnostic, Error, IntoDiagnostic};

use crate::{PrefetchCursor, Table};

pub const DEFAULT_PAGE_SIZE: usize = 80;
pub const DEFAULT_RING_CAPACITY: usize = 16;

/// Page geometry of the prefetch-hinting cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrefetchConfig {
	/// Rows per page.
	pub page_size: usize,
	/// Number of recently hinted pages remembered.
	pub ring_capacity: usize,
}

impl Default for PrefetchConfig {
	fn default() -> Self {
		Self {
			page_size: DEFAULT_PAGE_SIZE,
			ring_capacity: DEFAULT_RING_CAPACITY,
		}
	}
}

impl PrefetchConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn page_size(mut self, page_size: usize) -> Self {
		self.page_size = page_size;
		self
	}

	pub fn ring_capacity(mut self, ring_capacity: usize) -> Self {
		self.ring_capacity = ring_capacity;
		self
	}

	pub fn validate(&self) -> crate::Result<()> {
		if self.page_size == 0 {
			return Err(ConfigError::Zero {
				field: "page_size",
			}
			.into());
		}
		if self.ring_capacity == 0 {
			return Err(ConfigError::Zero {
				field: "ring_capacity",
			}
			.into());
		}
		Ok(())
	}
}

/// Settings applied to one query execution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
	pub prefetch: PrefetchConfig,
}

impl ExecutionConfig {
	pub fn validate(&self) -> crate::Result<()> {
		self.prefetch.validate()
	}

	/// A cursor over `table`'s rows that hints pages on backward steps.
	pub fn prefetch_cursor(&self, table: Arc<dyn Table>) -> crate::Result<PrefetchCursor> {
		let rows = table.row_cursor()?;
		PrefetchCursor::new(rows, table, self.prefetch)
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
	#[error("`{field}` must be greater than zero")]
	Zero {
		field: &'static str,
	},
}

impl IntoDiagnostic for ConfigError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			ConfigError::Zero {
				field,
			} => Diagnostic {
				code: "CONFIG_001".to_string(),
				message: format!("`{}` must be greater than zero", field),
				label: Some("invalid configuration value".to_string()),
				help: Some(format!("set `{}` to a positive value or leave it at its default", field)),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<ConfigError> for Error {
	fn from(err: ConfigError) -> Self {
		Error(err.into_diagnostic())
	}
}
