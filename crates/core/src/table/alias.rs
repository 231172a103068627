// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::collections::HashMap;

use once_cell::sync::OnceCell;

use crate::table::{Table, unqualified};

/// Column names of an aliased table, rewritten to `alias.column`.
///
/// Both the rewritten names and the reverse lookup are built on first use.
#[derive(Debug)]
pub(crate) struct AliasNames {
	alias: String,
	names: OnceCell<Vec<String>>,
	offsets: OnceCell<HashMap<String, usize>>,
}

impl AliasNames {
	pub(crate) fn new(alias: impl Into<String>) -> Self {
		Self {
			alias: alias.into(),
			names: OnceCell::new(),
			offsets: OnceCell::new(),
		}
	}

	pub(crate) fn alias(&self) -> &str {
		&self.alias
	}

	fn names(&self, inner: &dyn Table) -> crate::Result<&[String]> {
		let names = self.names.get_or_try_init(|| {
			(0..inner.column_count())
				.map(|column| {
					let name = inner.column_name(column)?;
					Ok(format!("{}.{}", self.alias, unqualified(name)))
				})
				.collect::<crate::Result<Vec<_>>>()
		})?;
		Ok(names.as_slice())
	}

	pub(crate) fn column_name(&self, inner: &dyn Table, column: usize) -> crate::Result<&str> {
		inner.check_column(column)?;
		Ok(self.names(inner)?[column].as_str())
	}

	/// Resolves `alias.column`, or a bare `column` against this alias.
	pub(crate) fn column_offset(&self, inner: &dyn Table, name: &str) -> Option<usize> {
		let offsets = self
			.offsets
			.get_or_try_init(|| {
				let names = self.names(inner)?;
				Ok::<_, tessera_type::Error>(
					names.iter().enumerate().map(|(offset, name)| (name.clone(), offset)).collect(),
				)
			})
			.ok()?;

		if let Some(offset) = offsets.get(name) {
			return Some(*offset);
		}
		if name.contains('.') {
			return None;
		}
		offsets.get(&format!("{}.{}", self.alias, name)).copied()
	}

	#[cfg(test)]
	pub(crate) fn is_resolved(&self) -> bool {
		self.offsets.get().is_some()
	}
}
