// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::Debug;

use serde::{Deserialize, Serialize};
use tessera_type::{RowId, Type, Value};

use crate::{cursor::RowCursor, sort::Collation};

mod alias;
mod delegate;
mod error;

pub use delegate::DelegatingTable;
pub use error::TableError;

/// A read-only relation: named, typed columns over the rows its cursor
/// enumerates.
///
/// Values are addressed by column offset and the [`RowId`] a cursor produced
/// for the row. A table does not own row storage; it only knows how to
/// produce cursors and read values.
pub trait Table: Send + Sync + Debug {
	fn name(&self) -> &str;

	fn column_count(&self) -> usize;

	fn row_count(&self) -> usize;

	/// Offset of the column with the given name, `None` when absent.
	fn column_offset(&self, name: &str) -> Option<usize>;

	fn column_name(&self, column: usize) -> crate::Result<&str>;

	fn column_type(&self, column: usize) -> crate::Result<Type>;

	fn get_value(&self, column: usize, row: &RowId) -> crate::Result<Value>;

	/// Locality hint that `get_value(column, row)` is about to be called.
	/// Implementations may ignore it; it never changes results.
	fn fetch_value(&self, _column: usize, _row: &RowId) {}

	/// A fresh cursor positioned before the first row.
	fn row_cursor(&self) -> crate::Result<Box<dyn RowCursor>>;

	/// The composite key the row cursor is already sorted by. `None` means
	/// the order is unknown, not that the rows are unsorted.
	fn order(&self) -> Option<&Collation> {
		None
	}

	fn require_column_offset(&self, name: &str) -> crate::Result<usize> {
		self.column_offset(name).ok_or_else(|| {
			TableError::ColumnNotFound {
				table: self.name().to_string(),
				name: name.to_string(),
			}
			.into()
		})
	}

	fn check_column(&self, column: usize) -> crate::Result<()> {
		if column >= self.column_count() {
			return Err(TableError::ColumnOutOfRange {
				table: self.name().to_string(),
				column,
				count: self.column_count(),
			}
			.into());
		}
		Ok(())
	}
}

/// Name and type of one column of a base table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnDef {
	pub name: String,
	pub ty: Type,
}

impl ColumnDef {
	pub fn new(name: impl Into<String>, ty: Type) -> Self {
		Self {
			name: name.into(),
			ty,
		}
	}
}

/// Strips any qualifier from a column name: `t.a` becomes `a`.
pub fn unqualified(name: &str) -> &str {
	match name.rfind('.') {
		Some(index) => &name[index + 1..],
		None => name,
	}
}
