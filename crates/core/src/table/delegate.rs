// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::sync::Arc;

use tessera_type::{RowId, Type, Value};

use crate::{
	cursor::{RowCursor, WindowCursor},
	sort::Collation,
	table::{Table, alias::AliasNames},
};

/// A table that forwards to an inner table, overriding only naming, row
/// enumeration and the order annotation.
///
/// Aliasing and subsetting are both expressed through this one wrapper:
///
/// - [`DelegatingTable::alias`] renames the table and qualifies its columns;
/// - [`DelegatingTable::subset`] replaces the row cursor with a caller
///   supplied one, leaving value access on the inner table;
/// - [`DelegatingTable::window`] is a subset over a contiguous ordinal range
///   of the inner table's own cursor.
#[derive(Debug)]
pub struct DelegatingTable {
	inner: Arc<dyn Table>,
	alias: Option<AliasNames>,
	rows: Option<Box<dyn RowCursor>>,
	order: Option<Collation>,
}

impl DelegatingTable {
	/// Forwards everything, including the order annotation.
	pub fn new(inner: Arc<dyn Table>) -> Self {
		let order = inner.order().cloned();
		Self {
			inner,
			alias: None,
			rows: None,
			order,
		}
	}

	pub fn alias(inner: Arc<dyn Table>, alias: impl Into<String>) -> Self {
		let mut result = Self::new(inner);
		result.alias = Some(AliasNames::new(alias));
		result
	}

	/// Restricts the table to the rows of `rows`. Nothing is known about
	/// their order.
	pub fn subset(inner: Arc<dyn Table>, rows: Box<dyn RowCursor>) -> Self {
		Self {
			inner,
			alias: None,
			rows: Some(rows),
			order: None,
		}
	}

	/// Restricts the table to ordinals `[start, start + size)` of its cursor.
	/// A contiguous range keeps the inner order.
	pub fn window(inner: Arc<dyn Table>, start: usize, size: usize) -> crate::Result<Self> {
		let cursor = WindowCursor::new(inner.row_cursor()?, start, size)?;
		Ok(Self::subset(inner, Box::new(cursor)).inherit_order())
	}

	pub fn with_order(mut self, order: Option<Collation>) -> Self {
		self.order = order;
		self
	}

	/// Marks this table as ordered like the table it wraps.
	pub fn inherit_order(self) -> Self {
		let order = self.inner.order().cloned();
		self.with_order(order)
	}

	pub fn inner(&self) -> &Arc<dyn Table> {
		&self.inner
	}
}

impl Table for DelegatingTable {
	fn name(&self) -> &str {
		match &self.alias {
			Some(alias) => alias.alias(),
			None => self.inner.name(),
		}
	}

	fn column_count(&self) -> usize {
		self.inner.column_count()
	}

	fn row_count(&self) -> usize {
		match &self.rows {
			Some(rows) => rows.count(),
			None => self.inner.row_count(),
		}
	}

	fn column_offset(&self, name: &str) -> Option<usize> {
		match &self.alias {
			Some(alias) => alias.column_offset(self.inner.as_ref(), name),
			None => self.inner.column_offset(name),
		}
	}

	fn column_name(&self, column: usize) -> crate::Result<&str> {
		match &self.alias {
			Some(alias) => alias.column_name(self.inner.as_ref(), column),
			None => self.inner.column_name(column),
		}
	}

	fn column_type(&self, column: usize) -> crate::Result<Type> {
		self.inner.column_type(column)
	}

	fn get_value(&self, column: usize, row: &RowId) -> crate::Result<Value> {
		self.inner.get_value(column, row)
	}

	fn fetch_value(&self, column: usize, row: &RowId) {
		self.inner.fetch_value(column, row)
	}

	fn row_cursor(&self) -> crate::Result<Box<dyn RowCursor>> {
		match &self.rows {
			Some(rows) => {
				let mut cursor = rows.clone_box();
				cursor.reset();
				Ok(cursor)
			}
			None => self.inner.row_cursor(),
		}
	}

	fn order(&self) -> Option<&Collation> {
		self.order.as_ref()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::cursor::{ListCursor, RangeCursor, RowCursorExt};

	#[derive(Debug)]
	struct Numbers {
		rows: usize,
	}

	impl Table for Numbers {
		fn name(&self) -> &str {
			"numbers"
		}

		fn column_count(&self) -> usize {
			2
		}

		fn row_count(&self) -> usize {
			self.rows
		}

		fn column_offset(&self, name: &str) -> Option<usize> {
			match name {
				"value" => Some(0),
				"square" => Some(1),
				_ => None,
			}
		}

		fn column_name(&self, column: usize) -> crate::Result<&str> {
			self.check_column(column)?;
			Ok(["value", "square"][column])
		}

		fn column_type(&self, column: usize) -> crate::Result<Type> {
			self.check_column(column)?;
			Ok(Type::Uint8)
		}

		fn get_value(&self, column: usize, row: &RowId) -> crate::Result<Value> {
			self.check_column(column)?;
			let n = row.to_u64()?;
			Ok(Value::Uint8(if column == 0 { n } else { n * n }))
		}

		fn row_cursor(&self) -> crate::Result<Box<dyn RowCursor>> {
			Ok(Box::new(RangeCursor::new(self.rows)))
		}
	}

	fn numbers(rows: usize) -> Arc<dyn Table> {
		Arc::new(Numbers {
			rows,
		})
	}

	#[test]
	fn test_forwards_everything() {
		let table = DelegatingTable::new(numbers(3));
		assert_eq!(table.name(), "numbers");
		assert_eq!(table.row_count(), 3);
		assert_eq!(table.column_offset("square"), Some(1));
		assert_eq!(table.get_value(1, &RowId::from_u64(2)).unwrap(), Value::Uint8(4));
		assert!(table.order().is_none());
	}

	#[test]
	fn test_alias_rewrites_names() {
		let table = DelegatingTable::alias(numbers(3), "n");
		assert_eq!(table.name(), "n");
		assert_eq!(table.column_name(1).unwrap(), "n.square");
		assert_eq!(table.column_offset("n.value"), Some(0));
		assert_eq!(table.column_offset("value"), Some(0));
		assert_eq!(table.column_offset("numbers.value"), None);
		assert_eq!(table.column_offset("missing"), None);
		assert_eq!(table.column_name(2).unwrap_err().code(), "TABLE_001");
	}

	#[test]
	fn test_alias_lookup_is_lazy() {
		let table = DelegatingTable::alias(numbers(3), "n");
		let Some(alias) = &table.alias else {
			panic!("expected alias names");
		};
		assert!(!alias.is_resolved());
		table.column_offset("n.value");
		assert!(alias.is_resolved());
	}

	#[test]
	fn test_subset_replaces_rows() {
		let rows: ListCursor = [4u64, 1].into_iter().map(RowId::from_u64).collect();
		let table = DelegatingTable::subset(numbers(10), Box::new(rows));
		assert_eq!(table.row_count(), 2);

		let mut cursor = table.row_cursor().unwrap();
		let values: Vec<Value> =
			cursor.rows().map(|row| table.get_value(1, &row.unwrap()).unwrap()).collect();
		assert_eq!(values, vec![Value::Uint8(16), Value::Uint8(1)]);
	}

	#[test]
	fn test_row_cursor_is_fresh() {
		let table = DelegatingTable::window(numbers(10), 2, 3).unwrap();
		let mut first = table.row_cursor().unwrap();
		first.move_next();
		first.move_next();
		let second = table.row_cursor().unwrap();
		assert_eq!(second.position(), -1);
		assert_eq!(first.collect_rows().unwrap().len(), 3);
	}

	#[test]
	fn test_window_out_of_range() {
		let err = DelegatingTable::window(numbers(3), 2, 2).unwrap_err();
		assert_eq!(err.code(), "CURSOR_003");
	}
}
