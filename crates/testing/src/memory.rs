// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

//! In-memory base table for exercising operators in tests.

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;
use tessera_core::{
	Collation, ColumnDef, ListCursor, RowCursor, Table,
	table::{TableError, unqualified},
};
use tessera_type::{Result, RowId, Type, Value};

/// A base table whose rows live in a vector.
///
/// Rows are enumerated in insertion order. Identities default to the
/// insertion ordinal; [`MemoryTable::row_with_id`] accepts explicit ones.
/// Every prefetch hint received is recorded and can be inspected with
/// [`MemoryTable::hints`].
#[derive(Debug)]
pub struct MemoryTable {
	name: String,
	columns: Vec<ColumnDef>,
	ids: Vec<RowId>,
	rows: HashMap<RowId, Vec<Value>>,
	order: Option<Collation>,
	hints: Mutex<Vec<(usize, RowId)>>,
}

impl MemoryTable {
	pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Self {
		Self {
			name: name.into(),
			columns,
			ids: Vec::new(),
			rows: HashMap::new(),
			order: None,
			hints: Mutex::new(Vec::new()),
		}
	}

	/// A one-column table with one row per value.
	pub fn single_column(
		name: impl Into<String>,
		column: impl Into<String>,
		ty: Type,
		values: impl IntoIterator<Item = Value>,
	) -> Self {
		let mut table = Self::new(name, vec![ColumnDef::new(column, ty)]);
		for value in values {
			table = table.row(vec![value]);
		}
		table
	}

	pub fn row(self, values: Vec<Value>) -> Self {
		let id = RowId::from_u64(self.ids.len() as u64);
		self.row_with_id(id, values)
	}

	pub fn row_with_id(mut self, id: RowId, values: Vec<Value>) -> Self {
		assert_eq!(values.len(), self.columns.len(), "row width must match the column count");
		assert!(!self.rows.contains_key(&id), "duplicate row id {}", id);
		self.ids.push(id.clone());
		self.rows.insert(id, values);
		self
	}

	pub fn with_order(mut self, order: Collation) -> Self {
		self.order = Some(order);
		self
	}

	pub fn into_arc(self) -> Arc<dyn Table> {
		Arc::new(self)
	}

	pub fn ids(&self) -> &[RowId] {
		&self.ids
	}

	/// Prefetch hints received so far, in arrival order.
	pub fn hints(&self) -> Vec<(usize, RowId)> {
		self.hints.lock().clone()
	}

	/// Distinct rows hinted so far, in first-hint order.
	pub fn hinted_rows(&self) -> Vec<RowId> {
		let mut rows: Vec<RowId> = Vec::new();
		for (_, row) in self.hints.lock().iter() {
			if !rows.contains(row) {
				rows.push(row.clone());
			}
		}
		rows
	}

	pub fn clear_hints(&self) {
		self.hints.lock().clear();
	}
}

impl Table for MemoryTable {
	fn name(&self) -> &str {
		&self.name
	}

	fn column_count(&self) -> usize {
		self.columns.len()
	}

	fn row_count(&self) -> usize {
		self.ids.len()
	}

	fn column_offset(&self, name: &str) -> Option<usize> {
		self.columns.iter().position(|column| column.name == name).or_else(|| {
			let (qualifier, column) = name.rsplit_once('.')?;
			if qualifier != self.name {
				return None;
			}
			self.columns.iter().position(|def| def.name == unqualified(column))
		})
	}

	fn column_name(&self, column: usize) -> Result<&str> {
		self.check_column(column)?;
		Ok(&self.columns[column].name)
	}

	fn column_type(&self, column: usize) -> Result<Type> {
		self.check_column(column)?;
		Ok(self.columns[column].ty.clone())
	}

	fn get_value(&self, column: usize, row: &RowId) -> Result<Value> {
		self.check_column(column)?;
		let values = self.rows.get(row).ok_or_else(|| TableError::RowNotFound {
			table: self.name.clone(),
			row: row.clone(),
		})?;
		Ok(values[column].clone())
	}

	fn fetch_value(&self, column: usize, row: &RowId) {
		self.hints.lock().push((column, row.clone()));
	}

	fn row_cursor(&self) -> Result<Box<dyn RowCursor>> {
		Ok(Box::new(ListCursor::new(self.ids.clone())))
	}

	fn order(&self) -> Option<&Collation> {
		self.order.as_ref()
	}
}
