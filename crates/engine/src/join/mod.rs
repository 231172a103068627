// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

//! Join row addressing.
//!
//! A join table concatenates the columns of its inputs and numbers its own
//! rows `0..R`. Reading a value translates the join ordinal into the RowId of
//! the owning input with a [`RowTranslation`], then reads from that input.

use std::{fmt::Debug, sync::Arc};

use tessera_core::{Collation, RangeCursor, RowCursor, Table, table::TableError};
use tessera_type::{RowId, Type, Value};

mod equi;
mod natural;

pub use equi::MatchedRows;
pub use natural::CartesianRows;

use crate::JoinError;

/// Maps a join ordinal to the RowId of one input.
pub trait RowTranslation: Send + Sync + Debug {
	fn adjust_row(&self, ordinal: usize, table: usize) -> crate::Result<RowId>;
}

/// Join over index lists produced by an upstream match resolution step.
pub type EquiJoin = JoinTable<MatchedRows>;

/// Unrestricted cartesian product, rightmost input varying fastest.
pub type NaturalJoin = JoinTable<CartesianRows>;

#[derive(Debug)]
pub struct JoinTable<T> {
	name: String,
	tables: Vec<Arc<dyn Table>>,
	/// Global offset of each input's first column.
	starts: Vec<usize>,
	column_count: usize,
	row_count: usize,
	translation: T,
	order: Option<Collation>,
}

impl<T: RowTranslation> JoinTable<T> {
	fn assemble(tables: Vec<Arc<dyn Table>>, row_count: usize, translation: T) -> crate::Result<Self> {
		if tables.is_empty() {
			return Err(JoinError::NoInputs.into());
		}

		let mut starts = Vec::with_capacity(tables.len());
		let mut column_count = 0;
		for table in &tables {
			starts.push(column_count);
			column_count += table.column_count();
		}

		let name = tables.iter().map(|table| table.name()).collect::<Vec<_>>().join(", ");

		Ok(Self {
			name,
			tables,
			starts,
			column_count,
			row_count,
			translation,
			order: None,
		})
	}

	pub fn inputs(&self) -> &[Arc<dyn Table>] {
		&self.tables
	}

	/// RowId of input `table` that contributes to join row `ordinal`.
	pub fn adjust_row(&self, ordinal: usize, table: usize) -> crate::Result<RowId> {
		if ordinal >= self.row_count {
			return Err(TableError::RowNotFound {
				table: self.name.clone(),
				row: RowId::from_u64(ordinal as u64),
			}
			.into());
		}
		if table >= self.tables.len() {
			return Err(JoinError::InputOutOfRange {
				table,
				inputs: self.tables.len(),
			}
			.into());
		}
		self.translation.adjust_row(ordinal, table)
	}

	/// Input index and local column offset of a global column offset.
	pub fn locate(&self, column: usize) -> crate::Result<(usize, usize)> {
		self.check_column(column)?;
		let table = self.starts.partition_point(|start| *start <= column) - 1;
		Ok((table, column - self.starts[table]))
	}

	fn ordinal(&self, row: &RowId) -> crate::Result<usize> {
		let ordinal = row.to_u64()? as usize;
		if ordinal >= self.row_count {
			return Err(TableError::RowNotFound {
				table: self.name.clone(),
				row: row.clone(),
			}
			.into());
		}
		Ok(ordinal)
	}

	fn input_row(&self, column: usize, row: &RowId) -> crate::Result<(usize, usize, RowId)> {
		let ordinal = self.ordinal(row)?;
		let (table, local) = self.locate(column)?;
		let input_row = self.translation.adjust_row(ordinal, table)?;
		Ok((table, local, input_row))
	}
}

impl<T: RowTranslation> Table for JoinTable<T> {
	fn name(&self) -> &str {
		&self.name
	}

	fn column_count(&self) -> usize {
		self.column_count
	}

	fn row_count(&self) -> usize {
		self.row_count
	}

	fn column_offset(&self, name: &str) -> Option<usize> {
		self.tables
			.iter()
			.zip(&self.starts)
			.find_map(|(table, start)| table.column_offset(name).map(|offset| start + offset))
	}

	fn column_name(&self, column: usize) -> crate::Result<&str> {
		let (table, local) = self.locate(column)?;
		self.tables[table].column_name(local)
	}

	fn column_type(&self, column: usize) -> crate::Result<Type> {
		let (table, local) = self.locate(column)?;
		self.tables[table].column_type(local)
	}

	fn get_value(&self, column: usize, row: &RowId) -> crate::Result<Value> {
		let (table, local, input_row) = self.input_row(column, row)?;
		self.tables[table].get_value(local, &input_row)
	}

	fn fetch_value(&self, column: usize, row: &RowId) {
		if let Ok((table, local, input_row)) = self.input_row(column, row) {
			self.tables[table].fetch_value(local, &input_row);
		}
	}

	fn row_cursor(&self) -> crate::Result<Box<dyn RowCursor>> {
		Ok(Box::new(RangeCursor::new(self.row_count)))
	}

	fn order(&self) -> Option<&Collation> {
		self.order.as_ref()
	}
}
