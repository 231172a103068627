// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::sync::Arc;

use parking_lot::Mutex;
use tessera_core::{KeySource, RowCursor, Table};
use tessera_type::RowId;
use tracing::{debug, instrument};

use crate::{
	JoinError,
	join::{NaturalJoin, RowTranslation},
};

/// Mixed-radix addressing of a cartesian product. Input `t` advances once
/// every `strides[t]` join rows, wrapping after `counts[t]` steps.
#[derive(Debug)]
pub struct CartesianRows {
	cursors: Mutex<Vec<Box<dyn RowCursor>>>,
	counts: Vec<usize>,
	strides: Vec<usize>,
}

impl CartesianRows {
	fn local_ordinal(&self, ordinal: usize, table: usize) -> usize {
		(ordinal / self.strides[table]) % self.counts[table]
	}
}

impl RowTranslation for CartesianRows {
	fn adjust_row(&self, ordinal: usize, table: usize) -> crate::Result<RowId> {
		let local = self.local_ordinal(ordinal, table);
		let mut cursors = self.cursors.lock();
		let cursor = &mut cursors[table];
		cursor.move_to(local as isize)?;
		cursor.current()
	}
}

impl NaturalJoin {
	/// Cartesian product of the inputs. The row count is the product of the
	/// input row counts.
	#[instrument(level = "trace", skip_all, name = "join::natural::new")]
	pub fn new(tables: Vec<Arc<dyn Table>>) -> crate::Result<Self> {
		if tables.is_empty() {
			return Err(JoinError::NoInputs.into());
		}

		let counts: Vec<usize> = tables.iter().map(|table| table.row_count()).collect();
		let row_count = if counts.contains(&0) {
			0
		} else {
			counts.iter().try_fold(1usize, |product, count| product.checked_mul(*count)).ok_or_else(|| {
				JoinError::ProductOverflow {
					counts: counts.clone(),
				}
			})?
		};

		let mut strides = vec![1usize; counts.len()];
		for table in (0..counts.len().saturating_sub(1)).rev() {
			strides[table] = strides[table + 1].saturating_mul(counts[table + 1]);
		}

		let cursors = tables.iter().map(|table| table.row_cursor()).collect::<crate::Result<Vec<_>>>()?;

		// The leftmost input advances slowest, so the join keeps its order
		// when the order only projects its columns.
		let order = tables[0]
			.order()
			.filter(|order| order.parts().iter().all(|part| matches!(part.source, KeySource::Column(_))))
			.cloned();

		let mut join = Self::assemble(
			tables,
			row_count,
			CartesianRows {
				cursors: Mutex::new(cursors),
				counts,
				strides,
			},
		)?;
		join.order = order;

		debug!(inputs = join.inputs().len(), rows = row_count, columns = join.column_count, "natural join built");
		Ok(join)
	}
}
