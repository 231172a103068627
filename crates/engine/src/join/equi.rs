// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::sync::Arc;

use parking_lot::Mutex;
use tessera_core::{RowCursor, Table};
use tessera_type::RowId;
use tracing::{debug, instrument};

use crate::{
	JoinError,
	join::{EquiJoin, RowTranslation},
};

/// One index list per input; entry `k` of list `t` is the RowId input `t`
/// contributes to join row `k`.
#[derive(Debug)]
pub struct MatchedRows {
	lists: Mutex<Vec<Box<dyn RowCursor>>>,
}

impl RowTranslation for MatchedRows {
	fn adjust_row(&self, ordinal: usize, table: usize) -> crate::Result<RowId> {
		let mut lists = self.lists.lock();
		let list = &mut lists[table];
		list.move_to(ordinal as isize)?;
		list.current()
	}
}

impl EquiJoin {
	/// Pairs each input table with its index list. All lists must have the
	/// same length, which becomes the join's row count.
	#[instrument(level = "trace", skip_all, name = "join::equi::new")]
	pub fn new(tables: Vec<Arc<dyn Table>>, lists: Vec<Box<dyn RowCursor>>) -> crate::Result<Self> {
		if tables.is_empty() {
			return Err(JoinError::NoInputs.into());
		}
		if tables.len() != lists.len() {
			return Err(JoinError::ListCountMismatch {
				tables: tables.len(),
				lists: lists.len(),
			}
			.into());
		}

		let lengths: Vec<usize> = lists.iter().map(|list| list.count()).collect();
		let row_count = lengths[0];
		if lengths.iter().any(|length| *length != row_count) {
			return Err(JoinError::ListLengthMismatch {
				lengths,
			}
			.into());
		}

		let join = Self::assemble(
			tables,
			row_count,
			MatchedRows {
				lists: Mutex::new(lists),
			},
		)?;
		debug!(inputs = join.inputs().len(), rows = row_count, columns = join.column_count, "equi join built");
		Ok(join)
	}
}
