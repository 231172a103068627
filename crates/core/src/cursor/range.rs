// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::RowId;

use crate::cursor::{Position, RowCursor};

/// Cursor over the ordinal identities `0..count`.
///
/// Operators whose rows are computed rather than stored (joins, groupings)
/// address their own rows with it: the row at position `p` is
/// `RowId::from_u64(p)`.
#[derive(Debug, Clone)]
pub struct RangeCursor {
	position: Position,
}

impl RangeCursor {
	pub fn new(count: usize) -> Self {
		Self {
			position: Position::new(count),
		}
	}
}

impl RowCursor for RangeCursor {
	fn count(&self) -> usize {
		self.position.count()
	}

	fn position(&self) -> isize {
		self.position.get()
	}

	fn move_next(&mut self) -> bool {
		self.position.next()
	}

	fn move_back(&mut self) -> bool {
		self.position.back()
	}

	fn move_to(&mut self, position: isize) -> crate::Result<isize> {
		self.position.seek(position)
	}

	fn current(&self) -> crate::Result<RowId> {
		let index = self.position.index()?;
		Ok(RowId::from_u64(index as u64))
	}

	fn reset(&mut self) {
		self.position.reset()
	}

	fn seek_end(&mut self) {
		self.position.seek_end()
	}

	fn clone_box(&self) -> Box<dyn RowCursor> {
		Box::new(self.clone())
	}
}
