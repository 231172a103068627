// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::sync::Arc;

use tessera_type::RowId;

use crate::cursor::{Position, RowCursor};

/// Cursor over an explicit list of row identities.
///
/// Clones share the immutable list and nothing else.
#[derive(Debug, Clone)]
pub struct ListCursor {
	rows: Arc<[RowId]>,
	position: Position,
}

impl ListCursor {
	pub fn new(rows: impl Into<Arc<[RowId]>>) -> Self {
		let rows = rows.into();
		let position = Position::new(rows.len());
		Self {
			rows,
			position,
		}
	}
}

impl FromIterator<RowId> for ListCursor {
	fn from_iter<T: IntoIterator<Item = RowId>>(iter: T) -> Self {
		ListCursor::new(iter.into_iter().collect::<Vec<_>>())
	}
}

impl RowCursor for ListCursor {
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
		Ok(self.rows[index].clone())
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
