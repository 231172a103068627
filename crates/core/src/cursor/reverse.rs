// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::RowId;

use crate::cursor::{BEFORE_START, RowCursor};

/// Presents the rows of an inner cursor in the opposite order.
///
/// Outer position `p` corresponds to inner position `count - 1 - p`; both
/// sentinels swap. The inner cursor is moved to its after-end sentinel on
/// construction so that the outer cursor starts before its first row.
#[derive(Debug)]
pub struct ReverseCursor {
	inner: Box<dyn RowCursor>,
}

impl ReverseCursor {
	pub fn new(mut inner: Box<dyn RowCursor>) -> Self {
		inner.seek_end();
		Self {
			inner,
		}
	}

	pub fn into_inner(self) -> Box<dyn RowCursor> {
		self.inner
	}

	fn mirror(&self, position: isize) -> isize {
		self.inner.count() as isize - 1 - position
	}
}

impl RowCursor for ReverseCursor {
	fn count(&self) -> usize {
		self.inner.count()
	}

	fn position(&self) -> isize {
		self.mirror(self.inner.position())
	}

	fn move_next(&mut self) -> bool {
		self.inner.move_back()
	}

	fn move_back(&mut self) -> bool {
		self.inner.move_next()
	}

	fn move_to(&mut self, position: isize) -> crate::Result<isize> {
		let count = self.count();
		if position < BEFORE_START || position > count as isize {
			return Err(crate::cursor::CursorError::PositionOutOfRange {
				position,
				count,
			}
			.into());
		}
		self.inner.move_to(self.mirror(position))?;
		Ok(position)
	}

	fn current(&self) -> crate::Result<RowId> {
		self.inner.current()
	}

	fn reset(&mut self) {
		self.inner.seek_end()
	}

	fn seek_end(&mut self) {
		self.inner.reset()
	}

	fn clone_box(&self) -> Box<dyn RowCursor> {
		Box::new(ReverseCursor {
			inner: self.inner.clone_box(),
		})
	}
}
