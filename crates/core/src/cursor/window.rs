// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::RowId;

use crate::cursor::{CursorError, Position, RowCursor};

/// Exposes the contiguous inner range `[start, start + size)` as positions
/// `0..size`. Movement never crosses the window boundary, even when the inner
/// cursor could continue.
#[derive(Debug)]
pub struct WindowCursor {
	inner: Box<dyn RowCursor>,
	start: usize,
	position: Position,
}

impl WindowCursor {
	pub fn new(mut inner: Box<dyn RowCursor>, start: usize, size: usize) -> crate::Result<Self> {
		let count = inner.count();
		if start.checked_add(size).is_none_or(|end| end > count) {
			return Err(CursorError::WindowOutOfRange {
				start,
				size,
				count,
			}
			.into());
		}
		inner.reset();
		Ok(Self {
			inner,
			start,
			position: Position::new(size),
		})
	}

	pub fn start(&self) -> usize {
		self.start
	}

	/// Aligns the inner cursor with the window position. Sentinels are not
	/// forwarded; `current` checks the window position first.
	fn sync(&mut self) {
		if let Ok(index) = self.position.index() {
			let synced = self.inner.move_to((self.start + index) as isize);
			debug_assert!(synced.is_ok());
		}
	}
}

impl RowCursor for WindowCursor {
	fn count(&self) -> usize {
		self.position.count()
	}

	fn position(&self) -> isize {
		self.position.get()
	}

	fn move_next(&mut self) -> bool {
		let valid = self.position.next();
		self.sync();
		valid
	}

	fn move_back(&mut self) -> bool {
		let valid = self.position.back();
		self.sync();
		valid
	}

	fn move_to(&mut self, position: isize) -> crate::Result<isize> {
		self.position.seek(position)?;
		self.sync();
		Ok(position)
	}

	fn current(&self) -> crate::Result<RowId> {
		self.position.index()?;
		self.inner.current()
	}

	fn reset(&mut self) {
		self.position.reset()
	}

	fn seek_end(&mut self) {
		self.position.seek_end()
	}

	fn clone_box(&self) -> Box<dyn RowCursor> {
		Box::new(WindowCursor {
			inner: self.inner.clone_box(),
			start: self.start,
			position: self.position,
		})
	}
}
