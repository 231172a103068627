// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use crate::cursor::{BEFORE_START, CursorError};

/// Position bookkeeping shared by the leaf cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
	position: isize,
	count: usize,
}

impl Position {
	pub fn new(count: usize) -> Self {
		Self {
			position: BEFORE_START,
			count,
		}
	}

	pub fn get(&self) -> isize {
		self.position
	}

	pub fn count(&self) -> usize {
		self.count
	}

	fn end(&self) -> isize {
		self.count as isize
	}

	pub fn next(&mut self) -> bool {
		if self.position < self.end() {
			self.position += 1;
		}
		self.position < self.end()
	}

	pub fn back(&mut self) -> bool {
		if self.position > BEFORE_START {
			self.position -= 1;
		}
		self.position >= 0
	}

	pub fn seek(&mut self, position: isize) -> crate::Result<isize> {
		if position < BEFORE_START || position > self.end() {
			return Err(CursorError::PositionOutOfRange {
				position,
				count: self.count,
			}
			.into());
		}
		self.position = position;
		Ok(position)
	}

	pub fn reset(&mut self) {
		self.position = BEFORE_START;
	}

	pub fn seek_end(&mut self) {
		self.position = self.end();
	}

	/// Index of the current row, or an error on either sentinel.
	pub fn index(&self) -> crate::Result<usize> {
		if self.position < 0 || self.position >= self.end() {
			return Err(CursorError::NoCurrentRow {
				position: self.position,
				count: self.count,
			}
			.into());
		}
		Ok(self.position as usize)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_next_stops_at_end_sentinel() {
		let mut position = Position::new(2);
		assert!(position.next());
		assert!(position.next());
		assert!(!position.next());
		assert_eq!(position.get(), 2);
		assert!(!position.next());
		assert_eq!(position.get(), 2);
	}

	#[test]
	fn test_back_stops_at_start_sentinel() {
		let mut position = Position::new(2);
		assert!(!position.back());
		assert_eq!(position.get(), -1);
		position.seek_end();
		assert!(position.back());
		assert_eq!(position.get(), 1);
	}

	#[test]
	fn test_seek_bounds() {
		let mut position = Position::new(3);
		assert_eq!(position.seek(-1).unwrap(), -1);
		assert_eq!(position.seek(3).unwrap(), 3);
		assert_eq!(position.seek(4).unwrap_err().code(), "CURSOR_001");
		assert_eq!(position.seek(-2).unwrap_err().code(), "CURSOR_001");
	}

	#[test]
	fn test_index_on_sentinels() {
		let mut position = Position::new(1);
		assert_eq!(position.index().unwrap_err().code(), "CURSOR_002");
		position.next();
		assert_eq!(position.index().unwrap(), 0);
		position.next();
		assert_eq!(position.index().unwrap_err().code(), "CURSOR_002");
	}

	#[test]
	fn test_empty() {
		let mut position = Position::new(0);
		assert!(!position.next());
		assert_eq!(position.get(), 0);
		assert!(!position.back());
		assert_eq!(position.get(), -1);
	}
}
