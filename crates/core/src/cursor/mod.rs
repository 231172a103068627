// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

//! Bidirectional, position-addressable row cursors.
//!
//! A cursor enumerates a fixed sequence of [`RowId`]s. Its position lives in
//! `[-1, count]`: `-1` is the before-start sentinel and `count` the after-end
//! sentinel; only positions in `[0, count)` have a current row. Combinators
//! (reverse, window, prefetch) each own the cursor they wrap, so a stack of
//! combinators is a tree of owned boxes.

use std::fmt::Debug;

use tessera_type::RowId;

mod error;
mod list;
mod position;
mod prefetch;
mod range;
mod reverse;
mod window;

pub use error::CursorError;
pub use list::ListCursor;
pub use position::Position;
pub use prefetch::PrefetchCursor;
pub use range::RangeCursor;
pub use reverse::ReverseCursor;
pub use window::WindowCursor;

/// Position of a cursor that has not yet been advanced.
pub const BEFORE_START: isize = -1;

pub trait RowCursor: Send + Sync + Debug {
	/// Number of rows; fixed for the cursor's lifetime.
	fn count(&self) -> usize;

	/// Current position in `[-1, count]`.
	fn position(&self) -> isize;

	/// Advances one step. Returns whether the cursor is on a row afterwards.
	fn move_next(&mut self) -> bool;

	/// Steps back once. Returns whether the cursor is on a row afterwards.
	fn move_back(&mut self) -> bool;

	/// Jumps to an absolute position in `[-1, count]` and returns it.
	fn move_to(&mut self, position: isize) -> crate::Result<isize>;

	/// The row at the current position; fails outside `[0, count)`.
	fn current(&self) -> crate::Result<RowId>;

	/// Returns to the before-start sentinel.
	fn reset(&mut self);

	/// Moves to the after-end sentinel.
	fn seek_end(&mut self);

	/// An independent cursor at the same position over the same rows.
	fn clone_box(&self) -> Box<dyn RowCursor>;
}

impl Clone for Box<dyn RowCursor> {
	fn clone(&self) -> Self {
		self.clone_box()
	}
}

pub trait RowCursorExt: RowCursor {
	/// Iterates the rows after the current position.
	fn rows(&mut self) -> Rows<'_, Self> {
		Rows {
			cursor: self,
		}
	}

	/// Resets the cursor and collects every row it produces.
	fn collect_rows(&mut self) -> crate::Result<Vec<RowId>> {
		self.reset();
		self.rows().collect()
	}
}

impl<C: RowCursor + ?Sized> RowCursorExt for C {}

pub struct Rows<'a, C: RowCursor + ?Sized> {
	cursor: &'a mut C,
}

impl<C: RowCursor + ?Sized> Iterator for Rows<'_, C> {
	type Item = crate::Result<RowId>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.cursor.move_next() {
			Some(self.cursor.current())
		} else {
			None
		}
	}
}
