// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{collections::VecDeque, sync::Arc};

use tessera_type::RowId;
use tracing::trace;

use crate::{config::PrefetchConfig, cursor::RowCursor, table::Table};

/// Issues value prefetch hints page by page while a cursor walks backwards.
///
/// Rows are grouped into pages of `page_size` ordinals. When a backward step
/// lands on a page that is not among the last `ring_capacity` hinted pages,
/// every value of every row on that page is hinted to the table and the page
/// is recorded, evicting the oldest entry. Forward steps and absolute seeks
/// never hint. Enumeration order and values are unaffected.
#[derive(Debug)]
pub struct PrefetchCursor {
	inner: Box<dyn RowCursor>,
	table: Arc<dyn Table>,
	config: PrefetchConfig,
	ring: VecDeque<usize>,
}

impl PrefetchCursor {
	pub fn new(inner: Box<dyn RowCursor>, table: Arc<dyn Table>, config: PrefetchConfig) -> crate::Result<Self> {
		config.validate()?;
		Ok(Self {
			inner,
			table,
			config,
			ring: VecDeque::with_capacity(config.ring_capacity),
		})
	}

	/// Pages hinted so far, oldest first.
	pub fn hinted_pages(&self) -> impl Iterator<Item = usize> + '_ {
		self.ring.iter().copied()
	}

	fn hint_page(&mut self, page: usize) {
		if self.ring.contains(&page) {
			return;
		}

		let restore = self.inner.position();
		let first = page * self.config.page_size;
		let last = (first + self.config.page_size).min(self.inner.count());
		let columns = self.table.column_count();

		for position in first..last {
			if self.inner.move_to(position as isize).is_err() {
				break;
			}
			if let Ok(row) = self.inner.current() {
				for column in 0..columns {
					self.table.fetch_value(column, &row);
				}
			}
		}

		let restored = self.inner.move_to(restore);
		debug_assert!(restored.is_ok());

		if self.ring.len() >= self.config.ring_capacity {
			self.ring.pop_front();
		}
		self.ring.push_back(page);

		trace!(page, rows = last.saturating_sub(first), columns, "prefetch hinted page");
	}
}

impl RowCursor for PrefetchCursor {
	fn count(&self) -> usize {
		self.inner.count()
	}

	fn position(&self) -> isize {
		self.inner.position()
	}

	fn move_next(&mut self) -> bool {
		self.inner.move_next()
	}

	fn move_back(&mut self) -> bool {
		if !self.inner.move_back() {
			return false;
		}
		let page = self.inner.position() as usize / self.config.page_size;
		self.hint_page(page);
		true
	}

	fn move_to(&mut self, position: isize) -> crate::Result<isize> {
		self.inner.move_to(position)
	}

	fn current(&self) -> crate::Result<RowId> {
		self.inner.current()
	}

	fn reset(&mut self) {
		self.inner.reset()
	}

	fn seek_end(&mut self) {
		self.inner.seek_end()
	}

	fn clone_box(&self) -> Box<dyn RowCursor> {
		Box::new(PrefetchCursor {
			inner: self.inner.clone_box(),
			table: self.table.clone(),
			config: self.config,
			ring: self.ring.clone(),
		})
	}
}
