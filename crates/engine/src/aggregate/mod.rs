// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

//! Sorted-run aggregation.
//!
//! The child is expected to enumerate rows in non-decreasing order of the
//! grouping key. One forward scan splits it into contiguous groups; each group
//! is later materialized as a window over the child.

use std::{cmp::Ordering, sync::Arc};

use parking_lot::Mutex;
use tessera_core::{
	Collation, CollationPart, CollationResolver, CompositeKey, DelegatingTable, KeySource, RangeCursor, RowCursor,
	Table, table::TableError,
};
use tessera_type::{RowId, Type, Value, return_error, return_internal_error};
use tracing::{debug, instrument};

use crate::AggregateError;

/// Ordinal range `[start, start + size)` of the child's row cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Group {
	pub start: usize,
	pub size: usize,
}

impl Group {
	pub fn new(start: usize, size: usize) -> Self {
		Self {
			start,
			size,
		}
	}

	pub fn end(&self) -> usize {
		self.start + self.size
	}

	pub fn is_empty(&self) -> bool {
		self.size == 0
	}
}

/// The groups of a sorted child, exposed as a table with one row per group
/// and one column per grouping key part.
///
/// Only [`SortedAggregate::build`] creates one, so every instance is fully
/// scanned and immutable.
#[derive(Debug)]
pub struct SortedAggregate {
	child: Arc<dyn Table>,
	grouping: Option<Collation>,
	groups: Vec<Group>,
	order: Option<Collation>,
	cursor: Mutex<Box<dyn RowCursor>>,
}

impl SortedAggregate {
	#[instrument(level = "trace", skip_all, name = "aggregate::build")]
	pub fn build(child: Arc<dyn Table>, grouping: Option<Collation>) -> crate::Result<Self> {
		let mut cursor = child.row_cursor()?;
		let rows = cursor.count();
		if rows != child.row_count() {
			return_internal_error!(
				"table {} reports {} rows but its cursor enumerates {}",
				child.name(),
				child.row_count(),
				rows
			);
		}

		let groups = match &grouping {
			Some(collation) if rows > 1 => {
				if child.order().is_some_and(|order| order.satisfies(collation)) {
					debug!(grouping = %collation, "child order satisfies grouping");
				}
				scan(child.as_ref(), collation, cursor.as_mut())?
			}
			_ => vec![Group::new(0, rows)],
		};
		cursor.reset();

		let order = match &grouping {
			Some(collation) => Some(own_order(collation)?),
			None => None,
		};

		debug!(child = child.name(), rows, groups = groups.len(), "sorted aggregate built");

		let cursor = Mutex::new(cursor);
		Ok(Self {
			child,
			grouping,
			groups,
			order,
			cursor,
		})
	}

	pub fn groups(&self) -> &[Group] {
		&self.groups
	}

	pub fn group_count(&self) -> usize {
		self.groups.len()
	}

	pub fn grouping(&self) -> Option<&Collation> {
		self.grouping.as_ref()
	}

	pub fn child(&self) -> &Arc<dyn Table> {
		&self.child
	}

	/// The rows of group `group` as a window over the child, ordered like the
	/// child.
	pub fn group(&self, group: usize) -> crate::Result<DelegatingTable> {
		let Group {
			start,
			size,
		} = self.get_group(group)?;
		DelegatingTable::window(self.child.clone(), start, size)
	}

	fn get_group(&self, group: usize) -> crate::Result<Group> {
		self.groups.get(group).copied().ok_or_else(|| {
			AggregateError::GroupOutOfRange {
				group,
				count: self.groups.len(),
			}
			.into()
		})
	}

	fn group_of(&self, row: &RowId) -> crate::Result<Group> {
		let ordinal = row.to_u64()? as usize;
		self.groups.get(ordinal).copied().ok_or_else(|| {
			TableError::RowNotFound {
				table: self.child.name().to_string(),
				row: row.clone(),
			}
			.into()
		})
	}

	/// RowId of the child row at `ordinal`.
	fn child_row(&self, ordinal: usize) -> crate::Result<RowId> {
		let mut cursor = self.cursor.lock();
		cursor.move_to(ordinal as isize)?;
		cursor.current()
	}

	fn part(&self, column: usize) -> crate::Result<&CollationPart> {
		self.check_column(column)?;
		match &self.grouping {
			Some(collation) => Ok(&collation.parts()[column]),
			None => return_internal_error!("aggregate without grouping exposed column {}", column),
		}
	}
}

/// Splits the child into runs of equal keys.
fn scan(child: &dyn Table, collation: &Collation, cursor: &mut dyn RowCursor) -> crate::Result<Vec<Group>> {
	let resolver = CollationResolver::bind(collation, child)?;

	let mut groups = Vec::new();
	let mut previous: Option<CompositeKey> = None;
	let mut start = 0;
	let mut ordinal = 0;

	while cursor.move_next() {
		let key = resolver.resolve(&cursor.current()?)?;
		if let Some(previous) = &previous {
			match resolver.compare(previous, &key) {
				Ordering::Equal => {}
				Ordering::Less => {
					groups.push(Group::new(start, ordinal - start));
					start = ordinal;
				}
				Ordering::Greater => {
					return_error!(AggregateError::OrderViolation {
						ordinal,
						previous: previous.clone(),
						current: key,
					});
				}
			}
		}
		previous = Some(key);
		ordinal += 1;
	}

	if ordinal <= start {
		return_internal_error!("scan of {} rows left an empty trailing group at {}", cursor.count(), start);
	}
	groups.push(Group::new(start, ordinal - start));
	Ok(groups)
}

/// Ordering of the aggregate's own rows: by its key columns, in the
/// directions of the grouping.
fn own_order(grouping: &Collation) -> crate::Result<Collation> {
	let parts = grouping
		.parts()
		.iter()
		.enumerate()
		.map(|(column, part)| CollationPart {
			source: KeySource::Column(column),
			direction: part.direction,
		})
		.collect();
	Collation::new(parts, grouping.key_type().clone())
}

impl Table for SortedAggregate {
	fn name(&self) -> &str {
		self.child.name()
	}

	fn column_count(&self) -> usize {
		self.grouping.as_ref().map_or(0, Collation::len)
	}

	fn row_count(&self) -> usize {
		self.groups.len()
	}

	fn column_offset(&self, name: &str) -> Option<usize> {
		(0..self.column_count()).find(|column| self.column_name(*column).is_ok_and(|candidate| candidate == name))
	}

	fn column_name(&self, column: usize) -> crate::Result<&str> {
		match &self.part(column)?.source {
			KeySource::Column(offset) => self.child.column_name(*offset),
			KeySource::Expression(expression) => Ok(expression.name()),
		}
	}

	fn column_type(&self, column: usize) -> crate::Result<Type> {
		self.part(column)?;
		let ty = self.grouping.as_ref().and_then(|grouping| grouping.part_type(column));
		Ok(ty.cloned().unwrap_or(Type::Undefined))
	}

	/// The key of the group's first row; `Undefined` for an empty group.
	fn get_value(&self, column: usize, row: &RowId) -> crate::Result<Value> {
		let part = self.part(column)?;
		let group = self.group_of(row)?;
		if group.is_empty() {
			return Ok(Value::Undefined);
		}

		let first = self.child_row(group.start)?;
		match &part.source {
			KeySource::Column(offset) => self.child.get_value(*offset, &first),
			KeySource::Expression(expression) => expression.evaluate(self.child.as_ref(), &first),
		}
	}

	fn row_cursor(&self) -> crate::Result<Box<dyn RowCursor>> {
		Ok(Box::new(RangeCursor::new(self.groups.len())))
	}

	fn order(&self) -> Option<&Collation> {
		self.order.as_ref()
	}
}
