// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use tessera_type::{RowId, Value};
use tracing::instrument;

use crate::{
	sort::{Collation, KeySource, SortDirection},
	table::Table,
};

/// The resolved components of one row's composite key, in collation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey(Vec<Value>);

impl CompositeKey {
	pub fn new(values: Vec<Value>) -> Self {
		Self(values)
	}

	pub fn values(&self) -> &[Value] {
		&self.0
	}

	pub fn into_values(self) -> Vec<Value> {
		self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl Display for CompositeKey {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str("(")?;
		for (i, value) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			Display::fmt(value, f)?;
		}
		f.write_str(")")
	}
}

impl Collation {
	/// Lexicographic comparison of two keys resolved under this collation.
	pub fn compare(&self, l: &CompositeKey, r: &CompositeKey) -> Ordering {
		for (part, (l, r)) in self.parts.iter().zip(l.values().iter().zip(r.values())) {
			let ord = match (l.is_undefined(), r.is_undefined()) {
				(true, true) => Ordering::Equal,
				(true, false) => Ordering::Less,
				(false, true) => Ordering::Greater,
				(false, false) => match part.direction {
					SortDirection::Asc => l.compare(r),
					SortDirection::Desc => l.compare(r).reverse(),
				},
			};
			if ord != Ordering::Equal {
				return ord;
			}
		}
		Ordering::Equal
	}
}

/// A collation bound to the table whose rows it resolves keys for.
#[derive(Debug, Clone, Copy)]
pub struct CollationResolver<'a> {
	collation: &'a Collation,
	table: &'a dyn Table,
}

impl<'a> CollationResolver<'a> {
	/// Checks every column part against the table's columns.
	pub fn bind(collation: &'a Collation, table: &'a dyn Table) -> crate::Result<Self> {
		for part in collation.parts() {
			if let KeySource::Column(column) = part.source {
				table.check_column(column)?;
			}
		}
		Ok(Self {
			collation,
			table,
		})
	}

	pub fn collation(&self) -> &'a Collation {
		self.collation
	}

	/// Evaluates every key part for `row`. Expressions are evaluated afresh
	/// on each call.
	#[instrument(level = "trace", skip_all, name = "sort::resolve")]
	pub fn resolve(&self, row: &RowId) -> crate::Result<CompositeKey> {
		let values = self
			.collation
			.parts()
			.iter()
			.map(|part| match &part.source {
				KeySource::Column(column) => self.table.get_value(*column, row),
				KeySource::Expression(expression) => expression.evaluate(self.table, row),
			})
			.collect::<crate::Result<Vec<_>>>()?;
		Ok(CompositeKey(values))
	}

	pub fn compare(&self, l: &CompositeKey, r: &CompositeKey) -> Ordering {
		self.collation.compare(l, r)
	}
}
