// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

//! Composite key ordering.
//!
//! A [`Collation`] lists the parts of a composite key and their directions;
//! a [`CollationResolver`] binds it to a table, resolves the key of a row and
//! compares two keys lexicographically.
//!
//! Undefined values sort first in every part, ascending or descending. The
//! descending negation applies only when both values are defined.

use std::{
	fmt::{Debug, Display, Formatter},
	sync::Arc,
};

use tessera_type::{RowId, Type, Value};

use crate::table::Table;

mod error;
mod resolve;

pub use error::CollationError;
pub use resolve::{CollationResolver, CompositeKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortDirection {
	Asc,
	Desc,
}

impl Display for SortDirection {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			SortDirection::Asc => f.write_str("ASC"),
			SortDirection::Desc => f.write_str("DESC"),
		}
	}
}

/// A per-row scalar computed by the expression evaluator.
pub trait ScalarExpression: Send + Sync + Debug {
	/// Identifies the expression; two parts with the same name are the same key.
	fn name(&self) -> &str;

	fn result_type(&self) -> Type;

	fn evaluate(&self, table: &dyn Table, row: &RowId) -> crate::Result<Value>;
}

#[derive(Debug, Clone)]
pub enum KeySource {
	/// Projection of the column at this offset.
	Column(usize),
	Expression(Arc<dyn ScalarExpression>),
}

impl PartialEq for KeySource {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(KeySource::Column(l), KeySource::Column(r)) => l == r,
			(KeySource::Expression(l), KeySource::Expression(r)) => l.name() == r.name(),
			_ => false,
		}
	}
}

impl Display for KeySource {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			KeySource::Column(offset) => write!(f, "#{}", offset),
			KeySource::Expression(expression) => f.write_str(expression.name()),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct CollationPart {
	pub source: KeySource,
	pub direction: SortDirection,
}

impl CollationPart {
	pub fn asc(column: usize) -> Self {
		Self {
			source: KeySource::Column(column),
			direction: SortDirection::Asc,
		}
	}

	pub fn desc(column: usize) -> Self {
		Self {
			source: KeySource::Column(column),
			direction: SortDirection::Desc,
		}
	}

	pub fn expression(expression: Arc<dyn ScalarExpression>, direction: SortDirection) -> Self {
		Self {
			source: KeySource::Expression(expression),
			direction,
		}
	}
}

/// Non-empty ordered list of key parts with no repeated source, paired with
/// the key's value type. A key of more than one part has a tuple type of the
/// same arity.
#[derive(Debug, Clone, PartialEq)]
pub struct Collation {
	parts: Vec<CollationPart>,
	key_type: Type,
}

impl Collation {
	pub fn new(parts: Vec<CollationPart>, key_type: Type) -> crate::Result<Self> {
		if parts.is_empty() {
			return Err(CollationError::Empty.into());
		}

		for (i, part) in parts.iter().enumerate() {
			if parts[..i].iter().any(|earlier| earlier.source == part.source) {
				return Err(CollationError::DuplicateKey {
					key: part.source.to_string(),
				}
				.into());
			}
		}

		if key_type.arity() != parts.len() {
			return Err(CollationError::ArityMismatch {
				parts: parts.len(),
				key_type,
			}
			.into());
		}

		Ok(Self {
			parts,
			key_type,
		})
	}

	/// Builds a collation whose key type is derived from the table's columns
	/// and the expressions' result types.
	pub fn for_table(table: &dyn Table, parts: Vec<CollationPart>) -> crate::Result<Self> {
		let mut types = parts
			.iter()
			.map(|part| match &part.source {
				KeySource::Column(column) => table.column_type(*column),
				KeySource::Expression(expression) => Ok(expression.result_type()),
			})
			.collect::<crate::Result<Vec<_>>>()?;

		let key_type = if types.len() == 1 {
			types.remove(0)
		} else {
			Type::Tuple(types)
		};
		Self::new(parts, key_type)
	}

	pub fn parts(&self) -> &[CollationPart] {
		&self.parts
	}

	pub fn len(&self) -> usize {
		self.parts.len()
	}

	pub fn is_empty(&self) -> bool {
		self.parts.is_empty()
	}

	pub fn key_type(&self) -> &Type {
		&self.key_type
	}

	/// Type of the `index`-th key component.
	pub fn part_type(&self, index: usize) -> Option<&Type> {
		match &self.key_type {
			Type::Tuple(types) => types.get(index),
			single if index == 0 => Some(single),
			_ => None,
		}
	}

	/// Whether rows ordered by `self` are also ordered by `requested`, which
	/// holds when `requested` is a prefix of `self`.
	pub fn satisfies(&self, requested: &Collation) -> bool {
		requested.parts.len() <= self.parts.len()
			&& requested.parts.iter().zip(&self.parts).all(|(requested, own)| requested == own)
	}
}

impl Display for Collation {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		for (i, part) in self.parts.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{} {}", part.source, part.direction)?;
		}
		Ok(())
	}
}
