// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// All possible column value types
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Boolean,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A 4-byte unsigned integer
	Uint4,
	/// An 8-byte unsigned integer
	Uint8,
	/// An 8-byte floating point
	Float8,
	/// A UTF-8 encoded text
	Utf8,
	/// A binary large object
	Blob,
	/// A composite of several component types, used as the value type of a
	/// multi-part collation key
	Tuple(Vec<Type>),
	/// Type is not defined (think null in common programming languages)
	Undefined,
}

impl Type {
	/// Number of components of this type; scalar types have an arity of one.
	pub fn arity(&self) -> usize {
		match self {
			Type::Tuple(parts) => parts.len(),
			_ => 1,
		}
	}

	pub fn is_tuple(&self) -> bool {
		matches!(self, Type::Tuple(_))
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("BOOLEAN"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Uint4 => f.write_str("UINT4"),
			Type::Uint8 => f.write_str("UINT8"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::Blob => f.write_str("BLOB"),
			Type::Tuple(parts) => {
				f.write_str("TUPLE(")?;
				for (i, part) in parts.iter().enumerate() {
					if i > 0 {
						f.write_str(", ")?;
					}
					Display::fmt(part, f)?;
				}
				f.write_str(")")
			}
			Type::Undefined => f.write_str("UNDEFINED"),
		}
	}
}
