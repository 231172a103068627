// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

mod ordered_f64;
pub mod row_id;
mod r#type;

pub use ordered_f64::{OrderedF64, OrderedFloatError};
pub use row_id::{RowId, RowIdError};
pub use r#type::Type;

/// A column value, represented as a native Rust type.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
	/// Value is not defined (think null in common programming languages)
	Undefined,
	/// A boolean: true or false.
	Boolean(bool),
	/// A 4-byte signed integer
	Int4(i32),
	/// An 8-byte signed integer
	Int8(i64),
	/// A 4-byte unsigned integer
	Uint4(u32),
	/// An 8-byte unsigned integer
	Uint8(u64),
	/// An 8-byte floating point
	Float8(OrderedF64),
	/// A UTF-8 encoded text
	Utf8(String),
	/// A binary large object
	Blob(Vec<u8>),
}

impl Value {
	pub fn undefined() -> Self {
		Value::Undefined
	}

	pub fn bool(v: impl Into<bool>) -> Self {
		Value::Boolean(v.into())
	}

	pub fn int4(v: impl Into<i32>) -> Self {
		Value::Int4(v.into())
	}

	pub fn int8(v: impl Into<i64>) -> Self {
		Value::Int8(v.into())
	}

	pub fn uint4(v: impl Into<u32>) -> Self {
		Value::Uint4(v.into())
	}

	pub fn uint8(v: impl Into<u64>) -> Self {
		Value::Uint8(v.into())
	}

	/// NaN has no place in an ordered key and becomes undefined.
	pub fn float8(v: impl Into<f64>) -> Self {
		OrderedF64::try_from(v.into()).map(Value::Float8).unwrap_or(Value::Undefined)
	}

	pub fn utf8(v: impl Into<String>) -> Self {
		Value::Utf8(v.into())
	}

	pub fn blob(v: impl Into<Vec<u8>>) -> Self {
		Value::Blob(v.into())
	}

	pub fn is_undefined(&self) -> bool {
		matches!(self, Value::Undefined)
	}

	pub fn get_type(&self) -> Type {
		match self {
			Value::Undefined => Type::Undefined,
			Value::Boolean(_) => Type::Boolean,
			Value::Int4(_) => Type::Int4,
			Value::Int8(_) => Type::Int8,
			Value::Uint4(_) => Type::Uint4,
			Value::Uint8(_) => Type::Uint8,
			Value::Float8(_) => Type::Float8,
			Value::Utf8(_) => Type::Utf8,
			Value::Blob(_) => Type::Blob,
		}
	}

	fn as_i128(&self) -> Option<i128> {
		match self {
			Value::Int4(v) => Some(*v as i128),
			Value::Int8(v) => Some(*v as i128),
			Value::Uint4(v) => Some(*v as i128),
			Value::Uint8(v) => Some(*v as i128),
			_ => None,
		}
	}

	/// Rank used to order values of unrelated types deterministically.
	fn rank(&self) -> u8 {
		match self {
			Value::Undefined => 0,
			Value::Boolean(_) => 1,
			Value::Int4(_) | Value::Int8(_) | Value::Uint4(_) | Value::Uint8(_) | Value::Float8(_) => 2,
			Value::Utf8(_) => 3,
			Value::Blob(_) => 4,
		}
	}
}

impl Value {
	/// Natural ordering of values.
	///
	/// Integers of different widths and signedness compare by numeric value,
	/// integers against floats compare exactly. Values of unrelated types are
	/// ordered by type rank so the ordering stays total. `Undefined` sorts below
	/// every defined value.
	///
	/// This is deliberately not `Ord`: `Int4(5)` and `Int8(5)` compare equal
	/// here while staying distinct under `Eq` and `Hash`.
	pub fn compare(&self, other: &Value) -> Ordering {
		match (self, other) {
			(Value::Undefined, Value::Undefined) => Ordering::Equal,
			(Value::Boolean(l), Value::Boolean(r)) => l.cmp(r),
			(Value::Float8(l), Value::Float8(r)) => l.cmp(r),
			(Value::Utf8(l), Value::Utf8(r)) => l.cmp(r),
			(Value::Blob(l), Value::Blob(r)) => l.cmp(r),
			(l, r) => match (l, r, l.as_i128(), r.as_i128()) {
				(_, _, Some(l), Some(r)) => l.cmp(&r),
				(Value::Float8(float), _, None, Some(int)) => compare_int_float(int, float.value()).reverse(),
				(_, Value::Float8(float), Some(int), None) => compare_int_float(int, float.value()),
				_ => l.rank().cmp(&r.rank()),
			},
		}
	}
}

/// Exact ordering of an integer against a float; no rounding through `f64`.
fn compare_int_float(int: i128, float: f64) -> Ordering {
	// 2^127, the first float past every i128
	const BOUND: f64 = i128::MAX as f64;

	if float.is_nan() || float >= BOUND {
		return Ordering::Less;
	}
	if float < -BOUND {
		return Ordering::Greater;
	}

	let integral = float.trunc();
	match int.cmp(&(integral as i128)) {
		Ordering::Equal if float > integral => Ordering::Less,
		Ordering::Equal if float < integral => Ordering::Greater,
		ordering => ordering,
	}
}

impl Display for Value {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Value::Boolean(true) => f.write_str("true"),
			Value::Boolean(false) => f.write_str("false"),
			Value::Int4(value) => Display::fmt(value, f),
			Value::Int8(value) => Display::fmt(value, f),
			Value::Uint4(value) => Display::fmt(value, f),
			Value::Uint8(value) => Display::fmt(value, f),
			Value::Float8(value) => Display::fmt(value, f),
			Value::Utf8(value) => Display::fmt(value, f),
			Value::Blob(value) => {
				f.write_str("0x")?;
				for byte in value {
					write!(f, "{:02x}", byte)?;
				}
				Ok(())
			}
			Value::Undefined => f.write_str("undefined"),
		}
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Boolean(v)
	}
}

impl From<i32> for Value {
	fn from(v: i32) -> Self {
		Value::Int4(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int8(v)
	}
}

impl From<u32> for Value {
	fn from(v: u32) -> Self {
		Value::Uint4(v)
	}
}

impl From<u64> for Value {
	fn from(v: u64) -> Self {
		Value::Uint8(v)
	}
}

impl From<f64> for Value {
	fn from(v: f64) -> Self {
		Value::float8(v)
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Utf8(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Utf8(v)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(v: Option<T>) -> Self {
		v.map(Into::into).unwrap_or(Value::Undefined)
	}
}

#[cfg(test)]
mod tests {
	use std::cmp::Ordering::{Equal, Greater, Less};

	use super::*;

	#[test]
	fn test_undefined_sorts_first() {
		assert_eq!(Value::Undefined.compare(&Value::int4(i32::MIN)), Less);
		assert_eq!(Value::utf8("").compare(&Value::Undefined), Greater);
		assert_eq!(Value::Undefined.compare(&Value::Undefined), Equal);
	}

	#[test]
	fn test_mixed_integer_widths() {
		assert_eq!(Value::int4(-1).compare(&Value::uint8(0u64)), Less);
		assert_eq!(Value::int8(5).compare(&Value::uint4(5u32)), Equal);
		assert_eq!(Value::uint8(u64::MAX).compare(&Value::int8(i64::MAX)), Greater);
	}

	#[test]
	fn test_integer_against_float() {
		assert_eq!(Value::int4(2).compare(&Value::float8(2.5)), Less);
		assert_eq!(Value::float8(3.0).compare(&Value::int8(3)), Equal);
		assert_eq!(Value::float8(-2.5).compare(&Value::int4(-2)), Less);
		assert_eq!(Value::int4(-3).compare(&Value::float8(-2.5)), Less);
	}

	#[test]
	fn test_integer_against_float_beyond_f64_precision() {
		let exact = 1i64 << 53;
		let float = Value::float8(exact as f64);

		assert_eq!(float.compare(&Value::int8(exact)), Equal);
		assert_eq!(float.compare(&Value::int8(exact + 1)), Less);
		assert_eq!(Value::int8(exact + 1).compare(&float), Greater);
		assert_eq!(Value::uint8(u64::MAX).compare(&Value::float8(u64::MAX as f64)), Less);
		assert_eq!(Value::int4(0).compare(&Value::float8(1e300)), Less);
		assert_eq!(Value::int4(0).compare(&Value::float8(-1e300)), Greater);
	}

	#[test]
	fn test_unrelated_types_order_by_rank() {
		assert_eq!(Value::bool(true).compare(&Value::int4(0)), Less);
		assert_eq!(Value::utf8("a").compare(&Value::blob(vec![0u8])), Less);
	}

	#[test]
	fn test_nan_becomes_undefined() {
		assert_eq!(Value::float8(f64::NAN), Value::Undefined);
	}

	#[test]
	fn test_option_conversion() {
		assert_eq!(Value::from(None::<i32>), Value::Undefined);
		assert_eq!(Value::from(Some("x")), Value::utf8("x"));
	}

	#[test]
	fn test_display_blob() {
		assert_eq!(Value::blob(vec![0x0a, 0xff]).to_string(), "0x0aff");
	}
}
