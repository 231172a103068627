// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{
	cmp::Ordering,
	fmt::{Display, Formatter},
	sync::Arc,
};

use serde::{Deserialize, Serialize};

use crate::{Diagnostic, Error, IntoDiagnostic};

/// Width of the numeric row identity encoding.
pub const NUMERIC_WIDTH: usize = 8;

/// Opaque identity of a row within its owning base table.
///
/// A `RowId` is an immutable byte sequence. Equality and hashing are
/// byte-wise. Identities created by the execution core (ordinal identities of
/// joins and aggregates) and by numeric storage keys use an 8 byte little
/// endian `u64` encoding; only identities in that encoding have an order, see
/// [`RowId::try_cmp`].
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowId(Arc<[u8]>);

impl RowId {
	pub fn from_u64(value: u64) -> Self {
		Self(Arc::from(value.to_le_bytes().as_slice()))
	}

	pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
		Self(Arc::from(bytes.as_ref()))
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn is_numeric(&self) -> bool {
		self.0.len() == NUMERIC_WIDTH
	}

	/// Decodes the numeric encoding, `None` for any other width.
	pub fn as_u64(&self) -> Option<u64> {
		let bytes: [u8; NUMERIC_WIDTH] = self.0.as_ref().try_into().ok()?;
		Some(u64::from_le_bytes(bytes))
	}

	/// Decodes the numeric encoding or fails with [`RowIdError::NotNumeric`].
	pub fn to_u64(&self) -> Result<u64, RowIdError> {
		self.as_u64().ok_or_else(|| RowIdError::NotNumeric {
			row_id: self.clone(),
		})
	}

	/// Orders two numeric identities by their decoded value.
	///
	/// Identities that are not in the numeric encoding have no defined order;
	/// comparing them fails instead of decoding text bytes as an integer.
	pub fn try_cmp(&self, other: &RowId) -> Result<Ordering, RowIdError> {
		Ok(self.to_u64()?.cmp(&other.to_u64()?))
	}
}

impl From<u64> for RowId {
	fn from(value: u64) -> Self {
		RowId::from_u64(value)
	}
}

impl std::fmt::Debug for RowId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.as_u64() {
			Some(value) => write!(f, "RowId({})", value),
			None => write!(f, "RowId({})", self),
		}
	}
}

impl Display for RowId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		if let Some(value) = self.as_u64() {
			return Display::fmt(&value, f);
		}
		f.write_str("0x")?;
		for byte in self.0.iter() {
			write!(f, "{:02x}", byte)?;
		}
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowIdError {
	#[error("row identity {row_id} is not in the numeric encoding")]
	NotNumeric {
		row_id: RowId,
	},
}

impl IntoDiagnostic for RowIdError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			RowIdError::NotNumeric {
				row_id,
			} => Diagnostic {
				code: "ROWID_001".to_string(),
				message: format!(
					"row identity {} of {} bytes is not in the {} byte numeric encoding",
					row_id,
					row_id.len(),
					NUMERIC_WIDTH
				),
				label: Some("identity has no numeric order".to_string()),
				help: Some(
					"only identities created from a u64 can be ordered; compare others for equality only"
						.to_string(),
				),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<RowIdError> for Error {
	fn from(err: RowIdError) -> Self {
		Error(err.into_diagnostic())
	}
}

#[cfg(test)]
mod tests {
	use std::{cmp::Ordering, collections::HashSet};

	use super::*;

	#[test]
	fn test_numeric_roundtrip_is_little_endian() {
		let id = RowId::from_u64(0x0102);
		assert_eq!(id.as_bytes(), &[0x02, 0x01, 0, 0, 0, 0, 0, 0]);
		assert_eq!(id.as_u64(), Some(0x0102));
	}

	#[test]
	fn test_equality_is_bytewise() {
		let a = RowId::from_bytes(b"row-a");
		let b = RowId::from_bytes(b"row-a".to_vec());
		assert_eq!(a, b);

		let mut set = HashSet::new();
		set.insert(a);
		assert!(set.contains(&b));
		assert!(!set.contains(&RowId::from_bytes(b"row-b")));
	}

	#[test]
	fn test_numeric_order() {
		let low = RowId::from_u64(2);
		let high = RowId::from_u64(256);
		assert_eq!(low.try_cmp(&high), Ok(Ordering::Less));
		assert_eq!(high.try_cmp(&low), Ok(Ordering::Greater));
	}

	#[test]
	fn test_text_identity_has_no_order() {
		let text = RowId::from_bytes(b"abc");
		let err = text.try_cmp(&RowId::from_u64(1)).unwrap_err();
		assert_eq!(
			err,
			RowIdError::NotNumeric {
				row_id: text
			}
		);
		assert_eq!(Error::from(err).code(), "ROWID_001");
	}

	#[test]
	fn test_display() {
		assert_eq!(RowId::from_u64(42).to_string(), "42");
		assert_eq!(RowId::from_bytes([0xab, 0x01]).to_string(), "0xab01");
	}
}
