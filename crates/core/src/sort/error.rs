// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::{Diagnostic, Error, IntoDiagnostic, Type};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CollationError {
	#[error("collation has no parts")]
	Empty,

	#[error("key {key} appears more than once in collation")]
	DuplicateKey {
		key: String,
	},

	#[error("collation of {parts} parts paired with key type {key_type}")]
	ArityMismatch {
		parts: usize,
		key_type: Type,
	},
}

impl IntoDiagnostic for CollationError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			CollationError::Empty => Diagnostic {
				code: "COLLATION_001".to_string(),
				message: "collation has no parts".to_string(),
				label: Some("empty collation".to_string()),
				help: Some("a collation needs at least one key part".to_string()),
				notes: vec![],
				cause: None,
			},

			CollationError::DuplicateKey {
				key,
			} => Diagnostic {
				code: "COLLATION_002".to_string(),
				message: format!("key {} appears more than once in collation", key),
				label: Some("duplicate key part".to_string()),
				help: Some("remove the repeated part; it cannot change the ordering".to_string()),
				notes: vec![],
				cause: None,
			},

			CollationError::ArityMismatch {
				parts,
				key_type,
			} => Diagnostic {
				code: "COLLATION_003".to_string(),
				message: format!(
					"collation of {} parts paired with key type {} of arity {}",
					parts,
					key_type,
					key_type.arity()
				),
				label: Some("key type arity mismatch".to_string()),
				help: Some("a key of n parts needs a tuple type with n components".to_string()),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<CollationError> for Error {
	fn from(err: CollationError) -> Self {
		Error(err.into_diagnostic())
	}
}
