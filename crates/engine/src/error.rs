// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_core::CompositeKey;
use tessera_type::{Diagnostic, Error, IntoDiagnostic};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum JoinError {
	#[error("join index lists have different lengths: {lengths:?}")]
	ListLengthMismatch {
		lengths: Vec<usize>,
	},

	#[error("join has no input tables")]
	NoInputs,

	#[error("join over {tables} tables received {lists} index lists")]
	ListCountMismatch {
		tables: usize,
		lists: usize,
	},

	#[error("cartesian product of {counts:?} rows overflows")]
	ProductOverflow {
		counts: Vec<usize>,
	},

	#[error("join input {table} out of range for {inputs} inputs")]
	InputOutOfRange {
		table: usize,
		inputs: usize,
	},
}

impl IntoDiagnostic for JoinError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			JoinError::ListLengthMismatch {
				lengths,
			} => Diagnostic {
				code: "JOIN_001".to_string(),
				message: format!("join index lists have different lengths: {:?}", lengths),
				label: Some("index lists disagree on the result row count".to_string()),
				help: Some("every input needs exactly one index entry per result row".to_string()),
				notes: vec!["the match resolution step produced inconsistent lists".to_string()],
				cause: None,
			},

			JoinError::NoInputs => Diagnostic {
				code: "JOIN_002".to_string(),
				message: "join has no input tables".to_string(),
				label: Some("empty join".to_string()),
				help: Some("a join needs at least one input table".to_string()),
				notes: vec![],
				cause: None,
			},

			JoinError::ListCountMismatch {
				tables,
				lists,
			} => Diagnostic {
				code: "JOIN_003".to_string(),
				message: format!("join over {} tables received {} index lists", tables, lists),
				label: Some("one index list per input table".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},

			JoinError::ProductOverflow {
				counts,
			} => Diagnostic {
				code: "JOIN_004".to_string(),
				message: format!("cartesian product of {:?} rows overflows", counts),
				label: Some("join result too large".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},

			JoinError::InputOutOfRange {
				table,
				inputs,
			} => Diagnostic {
				code: "JOIN_005".to_string(),
				message: format!("join input {} out of range for {} inputs", table, inputs),
				label: Some("unknown join input".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<JoinError> for Error {
	fn from(err: JoinError) -> Self {
		Error(err.into_diagnostic())
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AggregateError {
	#[error("input not sorted by grouping key: row {ordinal} has key {current} after {previous}")]
	OrderViolation {
		ordinal: usize,
		previous: CompositeKey,
		current: CompositeKey,
	},

	#[error("group {group} out of range for {count} groups")]
	GroupOutOfRange {
		group: usize,
		count: usize,
	},
}

impl IntoDiagnostic for AggregateError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			AggregateError::OrderViolation {
				ordinal,
				previous,
				current,
			} => Diagnostic {
				code: "AGGREGATE_001".to_string(),
				message: format!(
					"input not sorted by grouping key: row {} has key {} after {}",
					ordinal, current, previous
				),
				label: Some("grouping key decreased".to_string()),
				help: Some("sort the input by the grouping key before aggregating".to_string()),
				notes: vec!["the plan fed an unsorted child into a sorted-run aggregation".to_string()],
				cause: None,
			},

			AggregateError::GroupOutOfRange {
				group,
				count,
			} => Diagnostic {
				code: "AGGREGATE_002".to_string(),
				message: format!("group {} out of range for {} groups", group, count),
				label: Some("unknown group".to_string()),
				help: None,
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<AggregateError> for Error {
	fn from(err: AggregateError) -> Self {
		Error(err.into_diagnostic())
	}
}
