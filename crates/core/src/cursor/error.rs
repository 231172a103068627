// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::{Diagnostic, Error, IntoDiagnostic};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CursorError {
	#[error("cursor position {position} is outside [-1, {count}]")]
	PositionOutOfRange {
		position: isize,
		count: usize,
	},

	#[error("cursor at position {position} has no current row")]
	NoCurrentRow {
		position: isize,
		count: usize,
	},

	#[error("window [{start}, {start}+{size}) exceeds cursor of {count} rows")]
	WindowOutOfRange {
		start: usize,
		size: usize,
		count: usize,
	},
}

impl IntoDiagnostic for CursorError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			CursorError::PositionOutOfRange {
				position,
				count,
			} => Diagnostic {
				code: "CURSOR_001".to_string(),
				message: format!("cursor position {} is outside [-1, {}]", position, count),
				label: Some("position out of range".to_string()),
				help: Some("positions range from -1 (before start) to the row count (after end)".to_string()),
				notes: vec![
					"moving outside the sentinels indicates a defect in the caller computing the position"
						.to_string(),
				],
				cause: None,
			},

			CursorError::NoCurrentRow {
				position,
				count,
			} => Diagnostic {
				code: "CURSOR_002".to_string(),
				message: format!("cursor at position {} of {} rows has no current row", position, count),
				label: Some("cursor is on a sentinel".to_string()),
				help: Some(
					"check the result of move_next, move_back or move_to before reading the current row"
						.to_string(),
				),
				notes: vec![],
				cause: None,
			},

			CursorError::WindowOutOfRange {
				start,
				size,
				count,
			} => Diagnostic {
				code: "CURSOR_003".to_string(),
				message: format!(
					"window starting at {} with {} rows exceeds the {} rows of the inner cursor",
					start, size, count
				),
				label: Some("window out of range".to_string()),
				help: Some("the window must satisfy start + size <= count".to_string()),
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<CursorError> for Error {
	fn from(err: CursorError) -> Self {
		Error(err.into_diagnostic())
	}
}
