// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::{Diagnostic, Error, IntoDiagnostic, RowId};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TableError {
	#[error("column offset {column} out of range for table `{table}` with {count} columns")]
	ColumnOutOfRange {
		table: String,
		column: usize,
		count: usize,
	},

	#[error("column `{name}` not found in table `{table}`")]
	ColumnNotFound {
		table: String,
		name: String,
	},

	#[error("row {row} not found in table `{table}`")]
	RowNotFound {
		table: String,
		row: RowId,
	},
}

impl IntoDiagnostic for TableError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			TableError::ColumnOutOfRange {
				table,
				column,
				count,
			} => Diagnostic {
				code: "TABLE_001".to_string(),
				message: format!(
					"column offset {} out of range for table `{}` with {} columns",
					column, table, count
				),
				label: Some("invalid column offset".to_string()),
				help: Some("column offsets range from 0 to the column count".to_string()),
				notes: vec![],
				cause: None,
			},

			TableError::ColumnNotFound {
				table,
				name,
			} => Diagnostic {
				code: "TABLE_002".to_string(),
				message: format!("column `{}` not found in table `{}`", name, table),
				label: Some("unknown column".to_string()),
				help: Some("check the column name and its qualifier".to_string()),
				notes: vec![],
				cause: None,
			},

			TableError::RowNotFound {
				table,
				row,
			} => Diagnostic {
				code: "TABLE_003".to_string(),
				message: format!("row {} not found in table `{}`", row, table),
				label: Some("unknown row".to_string()),
				help: None,
				notes: vec!["the row identity must come from a cursor of the same table".to_string()],
				cause: None,
			},
		}
	}
}

impl From<TableError> for Error {
	fn from(err: TableError) -> Self {
		Error(err.into_diagnostic())
	}
}
