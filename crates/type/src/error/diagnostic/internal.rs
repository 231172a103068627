// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use crate::Diagnostic;

/// Creates an internal error diagnostic with the source location of the
/// violated invariant.
pub fn internal_with_context(reason: impl Into<String>, file: &str, line: u32, module_path: &str) -> Diagnostic {
	let reason = reason.into();
	let file_name = file.rsplit('/').next().unwrap_or(file);

	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		message: format!("Internal error: {}", reason),
		label: Some(format!("Internal invariant violated at {}:{}", file_name, line)),
		help: Some("This is an internal error that should never occur in normal operation".to_string()),
		notes: vec![format!("Module: {}", module_path)],
		cause: None,
	}
}
