// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use tessera_type::{Diagnostic, Error, IntoDiagnostic};

#[derive(Debug, thiserror::Error)]
pub(crate) enum TracingError {
	#[error("invalid filter directive `{directive}`: {reason}")]
	InvalidDirective {
		directive: String,
		reason: String,
	},

	#[error("a global tracing subscriber is already installed")]
	AlreadyInitialized,
}

impl IntoDiagnostic for TracingError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			TracingError::InvalidDirective {
				directive,
				reason,
			} => Diagnostic::new("TRACING_001", format!("invalid filter directive `{}`", directive))
				.with_label("unparsable directive")
				.with_help("directives look like `tessera_engine=debug` or `info`")
				.with_note(reason),

			TracingError::AlreadyInitialized => {
				Diagnostic::new("TRACING_002", "a global tracing subscriber is already installed")
					.with_help("initialize tracing once per process")
			}
		}
	}
}

impl From<TracingError> for Error {
	fn from(err: TracingError) -> Self {
		Error(err.into_diagnostic())
	}
}
