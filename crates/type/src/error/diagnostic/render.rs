// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::fmt::Write;

use crate::Diagnostic;

pub struct DefaultRenderer;

impl DefaultRenderer {
	pub fn render_string(diagnostic: &Diagnostic) -> String {
		let mut out = String::new();
		Self::render(&mut out, diagnostic, 0);
		out
	}

	fn render(out: &mut String, diagnostic: &Diagnostic, depth: usize) {
		let indent = "  ".repeat(depth);
		let _ = writeln!(out, "{indent}Error {}: {}", diagnostic.code, diagnostic.message);

		if let Some(label) = &diagnostic.label {
			let _ = writeln!(out, "{indent}  --> {label}");
		}

		if let Some(help) = &diagnostic.help {
			let _ = writeln!(out, "{indent}  help: {help}");
		}

		for note in &diagnostic.notes {
			let _ = writeln!(out, "{indent}  note: {note}");
		}

		if let Some(cause) = &diagnostic.cause {
			let _ = writeln!(out, "{indent}  caused by:");
			Self::render(out, cause, depth + 2);
		}
	}
}
