// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use error::{
	Error,
	diagnostic::{Diagnostic, IntoDiagnostic},
};
pub use value::{OrderedF64, RowId, RowIdError, Type, Value};

pub mod error;
pub mod value;

pub type Result<T> = std::result::Result<T, Error>;
