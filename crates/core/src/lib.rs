// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub use config::{ExecutionConfig, PrefetchConfig};
pub use cursor::{
	BEFORE_START, ListCursor, PrefetchCursor, RangeCursor, ReverseCursor, RowCursor, RowCursorExt, WindowCursor,
};
pub use sort::{Collation, CollationPart, CollationResolver, CompositeKey, KeySource, ScalarExpression, SortDirection};
pub use table::{ColumnDef, DelegatingTable, Table};
pub use tessera_type::{Error, Result, RowId, Type, Value};

pub mod config;
pub mod cursor;
pub mod sort;
pub mod table;
