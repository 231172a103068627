// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::{cmp::Ordering, sync::Arc};

use tessera_core::{
	Collation, CollationPart, CollationResolver, ColumnDef, RowCursorExt, ScalarExpression, SortDirection, Table,
};
use tessera_testing::MemoryTable;
use tessera_type::{RowId, Type, Value};

fn scores() -> MemoryTable {
	MemoryTable::new("scores", vec![ColumnDef::new("team", Type::Utf8), ColumnDef::new("points", Type::Int8)])
		.row(vec![Value::utf8("b"), Value::Int8(3)])
		.row(vec![Value::utf8("a"), Value::Int8(7)])
		.row(vec![Value::utf8("a"), Value::Undefined])
		.row(vec![Value::utf8("b"), Value::Int8(3)])
}

#[derive(Debug)]
struct Doubled;

impl ScalarExpression for Doubled {
	fn name(&self) -> &str {
		"points * 2"
	}

	fn result_type(&self) -> Type {
		Type::Int8
	}

	fn evaluate(&self, table: &dyn Table, row: &RowId) -> tessera_type::Result<Value> {
		Ok(match table.get_value(1, row)? {
			Value::Int8(points) => Value::Int8(points * 2),
			_ => Value::Undefined,
		})
	}
}

#[test]
fn test_sort_rows_by_resolved_keys() {
	let table = scores();
	let collation =
		Collation::for_table(&table, vec![CollationPart::asc(0), CollationPart::desc(1)]).unwrap();
	let resolver = CollationResolver::bind(&collation, &table).unwrap();

	let mut cursor = table.row_cursor().unwrap();
	let mut keyed = cursor
		.rows()
		.map(|row| {
			let row = row.unwrap();
			(resolver.resolve(&row).unwrap(), row)
		})
		.collect::<Vec<_>>();
	keyed.sort_by(|(l, _), (r, _)| resolver.compare(l, r));

	let order: Vec<u64> = keyed.iter().filter_map(|(_, row)| row.as_u64()).collect();
	assert_eq!(order, vec![2, 1, 0, 3]);
}

#[test]
fn test_equal_keys_compare_equal() {
	let table = scores();
	let collation = Collation::for_table(&table, vec![CollationPart::asc(0), CollationPart::asc(1)]).unwrap();
	let resolver = CollationResolver::bind(&collation, &table).unwrap();

	let first = resolver.resolve(&RowId::from_u64(0)).unwrap();
	let last = resolver.resolve(&RowId::from_u64(3)).unwrap();
	assert_eq!(resolver.compare(&first, &last), Ordering::Equal);
	assert_eq!(first.to_string(), "(b, 3)");
}

#[test]
fn test_expression_parts_are_evaluated_per_row() {
	let table = scores();
	let collation = Collation::for_table(
		&table,
		vec![CollationPart::expression(Arc::new(Doubled), SortDirection::Desc)],
	)
	.unwrap();
	assert_eq!(collation.key_type(), &Type::Int8);

	let resolver = CollationResolver::bind(&collation, &table).unwrap();
	assert_eq!(resolver.resolve(&RowId::from_u64(1)).unwrap().values(), &[Value::Int8(14)]);
	assert_eq!(resolver.resolve(&RowId::from_u64(2)).unwrap().values(), &[Value::Undefined]);

	let high = resolver.resolve(&RowId::from_u64(1)).unwrap();
	let low = resolver.resolve(&RowId::from_u64(0)).unwrap();
	let null = resolver.resolve(&RowId::from_u64(2)).unwrap();
	assert_eq!(resolver.compare(&high, &low), Ordering::Less);
	assert_eq!(resolver.compare(&null, &high), Ordering::Less);
}

#[test]
fn test_bind_rejects_unknown_column() {
	let table = scores();
	let collation = Collation::new(vec![CollationPart::asc(2)], Type::Int4).unwrap();
	let err = CollationResolver::bind(&collation, &table).unwrap_err();
	assert_eq!(err.code(), "TABLE_001");
}

#[test]
fn test_for_table_rejects_duplicates() {
	let table = scores();
	let err = Collation::for_table(&table, vec![CollationPart::asc(0), CollationPart::desc(0)]).unwrap_err();
	assert_eq!(err.code(), "COLLATION_002");
}
