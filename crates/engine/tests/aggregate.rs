// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 Tessera

use std::sync::Arc;

use tessera_core::{
	Collation, CollationPart, ColumnDef, RowCursor, RowCursorExt, ScalarExpression, SortDirection, Table,
};
use tessera_engine::{Group, SortedAggregate};
use tessera_testing::MemoryTable;
use tessera_type::{RowId, Type, Value};

fn keyed(keys: &[i32]) -> MemoryTable {
	let mut table = MemoryTable::new("t", vec![ColumnDef::new("k", Type::Int4), ColumnDef::new("v", Type::Int4)]);
	for (i, key) in keys.iter().enumerate() {
		table = table.row(vec![Value::Int4(*key), Value::Int4(i as i32 * 10)]);
	}
	table
}

fn by_key() -> Collation {
	Collation::new(vec![CollationPart::asc(0)], Type::Int4).unwrap()
}

#[test]
fn test_groups_of_sorted_runs() {
	let aggregate = SortedAggregate::build(keyed(&[1, 1, 2, 2, 2, 3]).into_arc(), Some(by_key())).unwrap();
	assert_eq!(aggregate.groups(), &[Group::new(0, 2), Group::new(2, 3), Group::new(5, 1)]);
	assert_eq!(aggregate.groups().iter().map(|group| group.size).sum::<usize>(), 6);
	for pair in aggregate.groups().windows(2) {
		assert_eq!(pair[1].start, pair[0].end());
	}
}

#[test]
fn test_unsorted_input_fails_at_offending_row() {
	let err = SortedAggregate::build(keyed(&[1, 2, 1]).into_arc(), Some(by_key())).unwrap_err();
	assert_eq!(err.code(), "AGGREGATE_001");
	assert!(err.message.contains("row 2"));
}

#[test]
fn test_descending_grouping() {
	let grouping = Collation::new(vec![CollationPart::desc(0)], Type::Int4).unwrap();
	let aggregate = SortedAggregate::build(keyed(&[3, 3, 1]).into_arc(), Some(grouping.clone())).unwrap();
	assert_eq!(aggregate.groups(), &[Group::new(0, 2), Group::new(2, 1)]);

	let err = SortedAggregate::build(keyed(&[1, 3]).into_arc(), Some(grouping)).unwrap_err();
	assert_eq!(err.code(), "AGGREGATE_001");
}

#[test]
fn test_undefined_keys_group_first() {
	let table = MemoryTable::single_column(
		"t",
		"k",
		Type::Int4,
		[Value::Undefined, Value::Undefined, Value::Int4(1)],
	);
	let aggregate = SortedAggregate::build(table.into_arc(), Some(by_key())).unwrap();
	assert_eq!(aggregate.groups(), &[Group::new(0, 2), Group::new(2, 1)]);
}

#[test]
fn test_without_grouping_single_group() {
	let aggregate = SortedAggregate::build(keyed(&[3, 1, 2]).into_arc(), None).unwrap();
	assert_eq!(aggregate.groups(), &[Group::new(0, 3)]);
	assert_eq!(aggregate.row_count(), 1);
	assert_eq!(aggregate.column_count(), 0);
}

#[test]
fn test_single_row_child_single_group() {
	let aggregate = SortedAggregate::build(keyed(&[5]).into_arc(), Some(by_key())).unwrap();
	assert_eq!(aggregate.groups(), &[Group::new(0, 1)]);
	assert_eq!(aggregate.get_value(0, &RowId::from_u64(0)).unwrap(), Value::Int4(5));
}

#[test]
fn test_empty_child_yields_one_empty_group() {
	let aggregate = SortedAggregate::build(keyed(&[]).into_arc(), Some(by_key())).unwrap();
	assert_eq!(aggregate.groups(), &[Group::new(0, 0)]);
	assert_eq!(aggregate.get_value(0, &RowId::from_u64(0)).unwrap(), Value::Undefined);
	assert_eq!(aggregate.group(0).unwrap().row_count(), 0);
}

#[test]
fn test_aggregate_table_reads_group_keys() {
	let aggregate = SortedAggregate::build(keyed(&[1, 1, 2, 2, 2, 3]).into_arc(), Some(by_key())).unwrap();
	assert_eq!(aggregate.column_name(0).unwrap(), "k");
	assert_eq!(aggregate.column_type(0).unwrap(), Type::Int4);
	assert_eq!(aggregate.column_offset("k"), Some(0));
	assert_eq!(aggregate.column_offset("v"), None);

	let mut cursor = aggregate.row_cursor().unwrap();
	let keys: Vec<Value> = cursor.rows().map(|row| aggregate.get_value(0, &row.unwrap()).unwrap()).collect();
	assert_eq!(keys, vec![Value::Int4(1), Value::Int4(2), Value::Int4(3)]);
	assert_eq!(aggregate.order().map(|order| order.to_string()), Some("#0 ASC".to_string()));
	assert_eq!(aggregate.get_value(0, &RowId::from_u64(3)).unwrap_err().code(), "TABLE_003");
}

#[test]
fn test_group_view_is_window_over_child() {
	let child = keyed(&[1, 1, 2, 2, 2, 3]).with_order(by_key());
	let aggregate = SortedAggregate::build(child.into_arc(), Some(by_key())).unwrap();

	let group = aggregate.group(1).unwrap();
	assert_eq!(group.row_count(), 3);
	assert_eq!(group.order(), Some(&by_key()));

	let mut cursor = group.row_cursor().unwrap();
	let values: Vec<Value> = cursor.rows().map(|row| group.get_value(1, &row.unwrap()).unwrap()).collect();
	assert_eq!(values, vec![Value::Int4(20), Value::Int4(30), Value::Int4(40)]);

	assert_eq!(aggregate.group(3).unwrap_err().code(), "AGGREGATE_002");
}

#[derive(Debug)]
struct Parity;

impl ScalarExpression for Parity {
	fn name(&self) -> &str {
		"parity"
	}

	fn result_type(&self) -> Type {
		Type::Int4
	}

	fn evaluate(&self, table: &dyn Table, row: &RowId) -> tessera_type::Result<Value> {
		match table.get_value(0, row)? {
			Value::Int4(v) => Ok(Value::Int4(v % 2)),
			_ => Ok(Value::Undefined),
		}
	}
}

#[test]
fn test_expression_grouping() {
	let child = keyed(&[2, 4, 1, 3, 5]).into_arc();
	let grouping = Collation::for_table(
		child.as_ref(),
		vec![CollationPart::expression(Arc::new(Parity), SortDirection::Asc)],
	)
	.unwrap();
	let aggregate = SortedAggregate::build(child, Some(grouping)).unwrap();

	assert_eq!(aggregate.groups(), &[Group::new(0, 2), Group::new(2, 3)]);
	assert_eq!(aggregate.column_name(0).unwrap(), "parity");
	assert_eq!(aggregate.get_value(0, &RowId::from_u64(1)).unwrap(), Value::Int4(1));
}

#[test]
fn test_multi_part_grouping() {
	let child = MemoryTable::new("t", vec![ColumnDef::new("a", Type::Int4), ColumnDef::new("b", Type::Utf8)])
		.row(vec![Value::Int4(1), Value::utf8("x")])
		.row(vec![Value::Int4(1), Value::utf8("y")])
		.row(vec![Value::Int4(1), Value::utf8("y")])
		.row(vec![Value::Int4(2), Value::utf8("a")])
		.into_arc();
	let grouping =
		Collation::for_table(child.as_ref(), vec![CollationPart::asc(0), CollationPart::asc(1)]).unwrap();
	assert_eq!(grouping.key_type(), &Type::Tuple(vec![Type::Int4, Type::Utf8]));

	let aggregate = SortedAggregate::build(child, Some(grouping)).unwrap();
	assert_eq!(aggregate.groups(), &[Group::new(0, 1), Group::new(1, 2), Group::new(3, 1)]);
	assert_eq!(aggregate.column_count(), 2);
	assert_eq!(aggregate.get_value(1, &RowId::from_u64(2)).unwrap(), Value::utf8("a"));
}

#[test]
fn test_grouping_column_out_of_range() {
	let grouping = Collation::new(vec![CollationPart::asc(5)], Type::Int4).unwrap();
	let err = SortedAggregate::build(keyed(&[1, 2]).into_arc(), Some(grouping)).unwrap_err();
	assert_eq!(err.code(), "TABLE_001");
}

/// Claims one row more than its cursor enumerates.
#[derive(Debug)]
struct Overcounted(MemoryTable);

impl Table for Overcounted {
	fn name(&self) -> &str {
		self.0.name()
	}

	fn column_count(&self) -> usize {
		self.0.column_count()
	}

	fn row_count(&self) -> usize {
		self.0.row_count() + 1
	}

	fn column_offset(&self, name: &str) -> Option<usize> {
		self.0.column_offset(name)
	}

	fn column_name(&self, column: usize) -> tessera_type::Result<&str> {
		self.0.column_name(column)
	}

	fn column_type(&self, column: usize) -> tessera_type::Result<Type> {
		self.0.column_type(column)
	}

	fn get_value(&self, column: usize, row: &RowId) -> tessera_type::Result<Value> {
		self.0.get_value(column, row)
	}

	fn row_cursor(&self) -> tessera_type::Result<Box<dyn RowCursor>> {
		self.0.row_cursor()
	}
}

#[test]
fn test_row_count_disagreeing_with_cursor_fails() {
	let err = SortedAggregate::build(Arc::new(Overcounted(keyed(&[]))), Some(by_key())).unwrap_err();
	assert_eq!(err.code(), "INTERNAL_ERROR");

	let err = SortedAggregate::build(Arc::new(Overcounted(keyed(&[1, 2]))), Some(by_key())).unwrap_err();
	assert_eq!(err.code(), "INTERNAL_ERROR");

	let err = SortedAggregate::build(Arc::new(Overcounted(keyed(&[1]))), None).unwrap_err();
	assert_eq!(err.code(), "INTERNAL_ERROR");
}

#[test]
fn test_mixed_numeric_keys_beyond_float_precision() {
	let exact = 1i64 << 53;
	let grouping = Collation::new(vec![CollationPart::asc(0)], Type::Int8).unwrap();

	let unsorted = MemoryTable::single_column(
		"t",
		"k",
		Type::Int8,
		[Value::Int8(exact), Value::float8(exact as f64), Value::Int8(exact + 1), Value::float8(exact as f64)],
	);
	let err = SortedAggregate::build(unsorted.into_arc(), Some(grouping.clone())).unwrap_err();
	assert_eq!(err.code(), "AGGREGATE_001");
	assert!(err.message.contains("row 3"));

	let sorted = MemoryTable::single_column(
		"t",
		"k",
		Type::Int8,
		[Value::float8(exact as f64), Value::Int8(exact), Value::Int8(exact + 1)],
	);
	let aggregate = SortedAggregate::build(sorted.into_arc(), Some(grouping)).unwrap();
	assert_eq!(aggregate.groups(), &[Group::new(0, 2), Group::new(2, 1)]);
}
