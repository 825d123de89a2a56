use formula_frame::{Aggregate, Column, FrameError, IntColumn, Table, Value, ValueKind};
use pretty_assertions::assert_eq;

fn sample() -> Table {
    Table::new()
        .with_column("a", vec![1i64, 2, 3, 4])
        .unwrap()
        .with_column("b", vec!["w", "x", "y", "z"])
        .unwrap()
        .with_column("c", vec![0.5f64, 1.5, 2.5, 3.5])
        .unwrap()
}

#[test]
fn headers_follow_insertion_order() {
    let table = sample();
    assert_eq!(table.headers(), &["a", "b", "c"]);
    assert_eq!(table.column_count(), 3);
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.column_position("c"), Some(2));
    assert_eq!(table.column_at(1), Some(&Column::from(vec!["w", "x", "y", "z"])));
    assert_eq!(table.column_at(3), None);
}

#[test]
fn append_row_with_fewer_values_zero_pads() {
    let mut table = sample();
    table.append_row([Value::from(5)]).unwrap();

    assert_eq!(table.row_count(), 5);
    assert_eq!(
        table.row_at(4),
        Some(vec![Value::Integer(5), Value::from(""), Value::Float(0.0)])
    );
}

#[test]
fn append_row_with_explicit_gaps() {
    let mut table = sample();
    table
        .append_row([None, Some(Value::from("v")), Some(Value::from(9.0))])
        .unwrap();
    assert_eq!(
        table.row_at(4),
        Some(vec![Value::Integer(0), Value::from("v"), Value::Float(9.0)])
    );
}

#[test]
fn append_row_drops_extra_values() {
    let mut table = Table::new().with_column("a", vec![1i64]).unwrap();
    table
        .append_row([Value::from(2), Value::from("ignored")])
        .unwrap();
    assert_eq!(table.column("a").unwrap(), &Column::from(vec![1i64, 2]));
    assert_eq!(table.column_count(), 1);
}

#[test]
fn delete_row_shifts_later_rows_up() {
    let mut table = sample();
    let removed = table.delete_row_at(1).unwrap();

    assert_eq!(
        removed,
        vec![Value::Integer(2), Value::from("x"), Value::Float(1.5)]
    );
    assert_eq!(table.row_count(), 3);
    assert_eq!(
        table.row_at(1),
        Some(vec![Value::Integer(3), Value::from("y"), Value::Float(2.5)])
    );
    for (_, column) in table.columns() {
        assert_eq!(column.len(), 3);
    }
}

#[test]
fn delete_row_out_of_range() {
    let mut table = sample();
    assert_eq!(
        table.delete_row_at(4),
        Err(FrameError::OutOfRange { index: 4, len: 4 })
    );
    assert_eq!(table.row_count(), 4);
}

#[test]
fn clones_are_independent() {
    let table = sample();
    let mut copy = table.clone();
    copy.set_value(0, "a", Value::from(100)).unwrap();
    copy.delete_column("b");

    assert_eq!(table.value(0, "a"), Ok(Value::Integer(1)));
    assert_eq!(table.column_count(), 3);
    assert_eq!(copy.value(0, "a"), Ok(Value::Integer(100)));
}

#[test]
fn slice_columns_copies_in_requested_order() {
    let table = sample();
    let sliced = table.slice_columns(["c", "a"]).unwrap();

    assert_eq!(sliced.headers(), &["c", "a"]);
    assert_eq!(sliced.row_count(), 4);
    assert_eq!(
        table.slice_columns(["a", "nope"]),
        Err(FrameError::UnknownColumn("nope".to_string()))
    );
}

#[test]
fn unique_keeps_first_occurrence_order() {
    let table = Table::new()
        .with_column("k", vec!["b", "a", "b", "c", "a"])
        .unwrap();
    assert_eq!(table.unique("k").unwrap(), Column::from(vec!["b", "a", "c"]));
}

#[test]
fn aggregates_through_the_table() {
    let table = sample();
    assert_eq!(table.aggregate("a", Aggregate::Sum), Ok(Value::Integer(10)));
    assert_eq!(table.aggregate("a", Aggregate::Median), Ok(Value::Float(2.5)));
    assert_eq!(table.aggregate("c", Aggregate::Max), Ok(Value::Float(3.5)));
    assert_eq!(table.aggregate("a", Aggregate::Mean), Ok(Value::Float(2.5)));
    assert_eq!(
        table.aggregate("b", Aggregate::Min),
        Err(FrameError::UnsupportedAggregate {
            aggregate: Aggregate::Min,
            kind: ValueKind::String,
        })
    );
}

#[test]
fn median_of_odd_column() {
    let column = IntColumn::from(vec![7, 1, 3]);
    assert_eq!(column.median(), Ok(3.0));
}

#[test]
fn widening_pads_every_existing_column() {
    let mut table = sample();
    table
        .add_column("d", Column::from(vec![true, true, true, true, true, true]))
        .unwrap();

    assert_eq!(table.row_count(), 6);
    for (_, column) in table.columns() {
        assert_eq!(column.len(), 6);
    }
    assert_eq!(table.value(5, "a"), Ok(Value::Integer(0)));
    assert_eq!(table.value(5, "b"), Ok(Value::from("")));
}

#[test]
fn rows_iterates_every_row() {
    let table = sample();
    let firsts: Vec<Value> = table.rows().map(|row| row[0].clone()).collect();
    assert_eq!(
        firsts,
        vec![
            Value::Integer(1),
            Value::Integer(2),
            Value::Integer(3),
            Value::Integer(4)
        ]
    );
}

#[test]
fn mutating_a_slice_leaves_the_source_alone() {
    let table = sample();
    let mut sliced = table.slice_columns(["b", "a"]).unwrap();

    assert_eq!(
        sliced.row_at(2),
        Some(vec![Value::from("y"), Value::Integer(3)])
    );

    sliced.set_value(0, "a", Value::from(-1)).unwrap();
    sliced.set_value(0, "b", Value::from("changed")).unwrap();
    sliced.delete_row_at(1).unwrap();

    assert_eq!(sliced.row_count(), 3);
    assert_eq!(table.row_count(), 4);
    assert_eq!(table.column("a").unwrap(), &Column::from(vec![1i64, 2, 3, 4]));
    assert_eq!(
        table.column("b").unwrap(),
        &Column::from(vec!["w", "x", "y", "z"])
    );
}
