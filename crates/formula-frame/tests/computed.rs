use formula_frame::{
    ComputeOutcome, ComputedColumn, Column, FrameError, Table, Value, ValueKind,
};
use pretty_assertions::assert_eq;

fn prices() -> Table {
    Table::new()
        .with_column("qty", vec![1i64, 2, 3])
        .unwrap()
        .with_column("price", vec![2.5f64, 1.0, 4.0])
        .unwrap()
        .with_column("item", vec!["pen", "cup", "map"])
        .unwrap()
}

#[test]
fn float_column_from_two_inputs() {
    let mut table = prices();
    let total = ComputedColumn::float("total", |row| {
        let qty = row["qty"].as_i64().unwrap_or_default() as f64;
        qty * row["price"].as_f64().unwrap_or_default()
    });

    assert_eq!(
        table.computed(total),
        Ok(ComputeOutcome::Added { position: 3 })
    );
    assert_eq!(
        table.column("total").unwrap(),
        &Column::from(vec![2.5f64, 2.0, 12.0])
    );
    assert_eq!(table.column_count(), 4);
}

#[test]
fn typed_constructors_produce_their_kind() {
    let mut table = prices();
    table
        .computed(ComputedColumn::string("label", |row| {
            format!("{} x{}", row["item"], row["qty"])
        }))
        .unwrap();
    table
        .computed(ComputedColumn::boolean("bulk", |row| {
            row["qty"].as_i64().is_some_and(|q| q >= 2)
        }))
        .unwrap();
    table
        .computed(ComputedColumn::integer("double", |row| {
            row["qty"].as_i64().unwrap_or_default() * 2
        }))
        .unwrap();

    assert_eq!(
        table.column("label").unwrap(),
        &Column::from(vec!["pen x1", "cup x2", "map x3"])
    );
    assert_eq!(
        table.column("bulk").unwrap(),
        &Column::from(vec![false, true, true])
    );
    assert_eq!(table.column("double").unwrap().kind(), ValueKind::Integer);
}

#[test]
fn later_computed_columns_see_earlier_ones() {
    let mut table = prices();
    table
        .computed(ComputedColumn::integer("q2", |row| {
            row["qty"].as_i64().unwrap_or_default() + 1
        }))
        .unwrap();
    table
        .computed(ComputedColumn::integer("q3", |row| {
            row["q2"].as_i64().unwrap_or_default() * 10
        }))
        .unwrap();
    assert_eq!(
        table.column("q3").unwrap(),
        &Column::from(vec![20i64, 30, 40])
    );
}

#[test]
fn wrong_result_kind_leaves_table_unchanged() {
    let mut table = prices();
    let before = table.clone();
    let bad = ComputedColumn::new("bad", ValueKind::Integer, |row| row["item"].clone());

    assert_eq!(
        table.computed(bad),
        Err(FrameError::TypeMismatch {
            expected: ValueKind::Integer,
            actual: ValueKind::String,
        })
    );
    assert_eq!(table, before);
}

#[test]
fn missing_function_is_a_reported_no_op() {
    let mut table = prices();
    let outcome = table
        .computed(ComputedColumn::without_function("nothing", ValueKind::Float))
        .unwrap();
    assert_eq!(outcome, ComputeOutcome::NoFunction);
    assert_eq!(table.column_count(), 3);
}

#[test]
fn duplicate_name_is_rejected() {
    let mut table = prices();
    let dup = ComputedColumn::integer("qty", |_| 0);
    assert_eq!(
        table.computed(dup),
        Err(FrameError::DuplicateColumn("qty".to_string()))
    );
}

#[test]
fn kind_by_name() {
    let mut table = prices();
    let flag = ComputedColumn::with_kind_name("flag", "bool", |_| Value::Boolean(true)).unwrap();
    assert_eq!(flag.kind(), ValueKind::Boolean);
    table.computed(flag).unwrap();
    assert_eq!(table.value(2, "flag"), Ok(Value::Boolean(true)));

    let err = ComputedColumn::with_kind_name("x", "decimal", |_| Value::Integer(0)).unwrap_err();
    assert_eq!(err, FrameError::UnsupportedComputedKind("decimal".to_string()));
}

#[test]
fn computing_over_no_rows_adds_an_empty_column() {
    let mut table = Table::new()
        .with_column("a", Vec::<i64>::new())
        .unwrap();
    let outcome = table
        .computed(ComputedColumn::float("f", |_| 1.0))
        .unwrap();
    assert_eq!(outcome, ComputeOutcome::Added { position: 1 });
    assert_eq!(table.column("f").unwrap(), &Column::from(Vec::<f64>::new()));
}
