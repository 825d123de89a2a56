use formula_frame::{Column, Predicate, Table, Value};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

fn table_of(keys: &[i64], tags: &[bool]) -> Table {
    let seq: Vec<i64> = (0..keys.len() as i64).collect();
    Table::new()
        .with_column("key", keys.to_vec())
        .unwrap()
        .with_column("tag", tags.to_vec())
        .unwrap()
        .with_column("seq", seq)
        .unwrap()
}

fn ints(table: &Table, name: &str) -> Vec<i64> {
    table
        .column(name)
        .unwrap()
        .as_integer()
        .unwrap()
        .data()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        rng_seed: proptest::test_runner::RngSeed::Fixed(0),
        failure_persistence: None,
        .. ProptestConfig::default()
    })]

    #[test]
    fn and_intersects_or_unites(
        keys in proptest::collection::vec(-5i64..5, 0..40),
        tags in proptest::collection::vec(any::<bool>(), 0..40),
        bound in -5i64..5,
    ) {
        let table = table_of(&keys, &tags);
        let p = Predicate::greater_than("key", bound);
        let q = Predicate::equal("tag", true);

        let p_rows: BTreeSet<usize> = table.matching_rows(&p).unwrap().into_iter().collect();
        let q_rows: BTreeSet<usize> = table.matching_rows(&q).unwrap().into_iter().collect();

        let and_rows = table.matching_rows(&Predicate::and([p.clone(), q.clone()])).unwrap();
        let or_rows = table.matching_rows(&Predicate::or([p, q])).unwrap();

        prop_assert_eq!(and_rows, p_rows.intersection(&q_rows).copied().collect::<Vec<_>>());
        prop_assert_eq!(or_rows, p_rows.union(&q_rows).copied().collect::<Vec<_>>());
    }

    #[test]
    fn sort_is_ordered_and_stable(keys in proptest::collection::vec(-3i64..3, 0..60)) {
        let mut table = table_of(&keys, &[]);
        table.sort_by("key", true).unwrap();

        let sorted_keys = ints(&table, "key");
        let seq = ints(&table, "seq");
        prop_assert_eq!(sorted_keys.len(), keys.len());
        for i in 1..sorted_keys.len() {
            prop_assert!(sorted_keys[i - 1] <= sorted_keys[i]);
            if sorted_keys[i - 1] == sorted_keys[i] {
                prop_assert!(seq[i - 1] < seq[i]);
            }
        }
        for (key, &row) in sorted_keys.iter().zip(&seq) {
            prop_assert_eq!(*key, keys[row as usize]);
        }
    }

    #[test]
    fn columns_always_share_the_row_count(
        first in proptest::collection::vec(any::<i64>(), 0..20),
        second in proptest::collection::vec(".{0,4}", 0..20),
        appended in 0usize..5,
    ) {
        let mut table = Table::new()
            .with_column("n", first.clone())
            .unwrap()
            .with_column("s", Column::String(second.iter().cloned().collect()))
            .unwrap();
        for i in 0..appended {
            table.append_row([Value::from(i)]).unwrap();
        }

        let expected = first.len().max(second.len()) + appended;
        prop_assert_eq!(table.row_count(), expected);
        for (_, column) in table.columns() {
            prop_assert_eq!(column.len(), expected);
        }
    }

    #[test]
    fn unique_has_no_duplicates(values in proptest::collection::vec(0i64..6, 0..40)) {
        let column = Column::from(values.clone());
        let unique = column.unique().as_integer().unwrap().data();

        let mut seen = HashSet::new();
        let first_occurrences: Vec<i64> =
            values.iter().copied().filter(|v| seen.insert(*v)).collect();
        prop_assert_eq!(unique, first_occurrences);
    }
}
