//! Property-based tests for the query catalog.
//!
//! These tests verify invariants hold for arbitrary tables using proptest.
//!
//! Run with: cargo test -p salescope-query --test `property_tests`

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use salescope_core::{TransactionRecord, TransactionTable};
use salescope_query::aggregate::top_n;
use salescope_query::{Executor, QueryResult, Value};

// ============================================================================
// Arbitrary generators
// ============================================================================

fn arb_amount() -> impl Strategy<Value = Option<Decimal>> {
    prop::option::weighted(0.9, (-100_000i64..100_000i64).prop_map(|n| Decimal::new(n, 2)))
}

fn arb_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::weighted(
        0.9,
        (2022u32..2026u32, 1u32..13u32, 1u32..29u32)
            .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y as i32, m, d).unwrap()),
    )
}

fn arb_customer() -> impl Strategy<Value = String> {
    (0u8..8).prop_map(|n| format!("C{n}"))
}

fn arb_category() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Retail".to_string()),
        Just("Food".to_string()),
        Just("Travel".to_string()),
        Just("Services".to_string()),
    ]
}

fn arb_state() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Texas".to_string()),
        Just("California".to_string()),
        Just("Ohio".to_string()),
    ]
}

fn arb_record() -> impl Strategy<Value = TransactionRecord> {
    (
        arb_date(),
        arb_amount(),
        arb_customer(),
        arb_category(),
        arb_state(),
    )
        .prop_map(|(date, amount, customer, category, state)| {
            let mut rec = TransactionRecord::new(customer, category).with_state(state);
            rec.date = date;
            rec.amount = amount;
            rec
        })
}

fn arb_table() -> impl Strategy<Value = TransactionTable> {
    prop::collection::vec(arb_record(), 0..60).prop_map(TransactionTable::new)
}

fn number_of(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Integer(i) => Some(Decimal::from(*i)),
        _ => None,
    }
}

// ============================================================================
// Catalog invariants
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Repeated execution of any catalog query yields identical results.
    #[test]
    fn execution_is_deterministic(table in arb_table(), id in 1u16..=35) {
        let executor = Executor::new(&table);
        let first = executor.execute(id).unwrap();
        let second = executor.execute(id).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The grand total equals the sum over any disjoint partition: per
    /// category (query 6) and per state (query 19) both reconstruct it.
    #[test]
    fn partition_sums_reconstruct_grand_total(table in arb_table()) {
        let executor = Executor::new(&table);
        let QueryResult::Scalar { value, .. } = executor.execute(1).unwrap() else {
            panic!("query 1 should be scalar");
        };
        let total = number_of(&value).unwrap();

        for id in [6u16, 19] {
            let QueryResult::Series { pairs, .. } = executor.execute(id).unwrap() else {
                panic!("expected series");
            };
            let partition: Decimal = pairs.iter().filter_map(|(_, v)| number_of(v)).sum();
            prop_assert_eq!(total, partition, "partition {} disagrees", id);
        }
    }

    /// Distinct customers never exceed the row count.
    #[test]
    fn distinct_customers_bounded_by_rows(table in arb_table()) {
        let executor = Executor::new(&table);
        let QueryResult::Scalar { value: Value::Integer(distinct), .. } =
            executor.execute(9).unwrap() else {
            panic!("query 9 should be an integer scalar");
        };
        prop_assert!(distinct as usize <= table.len());
    }

    /// Repeat-buyer percentage stays within [0, 100], and is 0 exactly when
    /// no customer appears twice.
    #[test]
    fn repeat_percentage_bounds(table in arb_table()) {
        let executor = Executor::new(&table);
        let QueryResult::Scalar { value, .. } = executor.execute(13).unwrap() else {
            panic!("query 13 should be scalar");
        };
        if let Some(pct) = number_of(&value) {
            prop_assert!(pct >= Decimal::ZERO && pct <= Decimal::from(100));

            let mut counts = std::collections::HashMap::new();
            for rec in &table {
                *counts.entry(rec.customer_id.as_str()).or_insert(0u32) += 1;
            }
            let any_repeat = counts.values().any(|&c| c > 1);
            prop_assert_eq!(pct == Decimal::ZERO, !any_repeat);
        } else {
            prop_assert!(table.is_empty());
        }
    }

    /// Top-10 customer spend is a subset of the full per-customer grouping,
    /// descending, with at most ten entries.
    #[test]
    fn top_customers_is_ranked_subset(table in arb_table()) {
        let executor = Executor::new(&table);
        let QueryResult::Series { pairs, .. } = executor.execute(10).unwrap() else {
            panic!("query 10 should be a series");
        };
        prop_assert!(pairs.len() <= 10);

        let mut prev: Option<Decimal> = None;
        for (customer, value) in &pairs {
            let spend = number_of(value).unwrap();
            if let Some(p) = prev {
                prop_assert!(p >= spend, "not descending");
            }
            prev = Some(spend);
            // Each entry must be a real customer of the table.
            prop_assert!(table.iter().any(|r| &r.customer_id == customer));
        }
    }

    /// Month-bucketed queries only ever have dated rows in their domain.
    #[test]
    fn month_domain_excludes_null_dates(table in arb_table()) {
        let executor = Executor::new(&table);
        let QueryResult::Series { pairs, .. } = executor.execute(26).unwrap() else {
            panic!("query 26 should be a series");
        };
        let dated = table.iter().filter(|r| r.date.is_some()).count();
        if dated == 0 {
            prop_assert!(pairs.is_empty());
        } else {
            prop_assert!(!pairs.is_empty() && pairs.len() <= 12);
        }
    }
}

// ============================================================================
// Aggregate primitives
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// `top_n` returns at most n entries and a permutation-stable prefix of
    /// the descending ordering.
    #[test]
    fn top_n_caps_and_sorts(
        values in prop::collection::vec(-1000i64..1000, 0..30),
        n in 0usize..15,
    ) {
        let pairs: Vec<(usize, Decimal)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (i, Decimal::from(*v)))
            .collect();
        let top = top_n(pairs.clone(), n);
        prop_assert!(top.len() <= n);
        for window in top.windows(2) {
            prop_assert!(window[0].1 >= window[1].1);
        }
        for entry in &top {
            prop_assert!(pairs.contains(entry));
        }
    }
}
