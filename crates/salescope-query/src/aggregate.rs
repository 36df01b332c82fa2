//! Aggregation functions over records and grouped metrics.
//!
//! All amount aggregates skip records whose amount failed to parse. A mean
//! or max over an empty or all-null set is `None`, never zero and never a
//! panic; callers surface it as [`Value::Null`](crate::Value::Null).

use rust_decimal::Decimal;
use salescope_core::TransactionRecord;
use std::collections::HashSet;
use std::hash::Hash;

/// Sum of the parseable amounts. An empty set sums to zero.
pub fn sum_amounts<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Decimal {
    records
        .into_iter()
        .filter_map(|r| r.amount)
        .fold(Decimal::ZERO, |acc, a| acc + a)
}

/// Mean of the parseable amounts, `None` if there are none.
pub fn mean_amount<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Option<Decimal> {
    let mut sum = Decimal::ZERO;
    let mut n = 0i64;
    for amount in records.into_iter().filter_map(|r| r.amount) {
        sum += amount;
        n += 1;
    }
    (n > 0).then(|| sum / Decimal::from(n))
}

/// Largest parseable amount, `None` if there are none.
pub fn max_amount<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> Option<Decimal> {
    records.into_iter().filter_map(|r| r.amount).max()
}

/// Number of records, regardless of field validity.
pub fn count<'a>(records: impl IntoIterator<Item = &'a TransactionRecord>) -> usize {
    records.into_iter().count()
}

/// Number of distinct keys among the records.
///
/// Records for which `key_fn` returns `None` do not contribute a key.
pub fn count_distinct<'a, K, F>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    key_fn: F,
) -> usize
where
    K: Eq + Hash,
    F: Fn(&TransactionRecord) -> Option<K>,
{
    records
        .into_iter()
        .filter_map(|r| key_fn(r))
        .collect::<HashSet<_>>()
        .len()
}

/// Keep the `n` largest entries of a grouped metric.
///
/// Stable descending sort by metric; ties keep their first-seen group order.
/// Returns fewer than `n` entries when the domain is smaller.
#[must_use]
pub fn top_n<K, V: Ord>(mut pairs: Vec<(K, V)>, n: usize) -> Vec<(K, V)> {
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    pairs.truncate(n);
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn rec(customer: &str, amount: Option<Decimal>) -> TransactionRecord {
        let r = TransactionRecord::new(customer, "Retail");
        match amount {
            Some(a) => r.with_amount(a),
            None => r,
        }
    }

    #[test]
    fn sum_skips_null_amounts() {
        let records = vec![rec("A", Some(dec!(10))), rec("B", None), rec("C", Some(dec!(5)))];
        assert_eq!(sum_amounts(&records), dec!(15));
    }

    #[test]
    fn mean_of_all_null_is_none() {
        let records = vec![rec("A", None), rec("B", None)];
        assert_eq!(mean_amount(&records), None);
        assert_eq!(mean_amount(&[]), None);
    }

    #[test]
    fn mean_ignores_null_in_denominator() {
        let records = vec![rec("A", Some(dec!(10))), rec("B", None), rec("C", Some(dec!(20)))];
        assert_eq!(mean_amount(&records), Some(dec!(15)));
    }

    #[test]
    fn max_over_empty_is_none() {
        assert_eq!(max_amount(&[]), None);
        let records = vec![rec("A", Some(dec!(3))), rec("B", Some(dec!(7)))];
        assert_eq!(max_amount(&records), Some(dec!(7)));
    }

    #[test]
    fn count_includes_null_amounts() {
        let records = vec![rec("A", None), rec("B", Some(dec!(1)))];
        assert_eq!(count(&records), 2);
    }

    #[test]
    fn count_distinct_customers() {
        let records = vec![rec("A", None), rec("A", None), rec("B", None)];
        assert_eq!(count_distinct(&records, |r| Some(r.customer_id.clone())), 2);
    }

    #[test]
    fn top_n_truncates_and_breaks_ties_by_first_seen() {
        let pairs = vec![
            ("a", dec!(1)),
            ("b", dec!(3)),
            ("c", dec!(3)),
            ("d", dec!(2)),
        ];
        let top = top_n(pairs, 3);
        assert_eq!(top, vec![("b", dec!(3)), ("c", dec!(3)), ("d", dec!(2))]);
    }

    #[test]
    fn top_n_smaller_domain() {
        let top = top_n(vec![("a", dec!(1))], 10);
        assert_eq!(top.len(), 1);
    }
}
