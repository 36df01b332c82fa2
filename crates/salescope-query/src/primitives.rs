//! Filter and grouping primitives.
//!
//! Pure functions over records or record slices; nothing here mutates its
//! input. Records with a `None` date are excluded from the time-bucket group
//! domains rather than assigned a synthetic key, and token predicates treat
//! an empty field as a non-match, never an error.

use chrono::Datelike;
use salescope_core::TransactionRecord;
use std::collections::HashMap;
use std::hash::Hash;

/// Calendar month (1-12) of the record's date.
#[must_use]
pub fn month_of(record: &TransactionRecord) -> Option<u32> {
    record.date.map(|d| d.month())
}

/// Calendar quarter (1-4) of the record's date.
#[must_use]
pub fn quarter_of(record: &TransactionRecord) -> Option<u32> {
    record.date.map(|d| (d.month() - 1) / 3 + 1)
}

/// Year and month of the record's date, for chronological bucketing.
#[must_use]
pub fn year_month_of(record: &TransactionRecord) -> Option<(i32, u32)> {
    record.date.map(|d| (d.year(), d.month()))
}

/// English name of a calendar month (1-12).
///
/// # Panics
///
/// Panics if `month` is outside 1-12. All callers derive the value from a
/// valid [`chrono::NaiveDate`].
#[must_use]
pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        12 => "December",
        _ => unreachable!("month out of range: {month}"),
    }
}

/// Display label for a quarter (1-4), e.g. `Q2`.
#[must_use]
pub fn quarter_name(quarter: u32) -> String {
    format!("Q{quarter}")
}

/// Display label for a year-month pair, e.g. `2024-03`.
#[must_use]
pub fn year_month_label((year, month): (i32, u32)) -> String {
    format!("{year:04}-{month:02}")
}

/// Case-insensitive substring test against a free-text field.
///
/// An empty field value never matches any token.
#[must_use]
pub fn contains_token(field: &str, token: &str) -> bool {
    if field.is_empty() {
        return false;
    }
    field.to_lowercase().contains(&token.to_lowercase())
}

/// Group records by a key function, preserving first-seen key order.
///
/// Records for which `key_fn` returns `None` are excluded from the group
/// domain. The only ordering contract is determinism for identical input;
/// consumers that need "descending by metric" sort explicitly.
pub fn group_by<'a, K, F>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    key_fn: F,
) -> Vec<(K, Vec<&'a TransactionRecord>)>
where
    K: Eq + Hash + Clone,
    F: Fn(&TransactionRecord) -> Option<K>,
{
    let mut groups: Vec<(K, Vec<&TransactionRecord>)> = Vec::new();
    let mut index: HashMap<K, usize> = HashMap::new();

    for record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };
        match index.get(&key) {
            Some(&i) => groups[i].1.push(record),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push((key, vec![record]));
            }
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salescope_core::TransactionRecord;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_and_quarter_of_null_date() {
        let rec = TransactionRecord::new("A", "Retail");
        assert_eq!(month_of(&rec), None);
        assert_eq!(quarter_of(&rec), None);
        assert_eq!(year_month_of(&rec), None);
    }

    #[test]
    fn quarter_boundaries() {
        for (month, quarter) in [(1, 1), (3, 1), (4, 2), (6, 2), (7, 3), (10, 4), (12, 4)] {
            let rec = TransactionRecord::new("A", "Retail").with_date(date(2024, month, 15));
            assert_eq!(quarter_of(&rec), Some(quarter), "month {month}");
        }
    }

    #[test]
    fn token_match_is_case_insensitive() {
        assert!(contains_token("CREDIT CARD", "Credit"));
        assert!(contains_token("paid by debit", "Debit"));
        assert!(!contains_token("Cash", "Credit"));
        assert!(!contains_token("", "Credit"));
    }

    #[test]
    fn group_by_first_seen_order() {
        let records = vec![
            TransactionRecord::new("A", "Sports"),
            TransactionRecord::new("B", "Food"),
            TransactionRecord::new("C", "Sports"),
        ];
        let groups = group_by(&records, |r| Some(r.service_category.clone()));
        let keys: Vec<_> = groups.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["Sports", "Food"]);
        assert_eq!(groups[0].1.len(), 2);
    }

    #[test]
    fn group_by_skips_none_keys() {
        let records = vec![
            TransactionRecord::new("A", "Retail").with_date(date(2024, 1, 1)),
            TransactionRecord::new("B", "Retail"),
        ];
        let groups = group_by(&records, month_of);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].0, 1);
        assert_eq!(groups[0].1.len(), 1);
    }
}
