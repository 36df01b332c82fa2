//! The fixed catalog of analytical queries.
//!
//! Each entry composes the filter/group primitives and aggregation functions
//! into one named computation over the transaction table. The catalog is
//! closed: definitions are addressed by a stable 1-based id and every one is
//! a total, pure function of the table. Selection-driven branching has no
//! place here; the executor looks a definition up and calls it.

use rust_decimal::Decimal;
use salescope_core::{TransactionRecord, TransactionTable};

use crate::aggregate::{count_distinct, max_amount, mean_amount, sum_amounts, top_n};
use crate::primitives::{
    contains_token, group_by, month_name, month_of, quarter_name, quarter_of, year_month_label,
    year_month_of,
};
use crate::value::{QueryResult, Value};

/// A catalog query: pure function from (label, table) to result. The label
/// is the definition's own display text, threaded in so shared computations
/// still report the id they were invoked under.
type QueryFn = fn(&str, &TransactionTable) -> QueryResult;

/// An immutable catalog entry.
pub struct QueryDef {
    /// Stable 1-based identifier.
    pub id: u16,
    /// Display label; irrelevant to the computation.
    pub label: &'static str,
    run: QueryFn,
}

impl QueryDef {
    /// Run this query against a table snapshot.
    #[must_use]
    pub fn execute(&self, table: &TransactionTable) -> QueryResult {
        (self.run)(self.label, table)
    }
}

/// The full ordered catalog.
#[must_use]
pub fn catalog() -> &'static [QueryDef] {
    &CATALOG
}

/// Look up a definition by id.
#[must_use]
pub fn find(id: u16) -> Option<&'static QueryDef> {
    CATALOG.iter().find(|def| def.id == id)
}

const CATALOG: [QueryDef; 35] = [
    QueryDef {
        id: 1,
        label: "Total sales amount across all transactions",
        run: total_sales,
    },
    QueryDef {
        id: 2,
        label: "Month with highest total transaction amount",
        run: monthly_sales_ranked,
    },
    QueryDef {
        id: 3,
        label: "Average transaction amount per customer",
        run: mean_of_customer_means,
    },
    QueryDef {
        id: 4,
        label: "Trend of total sales over months",
        run: monthly_sales_trend,
    },
    QueryDef {
        id: 5,
        label: "Highest single transaction amount recorded",
        run: highest_transaction,
    },
    QueryDef {
        id: 6,
        label: "Service category contributing most to total revenue",
        run: revenue_by_service_ranked,
    },
    QueryDef {
        id: 7,
        label: "Product generating highest revenue",
        run: revenue_by_product_ranked,
    },
    QueryDef {
        id: 8,
        label: "Average transaction amount variation between services",
        run: mean_by_service,
    },
    QueryDef {
        id: 9,
        label: "Number of unique customers",
        run: unique_customers,
    },
    QueryDef {
        id: 10,
        label: "Customers who spent the most overall",
        run: top_customers_by_spend,
    },
    QueryDef {
        id: 11,
        label: "Average number of transactions per customer",
        run: mean_transactions_per_customer,
    },
    QueryDef {
        id: 12,
        label: "Customers who purchased in multiple categories",
        run: multi_category_customers,
    },
    QueryDef {
        id: 13,
        label: "Percentage of repeat buyers",
        run: repeat_buyer_percentage,
    },
    QueryDef {
        id: 14,
        label: "Product category with highest total sales",
        run: revenue_by_service_ranked,
    },
    QueryDef {
        id: 15,
        label: "Most popular services by transaction count",
        run: transactions_by_service_ranked,
    },
    QueryDef {
        id: 16,
        label: "Most frequently purchased product type per service",
        run: top_service_product_pairs,
    },
    QueryDef {
        id: 17,
        label: "Average transaction amount per product type",
        run: mean_by_product_ranked,
    },
    QueryDef {
        id: 18,
        label: "Services where customers spend significantly more",
        run: mean_by_service_ranked,
    },
    QueryDef {
        id: 19,
        label: "State with highest total sales",
        run: revenue_by_state_ranked,
    },
    QueryDef {
        id: 20,
        label: "City with highest number of transactions",
        run: top_cities_by_transactions,
    },
    QueryDef {
        id: 21,
        label: "Average spending per transaction in each state",
        run: mean_by_state_ranked,
    },
    QueryDef {
        id: 22,
        label: "Services popular in specific states",
        run: service_counts_by_state,
    },
    QueryDef {
        id: 23,
        label: "States buying most Outdoor Recreation products",
        run: outdoor_revenue_by_state,
    },
    QueryDef {
        id: 24,
        label: "Compare average spending between California and Texas",
        run: california_vs_texas_spending,
    },
    QueryDef {
        id: 25,
        label: "Quarter with highest sales",
        run: quarterly_sales,
    },
    QueryDef {
        id: 26,
        label: "Month-by-month total sales variation",
        run: monthly_sales_calendar,
    },
    QueryDef {
        id: 27,
        label: "Total number of transactions per month",
        run: monthly_transaction_counts,
    },
    QueryDef {
        id: 28,
        label: "Season when sports equipment sales spike",
        run: sports_sales_by_month,
    },
    QueryDef {
        id: 29,
        label: "Number of credit transactions",
        run: credit_transaction_count,
    },
    QueryDef {
        id: 30,
        label: "Total revenue from credit transactions",
        run: credit_revenue,
    },
    QueryDef {
        id: 31,
        label: "Difference in average spending between credit and debit customers",
        run: credit_vs_debit_spending,
    },
    QueryDef {
        id: 32,
        label: "States to focus marketing of high-value products",
        run: high_value_states,
    },
    QueryDef {
        id: 33,
        label: "Should more Exercise & Fitness inventory be stocked",
        run: exercise_fitness_revenue,
    },
    QueryDef {
        id: 34,
        label: "Product categories with high sales but low average amounts",
        run: service_totals_and_means,
    },
    QueryDef {
        id: 35,
        label: "Underperforming service categories needing offers",
        run: underperforming_services,
    },
];

// ---------------------------------------------------------------------------
// Composition helpers
// ---------------------------------------------------------------------------

/// Sum of amounts per group, first-seen key order.
fn sum_pairs<'a, K, F>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    key_fn: F,
) -> Vec<(K, Decimal)>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&TransactionRecord) -> Option<K>,
{
    group_by(records, key_fn)
        .into_iter()
        .map(|(key, group)| (key, sum_amounts(group)))
        .collect()
}

/// Mean amount per group, first-seen key order. All-null groups keep `None`.
fn mean_pairs<'a, K, F>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    key_fn: F,
) -> Vec<(K, Option<Decimal>)>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&TransactionRecord) -> Option<K>,
{
    group_by(records, key_fn)
        .into_iter()
        .map(|(key, group)| (key, mean_amount(group)))
        .collect()
}

/// Record count per group, first-seen key order.
fn count_pairs<'a, K, F>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
    key_fn: F,
) -> Vec<(K, i64)>
where
    K: Eq + std::hash::Hash + Clone,
    F: Fn(&TransactionRecord) -> Option<K>,
{
    group_by(records, key_fn)
        .into_iter()
        .map(|(key, group)| (key, group.len() as i64))
        .collect()
}

/// Stable descending sort over the whole domain.
fn rank_desc<K, V: Ord>(pairs: Vec<(K, V)>) -> Vec<(K, V)> {
    let n = pairs.len();
    top_n(pairs, n)
}

/// Stable descending sort of grouped means; undefined means sort last.
fn rank_means_desc<K>(mut pairs: Vec<(K, Option<Decimal>)>) -> Vec<(K, Option<Decimal>)> {
    pairs.sort_by(|a, b| match (&a.1, &b.1) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
    pairs
}

fn series<K, V>(label: &str, pairs: Vec<(K, V)>, key_label: impl Fn(K) -> String) -> QueryResult
where
    V: Into<Value>,
{
    QueryResult::Series {
        label: label.to_string(),
        pairs: pairs
            .into_iter()
            .map(|(key, value)| (key_label(key), value.into()))
            .collect(),
    }
}

fn scalar(label: &str, value: impl Into<Value>) -> QueryResult {
    QueryResult::Scalar {
        label: label.to_string(),
        value: value.into(),
    }
}

fn by_category(record: &TransactionRecord) -> Option<String> {
    Some(record.service_category.clone())
}

fn by_product(record: &TransactionRecord) -> Option<String> {
    Some(record.product_subtype.clone())
}

fn by_customer(record: &TransactionRecord) -> Option<String> {
    Some(record.customer_id.clone())
}

fn by_state(record: &TransactionRecord) -> Option<String> {
    Some(record.state.clone())
}

fn by_city(record: &TransactionRecord) -> Option<String> {
    Some(record.city.clone())
}

fn product_matches<'a>(
    table: &'a TransactionTable,
    token: &'a str,
) -> impl Iterator<Item = &'a TransactionRecord> {
    table
        .iter()
        .filter(move |r| contains_token(&r.product_subtype, token))
}

fn payment_matches<'a>(
    table: &'a TransactionTable,
    token: &'a str,
) -> impl Iterator<Item = &'a TransactionRecord> {
    table
        .iter()
        .filter(move |r| contains_token(&r.payment_detail, token))
}

// ---------------------------------------------------------------------------
// Scalar aggregates
// ---------------------------------------------------------------------------

fn total_sales(label: &str, table: &TransactionTable) -> QueryResult {
    scalar(label, sum_amounts(table))
}

fn highest_transaction(label: &str, table: &TransactionTable) -> QueryResult {
    scalar(label, max_amount(table))
}

fn unique_customers(label: &str, table: &TransactionTable) -> QueryResult {
    scalar(label, count_distinct(table, by_customer))
}

/// Mean of the per-customer mean amounts. Customers whose amounts are all
/// unparsable contribute no inner mean and are excluded from the outer one.
fn mean_of_customer_means(label: &str, table: &TransactionTable) -> QueryResult {
    let means: Vec<Decimal> = group_by(table, by_customer)
        .into_iter()
        .filter_map(|(_, group)| mean_amount(group))
        .collect();
    let mean = (!means.is_empty()).then(|| {
        let total: Decimal = means.iter().sum();
        total / Decimal::from(means.len() as i64)
    });
    scalar(label, mean)
}

fn mean_transactions_per_customer(label: &str, table: &TransactionTable) -> QueryResult {
    let customers = count_distinct(table, by_customer);
    let mean = (customers > 0)
        .then(|| Decimal::from(table.len() as i64) / Decimal::from(customers as i64));
    scalar(label, mean)
}

fn multi_category_customers(label: &str, table: &TransactionTable) -> QueryResult {
    let multi = group_by(table, by_customer)
        .into_iter()
        .filter(|(_, group)| count_distinct(group.iter().copied(), by_category) > 1)
        .count();
    scalar(label, multi)
}

/// (customers with more than one transaction) / (distinct customers) x 100.
fn repeat_buyer_percentage(label: &str, table: &TransactionTable) -> QueryResult {
    let groups = group_by(table, by_customer);
    let distinct = groups.len();
    let repeat = groups.iter().filter(|(_, group)| group.len() > 1).count();
    let pct = (distinct > 0).then(|| {
        Decimal::from(repeat as i64) * Decimal::from(100) / Decimal::from(distinct as i64)
    });
    scalar(label, pct)
}

// ---------------------------------------------------------------------------
// Grouped and ranked views
// ---------------------------------------------------------------------------

fn monthly_sales_ranked(label: &str, table: &TransactionTable) -> QueryResult {
    let pairs = rank_desc(sum_pairs(table, month_of));
    series(label, pairs, |m| month_name(m).to_string())
}

fn monthly_sales_trend(label: &str, table: &TransactionTable) -> QueryResult {
    let mut pairs = sum_pairs(table, year_month_of);
    pairs.sort_by_key(|(ym, _)| *ym);
    series(label, pairs, year_month_label)
}

fn revenue_by_service_ranked(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, rank_desc(sum_pairs(table, by_category)), |k| k)
}

fn revenue_by_product_ranked(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, rank_desc(sum_pairs(table, by_product)), |k| k)
}

fn mean_by_service(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, mean_pairs(table, by_category), |k| k)
}

fn top_customers_by_spend(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, top_n(sum_pairs(table, by_customer), 10), |k| k)
}

fn transactions_by_service_ranked(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, rank_desc(count_pairs(table, by_category)), |k| k)
}

fn top_service_product_pairs(label: &str, table: &TransactionTable) -> QueryResult {
    let pairs = count_pairs(table, |r| {
        Some((r.service_category.clone(), r.product_subtype.clone()))
    });
    let rows = top_n(pairs, 10)
        .into_iter()
        .map(|((service, product), count)| {
            vec![Value::String(service), Value::String(product), count.into()]
        })
        .collect();
    QueryResult::Table {
        label: label.to_string(),
        columns: vec![
            "service".to_string(),
            "product".to_string(),
            "transactions".to_string(),
        ],
        rows,
    }
}

fn mean_by_product_ranked(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, rank_means_desc(mean_pairs(table, by_product)), |k| k)
}

fn mean_by_service_ranked(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, rank_means_desc(mean_pairs(table, by_category)), |k| k)
}

fn revenue_by_state_ranked(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, rank_desc(sum_pairs(table, by_state)), |k| k)
}

fn top_cities_by_transactions(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, top_n(count_pairs(table, by_city), 10), |k| k)
}

fn mean_by_state_ranked(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, rank_means_desc(mean_pairs(table, by_state)), |k| k)
}

fn service_counts_by_state(label: &str, table: &TransactionTable) -> QueryResult {
    let rows = count_pairs(table, |r| {
        Some((r.state.clone(), r.service_category.clone()))
    })
    .into_iter()
    .map(|((state, service), count)| {
        vec![Value::String(state), Value::String(service), count.into()]
    })
    .collect();
    QueryResult::Table {
        label: label.to_string(),
        columns: vec![
            "state".to_string(),
            "service".to_string(),
            "transactions".to_string(),
        ],
        rows,
    }
}

fn high_value_states(label: &str, table: &TransactionTable) -> QueryResult {
    let ranked: Vec<_> = rank_means_desc(mean_pairs(table, by_state))
        .into_iter()
        .take(5)
        .collect();
    series(label, ranked, |k| k)
}

fn service_totals_and_means(label: &str, table: &TransactionTable) -> QueryResult {
    let mut pairs: Vec<(String, (Decimal, Option<Decimal>))> = group_by(table, by_category)
        .into_iter()
        .map(|(k, group)| {
            let total = sum_amounts(group.iter().copied());
            (k, (total, mean_amount(group)))
        })
        .collect();
    pairs.sort_by(|a, b| b.1 .0.cmp(&a.1 .0));
    let rows = pairs
        .into_iter()
        .map(|(service, (total, mean))| vec![Value::String(service), total.into(), mean.into()])
        .collect();
    QueryResult::Table {
        label: label.to_string(),
        columns: vec![
            "service".to_string(),
            "total".to_string(),
            "average".to_string(),
        ],
        rows,
    }
}

/// Mean amount per service, ranked ascending so the weakest categories lead.
fn underperforming_services(label: &str, table: &TransactionTable) -> QueryResult {
    let mut pairs = rank_means_desc(mean_pairs(table, by_category));
    // Ascending, with undefined means still last.
    let defined = pairs.iter().filter(|(_, m)| m.is_some()).count();
    pairs[..defined].reverse();
    series(label, pairs, |k| k)
}

// ---------------------------------------------------------------------------
// Time-bucketed views (calendar order)
// ---------------------------------------------------------------------------

fn monthly_sum_series<'a>(
    records: impl IntoIterator<Item = &'a TransactionRecord>,
) -> Vec<(u32, Decimal)> {
    let mut pairs = sum_pairs(records, month_of);
    pairs.sort_by_key(|(m, _)| *m);
    pairs
}

fn quarterly_sales(label: &str, table: &TransactionTable) -> QueryResult {
    let mut pairs = sum_pairs(table, quarter_of);
    pairs.sort_by_key(|(q, _)| *q);
    series(label, pairs, quarter_name)
}

fn monthly_sales_calendar(label: &str, table: &TransactionTable) -> QueryResult {
    series(label, monthly_sum_series(table), |m| {
        month_name(m).to_string()
    })
}

fn monthly_transaction_counts(label: &str, table: &TransactionTable) -> QueryResult {
    let mut pairs = count_pairs(table, month_of);
    pairs.sort_by_key(|(m, _)| *m);
    series(label, pairs, |m| month_name(m).to_string())
}

fn sports_sales_by_month(label: &str, table: &TransactionTable) -> QueryResult {
    series(
        label,
        monthly_sum_series(product_matches(table, "Sports")),
        |m| month_name(m).to_string(),
    )
}

// ---------------------------------------------------------------------------
// Filtered subsets and comparative pairs
// ---------------------------------------------------------------------------

fn outdoor_revenue_by_state(label: &str, table: &TransactionTable) -> QueryResult {
    let pairs = rank_desc(sum_pairs(product_matches(table, "Outdoor"), by_state));
    series(label, pairs, |k| k)
}

fn california_vs_texas_spending(label: &str, table: &TransactionTable) -> QueryResult {
    let mean_for =
        |token: &str| mean_amount(table.iter().filter(|r| contains_token(&r.state, token)));
    series(
        label,
        vec![
            ("California", mean_for("California")),
            ("Texas", mean_for("Texas")),
        ],
        str::to_string,
    )
}

fn credit_transaction_count(label: &str, table: &TransactionTable) -> QueryResult {
    scalar(label, payment_matches(table, "Credit").count())
}

fn credit_revenue(label: &str, table: &TransactionTable) -> QueryResult {
    scalar(label, sum_amounts(payment_matches(table, "Credit")))
}

fn credit_vs_debit_spending(label: &str, table: &TransactionTable) -> QueryResult {
    series(
        label,
        vec![
            ("Credit", mean_amount(payment_matches(table, "Credit"))),
            ("Debit", mean_amount(payment_matches(table, "Debit"))),
        ],
        str::to_string,
    )
}

fn exercise_fitness_revenue(label: &str, table: &TransactionTable) -> QueryResult {
    scalar(label, sum_amounts(product_matches(table, "Exercise")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_sequential() {
        for (i, def) in catalog().iter().enumerate() {
            assert_eq!(def.id, (i + 1) as u16);
        }
    }

    #[test]
    fn find_known_and_unknown() {
        assert!(find(1).is_some());
        assert!(find(35).is_some());
        assert!(find(0).is_none());
        assert!(find(36).is_none());
    }

    #[test]
    fn labels_are_nonempty() {
        for def in catalog() {
            assert!(!def.label.is_empty(), "query {} has no label", def.id);
        }
    }
}
