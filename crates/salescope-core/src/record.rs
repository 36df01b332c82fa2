//! Transaction record types and field coercion.
//!
//! A [`TransactionRecord`] is one typed row of the transaction table. Rows
//! arrive from an ingestion layer as [`RawRow`] field tuples; the date and
//! amount fields are coerced here, and values that fail to parse become
//! `None` rather than an error. Rows with a `None` field are excluded from
//! computations keyed on that field but still participate in all others.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// An untyped row as handed over by the ingestion layer.
///
/// All fields are carried as text, exactly as they appeared in the source.
/// Column-name normalization and CSV mechanics are the ingestion layer's
/// responsibility; type coercion happens in [`TransactionRecord::from_raw`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    /// Transaction date text (e.g. `2024-03-01`).
    pub date: String,
    /// Transaction amount text (e.g. `120.50` or `$1,200.00`).
    pub amount: String,
    /// Customer identifier.
    pub customer_id: String,
    /// Service category.
    pub service_category: String,
    /// Product subtype within the category.
    pub product_subtype: String,
    /// City of the transaction.
    pub city: String,
    /// State of the transaction.
    pub state: String,
    /// Free-text payment detail (expected to contain tokens like "Credit").
    pub payment_detail: String,
}

impl RawRow {
    /// Create a raw row from its eight field values.
    #[must_use]
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        date: impl Into<String>,
        amount: impl Into<String>,
        customer_id: impl Into<String>,
        service_category: impl Into<String>,
        product_subtype: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        payment_detail: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            amount: amount.into(),
            customer_id: customer_id.into(),
            service_category: service_category.into(),
            product_subtype: product_subtype.into(),
            city: city.into(),
            state: state.into(),
            payment_detail: payment_detail.into(),
        }
    }
}

/// One typed row of the transaction table.
///
/// Fields are read-only after load: the table never hands out mutable
/// references, and derived values (month buckets and the like) are computed
/// as side structures, never written back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Calendar date of the transaction, `None` if unparsable.
    pub date: Option<NaiveDate>,
    /// Transaction amount, `None` if unparsable.
    pub amount: Option<Decimal>,
    /// Customer identifier.
    pub customer_id: String,
    /// Service category.
    pub service_category: String,
    /// Product subtype within the category.
    pub product_subtype: String,
    /// City of the transaction.
    pub city: String,
    /// State of the transaction.
    pub state: String,
    /// Free-text payment detail.
    pub payment_detail: String,
}

impl TransactionRecord {
    /// Create a record with the given customer, category and amount.
    ///
    /// Mainly useful for constructing fixtures; production rows come from
    /// [`Self::from_raw`].
    #[must_use]
    pub fn new(customer_id: impl Into<String>, service_category: impl Into<String>) -> Self {
        Self {
            date: None,
            amount: None,
            customer_id: customer_id.into(),
            service_category: service_category.into(),
            product_subtype: String::new(),
            city: String::new(),
            state: String::new(),
            payment_detail: String::new(),
        }
    }

    /// Set the date.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Set the amount.
    #[must_use]
    pub const fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    /// Set the product subtype.
    #[must_use]
    pub fn with_product(mut self, product_subtype: impl Into<String>) -> Self {
        self.product_subtype = product_subtype.into();
        self
    }

    /// Set the city.
    #[must_use]
    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = city.into();
        self
    }

    /// Set the state.
    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = state.into();
        self
    }

    /// Set the payment detail text.
    #[must_use]
    pub fn with_payment(mut self, payment_detail: impl Into<String>) -> Self {
        self.payment_detail = payment_detail.into();
        self
    }

    /// Coerce a raw row into a typed record.
    ///
    /// Date and amount that fail to parse become `None`; the remaining
    /// fields are kept as trimmed text. This never fails.
    #[must_use]
    pub fn from_raw(raw: RawRow) -> Self {
        Self {
            date: parse_date(&raw.date),
            amount: parse_amount(&raw.amount),
            customer_id: raw.customer_id.trim().to_string(),
            service_category: raw.service_category.trim().to_string(),
            product_subtype: raw.product_subtype.trim().to_string(),
            city: raw.city.trim().to_string(),
            state: raw.state.trim().to_string(),
            payment_detail: raw.payment_detail.trim().to_string(),
        }
    }
}

impl From<RawRow> for TransactionRecord {
    fn from(raw: RawRow) -> Self {
        Self::from_raw(raw)
    }
}

/// Date formats accepted from the source data, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d-%m-%Y"];

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
}

fn parse_amount(text: &str) -> Option<Decimal> {
    let text = text.trim().trim_start_matches('$');
    if text.is_empty() {
        return None;
    }
    // Thousands separators are common in exported amounts
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_iso_date() {
        assert_eq!(
            parse_date("2024-03-15"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn parses_us_date() {
        assert_eq!(
            parse_date("03/15/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn bad_date_becomes_none() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn parses_plain_amount() {
        assert_eq!(parse_amount("120.50"), Some(dec!(120.50)));
        assert_eq!(parse_amount("-7"), Some(dec!(-7)));
    }

    #[test]
    fn parses_formatted_amount() {
        assert_eq!(parse_amount("$1,200.00"), Some(dec!(1200.00)));
        assert_eq!(parse_amount(" $99 "), Some(dec!(99)));
    }

    #[test]
    fn bad_amount_becomes_none() {
        assert_eq!(parse_amount("oops"), None);
        assert_eq!(parse_amount(""), None);
    }

    #[test]
    fn from_raw_trims_text_fields() {
        let rec = TransactionRecord::from_raw(RawRow::new(
            "2024-01-02",
            "10",
            " C001 ",
            " Retail",
            "Outdoor Recreation ",
            "Austin",
            "Texas",
            " Credit Card ",
        ));
        assert_eq!(rec.customer_id, "C001");
        assert_eq!(rec.service_category, "Retail");
        assert_eq!(rec.product_subtype, "Outdoor Recreation");
        assert_eq!(rec.payment_detail, "Credit Card");
        assert_eq!(rec.amount, Some(dec!(10)));
    }
}
