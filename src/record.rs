//! Sales record model and positional CSV-row parsing.

use crate::money::Money;
use chrono::NaiveDate;
use csv::StringRecord;
use std::str::FromStr;
use thiserror::Error;

/// Expected column count: Date, SKU, Unit_Price, Quantity, Total_Price.
pub const FIELD_COUNT: usize = 5;

/// Month bucket used for records whose date cannot be parsed.
pub const INVALID_DATE_BUCKET: &str = "Invalid Date";

/// Why an input row produced no record.
///
/// Rejections are row-scoped: they are counted and reported by the
/// pipeline but never abort the batch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowRejection {
    /// The row did not have exactly [`FIELD_COUNT`] columns.
    #[error("expected {FIELD_COUNT} fields, found {0}")]
    FieldCount(usize),

    /// A numeric column held content that does not parse.
    #[error("{column} is not numeric: {value:?}")]
    BadNumber {
        column: &'static str,
        value: String,
    },

    /// The CSV reader could not decode the row at all.
    #[error("unreadable row: {0}")]
    Unreadable(String),
}

/// One validated sales line.
///
/// Date and SKU are kept as raw strings; the month bucket is derived
/// lazily via [`SalesRecord::month_key`]. The unit price is parsed and
/// preserved even though no report currently reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesRecord {
    /// Order date as it appeared in the input, expected `YYYY-MM-DD`.
    pub date: String,

    /// Item identifier.
    pub sku: String,

    /// Price of a single unit.
    pub unit_price: Money,

    /// Units sold in this order.
    pub quantity: u32,

    /// Total price of the order.
    pub total_price: Money,
}

impl SalesRecord {
    /// Builds a record from a raw CSV row, taking fields positionally.
    ///
    /// Rows with a field count other than [`FIELD_COUNT`] are rejected.
    /// Empty numeric fields are read as zero; non-numeric content in a
    /// numeric field rejects the whole row.
    pub fn from_row(row: &StringRecord) -> Result<Self, RowRejection> {
        if row.len() != FIELD_COUNT {
            return Err(RowRejection::FieldCount(row.len()));
        }

        Ok(SalesRecord {
            date: row[0].to_string(),
            sku: row[1].to_string(),
            unit_price: parse_numeric(&row[2], "Unit_Price")?,
            quantity: parse_quantity(&row[3])?,
            total_price: parse_numeric(&row[4], "Total_Price")?,
        })
    }

    /// Month bucket for this record's date.
    ///
    /// Dates parse as `YYYY-MM-DD` and map to the full English month
    /// name (`%B` is locale-independent). Anything unparseable lands in
    /// the [`INVALID_DATE_BUCKET`] rather than being dropped.
    pub fn month_key(&self) -> String {
        match NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d") {
            Ok(date) => date.format("%B").to_string(),
            Err(_) => INVALID_DATE_BUCKET.to_string(),
        }
    }
}

/// Parses a monetary field, treating an empty field as zero.
fn parse_numeric(field: &str, column: &'static str) -> Result<Money, RowRejection> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(Money::ZERO);
    }
    Money::from_str(trimmed).map_err(|_| RowRejection::BadNumber {
        column,
        value: field.to_string(),
    })
}

/// Parses the quantity field, treating an empty field as zero.
fn parse_quantity(field: &str) -> Result<u32, RowRejection> {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }
    trimmed.parse::<u32>().map_err(|_| RowRejection::BadNumber {
        column: "Quantity",
        value: field.to_string(),
    })
}
