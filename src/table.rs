//! Sortable record table and CSV export

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::io::Write;
use std::str::FromStr;

use crate::models::{ParseNameError, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Date,
    Salesperson,
    Product,
    Region,
    Quantity,
    UnitPrice,
    Total,
    Bonus,
}

impl FromStr for SortKey {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "salesperson" => Ok(SortKey::Salesperson),
            "product" => Ok(SortKey::Product),
            "region" => Ok(SortKey::Region),
            "quantity" => Ok(SortKey::Quantity),
            "unit_price" | "price" => Ok(SortKey::UnitPrice),
            "total" | "total_amount" => Ok(SortKey::Total),
            "bonus" | "seller_bonus" => Ok(SortKey::Bonus),
            _ => Err(ParseNameError {
                kind: "sort key",
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl FromStr for SortOrder {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            _ => Err(ParseNameError {
                kind: "sort order",
                value: s.to_string(),
            }),
        }
    }
}

fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Salesperson => a.salesperson.cmp(&b.salesperson),
        SortKey::Product => a.product.cmp(&b.product),
        SortKey::Region => a.region.cmp(&b.region),
        SortKey::Quantity => a.quantity.cmp(&b.quantity),
        SortKey::UnitPrice => a.unit_price.total_cmp(&b.unit_price),
        SortKey::Total => a.total_amount.total_cmp(&b.total_amount),
        SortKey::Bonus => a.seller_bonus.total_cmp(&b.seller_bonus),
    }
}

/// Stable sort; equal keys keep table order in both directions
pub fn sort_records(records: &mut [Transaction], key: SortKey, order: SortOrder) {
    records.sort_by(|a, b| {
        let ord = compare(a, b, key);
        match order {
            SortOrder::Ascending => ord,
            SortOrder::Descending => ord.reverse(),
        }
    });
}

/// Write records as CSV with a header row named after the record fields
pub fn write_csv<W: Write>(records: &[Transaction], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
