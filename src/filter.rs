//! Filter engine: narrows a transaction table to the current selection

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

use crate::models::{Product, Region, Salesperson, Transaction};

/// Inclusive calendar date range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The `days` calendar days ending at `today`, both ends included
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        Self {
            start: today - Duration::days(days.max(1) - 1),
            end: today,
        }
    }

    /// Smallest range holding every date in `table`, `None` when it is empty
    pub fn covering(table: &[Transaction]) -> Option<Self> {
        let start = table.iter().map(|t| t.date).min()?;
        let end = table.iter().map(|t| t.date).max()?;
        Some(Self { start, end })
    }

    pub fn is_valid(&self) -> bool {
        self.start <= self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// User filter criteria. Empty sets place no restriction; the date range always applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub salespeople: BTreeSet<Salesperson>,
    pub regions: BTreeSet<Region>,
    pub products: BTreeSet<Product>,
    pub date_range: DateRange,
}

impl Selection {
    /// No name restrictions, only the date range
    pub fn all(date_range: DateRange) -> Self {
        Self {
            salespeople: BTreeSet::new(),
            regions: BTreeSet::new(),
            products: BTreeSet::new(),
            date_range,
        }
    }

    pub fn with_salespeople(mut self, salespeople: impl IntoIterator<Item = Salesperson>) -> Self {
        self.salespeople = salespeople.into_iter().collect();
        self
    }

    pub fn with_regions(mut self, regions: impl IntoIterator<Item = Region>) -> Self {
        self.regions = regions.into_iter().collect();
        self
    }

    pub fn with_products(mut self, products: impl IntoIterator<Item = Product>) -> Self {
        self.products = products.into_iter().collect();
        self
    }

    pub fn with_date_range(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    pub fn matches(&self, t: &Transaction) -> bool {
        (self.salespeople.is_empty() || self.salespeople.contains(&t.salesperson))
            && (self.regions.is_empty() || self.regions.contains(&t.region))
            && (self.products.is_empty() || self.products.contains(&t.product))
            && self.date_range.contains(t.date)
    }
}

/// Records of `table` passing `selection`, in table order.
///
/// An inverted date range selects nothing.
pub fn filter(table: &[Transaction], selection: &Selection) -> Vec<Transaction> {
    if !selection.date_range.is_valid() {
        warn!(
            start = %selection.date_range.start,
            end = %selection.date_range.end,
            "date range start is after end, selecting no rows"
        );
        return Vec::new();
    }

    table.iter().filter(|t| selection.matches(t)).cloned().collect()
}

/// Values a selector can offer, taken from the current base table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub salespeople: Vec<Salesperson>,
    pub regions: Vec<Region>,
    pub products: Vec<Product>,
    pub date_range: Option<DateRange>,
}

impl FilterOptions {
    pub fn from_table(table: &[Transaction]) -> Self {
        let salespeople: BTreeSet<Salesperson> = table.iter().map(|t| t.salesperson).collect();
        let regions: BTreeSet<Region> = table.iter().map(|t| t.region).collect();
        let products: BTreeSet<Product> = table.iter().map(|t| t.product).collect();

        Self {
            salespeople: salespeople.into_iter().collect(),
            regions: regions.into_iter().collect(),
            products: products.into_iter().collect(),
            date_range: DateRange::covering(table),
        }
    }
}
