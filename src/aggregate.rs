//! Aggregation engine: grouped totals over a filtered table
//!
//! Every grouping is built in one pass into a `BTreeMap` keyed by the group,
//! so output order is deterministic (by display name, or by month).

use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::{Product, Region, Salesperson, Transaction};

#[derive(Debug, Clone, Copy, Default)]
struct Accumulator {
    total: f64,
    count: usize,
    bonus: f64,
}

impl Accumulator {
    fn add(&mut self, t: &Transaction) {
        self.total += t.total_amount;
        self.count += 1;
        self.bonus += t.seller_bonus;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalespersonTotals {
    pub salesperson: Salesperson,
    pub total: f64,
    pub count: usize,
    pub bonus_total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionTotals {
    pub region: Region,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTotals {
    pub product: Product,
    pub total: f64,
    pub count: usize,
}

/// Totals for one calendar month, `month` formatted `YYYY-MM`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTotals {
    pub month: String,
    pub total: f64,
    pub count: usize,
}

/// Salesperson with the highest total, or an explicit marker for an empty table
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BestPerformer {
    Leader { salesperson: Salesperson, total: f64 },
    NoData,
}

impl BestPerformer {
    pub fn salesperson(&self) -> Option<Salesperson> {
        match self {
            BestPerformer::Leader { salesperson, .. } => Some(*salesperson),
            BestPerformer::NoData => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    pub by_salesperson: Vec<SalespersonTotals>,
    pub by_region: Vec<RegionTotals>,
    pub by_product: Vec<ProductTotals>,
    pub by_month: Vec<MonthTotals>,
    pub row_count: usize,
    pub grand_total: f64,
    /// Mean line total; 0 for an empty table
    pub mean_total: f64,
}

impl AggregateResult {
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }

    /// Ties go to the salesperson first in name order
    pub fn best_performer(&self) -> BestPerformer {
        let mut best: Option<&SalespersonTotals> = None;
        for s in &self.by_salesperson {
            match best {
                Some(b) if b.total >= s.total => {}
                _ => best = Some(s),
            }
        }

        match best {
            Some(s) => BestPerformer::Leader {
                salesperson: s.salesperson,
                total: s.total,
            },
            None => BestPerformer::NoData,
        }
    }
}

pub fn aggregate(rows: &[Transaction]) -> AggregateResult {
    let mut salespeople: BTreeMap<Salesperson, Accumulator> = BTreeMap::new();
    let mut regions: BTreeMap<Region, Accumulator> = BTreeMap::new();
    let mut products: BTreeMap<Product, Accumulator> = BTreeMap::new();
    let mut months: BTreeMap<(i32, u32), Accumulator> = BTreeMap::new();
    let mut grand_total = 0.0;

    for t in rows {
        salespeople.entry(t.salesperson).or_default().add(t);
        regions.entry(t.region).or_default().add(t);
        products.entry(t.product).or_default().add(t);
        months.entry((t.date.year(), t.date.month())).or_default().add(t);
        grand_total += t.total_amount;
    }

    let mean_total = if rows.is_empty() {
        0.0
    } else {
        grand_total / rows.len() as f64
    };

    AggregateResult {
        by_salesperson: salespeople
            .into_iter()
            .map(|(salesperson, acc)| SalespersonTotals {
                salesperson,
                total: acc.total,
                count: acc.count,
                bonus_total: acc.bonus,
            })
            .collect(),
        by_region: regions
            .into_iter()
            .map(|(region, acc)| RegionTotals {
                region,
                total: acc.total,
                count: acc.count,
            })
            .collect(),
        by_product: products
            .into_iter()
            .map(|(product, acc)| ProductTotals {
                product,
                total: acc.total,
                count: acc.count,
            })
            .collect(),
        by_month: months
            .into_iter()
            .map(|((year, month), acc)| MonthTotals {
                month: format!("{:04}-{:02}", year, month),
                total: acc.total,
                count: acc.count,
            })
            .collect(),
        row_count: rows.len(),
        grand_total,
        mean_total,
    }
}
