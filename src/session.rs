//! Dashboard session: the base table, the current selection, and the
//! pipeline that turns them into a view.
//!
//! The session is the only mutable state. Regeneration swaps the whole table,
//! a selection change swaps the whole selection, and every view is recomputed
//! from scratch (filter -> aggregate -> classify -> assemble).

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, info};

use crate::aggregate::{aggregate, AggregateResult, BestPerformer, MonthTotals, ProductTotals, RegionTotals, SalespersonTotals};
use crate::classify::ThresholdClassifier;
use crate::config::DashboardConfig;
use crate::filter::{filter, DateRange, FilterOptions, Selection};
use crate::format::Summary;
use crate::generator::{SalesGenerator, DATE_WINDOW_DAYS};
use crate::models::Transaction;
use crate::report::{assemble, Report};
use crate::table::{sort_records, SortKey, SortOrder};

/// Series behind the dashboard charts
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub by_salesperson: Vec<SalespersonTotals>,
    pub by_region: Vec<RegionTotals>,
    pub by_product: Vec<ProductTotals>,
    pub by_month: Vec<MonthTotals>,
}

impl From<AggregateResult> for ChartSeries {
    fn from(agg: AggregateResult) -> Self {
        Self {
            by_salesperson: agg.by_salesperson,
            by_region: agg.by_region,
            by_product: agg.by_product,
            by_month: agg.by_month,
        }
    }
}

/// Salesperson total at or above which a chart bar is drawn as high
pub const CHART_HIGH_MARK: f64 = 40_000.0;
/// Salesperson total at or above which a chart bar is drawn as mid
pub const CHART_MID_MARK: f64 = 25_000.0;

/// Colour band of a salesperson bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartBand {
    High,
    Mid,
    Low,
}

impl ChartBand {
    pub fn of(total: f64) -> Self {
        if total >= CHART_HIGH_MARK {
            ChartBand::High
        } else if total >= CHART_MID_MARK {
            ChartBand::Mid
        } else {
            ChartBand::Low
        }
    }
}

impl ChartSeries {
    /// Salesperson bars, smallest total first
    pub fn salespeople_by_total(&self) -> Vec<SalespersonTotals> {
        let mut rows = self.by_salesperson.clone();
        rows.sort_by(|a, b| a.total.total_cmp(&b.total));
        rows
    }

    /// Product bars, largest total first
    pub fn products_by_total(&self) -> Vec<ProductTotals> {
        let mut rows = self.by_product.clone();
        rows.sort_by(|a, b| b.total.total_cmp(&a.total));
        rows
    }

    /// Mean of the product totals, 0 when there are none
    pub fn product_mean(&self) -> f64 {
        if self.by_product.is_empty() {
            return 0.0;
        }
        self.by_product.iter().map(|p| p.total).sum::<f64>() / self.by_product.len() as f64
    }
}

/// Everything the presentation layer renders for one interaction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    /// Table generation the view was computed from
    pub generation: u64,
    pub selection: Selection,
    pub summary: Summary,
    pub best_performer: BestPerformer,
    /// Filtered records, highest total first
    pub records: Vec<Transaction>,
    pub report: Report,
    pub charts: ChartSeries,
}

pub struct DashboardSession {
    base: Vec<Transaction>,
    selection: Selection,
    generator: SalesGenerator,
    classifier: ThresholdClassifier,
    rows: usize,
    generation: u64,
    pinned_today: Option<NaiveDate>,
    /// Window the selection starts with; follows the calendar until the user picks another
    default_range: DateRange,
}

impl DashboardSession {
    pub fn new(config: &DashboardConfig) -> Result<Self> {
        Self::build(config, None)
    }

    /// Session whose calendar is fixed at `today`
    pub fn with_today(config: &DashboardConfig, today: NaiveDate) -> Result<Self> {
        Self::build(config, Some(today))
    }

    fn build(config: &DashboardConfig, pinned_today: Option<NaiveDate>) -> Result<Self> {
        let classifier = config.classifier()?;
        let mut generator = SalesGenerator::from_seed(config.seed);
        let today = pinned_today.unwrap_or_else(|| Local::now().date_naive());
        let base = generator.generate(config.rows, today);
        let default_range = DateRange::last_days(today, DATE_WINDOW_DAYS);

        info!(rows = base.len(), seed = ?config.seed, "dashboard session ready");

        Ok(Self {
            base,
            selection: Selection::all(default_range),
            generator,
            classifier,
            rows: config.rows,
            generation: 0,
            pinned_today,
            default_range,
        })
    }

    fn today(&self) -> NaiveDate {
        self.pinned_today.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn base(&self) -> &[Transaction] {
        &self.base
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn classifier(&self) -> &ThresholdClassifier {
        &self.classifier
    }

    pub fn options(&self) -> FilterOptions {
        FilterOptions::from_table(&self.base)
    }

    /// Replace the base table with a fresh one. Name filters and a user-chosen
    /// date range are kept; the default window moves to end at today.
    pub fn regenerate(&mut self) -> u64 {
        let today = self.today();
        self.base = self.generator.generate(self.rows, today);
        if self.selection.date_range == self.default_range {
            self.default_range = DateRange::last_days(today, DATE_WINDOW_DAYS);
            self.selection.date_range = self.default_range;
        }
        self.generation += 1;
        info!(generation = self.generation, rows = self.base.len(), "regenerated sales table");
        self.generation
    }

    pub fn set_selection(&mut self, selection: Selection) {
        info!(
            salespeople = selection.salespeople.len(),
            regions = selection.regions.len(),
            products = selection.products.len(),
            start = %selection.date_range.start,
            end = %selection.date_range.end,
            "selection changed"
        );
        self.selection = selection;
    }

    pub fn view(&self) -> DashboardView {
        self.view_with(&self.selection)
    }

    /// Run the pipeline for `selection` without touching session state
    pub fn view_with(&self, selection: &Selection) -> DashboardView {
        let mut records = filter(&self.base, selection);
        let aggregate = aggregate(&records);
        let report = assemble(&aggregate, &self.classifier);
        let summary = Summary::from_aggregate(&aggregate);
        let best_performer = aggregate.best_performer();
        sort_records(&mut records, SortKey::Total, SortOrder::Descending);

        debug!(
            generation = self.generation,
            matched = records.len(),
            of = self.base.len(),
            "computed dashboard view"
        );

        DashboardView {
            generation: self.generation,
            selection: selection.clone(),
            summary,
            best_performer,
            records,
            report,
            charts: ChartSeries::from(aggregate),
        }
    }
}
