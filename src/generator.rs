//! Synthetic sales data generator
//!
//! Draws transaction records from a fixed random model:
//! - salesperson, product and region uniformly from their enumerations
//! - base price from a product-specific band, then a regional discount
//! - quantity uniform in 1..=9, seller bonus rate stepping up at 5 units
//! - sale date uniform over the last 365 days
//!
//! The seller bonus is a share of the unit price, not of the line total.

use chrono::{Duration, Local, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use tracing::debug;

use crate::models::{round_cents, Product, Region, Salesperson, Transaction};

/// Rows in a freshly generated table
pub const DEFAULT_ROW_COUNT: usize = 500;

/// Sale dates fall in `today - (0..DATE_WINDOW_DAYS)`
pub const DATE_WINDOW_DAYS: i64 = 365;

/// Quantity at which the higher bonus rate applies
pub const BULK_QUANTITY: u32 = 5;
pub const BULK_BONUS_RATE: f64 = 0.02;
pub const BASE_BONUS_RATE: f64 = 0.01;

const MAX_QUANTITY: u32 = 9;

/// Half-open base price band `[low, high)` for a product
pub fn base_price_range(product: Product) -> (f64, f64) {
    match product {
        Product::Notebook => (2000.0, 5000.0),
        Product::Monitor => (800.0, 2000.0),
        Product::Mouse | Product::Keyboard => (50.0, 200.0),
        Product::Webcam | Product::Headset => (100.0, 500.0),
    }
}

/// Fractional discount applied to the base price in a region
pub fn regional_discount(region: Region) -> f64 {
    match region {
        Region::North | Region::South => 0.10,
        Region::Center => 0.05,
        Region::East | Region::West => 0.0,
    }
}

/// Seller bonus rate for a line of `quantity` units
pub fn bonus_rate(quantity: u32) -> f64 {
    if quantity >= BULK_QUANTITY {
        BULK_BONUS_RATE
    } else {
        BASE_BONUS_RATE
    }
}

/// Random transaction source. Seed it for reproducible tables.
pub struct SalesGenerator {
    rng: StdRng,
}

impl SalesGenerator {
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn from_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Generate a fresh table of `count` records dated relative to `today`
    pub fn generate(&mut self, count: usize, today: NaiveDate) -> Vec<Transaction> {
        let table: Vec<Transaction> = (0..count).map(|id| self.record(id, today)).collect();
        debug!(rows = table.len(), %today, "generated sales table");
        table
    }

    fn pick<T: Copy>(&mut self, values: &[T]) -> T {
        values[self.rng.gen_range(0..values.len())]
    }

    fn record(&mut self, id: usize, today: NaiveDate) -> Transaction {
        let salesperson = self.pick(Salesperson::ALL);
        let product = self.pick(Product::ALL);
        let region = self.pick(Region::ALL);

        let (low, high) = base_price_range(product);
        let base_price = self.rng.gen_range(low..high);
        let unit_price = round_cents(base_price * (1.0 - regional_discount(region)));

        let quantity = self.rng.gen_range(1..=MAX_QUANTITY);
        let seller_bonus = round_cents(unit_price * bonus_rate(quantity));

        let days_back = self.rng.gen_range(0..DATE_WINDOW_DAYS);

        Transaction {
            id,
            date: today - Duration::days(days_back),
            salesperson,
            product,
            region,
            quantity,
            unit_price,
            total_amount: round_cents(unit_price * quantity as f64),
            seller_bonus,
        }
    }
}

/// Generate `count` records dated relative to the local calendar day
pub fn generate(count: usize) -> Vec<Transaction> {
    SalesGenerator::from_entropy().generate(count, Local::now().date_naive())
}
