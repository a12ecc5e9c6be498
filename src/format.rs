//! Text formatting for dashboard figures

use serde::Serialize;

use crate::aggregate::AggregateResult;

/// Shown in place of a best performer when nothing matched
pub const NO_DATA_LABEL: &str = "N/A";

/// Two decimals with comma thousands separators, e.g. `1,234,567.89`.
/// Non-finite values render as `0.00`.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }

    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, group_thousands(cents / 100), cents % 100)
}

/// Integer with comma thousands separators
pub fn format_count(n: usize) -> String {
    group_thousands(n as u64)
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// The four headline cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub grand_total: String,
    pub record_count: String,
    pub mean_ticket: String,
    pub best_performer: String,
}

impl Summary {
    pub fn from_aggregate(aggregate: &AggregateResult) -> Self {
        Self {
            grand_total: format_currency(aggregate.grand_total),
            record_count: format_count(aggregate.row_count),
            mean_ticket: format_currency(aggregate.mean_total),
            best_performer: aggregate
                .best_performer()
                .salesperson()
                .map(|s| s.name().to_string())
                .unwrap_or_else(|| NO_DATA_LABEL.to_string()),
        }
    }
}
