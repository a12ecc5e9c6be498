//! Performance report assembled from aggregates and a classifier

use serde::Serialize;

use crate::aggregate::AggregateResult;
use crate::classify::{Classifier, PerformanceTier};
use crate::models::{Region, Salesperson};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalespersonLine {
    pub salesperson: Salesperson,
    pub total: f64,
    pub count: usize,
    pub bonus_total: f64,
    pub tier: PerformanceTier,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionLine {
    pub region: Region,
    pub total: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub salespeople: Vec<SalespersonLine>,
    pub regions: Vec<RegionLine>,
    pub grand_total: f64,
    pub mean_total: f64,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.salespeople.is_empty() && self.regions.is_empty()
    }

    /// Number of salespeople in each tier, best tier first
    pub fn tier_counts(&self) -> Vec<(PerformanceTier, usize)> {
        PerformanceTier::ALL
            .iter()
            .map(|&tier| {
                let n = self.salespeople.iter().filter(|s| s.tier == tier).count();
                (tier, n)
            })
            .collect()
    }
}

/// Attach a tier to every salesperson group and copy the region and global figures
pub fn assemble<C: Classifier + ?Sized>(aggregate: &AggregateResult, classifier: &C) -> Report {
    Report {
        salespeople: aggregate
            .by_salesperson
            .iter()
            .map(|s| SalespersonLine {
                salesperson: s.salesperson,
                total: s.total,
                count: s.count,
                bonus_total: s.bonus_total,
                tier: classifier.classify(s.total),
            })
            .collect(),
        regions: aggregate
            .by_region
            .iter()
            .map(|r| RegionLine {
                region: r.region,
                total: r.total,
                count: r.count,
            })
            .collect(),
        grand_total: aggregate.grand_total,
        mean_total: aggregate.mean_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::classify::ThresholdClassifier;
    use crate::generator::SalesGenerator;
    use crate::models::{Product, Transaction};
    use chrono::NaiveDate;

    fn sale(id: usize, salesperson: Salesperson, total: f64) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            salesperson,
            product: Product::Monitor,
            region: Region::West,
            quantity: 1,
            unit_price: total,
            total_amount: total,
            seller_bonus: total * 0.01,
        }
    }

    #[test]
    fn test_tiers_follow_totals() {
        let rows = vec![
            sale(0, Salesperson::AnaSilva, 60_000.0),
            sale(1, Salesperson::CarlaSouza, 35_000.0),
            sale(2, Salesperson::JoaoSantos, 15_000.0),
            sale(3, Salesperson::MariaCosta, 1_000.0),
        ];
        let report = assemble(&aggregate(&rows), &ThresholdClassifier::default());

        let tiers: Vec<PerformanceTier> = report.salespeople.iter().map(|s| s.tier).collect();
        assert_eq!(
            tiers,
            vec![
                PerformanceTier::Excellent,
                PerformanceTier::Good,
                PerformanceTier::Regular,
                PerformanceTier::Low
            ]
        );
        assert_eq!(report.regions.len(), 1);
        assert_eq!(report.regions[0].count, 4);
        assert_eq!(report.grand_total, 111_000.0);
        assert_eq!(report.mean_total, 27_750.0);
        assert_eq!(
            report.tier_counts(),
            vec![
                (PerformanceTier::Excellent, 1),
                (PerformanceTier::Good, 1),
                (PerformanceTier::Regular, 1),
                (PerformanceTier::Low, 1)
            ]
        );
    }

    #[test]
    fn test_every_salesperson_classified() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let rows = SalesGenerator::seeded(5).generate(500, today);
        let agg = aggregate(&rows);
        let classifier = ThresholdClassifier::default();
        let report = assemble(&agg, &classifier);

        assert_eq!(report.salespeople.len(), agg.by_salesperson.len());
        for (line, totals) in report.salespeople.iter().zip(&agg.by_salesperson) {
            assert_eq!(line.salesperson, totals.salesperson);
            assert_eq!(line.tier, classifier.classify(totals.total));
        }
    }

    #[test]
    fn test_dyn_classifier() {
        let classifier: Box<dyn Classifier> = Box::new(ThresholdClassifier::default());
        let report = assemble(&aggregate(&[sale(0, Salesperson::AnaSilva, 20.0)]), classifier.as_ref());
        assert_eq!(report.salespeople[0].tier, PerformanceTier::Low);
    }

    #[test]
    fn test_empty_report() {
        let report = assemble(&aggregate(&[]), &ThresholdClassifier::default());
        assert!(report.is_empty());
        assert_eq!(report.grand_total, 0.0);
        assert_eq!(report.mean_total, 0.0);
        assert!(report.tier_counts().iter().all(|(_, n)| *n == 0));
    }
}
