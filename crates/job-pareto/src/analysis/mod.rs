//! Pareto concentration analysis of per-entity counts.
//!
//! Everything here is a pure function of its inputs. Callers cache the raw
//! records themselves and re-run the analysis whenever a parameter changes.

mod curve;
pub mod domain;
mod histogram;
mod moments;
mod quantiles;
mod reference;
pub mod report;
pub mod router;
pub mod service;

pub use curve::threshold_at;
pub use domain::{
    x_min_domain, AnalysisError, CountRecord, CumulativeCurve, CurvePoint, MomentStats,
    ParameterDomain, QQPoint, SortedSeries, ThresholdResult, ALPHA_DOMAIN, THRESHOLD_DOMAIN,
};
pub use histogram::HistogramBin;
pub use moments::moments;
pub use quantiles::{pareto_quantile, qq_pairs};
pub use reference::{ReferenceCurve, ReferencePoints};
pub use report::{ConcentrationReport, ReportParameters};
pub use router::concentration_router;
pub use service::{
    ConcentrationService, ConcentrationServiceError, ParameterCatalog, ParameterOverrides,
    ReportRequest,
};

use tracing::debug;

/// Analyzer over one snapshot of count records.
///
/// Zero-count records are dropped on construction; at least one positive
/// count must remain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConcentrationAnalyzer {
    records: Vec<CountRecord>,
}

impl ConcentrationAnalyzer {
    pub fn new<I>(records: I) -> Result<Self, AnalysisError>
    where
        I: IntoIterator<Item = CountRecord>,
    {
        let mut dropped = 0usize;
        let records: Vec<CountRecord> = records
            .into_iter()
            .filter(|record| {
                let keep = record.count > 0;
                if !keep {
                    dropped += 1;
                }
                keep
            })
            .collect();

        if records.is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        debug!(
            entities = records.len(),
            dropped_zero_counts = dropped,
            "concentration analyzer ready"
        );
        Ok(Self { records })
    }

    /// Non-zero records in input order.
    pub fn records(&self) -> &[CountRecord] {
        &self.records
    }

    pub fn counts(&self) -> Vec<u64> {
        self.records.iter().map(|record| record.count).collect()
    }

    pub fn sorted_series(&self) -> SortedSeries {
        SortedSeries::from_records(&self.records)
    }

    pub fn build_curve(&self) -> CumulativeCurve {
        curve::build_curve(&self.sorted_series())
    }

    pub fn threshold(&self, target_fraction: f64) -> Result<ThresholdResult, AnalysisError> {
        let hit = threshold_at(&self.build_curve(), target_fraction)?;
        debug!(
            target_fraction,
            entity_count = hit.entity_count,
            entity_fraction = hit.entity_fraction,
            "threshold reached"
        );
        Ok(hit)
    }

    pub fn moments(&self) -> Result<MomentStats, AnalysisError> {
        moments(&self.counts())
    }

    pub fn qq_pairs(&self, x_min: f64, alpha: f64) -> Result<Vec<QQPoint>, AnalysisError> {
        qq_pairs(&self.counts(), x_min, alpha)
    }

    pub fn histogram(&self) -> Vec<HistogramBin> {
        histogram::count_histogram(&self.records)
    }

    pub fn report(
        &self,
        parameters: &ReportParameters,
    ) -> Result<ConcentrationReport, AnalysisError> {
        report::build_report(self, parameters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records() -> Vec<CountRecord> {
        vec![
            CountRecord::new("A", 50),
            CountRecord::new("B", 30),
            CountRecord::new("Z", 0),
            CountRecord::new("C", 15),
            CountRecord::new("D", 5),
        ]
    }

    #[test]
    fn zero_counts_are_filtered_on_construction() {
        let analyzer = ConcentrationAnalyzer::new(records()).expect("has positive counts");
        assert_eq!(analyzer.records().len(), 4);
        assert_eq!(analyzer.build_curve().len(), 4);
        assert_eq!(analyzer.qq_pairs(1.0, 1.0).expect("valid").len(), 4);
    }

    #[test]
    fn all_zero_input_is_empty() {
        let result = ConcentrationAnalyzer::new(vec![CountRecord::new("Z", 0)]);
        assert_eq!(result, Err(AnalysisError::EmptyInput));
        assert_eq!(
            ConcentrationAnalyzer::new(Vec::<CountRecord>::new()),
            Err(AnalysisError::EmptyInput)
        );
    }

    #[test]
    fn curve_is_idempotent() {
        let analyzer = ConcentrationAnalyzer::new(records()).expect("has positive counts");
        let again = ConcentrationAnalyzer::new(records()).expect("has positive counts");
        assert_eq!(analyzer.build_curve(), analyzer.build_curve());
        assert_eq!(analyzer.build_curve(), again.build_curve());
    }

    #[test]
    fn threshold_uses_sorted_curve() {
        let analyzer = ConcentrationAnalyzer::new(records()).expect("has positive counts");
        let hit = analyzer.threshold(0.8).expect("valid threshold");
        assert_eq!(hit.entity_count, 2);
        assert!((hit.entity_fraction - 0.5).abs() < 1e-12);
    }

    #[test]
    fn moments_ignore_zero_counts() {
        let analyzer = ConcentrationAnalyzer::new(records()).expect("has positive counts");
        let stats = analyzer.moments().expect("non-empty");
        assert!((stats.mean - 25.0).abs() < 1e-12);
    }
}
