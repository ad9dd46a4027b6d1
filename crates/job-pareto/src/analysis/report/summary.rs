use super::super::curve::{build_curve, threshold_at};
use super::super::domain::{AnalysisError, ALPHA_DOMAIN, THRESHOLD_DOMAIN};
use super::super::reference::ReferenceCurve;
use super::super::ConcentrationAnalyzer;
use super::views::{ConcentrationReport, MomentsView, ResolvedParameters};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Caller-supplied knobs for one report. `x_min` falls back to the smallest
/// non-zero count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportParameters {
    pub threshold: f64,
    pub x_min: Option<f64>,
    pub alpha: f64,
    pub knee: f64,
    pub knee_share: f64,
    pub resolution: usize,
}

impl Default for ReportParameters {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD_DOMAIN.default,
            x_min: None,
            alpha: ALPHA_DOMAIN.default,
            knee: ReferenceCurve::DEFAULT_KNEE,
            knee_share: ReferenceCurve::DEFAULT_KNEE_SHARE,
            resolution: ReferenceCurve::DEFAULT_RESOLUTION,
        }
    }
}

pub(crate) fn build_report(
    analyzer: &ConcentrationAnalyzer,
    parameters: &ReportParameters,
) -> Result<ConcentrationReport, AnalysisError> {
    let reference = ReferenceCurve::new(
        parameters.knee,
        parameters.knee_share,
        parameters.resolution,
    )?;

    let series = analyzer.sorted_series();
    let curve = build_curve(&series);
    let threshold = threshold_at(&curve, parameters.threshold)?;

    let x_min = match parameters.x_min {
        Some(x_min) => x_min,
        None => series
            .records()
            .last()
            .map(|record| record.count as f64)
            .ok_or(AnalysisError::EmptyInput)?,
    };
    let qq = analyzer.qq_pairs(x_min, parameters.alpha)?;
    let moments = MomentsView::from(analyzer.moments()?);
    let histogram = analyzer.histogram();

    let resolved = ResolvedParameters {
        threshold: parameters.threshold,
        x_min,
        alpha: parameters.alpha,
        knee: reference.knee(),
        knee_share: reference.knee_share(),
        resolution: reference.resolution(),
    };
    let insights = super::generate_insights(&curve, &threshold, &reference, &moments, &resolved);

    debug!(
        entities = series.len(),
        threshold = parameters.threshold,
        x_min,
        alpha = parameters.alpha,
        "concentration report built"
    );

    Ok(ConcentrationReport {
        generated_at: Utc::now(),
        entities: series.len(),
        total_count: series.total(),
        parameters: resolved,
        curve,
        threshold,
        reference: reference.points().collect(),
        moments,
        qq,
        histogram,
        insights,
    })
}
