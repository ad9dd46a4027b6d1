use super::super::domain::{CumulativeCurve, CurvePoint, MomentStats, QQPoint, ThresholdResult};
use super::super::histogram::HistogramBin;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Parameters after defaults were applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedParameters {
    pub threshold: f64,
    pub x_min: f64,
    pub alpha: f64,
    pub knee: f64,
    pub knee_share: f64,
    pub resolution: usize,
}

/// Moments as exposed to renderers. Undefined shape statistics serialize as
/// `null` instead of NaN.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MomentsView {
    pub mean: f64,
    pub variance: f64,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub degenerate: bool,
}

impl From<MomentStats> for MomentsView {
    fn from(stats: MomentStats) -> Self {
        let shape = stats.shape().ok();
        Self {
            mean: stats.mean,
            variance: stats.variance,
            skewness: shape.map(|(skewness, _)| skewness),
            kurtosis: shape.map(|(_, kurtosis)| kurtosis),
            degenerate: shape.is_none(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcentrationLevel {
    MoreConcentrated,
    NearReference,
    MoreEven,
}

impl ConcentrationLevel {
    pub const fn label(self) -> &'static str {
        match self {
            Self::MoreConcentrated => "More concentrated than the reference",
            Self::NearReference => "Close to the reference",
            Self::MoreEven => "More evenly spread than the reference",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConcentrationInsights {
    pub headline: String,
    pub level: ConcentrationLevel,
    pub level_label: &'static str,
    /// Share of the total held by the top `knee` fraction of entities.
    pub top_knee_share: f64,
    /// `top_knee_share` minus the reference `knee_share`.
    pub reference_gap: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConcentrationReport {
    pub generated_at: DateTime<Utc>,
    pub entities: usize,
    pub total_count: u128,
    pub parameters: ResolvedParameters,
    pub curve: CumulativeCurve,
    pub threshold: ThresholdResult,
    pub reference: Vec<CurvePoint>,
    pub moments: MomentsView,
    pub qq: Vec<QQPoint>,
    pub histogram: Vec<HistogramBin>,
    pub insights: ConcentrationInsights,
}
