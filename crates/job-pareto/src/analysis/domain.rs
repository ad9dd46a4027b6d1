use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of job offers attributed to a single entity (usually a city).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountRecord {
    pub entity_id: String,
    pub count: u64,
}

impl CountRecord {
    pub fn new(entity_id: impl Into<String>, count: u64) -> Self {
        Self {
            entity_id: entity_id.into(),
            count,
        }
    }
}

/// Non-zero records ordered by count descending, ties by `entity_id` ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortedSeries {
    records: Vec<CountRecord>,
    total: u128,
}

impl SortedSeries {
    pub(crate) fn from_records(records: &[CountRecord]) -> Self {
        let mut records: Vec<CountRecord> = records
            .iter()
            .filter(|record| record.count > 0)
            .cloned()
            .collect();
        records.sort_by(|left, right| {
            right
                .count
                .cmp(&left.count)
                .then_with(|| left.entity_id.cmp(&right.entity_id))
        });
        let total = records.iter().map(|record| u128::from(record.count)).sum();
        Self { records, total }
    }

    pub fn records(&self) -> &[CountRecord] {
        &self.records
    }

    pub fn total(&self) -> u128 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub entity_fraction: f64,
    pub count_fraction: f64,
}

/// Cumulative share of the total count held by the top-ranked entities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CumulativeCurve {
    points: Vec<CurvePoint>,
}

impl CumulativeCurve {
    pub(crate) fn from_points(points: Vec<CurvePoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Cumulative share at `entity_fraction`, reading the curve as a polyline
    /// that starts at the origin.
    pub fn share_at(&self, entity_fraction: f64) -> f64 {
        if entity_fraction <= 0.0 || self.points.is_empty() {
            return 0.0;
        }

        let idx = self
            .points
            .partition_point(|point| point.entity_fraction < entity_fraction);
        let Some(next) = self.points.get(idx) else {
            return 1.0;
        };
        if next.entity_fraction == entity_fraction {
            return next.count_fraction;
        }

        let (x0, y0) = match idx.checked_sub(1).map(|prev| self.points[prev]) {
            Some(prev) => (prev.entity_fraction, prev.count_fraction),
            None => (0.0, 0.0),
        };
        let span = next.entity_fraction - x0;
        y0 + (next.count_fraction - y0) * (entity_fraction - x0) / span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ThresholdResult {
    pub entity_fraction: f64,
    pub entity_count: usize,
    pub count_fraction_achieved: f64,
}

/// Population moments. `kurtosis` is not excess kurtosis: a normal
/// distribution scores 3.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentStats {
    pub mean: f64,
    pub variance: f64,
    pub skewness: f64,
    pub kurtosis: f64,
}

impl MomentStats {
    pub fn is_degenerate(&self) -> bool {
        self.variance == 0.0
    }

    /// Returns `(skewness, kurtosis)` or `DegenerateInput` when every count
    /// was identical.
    pub fn shape(&self) -> Result<(f64, f64), AnalysisError> {
        if self.is_degenerate() || self.skewness.is_nan() || self.kurtosis.is_nan() {
            return Err(AnalysisError::DegenerateInput);
        }
        Ok((self.skewness, self.kurtosis))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QQPoint {
    pub theoretical: f64,
    pub empirical: f64,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    #[error("{name} must be {expected} (got {value})")]
    InvalidArgument {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
    #[error("no entities with a positive count to analyze")]
    EmptyInput,
    #[error("all counts are identical; skewness and kurtosis are undefined")]
    DegenerateInput,
}

impl AnalysisError {
    pub(crate) fn invalid(name: &'static str, value: f64, expected: &'static str) -> Self {
        Self::InvalidArgument {
            name,
            value,
            expected,
        }
    }
}

/// Inclusive domain of a user-adjustable parameter in the reference UI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterDomain {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ParameterDomain {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl fmt::Display for ParameterDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}] step {}", self.min, self.max, self.step)
    }
}

pub const THRESHOLD_DOMAIN: ParameterDomain = ParameterDomain {
    min: 0.4,
    max: 1.0,
    step: 0.01,
    default: 0.8,
};

pub const ALPHA_DOMAIN: ParameterDomain = ParameterDomain {
    min: 0.1,
    max: 3.0,
    step: 0.1,
    default: 0.7,
};

/// The `x_min` slider runs from 1 to the largest count and starts at the
/// smallest count.
pub fn x_min_domain(series: &SortedSeries) -> Option<ParameterDomain> {
    let max = series.records().first()?.count as f64;
    let min = series.records().last()?.count as f64;
    Some(ParameterDomain {
        min: 1.0,
        max: max.max(1.0),
        step: 1.0,
        default: min,
    })
}
