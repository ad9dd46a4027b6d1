use super::domain::{AnalysisError, CurvePoint};
use serde::Serialize;

/// Idealised two-segment Pareto curve: the first `knee` share of entities
/// holds `knee_share` of the total, the rest is spread linearly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReferenceCurve {
    knee: f64,
    knee_share: f64,
    resolution: usize,
}

impl ReferenceCurve {
    pub const DEFAULT_KNEE: f64 = 0.2;
    pub const DEFAULT_KNEE_SHARE: f64 = 0.8;
    pub const DEFAULT_RESOLUTION: usize = 100;
    /// Upper bound on sampled points; the whole series is materialized per report.
    pub const MAX_RESOLUTION: usize = 10_000;

    pub fn new(knee: f64, knee_share: f64, resolution: usize) -> Result<Self, AnalysisError> {
        if !(knee > 0.0 && knee < 1.0) {
            return Err(AnalysisError::invalid("knee", knee, "in (0, 1)"));
        }
        if !(knee_share > 0.0 && knee_share < 1.0) {
            return Err(AnalysisError::invalid("knee_share", knee_share, "in (0, 1)"));
        }
        if !(2..=Self::MAX_RESOLUTION).contains(&resolution) {
            return Err(AnalysisError::invalid(
                "resolution",
                resolution as f64,
                "between 2 and 10000",
            ));
        }

        Ok(Self {
            knee,
            knee_share,
            resolution,
        })
    }

    /// The classic 80/20 rule sampled at 100 points.
    pub fn pareto_80_20() -> Self {
        Self {
            knee: Self::DEFAULT_KNEE,
            knee_share: Self::DEFAULT_KNEE_SHARE,
            resolution: Self::DEFAULT_RESOLUTION,
        }
    }

    pub fn knee(&self) -> f64 {
        self.knee
    }

    pub fn knee_share(&self) -> f64 {
        self.knee_share
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn count_fraction_at(&self, entity_fraction: f64) -> f64 {
        if entity_fraction <= self.knee {
            entity_fraction * (self.knee_share / self.knee)
        } else {
            self.knee_share
                + (entity_fraction - self.knee) * ((1.0 - self.knee_share) / (1.0 - self.knee))
        }
    }

    /// Fresh iterator over the sampled points. Each call starts over.
    pub fn points(&self) -> ReferencePoints {
        ReferencePoints {
            curve: *self,
            next: 0,
        }
    }
}

impl Default for ReferenceCurve {
    fn default() -> Self {
        Self::pareto_80_20()
    }
}

impl IntoIterator for &ReferenceCurve {
    type Item = CurvePoint;
    type IntoIter = ReferencePoints;

    fn into_iter(self) -> Self::IntoIter {
        self.points()
    }
}

#[derive(Debug, Clone)]
pub struct ReferencePoints {
    curve: ReferenceCurve,
    next: usize,
}

impl Iterator for ReferencePoints {
    type Item = CurvePoint;

    fn next(&mut self) -> Option<Self::Item> {
        let resolution = self.curve.resolution;
        if self.next >= resolution {
            return None;
        }

        let idx = self.next;
        self.next += 1;
        let entity_fraction = if idx + 1 == resolution {
            1.0
        } else {
            idx as f64 / (resolution - 1) as f64
        };

        Some(CurvePoint {
            entity_fraction,
            count_fraction: self.curve.count_fraction_at(entity_fraction),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.curve.resolution.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ReferencePoints {}

impl std::iter::FusedIterator for ReferencePoints {}
