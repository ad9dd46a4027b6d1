use super::domain::{AnalysisError, CumulativeCurve, CurvePoint, SortedSeries, ThresholdResult};

pub(crate) fn build_curve(series: &SortedSeries) -> CumulativeCurve {
    let total = series.total() as f64;
    let entities = series.len() as f64;
    let mut running: u128 = 0;

    let points = series
        .records()
        .iter()
        .enumerate()
        .map(|(rank, record)| {
            running += u128::from(record.count);
            CurvePoint {
                entity_fraction: (rank + 1) as f64 / entities,
                count_fraction: running as f64 / total,
            }
        })
        .collect();

    CumulativeCurve::from_points(points)
}

/// First curve point whose cumulative share reaches `target_fraction`.
pub fn threshold_at(
    curve: &CumulativeCurve,
    target_fraction: f64,
) -> Result<ThresholdResult, AnalysisError> {
    if !(target_fraction > 0.0 && target_fraction <= 1.0) {
        return Err(AnalysisError::invalid(
            "target_fraction",
            target_fraction,
            "in (0, 1]",
        ));
    }

    let points = curve.points();
    if points.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    // The last point is exactly 1.0, so a valid target always lands in range.
    let idx = points
        .partition_point(|point| point.count_fraction < target_fraction)
        .min(points.len() - 1);
    let hit = points[idx];

    Ok(ThresholdResult {
        entity_fraction: hit.entity_fraction,
        entity_count: idx + 1,
        count_fraction_achieved: hit.count_fraction,
    })
}
