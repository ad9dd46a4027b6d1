use super::domain::{AnalysisError, QQPoint};

const LOWER_PROBABILITY: f64 = 0.01;
const UPPER_PROBABILITY: f64 = 0.99;

/// Quantile function of Pareto(`x_min`, `alpha`).
pub fn pareto_quantile(probability: f64, x_min: f64, alpha: f64) -> f64 {
    x_min / (1.0 - probability).powf(1.0 / alpha)
}

/// `len` evenly spaced probabilities from 0.01 to 0.99 inclusive.
pub(crate) fn probability_grid(len: usize) -> impl Iterator<Item = f64> {
    let step = if len > 1 {
        (UPPER_PROBABILITY - LOWER_PROBABILITY) / (len - 1) as f64
    } else {
        0.0
    };

    (0..len).map(move |idx| {
        if len > 1 && idx + 1 == len {
            UPPER_PROBABILITY
        } else {
            LOWER_PROBABILITY + idx as f64 * step
        }
    })
}

/// Pairs sorted empirical counts with Pareto(`x_min`, `alpha`) quantiles.
pub fn qq_pairs(counts: &[u64], x_min: f64, alpha: f64) -> Result<Vec<QQPoint>, AnalysisError> {
    if !(x_min.is_finite() && x_min > 0.0) {
        return Err(AnalysisError::invalid("x_min", x_min, "a finite value > 0"));
    }
    if !(alpha.is_finite() && alpha > 0.0) {
        return Err(AnalysisError::invalid("alpha", alpha, "a finite value > 0"));
    }
    if counts.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let mut empirical = counts.to_vec();
    empirical.sort_unstable();

    Ok(probability_grid(empirical.len())
        .zip(empirical)
        .map(|(probability, count)| QQPoint {
            theoretical: pareto_quantile(probability, x_min, alpha),
            empirical: count as f64,
        })
        .collect())
}
