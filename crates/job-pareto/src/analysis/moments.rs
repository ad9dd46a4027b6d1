use super::domain::{AnalysisError, MomentStats};

/// Population mean, variance, skewness and kurtosis of `counts`.
///
/// Variance divides by `N`. Skewness is the Fisher-Pearson coefficient
/// without bias correction and kurtosis is the plain fourth standardized
/// moment (baseline 3). When every count is identical the variance is 0 and
/// both shape statistics are NaN; see [`MomentStats::shape`].
pub fn moments(counts: &[u64]) -> Result<MomentStats, AnalysisError> {
    if counts.is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    let n = counts.len() as f64;
    let mean = counts.iter().map(|&count| count as f64).sum::<f64>() / n;

    let (m2, m3, m4) = counts.iter().fold((0.0, 0.0, 0.0), |(m2, m3, m4), &count| {
        let diff = count as f64 - mean;
        let sq = diff * diff;
        (m2 + sq, m3 + sq * diff, m4 + sq * sq)
    });
    let (m2, m3, m4) = (m2 / n, m3 / n, m4 / n);

    let (skewness, kurtosis) = if m2 == 0.0 {
        (f64::NAN, f64::NAN)
    } else {
        (m3 / m2.powf(1.5), m4 / (m2 * m2))
    };

    Ok(MomentStats {
        mean,
        variance: m2,
        skewness,
        kurtosis,
    })
}
