use super::super::domain::{CumulativeCurve, ThresholdResult};
use super::super::reference::ReferenceCurve;
use super::views::{ConcentrationInsights, ConcentrationLevel, MomentsView, ResolvedParameters};

/// Gap to the reference share below which the curve counts as matching it.
const REFERENCE_TOLERANCE: f64 = 0.05;

/// Kurtosis of a normal distribution.
const NORMAL_KURTOSIS: f64 = 3.0;

pub(crate) fn generate_insights(
    curve: &CumulativeCurve,
    threshold: &ThresholdResult,
    reference: &ReferenceCurve,
    moments: &MomentsView,
    parameters: &ResolvedParameters,
) -> ConcentrationInsights {
    let headline = format!(
        "About {:.2}% of entities ({}) generate {:.0}% of the total",
        threshold.entity_fraction * 100.0,
        threshold.entity_count,
        parameters.threshold * 100.0
    );

    let top_knee_share = curve.share_at(reference.knee());
    let reference_gap = top_knee_share - reference.knee_share();
    let level = if reference_gap > REFERENCE_TOLERANCE {
        ConcentrationLevel::MoreConcentrated
    } else if reference_gap < -REFERENCE_TOLERANCE {
        ConcentrationLevel::MoreEven
    } else {
        ConcentrationLevel::NearReference
    };

    let mut observations = Vec::new();

    if curve.len() == 1 {
        observations.push("Only one entity reported a positive count".to_string());
    }

    observations.push(format!(
        "Top {:.0}% of entities hold {:.1}% of the total versus {:.0}% in the reference model",
        reference.knee() * 100.0,
        top_knee_share * 100.0,
        reference.knee_share() * 100.0
    ));

    let reference_at_threshold = reference.count_fraction_at(threshold.entity_fraction);
    if threshold.count_fraction_achieved > reference_at_threshold + REFERENCE_TOLERANCE {
        observations.push(format!(
            "At the {:.0}% threshold the empirical curve runs above the reference ({:.1}% vs {:.1}%)",
            parameters.threshold * 100.0,
            threshold.count_fraction_achieved * 100.0,
            reference_at_threshold * 100.0
        ));
    } else if threshold.count_fraction_achieved + REFERENCE_TOLERANCE < reference_at_threshold {
        observations.push(format!(
            "At the {:.0}% threshold the empirical curve runs below the reference ({:.1}% vs {:.1}%)",
            parameters.threshold * 100.0,
            threshold.count_fraction_achieved * 100.0,
            reference_at_threshold * 100.0
        ));
    }

    match (moments.skewness, moments.kurtosis) {
        (Some(skewness), Some(kurtosis)) => {
            if skewness > 0.0 {
                observations.push(format!(
                    "Right-skewed (skewness {skewness:.2}): most entities have few offers while a handful have many"
                ));
            } else if skewness < 0.0 {
                observations.push(format!(
                    "Left-skewed (skewness {skewness:.2}): most entities sit above the mean"
                ));
            }

            if kurtosis > NORMAL_KURTOSIS {
                observations.push(format!(
                    "Heavy tails (kurtosis {kurtosis:.2} > 3): extreme counts are more common than under a normal distribution"
                ));
            } else if kurtosis < NORMAL_KURTOSIS {
                observations.push(format!(
                    "Light tails (kurtosis {kurtosis:.2} < 3): the distribution is flatter than a normal one"
                ));
            }
        }
        _ => observations.push(
            "Every entity reports the same count; skewness and kurtosis are undefined".to_string(),
        ),
    }

    ConcentrationInsights {
        headline,
        level,
        level_label: level.label(),
        top_knee_share,
        reference_gap,
        observations,
    }
}
