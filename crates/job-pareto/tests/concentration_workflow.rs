use job_pareto::analysis::report::views::ConcentrationLevel;
use job_pareto::analysis::{
    moments, qq_pairs, threshold_at, AnalysisError, ConcentrationAnalyzer, CountRecord,
    ReferenceCurve, ReportParameters,
};
use job_pareto::source::CountSourceImporter;

const TOLERANCE: f64 = 1e-9;

fn four_cities() -> Vec<CountRecord> {
    vec![
        CountRecord::new("A", 50),
        CountRecord::new("B", 30),
        CountRecord::new("C", 15),
        CountRecord::new("D", 5),
    ]
}

fn bundled_dataset() -> Vec<CountRecord> {
    let data = include_bytes!("../data/offers_by_city.csv");
    CountSourceImporter::from_reader(&data[..]).expect("bundled dataset imports")
}

#[test]
fn four_city_example_matches_expected_curve_and_threshold() {
    let analyzer = ConcentrationAnalyzer::new(four_cities()).expect("positive counts");
    let curve = analyzer.build_curve();

    let expected = [(0.25, 0.50), (0.50, 0.80), (0.75, 0.95), (1.0, 1.0)];
    for (point, (entities, share)) in curve.points().iter().zip(expected) {
        assert!((point.entity_fraction - entities).abs() < TOLERANCE);
        assert!((point.count_fraction - share).abs() < TOLERANCE);
    }

    let hit = threshold_at(&curve, 0.8).expect("valid threshold");
    assert!((hit.entity_fraction - 0.5).abs() < TOLERANCE);
    assert_eq!(hit.entity_count, 2);
    assert!((hit.count_fraction_achieved - 0.8).abs() < TOLERANCE);
}

#[test]
fn bundled_dataset_curve_is_monotone_and_ends_at_one() {
    let records = bundled_dataset();
    assert_eq!(records.len(), 31);

    let analyzer = ConcentrationAnalyzer::new(records).expect("positive counts");
    let curve = analyzer.build_curve();
    assert_eq!(curve.len(), 30, "zero-count city is excluded");

    assert!(curve.points().windows(2).all(|pair| {
        pair[1].entity_fraction >= pair[0].entity_fraction
            && pair[1].count_fraction >= pair[0].count_fraction
    }));
    assert!(curve
        .points()
        .iter()
        .all(|point| point.count_fraction > 0.0 && point.count_fraction <= 1.0));

    let last = curve.points().last().expect("non-empty curve");
    assert_eq!(last.entity_fraction, 1.0);
    assert_eq!(last.count_fraction, 1.0);
}

#[test]
fn threshold_mapping_is_monotone_over_slider_range() {
    let analyzer = ConcentrationAnalyzer::new(bundled_dataset()).expect("positive counts");
    let curve = analyzer.build_curve();

    let mut previous = None;
    for step in 40..=100 {
        let target = step as f64 / 100.0;
        let hit = threshold_at(&curve, target).expect("valid threshold");
        if let Some(previous) = previous {
            assert!(hit.entity_fraction >= previous);
        }
        previous = Some(hit.entity_fraction);
    }
}

#[test]
fn curve_is_idempotent_across_input_order() {
    let mut shuffled = four_cities();
    shuffled.reverse();

    let first = ConcentrationAnalyzer::new(four_cities()).expect("positive counts");
    let second = ConcentrationAnalyzer::new(shuffled).expect("positive counts");
    assert_eq!(first.build_curve(), first.build_curve());
    assert_eq!(first.build_curve(), second.build_curve());
}

#[test]
fn degenerate_moments_follow_nan_policy() {
    let stats = moments(&[10, 10, 10, 10]).expect("non-empty input");
    assert_eq!(stats.mean, 10.0);
    assert_eq!(stats.variance, 0.0);
    assert!(stats.skewness.is_nan() && stats.kurtosis.is_nan());
    assert_eq!(stats.shape(), Err(AnalysisError::DegenerateInput));
}

#[test]
fn reference_curve_matches_eighty_twenty_rule() {
    let curve = ReferenceCurve::new(0.2, 0.8, 100).expect("valid parameters");
    assert_eq!(curve.points().count(), 100);
    assert!((curve.count_fraction_at(0.2) - 0.8).abs() < TOLERANCE);
}

#[test]
fn qq_pairs_follow_unit_pareto_quantiles() {
    let pairs = qq_pairs(&[1, 2, 4, 8], 1.0, 1.0).expect("valid parameters");
    assert_eq!(pairs.len(), 4);

    let step = (0.99 - 0.01) / 3.0;
    for (idx, pair) in pairs.iter().enumerate() {
        let probability = if idx == 3 { 0.99 } else { 0.01 + idx as f64 * step };
        assert!((pair.theoretical - 1.0 / (1.0 - probability)).abs() < 1e-6);
        assert_eq!(pair.empirical, f64::from(1u32 << idx));
    }
}

#[test]
fn full_report_on_bundled_dataset() {
    let analyzer = ConcentrationAnalyzer::new(bundled_dataset()).expect("positive counts");
    let report = analyzer
        .report(&ReportParameters::default())
        .expect("report builds");

    assert_eq!(report.entities, 30);
    assert_eq!(report.total_count, 12_795);
    assert_eq!(report.parameters.x_min, 1.0);
    assert_eq!(report.qq.len(), 30);
    assert_eq!(report.reference.len(), 100);
    assert!(report
        .histogram
        .iter()
        .any(|bin| bin.count == 12 && bin.entities == 2 && bin.label.is_none()));
    assert_eq!(report.insights.level, ConcentrationLevel::MoreConcentrated);
    assert!(report.insights.headline.contains("generate 80% of the total"));
    assert!(report.moments.kurtosis.is_some_and(|kurtosis| kurtosis > 3.0));
}
