use job_pareto::analysis::{ConcentrationAnalyzer, CountRecord};
use job_pareto::source::{CountSourceImporter, SourceImportError};
use std::io::Cursor;

#[test]
fn bundled_export_keeps_file_order_and_polish_names() {
    let data = include_bytes!("../data/offers_by_city.csv");
    let records = CountSourceImporter::from_reader(&data[..]).expect("bundled dataset imports");

    assert_eq!(records.first(), Some(&CountRecord::new("Warszawa", 5234)));
    assert_eq!(records.last(), Some(&CountRecord::new("Suwałki", 0)));
    assert!(records
        .iter()
        .any(|record| record.entity_id == "Bielsko-Biała" && record.count == 33));
}

#[test]
fn bundled_export_sorts_descending_with_name_tie_break() {
    let data = include_bytes!("../data/offers_by_city.csv");
    let records = CountSourceImporter::from_reader(&data[..]).expect("bundled dataset imports");
    let analyzer = ConcentrationAnalyzer::new(records).expect("positive counts");
    let series = analyzer.sorted_series();

    assert!(series
        .records()
        .windows(2)
        .all(|pair| pair[0].count >= pair[1].count));

    let tied: Vec<&str> = series
        .records()
        .iter()
        .filter(|record| record.count == 12)
        .map(|record| record.entity_id.as_str())
        .collect();
    assert_eq!(tied, vec!["Radom", "Sopot"]);
}

#[test]
fn byte_order_mark_and_spacing_are_normalized() {
    let csv = "\u{feff}City Name,Offers\n  Zielona   Góra , 19\nOpole,21\n";
    let records = CountSourceImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
    assert_eq!(
        records,
        vec![
            CountRecord::new("Zielona Góra", 19),
            CountRecord::new("Opole", 21),
        ]
    );
}

#[test]
fn export_with_only_zero_counts_is_rejected_by_analyzer() {
    let csv = "city,offers\nSuwałki,0\nZamość,0\n";
    let records = CountSourceImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
    assert_eq!(records.len(), 2);
    assert!(ConcentrationAnalyzer::new(records).is_err());
}

#[test]
fn non_numeric_count_is_reported_with_value() {
    let csv = "city,offers\nKraków,many\n";
    let err = CountSourceImporter::from_reader(Cursor::new(csv)).expect_err("count must parse");
    assert!(matches!(err, SourceImportError::InvalidCount { line: 2, .. }));
    assert!(err.to_string().contains("'many'"));
}
