//! CSV import of per-entity counts, the offline counterpart of the
//! `GROUP BY city` offer query.

mod normalizer;
mod parser;

use crate::analysis::CountRecord;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug)]
pub enum SourceImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    MissingColumn { expected: &'static [&'static str] },
    MissingEntity { line: u64 },
    InvalidCount { line: u64, value: String },
}

impl std::fmt::Display for SourceImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceImportError::Io(err) => write!(f, "failed to read count export: {}", err),
            SourceImportError::Csv(err) => write!(f, "invalid count CSV data: {}", err),
            SourceImportError::MissingColumn { expected } => write!(
                f,
                "count CSV is missing a column; expected one of: {}",
                expected.join(", ")
            ),
            SourceImportError::MissingEntity { line } => {
                write!(f, "row on line {} has an empty entity name", line)
            }
            SourceImportError::InvalidCount { line, value } => write!(
                f,
                "row on line {} has count '{}', expected a non-negative integer",
                line, value
            ),
        }
    }
}

impl std::error::Error for SourceImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceImportError::Io(err) => Some(err),
            SourceImportError::Csv(err) => Some(err),
            SourceImportError::MissingColumn { .. }
            | SourceImportError::MissingEntity { .. }
            | SourceImportError::InvalidCount { .. } => None,
        }
    }
}

impl From<std::io::Error> for SourceImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for SourceImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct CountSourceImporter;

impl CountSourceImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Vec<CountRecord>, SourceImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Reads one row per entity. Repeated entities are summed and zero
    /// counts are kept; the analyzer drops them.
    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<CountRecord>, SourceImportError> {
        let mut records: Vec<CountRecord> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut zero_rows = 0usize;

        for row in parser::parse_rows(reader)? {
            if row.count == 0 {
                zero_rows += 1;
            }

            match index.get(&row.entity_id).copied() {
                Some(idx) => {
                    warn!(
                        entity = %row.entity_id,
                        line = row.line,
                        "duplicate entity row merged"
                    );
                    let existing = &mut records[idx];
                    existing.count = existing.count.saturating_add(row.count);
                }
                None => {
                    index.insert(row.entity_id.clone(), records.len());
                    records.push(CountRecord::new(row.entity_id, row.count));
                }
            }
        }

        debug!(entities = records.len(), zero_rows, "count export imported");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn reads_generic_entity_count_columns() {
        let csv = "entity_id,count\nWarszawa,5234\nKraków,2101\n";
        let records = CountSourceImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(
            records,
            vec![
                CountRecord::new("Warszawa", 5234),
                CountRecord::new("Kraków", 2101),
            ]
        );
    }

    #[test]
    fn reads_offer_query_export_columns() {
        let csv = "city_id,city_name,liczba_ofert\n1, Gdańsk ,812\n2,Łódź,0\n";
        let records = CountSourceImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(
            records,
            vec![CountRecord::new("Gdańsk", 812), CountRecord::new("Łódź", 0)]
        );
    }

    #[test]
    fn duplicate_entities_are_summed() {
        let csv = "City,Offers\nPoznań,10\nPoznań,5\nOpole,1\n";
        let records = CountSourceImporter::from_reader(Cursor::new(csv)).expect("import succeeds");
        assert_eq!(
            records,
            vec![CountRecord::new("Poznań", 15), CountRecord::new("Opole", 1)]
        );
    }

    #[test]
    fn missing_count_column_is_reported() {
        let csv = "city_name,salary\nPoznań,10\n";
        match CountSourceImporter::from_reader(Cursor::new(csv)) {
            Err(SourceImportError::MissingColumn { expected }) => {
                assert!(expected.contains(&"count"))
            }
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn empty_entity_and_bad_count_carry_line_numbers() {
        let csv = "entity,count\nA,1\n,2\n";
        match CountSourceImporter::from_reader(Cursor::new(csv)) {
            Err(SourceImportError::MissingEntity { line }) => assert_eq!(line, 3),
            other => panic!("expected missing entity, got {other:?}"),
        }

        let csv = "entity,count\nA,-4\n";
        match CountSourceImporter::from_reader(Cursor::new(csv)) {
            Err(SourceImportError::InvalidCount { line, value }) => {
                assert_eq!(line, 2);
                assert_eq!(value, "-4");
            }
            other => panic!("expected invalid count, got {other:?}"),
        }
    }

    #[test]
    fn from_path_propagates_io_errors() {
        match CountSourceImporter::from_path("./does-not-exist.csv") {
            Err(SourceImportError::Io(_)) => {}
            other => panic!("expected io error, got {other:?}"),
        }
    }
}
