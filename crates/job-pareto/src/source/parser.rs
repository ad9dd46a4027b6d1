use super::normalizer::{normalize_entity, normalize_header};
use super::SourceImportError;
use std::io::Read;

pub(crate) const ENTITY_COLUMNS: [&str; 4] = ["entity_id", "entity", "city_name", "city"];
pub(crate) const COUNT_COLUMNS: [&str; 3] = ["count", "offers", "liczba_ofert"];

#[derive(Debug)]
pub(crate) struct CountRow {
    pub(crate) line: u64,
    pub(crate) entity_id: String,
    pub(crate) count: u64,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<CountRow>, SourceImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    let entity_idx = find_column(&headers, &ENTITY_COLUMNS)
        .ok_or(SourceImportError::MissingColumn { expected: &ENTITY_COLUMNS })?;
    let count_idx = find_column(&headers, &COUNT_COLUMNS)
        .ok_or(SourceImportError::MissingColumn { expected: &COUNT_COLUMNS })?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|pos| pos.line()).unwrap_or_default();

        let entity_id = normalize_entity(record.get(entity_idx).unwrap_or_default());
        if entity_id.is_empty() {
            return Err(SourceImportError::MissingEntity { line });
        }

        let raw_count = record.get(count_idx).unwrap_or_default();
        let count = raw_count
            .parse::<u64>()
            .map_err(|_| SourceImportError::InvalidCount {
                line,
                value: raw_count.to_string(),
            })?;

        rows.push(CountRow {
            line,
            entity_id,
            count,
        });
    }

    Ok(rows)
}

/// First header matching a candidate, in candidate priority order.
fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|candidate| headers.iter().position(|header| header == candidate))
}
