use super::domain::CountRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// How many entities share a given count. Bins holding a single entity
/// carry its name so the chart can label outliers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBin {
    pub count: u64,
    pub entities: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

pub(crate) fn count_histogram(records: &[CountRecord]) -> Vec<HistogramBin> {
    let mut bins: BTreeMap<u64, Vec<&str>> = BTreeMap::new();
    for record in records.iter().filter(|record| record.count > 0) {
        bins.entry(record.count)
            .or_default()
            .push(record.entity_id.as_str());
    }

    bins.into_iter()
        .map(|(count, entities)| HistogramBin {
            count,
            entities: entities.len(),
            label: match entities.as_slice() {
                [only] => Some((*only).to_string()),
                _ => None,
            },
        })
        .collect()
}
