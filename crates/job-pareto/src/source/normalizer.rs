pub(crate) fn normalize_entity(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Header comparison key: lowercase with spaces and dashes folded to `_`.
pub(crate) fn normalize_header(value: &str) -> String {
    normalize_entity(value)
        .to_lowercase()
        .replace([' ', '-'], "_")
}
