use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Parses a CLI fraction such as `0.8`, also accepting a percentage (`80%`).
pub(crate) fn parse_fraction(raw: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    let (number, scale) = match trimmed.strip_suffix('%') {
        Some(number) => (number.trim(), 100.0),
        None => (trimmed, 1.0),
    };

    number
        .parse::<f64>()
        .map(|value| value / scale)
        .map_err(|err| format!("failed to parse '{raw}' as a fraction ({err})"))
}
