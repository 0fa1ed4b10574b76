use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Clap value parser for a criterion score on the 0–100 scale.
pub(crate) fn parse_score(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a number ({err})"))?;
    if (0.0..=100.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("score {value} must be between 0 and 100"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_score_accepts_bounds() {
        assert_eq!(parse_score("0"), Ok(0.0));
        assert_eq!(parse_score(" 100 "), Ok(100.0));
        assert_eq!(parse_score("72.5"), Ok(72.5));
    }

    #[test]
    fn parse_score_rejects_out_of_range_and_garbage() {
        assert!(parse_score("100.01").is_err());
        assert!(parse_score("-1").is_err());
        assert!(parse_score("NaN").is_err());
        assert!(parse_score("high").is_err());
    }
}
