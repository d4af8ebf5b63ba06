//! Report wrappers shared by every statistic group.

use polars::prelude::PolarsError;
use serde::{Serialize, Serializer};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing column `{0}`")]
    MissingColumn(&'static str),
}

/// Outcome of one statistic group.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "snake_case")]
pub enum Report<T> {
    Ready(T),
    /// Nothing to aggregate after filtering.
    NoData,
    /// The dataset lacks the columns this report needs.
    Unavailable,
}

impl<T> Report<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Report::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Option<T>> for Report<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Report::NoData, Report::Ready)
    }
}

/// A report together with how long it took to compute.
#[derive(Debug, Clone, Serialize)]
pub struct Timed<T> {
    pub report: T,
    #[serde(rename = "elapsed_secs", serialize_with = "as_secs_f64")]
    pub elapsed: Duration,
}

fn as_secs_f64<S: Serializer>(elapsed: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(elapsed.as_secs_f64())
}

/// Run `compute` and record its wall-clock time.
pub(crate) fn timed<T>(
    name: &'static str,
    compute: impl FnOnce() -> Result<Report<T>, StatsError>,
) -> Result<Timed<Report<T>>, StatsError> {
    let start = Instant::now();
    let report = compute()?;
    let elapsed = start.elapsed();

    let status = match &report {
        Report::Ready(_) => "ready",
        Report::NoData => "no_data",
        Report::Unavailable => "unavailable",
    };
    debug!(report = name, status, elapsed_ms = elapsed.as_secs_f64() * 1000.0, "Computed report");

    Ok(Timed { report, elapsed })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_from_option() {
        assert_eq!(Report::from(Some(3)), Report::Ready(3));
        assert_eq!(Report::<u32>::from(None), Report::NoData);
    }

    #[test]
    fn test_timed_passes_report_through() {
        let timed = timed("test", || Ok(Report::Ready("value"))).unwrap();
        assert_eq!(timed.report.ready(), Some(&"value"));
    }

    #[test]
    fn test_timed_propagates_errors() {
        let result: Result<Timed<Report<()>>, _> =
            timed("test", || Err(StatsError::MissingColumn("Start Station")));
        assert!(matches!(result, Err(StatsError::MissingColumn("Start Station"))));
    }

    #[test]
    fn test_serialized_shape() {
        let timed = Timed {
            report: Report::Ready(7u32),
            elapsed: Duration::from_millis(1500),
        };
        let json = serde_json::to_value(&timed).unwrap();
        assert_eq!(json["report"]["status"], "ready");
        assert_eq!(json["report"]["data"], 7);
        assert_eq!(json["elapsed_secs"], 1.5);

        let none: Report<u32> = Report::Unavailable;
        assert_eq!(serde_json::to_value(&none).unwrap()["status"], "unavailable");
    }
}
