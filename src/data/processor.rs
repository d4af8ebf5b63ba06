//! Data Processor Module
//! Derives time-of-travel fields and applies month/day filters.

use super::dataset::{DAY_OF_WEEK, HOUR, MONTH, START_TIME};
use super::selection::{weekday_name, DayFilter, MonthFilter, Selection};
use chrono::{Datelike, NaiveDateTime, Timelike};
use polars::prelude::*;
use thiserror::Error;

/// Start-time layouts found in the city exports.
const TIMESTAMP_FORMATS: [&str; 5] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing column `{0}`")]
    MissingColumn(&'static str),
    #[error("Unparseable start time {value:?} at row {row}")]
    BadTimestamp { row: usize, value: String },
}

/// Parse a start timestamp in any of the supported layouts.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

/// Handles derived-field computation and row filtering.
pub struct DataProcessor;

impl DataProcessor {
    /// Add `month`, `day_of_week` and `hour` columns computed from `Start Time`.
    pub fn derive_time_fields(mut df: DataFrame) -> Result<DataFrame, ProcessorError> {
        let start = df
            .column(START_TIME)
            .map_err(|_| ProcessorError::MissingColumn(START_TIME))?
            .cast(&DataType::String)?;
        let start_ca = start.str()?;

        let mut months: Vec<u32> = Vec::with_capacity(df.height());
        let mut days: Vec<&str> = Vec::with_capacity(df.height());
        let mut hours: Vec<u32> = Vec::with_capacity(df.height());

        for (row, value) in start_ca.into_iter().enumerate() {
            let raw = value.unwrap_or_default();
            let ts = parse_timestamp(raw).ok_or_else(|| ProcessorError::BadTimestamp {
                row,
                value: raw.to_string(),
            })?;
            months.push(ts.month());
            days.push(weekday_name(ts.weekday()));
            hours.push(ts.hour());
        }

        df.with_column(Column::new(MONTH.into(), months))?;
        df.with_column(Column::new(DAY_OF_WEEK.into(), days))?;
        df.with_column(Column::new(HOUR.into(), hours))?;

        Ok(df)
    }

    /// Keep only rows matching `selection`, preserving row order.
    pub fn apply_selection(
        df: DataFrame,
        selection: Selection,
    ) -> Result<DataFrame, ProcessorError> {
        if selection.is_unfiltered() {
            return Ok(df);
        }

        let mut lazy = df.lazy();
        if let MonthFilter::Month(month) = selection.month {
            lazy = lazy.filter(col(MONTH).eq(lit(month.number_from_month())));
        }
        if let DayFilter::Day(_) = selection.day {
            lazy = lazy.filter(col(DAY_OF_WEEK).eq(lit(selection.day.name())));
        }

        Ok(lazy.collect()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Month, Weekday};

    fn trips() -> DataFrame {
        df!(
            START_TIME => &[
                "2017-01-02 09:07:57", // Monday
                "2017-06-05 17:30:00", // Monday
                "2017-06-10 08:00:00", // Saturday
                "2017-03-04 23:59:59", // Saturday
            ],
            "Trip Duration" => &[100.0, 200.0, 300.0, 400.0],
        )
        .unwrap()
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let ts = parse_timestamp("2017-06-23 15:09:32").unwrap();
        assert_eq!((ts.month(), ts.hour()), (6, 15));

        let ts = parse_timestamp("2017-06-23 15:09:32.000").unwrap();
        assert_eq!(ts.minute(), 9);

        let ts = parse_timestamp("2017-06-23T07:00:00").unwrap();
        assert_eq!(ts.hour(), 7);

        let ts = parse_timestamp("6/23/2017 15:09").unwrap();
        assert_eq!((ts.day(), ts.hour()), (23, 15));

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_derive_time_fields() {
        let df = DataProcessor::derive_time_fields(trips()).unwrap();

        let months: Vec<Option<u32>> = df.column(MONTH).unwrap().u32().unwrap().into_iter().collect();
        assert_eq!(months, vec![Some(1), Some(6), Some(6), Some(3)]);

        let days: Vec<Option<&str>> = df
            .column(DAY_OF_WEEK)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(
            days,
            vec![Some("Monday"), Some("Monday"), Some("Saturday"), Some("Saturday")]
        );

        let hours: Vec<Option<u32>> = df.column(HOUR).unwrap().u32().unwrap().into_iter().collect();
        assert_eq!(hours, vec![Some(9), Some(17), Some(8), Some(23)]);
    }

    #[test]
    fn test_derive_requires_start_time() {
        let df = df!("Trip Duration" => &[1.0]).unwrap();
        let err = DataProcessor::derive_time_fields(df).unwrap_err();
        assert!(matches!(err, ProcessorError::MissingColumn(START_TIME)));
    }

    #[test]
    fn test_derive_rejects_bad_timestamp() {
        let df = df!(START_TIME => &["2017-01-02 09:07:57", "not a time"]).unwrap();
        match DataProcessor::derive_time_fields(df) {
            Err(ProcessorError::BadTimestamp { row, value }) => {
                assert_eq!(row, 1);
                assert_eq!(value, "not a time");
            }
            other => panic!("expected bad timestamp, got {:?}", other.map(|df| df.height())),
        }
    }

    #[test]
    fn test_apply_selection_month_and_day() {
        let df = DataProcessor::derive_time_fields(trips()).unwrap();

        let june = Selection::new(MonthFilter::Month(Month::June), DayFilter::All);
        assert_eq!(DataProcessor::apply_selection(df.clone(), june).unwrap().height(), 2);

        let saturday = Selection::new(MonthFilter::All, DayFilter::Day(Weekday::Sat));
        assert_eq!(
            DataProcessor::apply_selection(df.clone(), saturday).unwrap().height(),
            2
        );

        let june_saturday = Selection::new(MonthFilter::Month(Month::June), DayFilter::Day(Weekday::Sat));
        let filtered = DataProcessor::apply_selection(df.clone(), june_saturday).unwrap();
        assert_eq!(filtered.height(), 1);
        let duration = filtered.column("Trip Duration").unwrap().f64().unwrap().get(0);
        assert_eq!(duration, Some(300.0));

        let unfiltered = DataProcessor::apply_selection(df, Selection::default()).unwrap();
        assert_eq!(unfiltered.height(), 4);
    }

    #[test]
    fn test_apply_selection_preserves_order() {
        let df = DataProcessor::derive_time_fields(trips()).unwrap();
        let monday = Selection::new(MonthFilter::All, DayFilter::Day(Weekday::Mon));
        let filtered = DataProcessor::apply_selection(df, monday).unwrap();
        let durations: Vec<Option<f64>> = filtered
            .column("Trip Duration")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(durations, vec![Some(100.0), Some(200.0)]);
    }
}
