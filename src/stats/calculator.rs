//! Statistics Calculator Module
//! Computes the four trip reports: time of travel, stations, trip duration
//! and rider demographics.

use super::frequency::{FrequencyTable, Popular};
use super::report::{timed, Report, StatsError, Timed};
use crate::data::{
    month_name, weekday_index, Dataset, BIRTH_YEAR, DAY_OF_WEEK, DEMOGRAPHIC_COLUMNS,
    END_STATION, GENDER, HOUR, MONTH, START_STATION, TRIP_DURATION, USER_TYPE, WEEKDAY_NAMES,
};
use polars::prelude::*;
use serde::Serialize;
use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Most frequent times of travel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub month: Popular<u32>,
    pub day: Popular<String>,
    pub hour: Popular<u32>,
}

impl TimeStats {
    pub fn month_name(&self) -> &'static str {
        month_name(self.month.value).unwrap_or("Unknown")
    }
}

/// A trip's start and end station, compared start first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct StationPair {
    pub start: String,
    pub end: String,
}

/// Most popular stations and trip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub start: Popular<String>,
    pub end: Popular<String>,
    pub trip: Popular<StationPair>,
}

/// Trip duration totals, in seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub trips: usize,
    pub total: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub shortest: f64,
    pub longest: f64,
}

impl DurationStats {
    /// Summarise durations; `None` when there are none.
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let n = values.len();
        if n == 0 {
            return None;
        }

        let total: f64 = values.iter().sum();
        let mean = total / n as f64;
        let std_dev = if n > 1 {
            Statistics::std_dev(values.iter())
        } else {
            0.0
        };
        let shortest = Statistics::min(values.iter());
        let longest = Statistics::max(values.iter());
        let median = Data::new(values.to_vec()).median();

        Some(Self {
            trips: n,
            total,
            mean,
            median,
            std_dev,
            shortest,
            longest,
        })
    }
}

/// Earliest, latest and most common rider birth year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthYearStats {
    pub earliest: i32,
    pub latest: i32,
    pub most_common: Popular<i32>,
}

/// Rider demographics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<Popular<String>>,
    pub genders: Vec<Popular<String>>,
    /// `None` when every birth year in the selection is missing.
    pub birth_year: Option<BirthYearStats>,
}

/// Computes the trip reports. Every report is independent of the others
/// and reads the dataset without modifying it.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Most frequent month, weekday and hour of travel.
    pub fn time_stats(ds: &Dataset) -> Result<Timed<Report<TimeStats>>, StatsError> {
        timed("time", || {
            if ds.is_empty() {
                return Ok(Report::NoData);
            }

            let months: FrequencyTable<u32> =
                column(ds, MONTH)?.u32()?.into_iter().flatten().collect();
            let hours: FrequencyTable<u32> =
                column(ds, HOUR)?.u32()?.into_iter().flatten().collect();
            // Keyed by calendar position so ties resolve Monday first
            let days: FrequencyTable<usize> = column(ds, DAY_OF_WEEK)?
                .str()?
                .into_iter()
                .flatten()
                .filter_map(weekday_index)
                .collect();

            let (Some(month), Some(day), Some(hour)) =
                (months.most_common(), days.most_common(), hours.most_common())
            else {
                return Ok(Report::NoData);
            };

            Ok(Report::Ready(TimeStats {
                month,
                day: day.map(|idx| WEEKDAY_NAMES[idx].to_string()),
                hour,
            }))
        })
    }

    /// Most popular start station, end station and start/end combination.
    pub fn station_stats(ds: &Dataset) -> Result<Timed<Report<StationStats>>, StatsError> {
        timed("station", || {
            if ds.is_empty() {
                return Ok(Report::NoData);
            }

            let starts = string_values(column(ds, START_STATION)?)?;
            let ends = string_values(column(ds, END_STATION)?)?;

            let start_table: FrequencyTable<&str> = starts.iter().flatten().map(String::as_str).collect();
            let end_table: FrequencyTable<&str> = ends.iter().flatten().map(String::as_str).collect();
            let trip_table: FrequencyTable<(&str, &str)> = starts
                .iter()
                .zip(ends.iter())
                .filter_map(|(start, end)| Some((start.as_deref()?, end.as_deref()?)))
                .collect();

            let (Some(start), Some(end), Some(trip)) = (
                start_table.most_common(),
                end_table.most_common(),
                trip_table.most_common(),
            ) else {
                return Ok(Report::NoData);
            };

            Ok(Report::Ready(StationStats {
                start: start.map(str::to_string),
                end: end.map(str::to_string),
                trip: trip.map(|(start, end)| StationPair {
                    start: start.to_string(),
                    end: end.to_string(),
                }),
            }))
        })
    }

    /// Total and average trip duration.
    pub fn trip_duration_stats(ds: &Dataset) -> Result<Timed<Report<DurationStats>>, StatsError> {
        timed("duration", || {
            let values = f64_values(column(ds, TRIP_DURATION)?)?;
            Ok(DurationStats::from_values(&values).into())
        })
    }

    /// User type and gender counts plus birth year summary.
    ///
    /// Datasets without the demographic columns (Washington) report
    /// [`Report::Unavailable`] rather than failing.
    pub fn user_stats(ds: &Dataset) -> Result<Timed<Report<UserStats>>, StatsError> {
        timed("user", || {
            if !DEMOGRAPHIC_COLUMNS.iter().all(|name| ds.has_column(name)) {
                return Ok(Report::Unavailable);
            }
            if ds.is_empty() {
                return Ok(Report::NoData);
            }

            let user_types = count_table(column(ds, USER_TYPE)?)?;
            let genders = count_table(column(ds, GENDER)?)?;

            let years: Vec<i32> = f64_values(column(ds, BIRTH_YEAR)?)?
                .into_iter()
                .map(|year| year.round() as i32)
                .collect();
            let birth_year = match (years.iter().min(), years.iter().max()) {
                (Some(&earliest), Some(&latest)) => years
                    .iter()
                    .copied()
                    .collect::<FrequencyTable<i32>>()
                    .most_common()
                    .map(|most_common| BirthYearStats {
                        earliest,
                        latest,
                        most_common,
                    }),
                _ => None,
            };

            Ok(Report::Ready(UserStats {
                user_types,
                genders,
                birth_year,
            }))
        })
    }
}

fn column<'a>(ds: &'a Dataset, name: &'static str) -> Result<&'a Column, StatsError> {
    ds.frame()
        .column(name)
        .map_err(|_| StatsError::MissingColumn(name))
}

/// Column values as owned strings, nulls kept in place.
fn string_values(column: &Column) -> Result<Vec<Option<String>>, StatsError> {
    let column = column.cast(&DataType::String)?;
    Ok(column
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Non-null, non-NaN numeric values.
fn f64_values(column: &Column) -> Result<Vec<f64>, StatsError> {
    let column = column.cast(&DataType::Float64)?;
    Ok(column
        .f64()?
        .into_iter()
        .flatten()
        .filter(|value| !value.is_nan())
        .collect())
}

/// Value counts of a categorical column, most frequent first.
fn count_table(column: &Column) -> Result<Vec<Popular<String>>, StatsError> {
    let values = string_values(column)?;
    let table: FrequencyTable<&str> = values.iter().flatten().map(String::as_str).collect();
    Ok(table
        .into_table()
        .into_iter()
        .map(|row| row.map(str::to_string))
        .collect())
}
