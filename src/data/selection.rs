//! Month / weekday filter selection.

use chrono::{Month, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Sentinel accepted by both filters to mean "no constraint".
pub const ALL: &str = "all";

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Weekday names in calendar order, Monday first.
pub const WEEKDAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

/// Weekdays in calendar order, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Full English name of a weekday.
pub fn weekday_name(day: Weekday) -> &'static str {
    WEEKDAY_NAMES[day.num_days_from_monday() as usize]
}

/// Name of a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_NAMES.get(idx as usize))
        .copied()
}

/// Calendar position (Monday = 0) of a weekday name.
pub fn weekday_index(name: &str) -> Option<usize> {
    WEEKDAY_NAMES
        .iter()
        .position(|day| day.eq_ignore_ascii_case(name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Month(Month),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Day(Weekday),
}

/// Returned when a month or weekday name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidName(pub String);

impl FromStr for MonthFilter {
    type Err = InvalidName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL) {
            return Ok(MonthFilter::All);
        }
        MONTH_NAMES
            .iter()
            .position(|name| name.eq_ignore_ascii_case(s))
            .map(|idx| MonthFilter::Month(MONTHS[idx]))
            .ok_or_else(|| InvalidName(s.to_string()))
    }
}

impl FromStr for DayFilter {
    type Err = InvalidName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(ALL) {
            return Ok(DayFilter::All);
        }
        weekday_index(s)
            .map(|idx| DayFilter::Day(WEEKDAYS[idx]))
            .ok_or_else(|| InvalidName(s.to_string()))
    }
}

impl MonthFilter {
    pub fn name(self) -> &'static str {
        match self {
            MonthFilter::All => "All",
            MonthFilter::Month(month) => month.name(),
        }
    }
}

impl DayFilter {
    /// Canonical weekday name as stored in the `day_of_week` column.
    pub fn name(self) -> &'static str {
        match self {
            DayFilter::All => "All",
            DayFilter::Day(day) => weekday_name(day),
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for MonthFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl Serialize for DayFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Both optional filters applied by the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Selection {
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Selection {
    pub fn new(month: MonthFilter, day: DayFilter) -> Self {
        Self { month, day }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.month == MonthFilter::All && self.day == DayFilter::All
    }
}
