//! Stats module - trip statistics reports

mod calculator;
mod frequency;
mod report;

pub use calculator::{
    BirthYearStats, DurationStats, StationPair, StationStats, StatsCalculator, TimeStats,
    UserStats,
};
pub use frequency::{FrequencyTable, Popular};
pub use report::{Report, StatsError, Timed};
