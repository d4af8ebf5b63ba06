//! Bikeshare - US Bikeshare Trip Explorer
//!
//! Loads trip records for Chicago, New York City or Washington, filters them
//! by month and weekday, and computes travel-time, station, duration and
//! rider statistics.

pub mod data;
pub mod stats;
pub mod summary;

pub use data::{City, CitySources, DataLoader, Dataset, ErrorKind, LoadError, Selection};
pub use stats::{Report, StatsCalculator, Timed};
pub use summary::Summary;
