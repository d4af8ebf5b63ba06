//! Data module - trip loading, derived fields and filtering

mod dataset;
mod loader;
mod processor;
mod selection;
mod sources;

pub use dataset::*;
pub use loader::{DataLoader, ErrorKind, LoadError};
pub use processor::{parse_timestamp, DataProcessor, ProcessorError};
pub use selection::{
    month_name, weekday_index, weekday_name, DayFilter, InvalidName, MonthFilter, Selection, ALL,
    MONTHS, MONTH_NAMES, WEEKDAYS, WEEKDAY_NAMES,
};
pub use sources::{City, CitySources, UnknownCity};
