//! Loaded, derived and filtered trip records for one city.

use super::processor::{DataProcessor, ProcessorError};
use super::selection::{DayFilter, MonthFilter, Selection};
use super::sources::City;
use polars::prelude::*;

pub const ID: &str = "Id";
pub const START_TIME: &str = "Start Time";
pub const END_TIME: &str = "End Time";
pub const TRIP_DURATION: &str = "Trip Duration";
pub const START_STATION: &str = "Start Station";
pub const END_STATION: &str = "End Station";
pub const USER_TYPE: &str = "User Type";
pub const GENDER: &str = "Gender";
pub const BIRTH_YEAR: &str = "Birth Year";

pub const MONTH: &str = "month";
pub const DAY_OF_WEEK: &str = "day_of_week";
pub const HOUR: &str = "hour";

/// Columns the user report depends on.
pub const DEMOGRAPHIC_COLUMNS: [&str; 3] = [USER_TYPE, GENDER, BIRTH_YEAR];

/// Trip records for one city, with derived `month`, `day_of_week` and `hour`
/// columns, restricted to a [`Selection`].
#[derive(Debug, Clone)]
pub struct Dataset {
    city: City,
    selection: Selection,
    frame: DataFrame,
}

impl Dataset {
    pub(crate) fn new(city: City, selection: Selection, frame: DataFrame) -> Self {
        Self {
            city,
            selection,
            frame,
        }
    }

    /// Build an unfiltered dataset from raw trip rows.
    pub fn from_frame(city: City, frame: DataFrame) -> Result<Self, ProcessorError> {
        let frame = DataProcessor::derive_time_fields(frame)?;
        Ok(Self::new(city, Selection::default(), frame))
    }

    pub fn city(&self) -> City {
        self.city
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.get_column_index(name).is_some()
    }

    /// First `rows` trips, all columns.
    pub fn head(&self, rows: usize) -> DataFrame {
        self.frame.head(Some(rows))
    }

    /// Narrow this dataset further. Filters already applied stay in effect;
    /// `All` in `selection` leaves the corresponding constraint untouched.
    pub fn filter(&self, selection: Selection) -> Result<Self, ProcessorError> {
        let frame = DataProcessor::apply_selection(self.frame.clone(), selection)?;
        let merged = Selection {
            month: match selection.month {
                MonthFilter::All => self.selection.month,
                month => month,
            },
            day: match selection.day {
                DayFilter::All => self.selection.day,
                day => day,
            },
        };
        Ok(Self::new(self.city, merged, frame))
    }
}
