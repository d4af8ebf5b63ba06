//! CSV Data Loader Module
//! Reads a city's trip file with Polars and hands back a filtered [`Dataset`].

use super::dataset::{Dataset, ID};
use super::processor::{DataProcessor, ProcessorError};
use super::selection::{DayFilter, InvalidName, MonthFilter, Selection};
use super::sources::{City, CitySources, UnknownCity};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Broad class of a [`LoadError`], for picking a user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unknown or unconfigured city.
    Configuration,
    /// Unrecognised month or weekday name.
    Validation,
    /// Missing, unreadable or corrupt backing file.
    Io,
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Unknown city `{0}`; expected chicago, new_york or washington")]
    UnknownCity(String),
    #[error("No data file configured for {0}")]
    Unconfigured(City),
    #[error("Invalid month `{0}`; expected a month name or `all`")]
    InvalidMonth(String),
    #[error("Invalid day `{0}`; expected a weekday name or `all`")]
    InvalidDay(String),
    #[error("Failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to load CSV {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
    #[error("{}: missing column `{column}`", path.display())]
    MissingColumn { path: PathBuf, column: &'static str },
    #[error("{}: unparseable start time {value:?} at row {row}", path.display())]
    BadTimestamp {
        path: PathBuf,
        row: usize,
        value: String,
    },
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::UnknownCity(_) | LoadError::Unconfigured(_) => ErrorKind::Configuration,
            LoadError::InvalidMonth(_) | LoadError::InvalidDay(_) => ErrorKind::Validation,
            LoadError::Io { .. }
            | LoadError::Csv { .. }
            | LoadError::MissingColumn { .. }
            | LoadError::BadTimestamp { .. } => ErrorKind::Io,
        }
    }

    fn from_processor(path: &Path, err: ProcessorError) -> Self {
        match err {
            ProcessorError::PolarsError(source) => LoadError::Csv {
                path: path.to_path_buf(),
                source,
            },
            ProcessorError::MissingColumn(column) => LoadError::MissingColumn {
                path: path.to_path_buf(),
                column,
            },
            ProcessorError::BadTimestamp { row, value } => LoadError::BadTimestamp {
                path: path.to_path_buf(),
                row,
                value,
            },
        }
    }
}

/// Loads city datasets from the files named in its [`CitySources`].
///
/// Holds no data between calls; every load reads the file again.
pub struct DataLoader {
    sources: CitySources,
}

impl DataLoader {
    pub fn new(sources: CitySources) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &CitySources {
        &self.sources
    }

    /// Load `city` filtered by `month` and `day`, each a name or `"all"`.
    pub fn load(&self, city: &str, month: &str, day: &str) -> Result<Dataset, LoadError> {
        let city: City = city
            .parse()
            .map_err(|err: UnknownCity| LoadError::UnknownCity(err.0))?;
        let month: MonthFilter = month
            .parse()
            .map_err(|err: InvalidName| LoadError::InvalidMonth(err.0))?;
        let day: DayFilter = day
            .parse()
            .map_err(|err: InvalidName| LoadError::InvalidDay(err.0))?;

        self.load_selection(city, Selection::new(month, day))
    }

    /// Load `city` and keep the rows matching `selection`.
    #[tracing::instrument(skip_all, fields(city = city.key(), month = %selection.month, day = %selection.day))]
    pub fn load_selection(&self, city: City, selection: Selection) -> Result<Dataset, LoadError> {
        let path = self
            .sources
            .path(city)
            .ok_or(LoadError::Unconfigured(city))?;

        let df = Self::read_csv(path)?;
        let total = df.height();

        let df = DataProcessor::derive_time_fields(df)
            .and_then(|df| DataProcessor::apply_selection(df, selection))
            .map_err(|err| LoadError::from_processor(path, err))?;

        info!(rows = df.height(), total, "Loaded trip data");
        Ok(Dataset::new(city, selection, df))
    }

    /// Read a CSV file using Polars.
    fn read_csv(path: &Path) -> Result<DataFrame, LoadError> {
        std::fs::metadata(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "Reading CSV");

        let csv_err = |source| LoadError::Csv {
            path: path.to_path_buf(),
            source,
        };

        // Use lazy evaluation for memory efficiency, then collect
        let mut df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()
            .map_err(csv_err)?
            .collect()
            .map_err(csv_err)?;

        // Exports carry a leading unnamed index column
        let unnamed_index = df
            .get_column_names()
            .first()
            .filter(|name| name.is_empty() || name.starts_with("Unnamed"))
            .map(|name| name.to_string());
        if let Some(name) = unnamed_index {
            df.rename(&name, ID.into()).map_err(csv_err)?;
        }

        Ok(df)
    }
}
