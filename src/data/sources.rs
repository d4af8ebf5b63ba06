//! City Sources Module
//! Maps each supported city to the CSV file that backs it.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Cities with a bikeshare dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYork,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYork, City::Washington];

    /// Identifier used on the command line and in logs.
    pub fn key(self) -> &'static str {
        match self {
            City::Chicago => "chicago",
            City::NewYork => "new_york",
            City::Washington => "washington",
        }
    }

    /// Human readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYork => "New York City",
            City::Washington => "Washington",
        }
    }

    /// File name of the city's dataset inside a data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYork => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Returned when a name matches none of [`City::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCity(pub String);

impl FromStr for City {
    type Err = UnknownCity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "chicago" => Ok(City::Chicago),
            "new_york" | "new_york_city" | "nyc" => Ok(City::NewYork),
            "washington" => Ok(City::Washington),
            _ => Err(UnknownCity(s.to_string())),
        }
    }
}

/// Where each city's trip data lives.
///
/// Handed to [`DataLoader`](super::DataLoader) at construction so tests and
/// the CLI can point individual cities at different files.
#[derive(Debug, Clone, Default)]
pub struct CitySources {
    paths: HashMap<City, PathBuf>,
}

impl CitySources {
    /// Empty mapping; every lookup fails until sources are added.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default file names for all three cities, resolved against `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let paths = City::ALL
            .iter()
            .map(|&city| (city, dir.join(city.default_file_name())))
            .collect();
        Self { paths }
    }

    /// Point `city` at `path`, replacing any previous entry.
    pub fn with_source(mut self, city: City, path: impl Into<PathBuf>) -> Self {
        self.paths.insert(city, path.into());
        self
    }

    pub fn path(&self, city: City) -> Option<&Path> {
        self.paths.get(&city).map(PathBuf::as_path)
    }
}
