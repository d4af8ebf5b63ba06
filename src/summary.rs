//! All four reports for one dataset, with a plain-text rendering.

use crate::data::{City, Dataset, Selection};
use crate::stats::{
    DurationStats, Popular, Report, StationStats, StatsCalculator, StatsError, TimeStats, Timed,
    UserStats,
};
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Results of every report over one filtered dataset.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub city: City,
    pub selection: Selection,
    pub rows: usize,
    pub time: Timed<Report<TimeStats>>,
    pub stations: Timed<Report<StationStats>>,
    pub duration: Timed<Report<DurationStats>>,
    pub users: Timed<Report<UserStats>>,
}

impl Summary {
    pub fn compute(ds: &Dataset) -> Result<Self, StatsError> {
        Ok(Self {
            city: ds.city(),
            selection: ds.selection(),
            rows: ds.len(),
            time: StatsCalculator::time_stats(ds)?,
            stations: StatsCalculator::station_stats(ds)?,
            duration: StatsCalculator::trip_duration_stats(ds)?,
            users: StatsCalculator::user_stats(ds)?,
        })
    }
}

const NO_DATA: &str = "No data for this selection";
const UNAVAILABLE: &str = "Data isn't available for this part";

fn write_section<T>(
    f: &mut Formatter<'_>,
    title: &str,
    timed: &Timed<Report<T>>,
    body: impl FnOnce(&mut Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "{title}")?;
    writeln!(f, "{}", "-".repeat(title.len()))?;
    match &timed.report {
        Report::Ready(value) => body(f, value)?,
        Report::NoData => writeln!(f, "  {NO_DATA}")?,
        Report::Unavailable => writeln!(f, "  {UNAVAILABLE}")?,
    }
    writeln!(f, "  That took: {:.6}s", timed.elapsed.as_secs_f64())
}

fn write_popular<T: Display>(
    f: &mut Formatter<'_>,
    heading: &str,
    label: &str,
    popular: &Popular<T>,
) -> fmt::Result {
    writeln!(f, "  {heading}")?;
    writeln!(f, "    {label}: {}", popular.value)?;
    writeln!(f, "    Count: {}", popular.count)
}

fn write_counts(f: &mut Formatter<'_>, heading: &str, rows: &[Popular<String>]) -> fmt::Result {
    writeln!(f, "  {heading}")?;
    if rows.is_empty() {
        return writeln!(f, "    (none)");
    }
    for row in rows {
        writeln!(f, "    {}: {}", row.value, row.count)?;
    }
    Ok(())
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} (month: {}, day: {}): {} trips",
            self.city, self.selection.month, self.selection.day, self.rows
        )?;

        write_section(f, "Statistics on Times of Travel", &self.time, |f, time| {
            write_popular(
                f,
                "Most popular month",
                "Month",
                &Popular {
                    value: time.month_name(),
                    count: time.month.count,
                },
            )?;
            write_popular(f, "Most popular day of week", "Day", &time.day)?;
            write_popular(f, "Most popular hour", "Hour", &time.hour)
        })?;

        write_section(f, "Statistics on Stations and Trip", &self.stations, |f, st| {
            write_popular(f, "Most popular start station", "Start Station", &st.start)?;
            write_popular(f, "Most popular end station", "End Station", &st.end)?;
            writeln!(f, "  Most popular combination")?;
            writeln!(
                f,
                "    Start Station, End Station: {}, {}",
                st.trip.value.start, st.trip.value.end
            )?;
            writeln!(f, "    Count: {}", st.trip.count)
        })?;

        write_section(f, "Statistics on Trip Duration", &self.duration, |f, d| {
            writeln!(f, "  Trips: {}", d.trips)?;
            writeln!(f, "  Total travel time: {:.2}s", d.total)?;
            writeln!(f, "  Average travel time: {:.2}s", d.mean)?;
            writeln!(f, "  Median travel time: {:.2}s", d.median)?;
            writeln!(f, "  Standard deviation: {:.2}s", d.std_dev)?;
            writeln!(f, "  Shortest trip: {:.2}s", d.shortest)?;
            writeln!(f, "  Longest trip: {:.2}s", d.longest)
        })?;

        write_section(f, "Statistics on Bikeshare Users", &self.users, |f, users| {
            write_counts(f, "Counts of user types", &users.user_types)?;
            write_counts(f, "Counts of gender", &users.genders)?;
            match &users.birth_year {
                Some(year) => {
                    writeln!(f, "  Earliest year of birth: {}", year.earliest)?;
                    writeln!(f, "  Most recent year of birth: {}", year.latest)?;
                    writeln!(
                        f,
                        "  Most common year of birth: {} ({} riders)",
                        year.most_common.value, year.most_common.count
                    )
                }
                None => writeln!(f, "  Birth year: {NO_DATA}"),
            }
        })
    }
}
