//! Frequency counting with a fixed tie-break.
//!
//! When several values share the highest count, the smallest value in the
//! key's natural ordering wins. Tables list values by count, descending,
//! then by value, ascending.

use serde::Serialize;
use std::collections::BTreeMap;

/// A value and how many rows carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Popular<T> {
    pub value: T,
    pub count: usize,
}

impl<T> Popular<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Popular<U> {
        Popular {
            value: f(self.value),
            count: self.count,
        }
    }
}

/// Occurrence counts keyed by value.
#[derive(Debug, Clone)]
pub struct FrequencyTable<K: Ord> {
    counts: BTreeMap<K, usize>,
}

impl<K: Ord> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord> FrequencyTable<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// The most frequent value, `None` if nothing was counted.
    pub fn most_common(self) -> Option<Popular<K>> {
        let mut best: Option<Popular<K>> = None;
        // Ascending key order; only a strictly higher count replaces the leader.
        for (value, count) in self.counts {
            if best.as_ref().map_or(true, |b| count > b.count) {
                best = Some(Popular { value, count });
            }
        }
        best
    }

    /// Every value with its count, most frequent first.
    pub fn into_table(self) -> Vec<Popular<K>> {
        let mut rows: Vec<Popular<K>> = self
            .counts
            .into_iter()
            .map(|(value, count)| Popular { value, count })
            .collect();
        // Stable sort keeps ascending key order among equal counts
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }
}

impl<K: Ord> FromIterator<K> for FrequencyTable<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K: Ord> Extend<K> for FrequencyTable<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.add(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_most_common_picks_highest_count() {
        let table: FrequencyTable<u32> = [6, 1, 6, 3, 6, 1].into_iter().collect();
        assert_eq!(
            table.most_common(),
            Some(Popular { value: 6, count: 3 })
        );
    }

    #[test]
    fn test_tie_goes_to_smallest_value() {
        let table: FrequencyTable<u32> = [17, 8, 17, 8, 23].into_iter().collect();
        assert_eq!(
            table.most_common(),
            Some(Popular { value: 8, count: 2 })
        );

        let table: FrequencyTable<&str> = ["Streeter Dr", "Canal St", "Streeter Dr", "Canal St"]
            .into_iter()
            .collect();
        assert_eq!(
            table.most_common(),
            Some(Popular {
                value: "Canal St",
                count: 2
            })
        );
    }

    #[test]
    fn test_empty_table_has_no_mode() {
        let table: FrequencyTable<String> = FrequencyTable::new();
        assert_eq!(table.most_common(), None);
    }

    #[test]
    fn test_into_table_ordering() {
        let table: FrequencyTable<&str> = ["Subscriber", "Customer", "Subscriber", "Dependent", "Customer", "Subscriber"]
            .into_iter()
            .collect();
        let rows = table.into_table();
        let order: Vec<(&str, usize)> = rows.iter().map(|p| (p.value, p.count)).collect();
        assert_eq!(
            order,
            vec![("Subscriber", 3), ("Customer", 2), ("Dependent", 1)]
        );
    }

    #[test]
    fn test_into_table_ties_sorted_by_value() {
        let table: FrequencyTable<&str> = ["b", "a", "c", "a", "b"].into_iter().collect();
        let values: Vec<&str> = table.into_table().into_iter().map(|p| p.value).collect();
        assert_eq!(values, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_popular_map() {
        let popular = Popular { value: 2u32, count: 9 };
        assert_eq!(
            popular.map(|v| v * 10),
            Popular { value: 20, count: 9 }
        );
    }
}
