//! Cross-source priority merging.

use std::collections::BTreeMap;

use crate::observations::ObservationSet;

/// Reduce one table's observations to the value at each person's most
/// recent observation year. Used for time-varying attributes, where the
/// latest report within a table is the representative one.
///
/// Rows were already filtered to informative values, so an earlier
/// remapped-to-missing observation never wins over a later real one. Ties
/// on year prefer the smallest value.
pub fn last_available(observations: &ObservationSet) -> BTreeMap<i64, i64> {
    let mut result = BTreeMap::new();
    for (&person, rows) in &observations.by_person {
        let mut best: Option<(i64, i64)> = None;
        for observation in rows {
            let year = observation.year.unwrap_or(i64::MIN);
            let better = match best {
                None => true,
                Some((best_year, best_value)) => {
                    year > best_year || (year == best_year && observation.value < best_value)
                }
            };
            if better {
                best = Some((year, observation.value));
            }
        }
        if let Some((_, value)) = best {
            result.insert(person, value);
        }
    }
    result
}

/// One source's per-person values, tagged with its trust rank.
#[derive(Debug, Clone)]
pub struct RankedValues {
    pub rank: u8,
    pub values: BTreeMap<i64, i64>,
}

/// Merge ranked sources into one value per person. Sources are consulted
/// from rank 1 upward; a lower rank only fills persons every higher rank
/// left missing, and an existing value is never overwritten.
pub fn merge_ranked(mut sources: Vec<RankedValues>) -> BTreeMap<i64, i64> {
    sources.sort_by_key(|source| source.rank);
    let mut merged = BTreeMap::new();
    for source in sources {
        for (person, value) in source.values {
            merged.entry(person).or_insert(value);
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observations::Observation;

    fn set(rows: Vec<(i64, Option<i64>, i64)>) -> ObservationSet {
        let mut observations = ObservationSet {
            table: "status_registry".to_string(),
            ..Default::default()
        };
        for (person, year, value) in rows {
            observations
                .by_person
                .entry(person)
                .or_default()
                .push(Observation { year, value });
        }
        observations
    }

    fn ranked(rank: u8, values: &[(i64, i64)]) -> RankedValues {
        RankedValues {
            rank,
            values: values.iter().copied().collect(),
        }
    }

    #[test]
    fn takes_the_latest_observation() {
        let observations = set(vec![(1, Some(2000), 1), (1, Some(2005), 3)]);
        assert_eq!(last_available(&observations)[&1], 3);
    }

    #[test]
    fn year_tie_prefers_smallest_value() {
        let observations = set(vec![(1, Some(2005), 4), (1, Some(2005), 2)]);
        assert_eq!(last_available(&observations)[&1], 2);
    }

    #[test]
    fn higher_rank_is_never_overwritten() {
        let merged = merge_ranked(vec![
            ranked(1, &[(1, 10)]),
            ranked(2, &[(1, 20), (2, 20)]),
            ranked(3, &[(1, 30), (2, 30), (3, 30)]),
        ]);
        assert_eq!(merged[&1], 10);
        assert_eq!(merged[&2], 20);
        assert_eq!(merged[&3], 30);
    }

    #[test]
    fn rank_order_is_independent_of_input_order() {
        let merged = merge_ranked(vec![
            ranked(3, &[(1, 30)]),
            ranked(1, &[(1, 10)]),
            ranked(2, &[(1, 20)]),
        ]);
        assert_eq!(merged[&1], 10);
    }

    #[test]
    fn missing_everywhere_stays_missing() {
        let merged = merge_ranked(vec![ranked(1, &[]), ranked(2, &[(2, 5)])]);
        assert!(!merged.contains_key(&1));
        assert_eq!(merged[&2], 5);
    }
}
