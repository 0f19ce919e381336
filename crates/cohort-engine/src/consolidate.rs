//! Within-table consolidation: one representative value per person.

use std::collections::BTreeMap;

use crate::observations::ObservationSet;

/// Reduce one table's observations to the most frequent value per person.
///
/// Frequency ties prefer the value observed at the most recent year, then
/// the smallest value, so the reduction is deterministic regardless of row
/// order. Persons without any informative row are absent from the result.
pub fn most_frequent(observations: &ObservationSet) -> BTreeMap<i64, i64> {
    let mut result = BTreeMap::new();
    for (&person, rows) in &observations.by_person {
        // value -> (count, latest year seen for that value)
        let mut counts: BTreeMap<i64, (usize, i64)> = BTreeMap::new();
        for observation in rows {
            let year = observation.year.unwrap_or(i64::MIN);
            let entry = counts.entry(observation.value).or_insert((0, i64::MIN));
            entry.0 += 1;
            entry.1 = entry.1.max(year);
        }
        let mut best: Option<(i64, usize, i64)> = None;
        for (&value, &(count, latest)) in &counts {
            let better = match best {
                None => true,
                Some((_, best_count, best_latest)) => {
                    count > best_count || (count == best_count && latest > best_latest)
                }
            };
            if better {
                best = Some((value, count, latest));
            }
        }
        if let Some((value, _, _)) = best {
            result.insert(person, value);
        }
    }
    result
}
