//! End-to-end consolidation scenarios over an in-memory store.

use polars::prelude::{AnyValue, Column, DataFrame};

use cohort_engine::{consolidate, entity_index};
use cohort_model::{ConsolidateError, codes::civil_status};
use cohort_store::MemoryStore;

type SurveyRow = (i64, i64, Option<i64>, Option<i64>, Option<i64>, Option<i64>);
type RegistryRow = (i64, i64, Option<i64>, Option<i64>, Option<i64>);

fn survey_frame(rows: &[SurveyRow]) -> DataFrame {
    DataFrame::new(vec![
        Column::new(
            "person_id".into(),
            rows.iter().map(|row| row.0).collect::<Vec<_>>(),
        ),
        Column::new(
            "wave_year".into(),
            rows.iter().map(|row| row.1).collect::<Vec<_>>(),
        ),
        Column::new(
            "sex".into(),
            rows.iter().map(|row| row.2).collect::<Vec<_>>(),
        ),
        Column::new(
            "birth_year".into(),
            rows.iter().map(|row| row.3).collect::<Vec<_>>(),
        ),
        Column::new(
            "marital_status".into(),
            rows.iter().map(|row| row.4).collect::<Vec<_>>(),
        ),
        Column::new(
            "children".into(),
            rows.iter().map(|row| row.5).collect::<Vec<_>>(),
        ),
    ])
    .expect("survey frame")
}

fn registry_frame(rows: &[RegistryRow]) -> DataFrame {
    DataFrame::new(vec![
        Column::new(
            "person_id".into(),
            rows.iter().map(|row| row.0).collect::<Vec<_>>(),
        ),
        Column::new(
            "year".into(),
            rows.iter().map(|row| row.1).collect::<Vec<_>>(),
        ),
        Column::new(
            "marital_status".into(),
            rows.iter().map(|row| row.2).collect::<Vec<_>>(),
        ),
        Column::new(
            "dependent_children".into(),
            rows.iter().map(|row| row.3).collect::<Vec<_>>(),
        ),
        Column::new(
            "wage_reference_flag".into(),
            rows.iter().map(|row| row.4).collect::<Vec<_>>(),
        ),
    ])
    .expect("registry frame")
}

fn store_with(
    primary: &[SurveyRow],
    secondary: &[SurveyRow],
    registry: &[RegistryRow],
) -> MemoryStore {
    let mut store = MemoryStore::new();
    store.put("primary_survey", survey_frame(primary)).unwrap();
    store
        .put("secondary_survey", survey_frame(secondary))
        .unwrap();
    store
        .put("status_registry", registry_frame(registry))
        .unwrap();
    store
}

/// The shared fixture: five persons exercising every consolidation rule.
///
/// - 101 carries civil status only in the registry (2000 raw 2, 2005 raw 5);
/// - 102 has conflicting sex reports between the surveys and conflicting
///   children counts;
/// - 103 appears nowhere with children or civil status;
/// - 104's registry history starts with a sentinel marital code;
/// - 105 reports its birth year three times, twice the same.
fn fixture() -> MemoryStore {
    store_with(
        &[
            (101, 2009, Some(1), Some(1950), None, None),
            (102, 2009, Some(1), Some(1948), Some(2), Some(2)),
            (103, 2009, Some(2), None, None, None),
            (104, 2009, Some(2), Some(1955), None, None),
            (105, 2003, Some(1), Some(1950), None, None),
            (105, 2006, None, Some(1950), None, None),
            (105, 2009, None, Some(1951), None, None),
        ],
        &[(102, 2009, Some(2), Some(1949), None, Some(4))],
        &[
            (101, 2000, Some(2), None, None),
            (101, 2005, Some(5), None, None),
            (104, 2001, Some(9), None, None),
            (104, 2003, Some(1), None, Some(0)),
        ],
    )
}

fn cell(records: &DataFrame, column: &str, person: i64) -> Option<i64> {
    let ids = records.column("person_id").unwrap();
    let row = (0..records.height())
        .find(|&idx| matches!(ids.get(idx).unwrap(), AnyValue::Int64(id) if id == person))
        .expect("person row");
    match records.column(column).unwrap().get(row).unwrap() {
        AnyValue::Int64(value) => Some(value),
        AnyValue::Null => None,
        other => panic!("unexpected cell value {other:?}"),
    }
}

#[test]
fn one_record_per_indexed_person() {
    let mut store = fixture();
    let result = consolidate(&mut store).unwrap();
    assert_eq!(result.records.height(), 5);
    let ids: Vec<i64> = (0..result.records.height())
        .map(|idx| {
            match result.records.column("person_id").unwrap().get(idx).unwrap() {
                AnyValue::Int64(id) => id,
                other => panic!("unexpected id {other:?}"),
            }
        })
        .collect();
    assert_eq!(ids, vec![101, 102, 103, 104, 105]);
}

#[test]
fn entity_index_deduplicates_and_sorts() {
    let store = fixture();
    let index = entity_index(&store).unwrap();
    assert_eq!(index, vec![101, 102, 103, 104, 105]);
}

#[test]
fn registry_only_civil_status_takes_last_available() {
    let mut store = fixture();
    let result = consolidate(&mut store).unwrap();
    // 2000: raw 2 -> married; 2005: raw 5 -> divorced; the later wins.
    assert_eq!(
        cell(&result.records, "civil_status", 101),
        Some(civil_status::DIVORCED)
    );
}

#[test]
fn sex_conflict_resolves_to_primary_survey() {
    let mut store = fixture();
    let result = consolidate(&mut store).unwrap();
    assert_eq!(cell(&result.records, "sex", 102), Some(0));
}

#[test]
fn children_conflict_resolves_to_primary_survey() {
    let mut store = fixture();
    let result = consolidate(&mut store).unwrap();
    assert_eq!(cell(&result.records, "number_of_children", 102), Some(2));
}

#[test]
fn absent_children_default_to_zero() {
    let mut store = fixture();
    let result = consolidate(&mut store).unwrap();
    assert_eq!(cell(&result.records, "number_of_children", 103), Some(0));
}

#[test]
fn sentinel_observation_does_not_confuse_last_available() {
    let mut store = fixture();
    let result = consolidate(&mut store).unwrap();
    // 2001: raw 9 -> missing; 2003: raw 1 -> single. The 2003 value wins.
    assert_eq!(
        cell(&result.records, "civil_status", 104),
        Some(civil_status::SINGLE)
    );
}

#[test]
fn birth_year_takes_the_most_frequent_report() {
    let mut store = fixture();
    let result = consolidate(&mut store).unwrap();
    assert_eq!(cell(&result.records, "birth_year", 105), Some(1950));
    assert_eq!(cell(&result.records, "birth_year", 103), None);
}

#[test]
fn wage_reference_flag_defaults_to_one() {
    let mut store = fixture();
    let result = consolidate(&mut store).unwrap();
    assert_eq!(cell(&result.records, "wage_reference_flag", 104), Some(0));
    assert_eq!(cell(&result.records, "wage_reference_flag", 101), Some(1));
}

#[test]
fn typed_records_match_the_table() {
    let mut store = fixture();
    let result = consolidate(&mut store).unwrap();
    let records = result.to_records().unwrap();
    assert_eq!(records.len(), 5);
    let z = records.iter().find(|r| r.person_id == 103).unwrap();
    assert_eq!(z.sex, 1);
    assert_eq!(z.birth_year, None);
    assert_eq!(z.number_of_children, 0);
    assert_eq!(z.civil_status, None);
    assert_eq!(z.wage_reference_flag, 1);
}

#[test]
fn reruns_are_byte_identical() {
    let mut first_store = fixture();
    let first = consolidate(&mut first_store).unwrap();
    let mut second_store = fixture();
    let second = consolidate(&mut second_store).unwrap();
    assert!(first.records.equals_missing(&second.records));
}

#[test]
fn store_is_closed_on_success_and_failure() {
    let mut store = fixture();
    consolidate(&mut store).unwrap();
    assert!(store.is_closed());

    // missing secondary survey makes every builder fail
    let mut broken = MemoryStore::new();
    broken
        .put("primary_survey", survey_frame(&[(1, 2009, Some(1), None, None, None)]))
        .unwrap();
    broken
        .put("status_registry", registry_frame(&[]))
        .unwrap();
    consolidate(&mut broken).unwrap_err();
    assert!(broken.is_closed());
}

#[test]
fn unresolved_sex_fails_the_run() {
    let mut store = store_with(
        &[
            (201, 2009, None, Some(1950), Some(2), None),
            (202, 2009, Some(1), Some(1951), None, None),
        ],
        &[],
        &[],
    );
    let error = consolidate(&mut store).unwrap_err();
    match error {
        ConsolidateError::InvariantViolation(message) => {
            assert!(message.contains("sex"), "unexpected message: {message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn entirely_missing_civil_status_fails_the_run() {
    let mut store = store_with(
        &[(201, 2009, Some(1), Some(1950), None, None)],
        &[],
        &[],
    );
    let error = consolidate(&mut store).unwrap_err();
    match error {
        ConsolidateError::InvariantViolation(message) => {
            assert!(
                message.contains("civil_status"),
                "unexpected message: {message}"
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unknown_marital_code_is_rejected_during_cleaning() {
    let mut store = store_with(
        &[(201, 2009, Some(1), Some(1950), None, None)],
        &[],
        &[(201, 2003, Some(8), None, None)],
    );
    let error = consolidate(&mut store).unwrap_err();
    assert!(matches!(
        error,
        ConsolidateError::UnrecognizedCode { value: 8, .. }
    ));
}

#[test]
fn unknown_sex_code_is_reported_per_attribute() {
    let mut store = store_with(
        &[(201, 2009, Some(3), Some(1950), Some(2), None)],
        &[],
        &[],
    );
    let error = consolidate(&mut store).unwrap_err();
    match error {
        ConsolidateError::AttributeFailures { count, details } => {
            assert_eq!(count, 1);
            assert!(details.contains("sex"), "unexpected details: {details}");
        }
        other => panic!("unexpected error: {other}"),
    }
}
