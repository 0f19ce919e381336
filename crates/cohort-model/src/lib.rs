pub mod codes;
pub mod error;
pub mod record;
pub mod source;

pub use codes::{CodeMap, Remapped};
pub use error::{ConsolidateError, Result};
pub use record::{CanonicalRecord, OUTPUT_COLUMNS};
pub use source::{
    AttributeSource, BIRTH_YEAR_SOURCES, CHILDREN_SOURCES, CIVIL_STATUS_SOURCES, SEX_SOURCES,
    SourceKind, columns,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes() {
        let record = CanonicalRecord {
            person_id: 7,
            sex: codes::sex::FEMALE,
            birth_year: Some(1953),
            number_of_children: 2,
            civil_status: Some(codes::civil_status::MARRIED),
            wage_reference_flag: 1,
        };
        let json = serde_json::to_string(&record).expect("serialize record");
        let round: CanonicalRecord = serde_json::from_str(&json).expect("deserialize record");
        assert_eq!(round, record);
    }

    #[test]
    fn record_fields_match_the_output_schema() {
        let record = CanonicalRecord {
            person_id: 1,
            sex: 0,
            birth_year: None,
            number_of_children: 0,
            civil_status: None,
            wage_reference_flag: 1,
        };
        let value = serde_json::to_value(&record).expect("serialize record");
        let mut keys: Vec<&str> = value
            .as_object()
            .expect("record object")
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        let mut expected = OUTPUT_COLUMNS.to_vec();
        expected.sort_unstable();
        assert_eq!(keys, expected);
    }

    #[test]
    fn trust_ranks_are_ordered_most_trusted_first() {
        for sources in [
            SEX_SOURCES,
            BIRTH_YEAR_SOURCES,
            CHILDREN_SOURCES,
            CIVIL_STATUS_SOURCES,
        ] {
            let ranks: Vec<u8> = sources.iter().map(|s| s.rank).collect();
            let mut sorted = ranks.clone();
            sorted.sort_unstable();
            assert_eq!(ranks, sorted);
            assert_eq!(ranks[0], 1);
        }
    }

    #[test]
    fn registry_year_column_differs_from_surveys() {
        assert_eq!(SourceKind::PrimarySurvey.year_column(), columns::WAVE_YEAR);
        assert_eq!(SourceKind::StatusRegistry.year_column(), columns::YEAR);
    }
}
