use serde::{Deserialize, Serialize};

use crate::source::columns;

/// One consolidated row of the canonical table.
///
/// `sex` and `number_of_children` are always resolved (consolidation fails
/// otherwise); `birth_year` and `civil_status` may stay missing when no
/// source carried them for a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRecord {
    pub person_id: i64,
    pub sex: i64,
    pub birth_year: Option<i64>,
    pub number_of_children: i64,
    pub civil_status: Option<i64>,
    pub wage_reference_flag: i64,
}

/// Column order of the canonical output table.
pub const OUTPUT_COLUMNS: [&str; 6] = [
    columns::PERSON_ID,
    columns::SEX,
    columns::BIRTH_YEAR,
    columns::NUMBER_OF_CHILDREN,
    columns::CIVIL_STATUS,
    columns::WAGE_REFERENCE_FLAG,
];
