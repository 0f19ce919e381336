//! Source table descriptors.
//!
//! Three independent tables contribute observations for the same persons.
//! Each knows its table name, its observation-year column, and which
//! marital-status code scheme it records. Trust order between tables is
//! carried by [`AttributeSource::rank`]: rank 1 is most trusted and is
//! never overwritten by a lower rank.

use serde::{Deserialize, Serialize};

use crate::codes::{CodeMap, MARITAL_REGISTRY, MARITAL_SURVEY};

/// Column names shared across the source tables and the canonical output.
pub mod columns {
    pub const PERSON_ID: &str = "person_id";
    pub const WAVE_YEAR: &str = "wave_year";
    pub const YEAR: &str = "year";
    pub const SEX: &str = "sex";
    pub const BIRTH_YEAR: &str = "birth_year";
    pub const MARITAL_STATUS: &str = "marital_status";
    pub const CHILDREN: &str = "children";
    pub const DEPENDENT_CHILDREN: &str = "dependent_children";
    pub const WAGE_REFERENCE_FLAG: &str = "wage_reference_flag";
    pub const NUMBER_OF_CHILDREN: &str = "number_of_children";
    pub const CIVIL_STATUS: &str = "civil_status";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SourceKind {
    PrimarySurvey,
    SecondarySurvey,
    StatusRegistry,
}

impl SourceKind {
    pub const ALL: [SourceKind; 3] = [
        SourceKind::PrimarySurvey,
        SourceKind::SecondarySurvey,
        SourceKind::StatusRegistry,
    ];

    pub fn table_name(self) -> &'static str {
        match self {
            SourceKind::PrimarySurvey => "primary_survey",
            SourceKind::SecondarySurvey => "secondary_survey",
            SourceKind::StatusRegistry => "status_registry",
        }
    }

    /// The observation-time column. The surveys stamp rows with the end
    /// year of the reporting wave; the registry uses a plain year.
    pub fn year_column(self) -> &'static str {
        match self {
            SourceKind::PrimarySurvey | SourceKind::SecondarySurvey => columns::WAVE_YEAR,
            SourceKind::StatusRegistry => columns::YEAR,
        }
    }

    pub fn marital_code_map(self) -> &'static CodeMap {
        match self {
            SourceKind::PrimarySurvey | SourceKind::SecondarySurvey => &MARITAL_SURVEY,
            SourceKind::StatusRegistry => &MARITAL_REGISTRY,
        }
    }

    /// Columns expected when this table is ingested.
    pub fn expected_columns(self) -> &'static [&'static str] {
        match self {
            SourceKind::PrimarySurvey | SourceKind::SecondarySurvey => &[
                columns::PERSON_ID,
                columns::WAVE_YEAR,
                columns::SEX,
                columns::BIRTH_YEAR,
                columns::MARITAL_STATUS,
                columns::CHILDREN,
            ],
            SourceKind::StatusRegistry => &[
                columns::PERSON_ID,
                columns::YEAR,
                columns::MARITAL_STATUS,
                columns::DEPENDENT_CHILDREN,
                columns::WAGE_REFERENCE_FLAG,
            ],
        }
    }
}

/// One entry of an attribute's ordered source list: which table, which raw
/// column, and the trust rank of that table for this attribute.
#[derive(Debug, Clone, Copy)]
pub struct AttributeSource {
    pub source: SourceKind,
    pub value_column: &'static str,
    pub rank: u8,
}

pub const SEX_SOURCES: &[AttributeSource] = &[
    AttributeSource {
        source: SourceKind::PrimarySurvey,
        value_column: columns::SEX,
        rank: 1,
    },
    AttributeSource {
        source: SourceKind::SecondarySurvey,
        value_column: columns::SEX,
        rank: 2,
    },
];

pub const BIRTH_YEAR_SOURCES: &[AttributeSource] = &[
    AttributeSource {
        source: SourceKind::PrimarySurvey,
        value_column: columns::BIRTH_YEAR,
        rank: 1,
    },
    AttributeSource {
        source: SourceKind::SecondarySurvey,
        value_column: columns::BIRTH_YEAR,
        rank: 2,
    },
];

pub const CHILDREN_SOURCES: &[AttributeSource] = &[
    AttributeSource {
        source: SourceKind::PrimarySurvey,
        value_column: columns::CHILDREN,
        rank: 1,
    },
    AttributeSource {
        source: SourceKind::SecondarySurvey,
        value_column: columns::CHILDREN,
        rank: 2,
    },
    AttributeSource {
        source: SourceKind::StatusRegistry,
        value_column: columns::DEPENDENT_CHILDREN,
        rank: 3,
    },
];

pub const CIVIL_STATUS_SOURCES: &[AttributeSource] = &[
    AttributeSource {
        source: SourceKind::PrimarySurvey,
        value_column: columns::MARITAL_STATUS,
        rank: 1,
    },
    AttributeSource {
        source: SourceKind::SecondarySurvey,
        value_column: columns::MARITAL_STATUS,
        rank: 2,
    },
    AttributeSource {
        source: SourceKind::StatusRegistry,
        value_column: columns::MARITAL_STATUS,
        rank: 3,
    },
];
