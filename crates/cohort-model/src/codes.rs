//! Canonical code spaces and the fixed raw-to-canonical code maps.
//!
//! Every source table records civil status in its own raw scheme. All raw
//! codes are translated into one canonical space before consolidation; the
//! sentinel raw code means "unknown" and always translates to missing.

/// Canonical civil status codes shared by every consolidated record.
pub mod civil_status {
    pub const MARRIED: i64 = 1;
    pub const SINGLE: i64 = 2;
    pub const DIVORCED: i64 = 3;
    pub const WIDOWED: i64 = 4;
    pub const CIVIL_UNION: i64 = 5;
    pub const COHABITING: i64 = 6;
}

/// Canonical sex codes. The surveys record 1/2; the canonical space is 0/1.
pub mod sex {
    pub const MALE: i64 = 0;
    pub const FEMALE: i64 = 1;
}

/// Outcome of translating one raw code through a [`CodeMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Remapped {
    /// The raw code maps to this canonical code.
    Canonical(i64),
    /// The raw code is the scheme's sentinel and carries no information.
    Missing,
    /// The raw code is outside the scheme. A data-quality defect, never
    /// silently passed through.
    Unknown,
}

/// A fixed mapping from one table's raw code space into the canonical space.
#[derive(Debug, Clone, Copy)]
pub struct CodeMap {
    pub label: &'static str,
    pub sentinel: i64,
    entries: &'static [(i64, i64)],
}

impl CodeMap {
    pub fn remap(&self, raw: i64) -> Remapped {
        if raw == self.sentinel {
            return Remapped::Missing;
        }
        for &(from, to) in self.entries {
            if from == raw {
                return Remapped::Canonical(to);
            }
        }
        Remapped::Unknown
    }
}

/// Status registry marital scheme: 1=single, 2=married, 3/4=widowed,
/// 5=divorced or separated, 6=civil union, 7=cohabiting.
pub const MARITAL_REGISTRY: CodeMap = CodeMap {
    label: "registry marital scheme",
    sentinel: 9,
    entries: &[(1, 2), (2, 1), (3, 4), (4, 4), (5, 3), (6, 5), (7, 6)],
};

/// Household survey marital scheme: 1=single, 2=married, 3=widowed,
/// 4=divorced.
pub const MARITAL_SURVEY: CodeMap = CodeMap {
    label: "survey marital scheme",
    sentinel: 9,
    entries: &[(1, 2), (2, 1), (3, 4), (4, 3)],
};

/// Survey sex coding 1=male, 2=female, collapsed to the canonical 0/1.
pub const SEX_BINARY: CodeMap = CodeMap {
    label: "survey sex code",
    sentinel: 9,
    entries: &[(1, sex::MALE), (2, sex::FEMALE)],
};
