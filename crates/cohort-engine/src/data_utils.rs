use polars::prelude::{AnyValue, DataFrame};

use cohort_model::{ConsolidateError, Result};

pub fn any_to_i64(value: AnyValue) -> Option<i64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(value) => Some(value as i64),
        AnyValue::Int16(value) => Some(value as i64),
        AnyValue::Int32(value) => Some(value as i64),
        AnyValue::Int64(value) => Some(value),
        AnyValue::UInt8(value) => Some(value as i64),
        AnyValue::UInt16(value) => Some(value as i64),
        AnyValue::UInt32(value) => Some(value as i64),
        AnyValue::UInt64(value) => Some(value as i64),
        AnyValue::Float32(value) => Some(value as i64),
        AnyValue::Float64(value) => Some(value as i64),
        AnyValue::String(value) => parse_i64(value),
        AnyValue::StringOwned(value) => parse_i64(&value),
        _ => None,
    }
}

pub fn parse_i64(value: &str) -> Option<i64> {
    if value.trim().is_empty() {
        return None;
    }
    value.trim().parse::<i64>().ok()
}

/// Extract one column of a table as optional integers, reporting a missing
/// column against the table by name.
pub fn column_i64_values(table: &str, frame: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let column = frame
        .column(name)
        .map_err(|_| ConsolidateError::missing_column(table, name))?;
    let mut values = Vec::with_capacity(frame.height());
    for idx in 0..frame.height() {
        values.push(any_to_i64(column.get(idx).unwrap_or(AnyValue::Null)));
    }
    Ok(values)
}
