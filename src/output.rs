//! Session results and how selected records are printed.

use thiserror::Error;

use crate::record::{Record, Value, to_json};

/// What a session produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QjpOutput {
    /// Selected record positions, ascending when several were marked
    pub selected: Vec<usize>,
    /// The filter text when the session ended
    pub query: String,
    /// Whether the operator cancelled
    pub is_abort: bool,
}

/// Error while formatting selected records
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OutputError {
    /// A selected record lacks the requested attribute
    #[error("attribute '{0}' not found in selected object")]
    MissingAttribute(String),
}

/// Formats a single attribute value for output.
///
/// Floats holding an integral value drop their fraction, so `3.0` prints as `3`.
pub fn format_value(value: &Value) -> String {
    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => (f as i64).to_string(),
            _ => n.to_string(),
        },
        other => other.to_display_string(),
    }
}

/// One output line per selected record: the whole record as JSON, or just `field`
pub fn format_selection(
    records: &[Record],
    selected: &[usize],
    field: Option<&str>,
) -> Result<Vec<String>, OutputError> {
    selected
        .iter()
        .filter_map(|&pos| records.get(pos))
        .map(|record| match field {
            None => Ok(to_json(record)),
            Some(name) => record
                .get(name)
                .map(format_value)
                .ok_or_else(|| OutputError::MissingAttribute(name.to_string())),
        })
        .collect()
}
