//! Turning records into display values.
//!
//! The display value of a record is used both for matching and for painting, so it is computed
//! once per session and cached in [`DisplayPool`].

use std::collections::BTreeSet;

use derive_builder::Builder;
use unicode_display_width::width as display_width;

use crate::record::{Record, Value, to_json};

/// Separator used between table columns, regardless of [`DisplaySpec::separator`]
pub const TABLE_SEPARATOR: &str = "  ";
/// Default separator between projected fields
pub const DEFAULT_SEPARATOR: &str = " - ";

/// Describes how a record becomes a display string
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(default)]
pub struct DisplaySpec {
    /// Ordered field names to project. Empty means the whole record is serialized.
    #[builder(setter(into))]
    pub fields: Vec<String>,
    /// Joins projected fields outside of table mode
    #[builder(setter(into))]
    pub separator: String,
    /// Pad every column but the last to its widest value
    pub table: bool,
    /// Truncate long items to one row instead of wrapping them
    pub truncate: bool,
}

impl Default for DisplaySpec {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            separator: String::from(DEFAULT_SEPARATOR),
            table: false,
            truncate: false,
        }
    }
}

impl DisplaySpec {
    /// Widest rendered value of each projected field across `records`.
    ///
    /// Absent fields count as zero width.
    pub fn column_widths(&self, records: &[Record]) -> Vec<usize> {
        let mut widths = vec![0; self.fields.len()];
        for record in records {
            for (width, field) in widths.iter_mut().zip(&self.fields) {
                if let Some(value) = record.get(field) {
                    *width = (*width).max(display_width(&value.to_display_string()) as usize);
                }
            }
        }
        widths
    }

    /// Renders one record.
    ///
    /// `widths` is only consulted in table mode; pass the result of [`DisplaySpec::column_widths`].
    pub fn render(&self, record: &Record, widths: &[usize]) -> String {
        if self.fields.is_empty() {
            return to_json(record);
        }

        let last = self.fields.len() - 1;
        let values: Vec<String> = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let value = record.get(field).map(Value::to_display_string).unwrap_or_default();
                match widths.get(i) {
                    Some(&w) if self.table && i < last => pad_to_width(value, w),
                    _ => value,
                }
            })
            .collect();

        if self.table {
            values.join(TABLE_SEPARATOR)
        } else {
            values.join(&self.separator)
        }
    }
}

/// Right-pads `s` with spaces until it spans `width` display columns
pub fn pad_to_width(mut s: String, width: usize) -> String {
    let w = display_width(&s) as usize;
    if w < width {
        s.extend(std::iter::repeat_n(' ', width - w));
    }
    s
}

/// Sorted union of every field name appearing in `records`
pub fn all_fields(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .flat_map(|r| r.keys())
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Display values of a session's records, computed once
#[derive(Debug, Clone, Default)]
pub struct DisplayPool {
    items: Vec<String>,
    lowercase: Vec<String>,
    truncate: bool,
}

impl DisplayPool {
    /// Renders every record with `spec`
    pub fn new(records: &[Record], spec: &DisplaySpec) -> Self {
        let widths = if spec.table {
            spec.column_widths(records)
        } else {
            Vec::new()
        };
        debug!("column widths: {widths:?}");
        let items: Vec<String> = records.iter().map(|r| spec.render(r, &widths)).collect();
        let lowercase = items.iter().map(|s| s.to_lowercase()).collect();
        Self {
            items,
            lowercase,
            truncate: spec.truncate,
        }
    }

    /// Builds a pool from already rendered display values
    pub fn from_strings<I, S>(items: I, truncate: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        let lowercase = items.iter().map(|s| s.to_lowercase()).collect();
        Self {
            items,
            lowercase,
            truncate,
        }
    }

    /// Display value of the record at `position`
    pub fn get(&self, position: usize) -> &str {
        self.items.get(position).map(String::as_str).unwrap_or_default()
    }

    /// Lower-cased display value of the record at `position`
    pub fn get_lowercase(&self, position: usize) -> &str {
        self.lowercase.get(position).map(String::as_str).unwrap_or_default()
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the pool holds no record
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether long items are truncated rather than wrapped
    pub fn truncate(&self) -> bool {
        self.truncate
    }
}
