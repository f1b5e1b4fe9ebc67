//! Configuration options for qjp.
//!
//! This module provides the `QjpOptions` struct and builder for configuring what the picker shows
//! and what it prints.

use derive_builder::Builder;
use thiserror::Error;

use crate::display::{DEFAULT_SEPARATOR, DisplaySpec, all_fields};
use crate::record::Record;

/// Field holding each input line in line mode
pub const LINE_FIELD: &str = "line";

/// Error for option combinations that make no sense
#[derive(Error, Debug, PartialEq, Eq)]
pub enum OptionsError {
    /// `--all` together with `--display`
    #[error("cannot use both -a and -d")]
    AllWithDisplay,
    /// An option that has no meaning in line mode
    #[error("cannot use {0} in line mode")]
    NotInLineMode(&'static str),
}

/// qjp - pick JSON records interactively
///
/// Reads a JSON array of objects (or plain lines with -l) from a file or standard input, lets you
/// filter and select entries in the terminal, and prints the selection.
///
/// Controls: arrow keys move, ctrl-space toggles the mark on an entry, enter confirms, esc or
/// ctrl-c cancels.
#[derive(Builder, Debug, Clone, PartialEq, Eq)]
#[builder(default)]
#[cfg_attr(feature = "cli", derive(clap::Parser))]
#[cfg_attr(feature = "cli", command(name = "qjp", version, about, verbatim_doc_comment))]
pub struct QjpOptions {
    /// Input file
    ///
    /// Input comes from this file or from standard input, but not both.
    #[cfg_attr(feature = "cli", arg(value_name = "FILE"))]
    #[builder(setter(into, strip_option))]
    pub file: Option<String>,

    //  --- Display ---
    /// Display this attribute in the list (repeatable)
    ///
    /// Without any, the whole object is displayed.
    #[cfg_attr(
        feature = "cli",
        arg(short = 'd', long = "display", value_name = "ATTR", help_heading = "Display")
    )]
    #[builder(setter(into))]
    pub display: Vec<String>,

    /// Separator between multiple display attributes
    #[cfg_attr(
        feature = "cli",
        arg(short = 's', long, default_value = DEFAULT_SEPARATOR, value_name = "SEP", help_heading = "Display")
    )]
    #[builder(setter(into))]
    pub separator: String,

    /// Truncate long entries instead of wrapping them
    #[cfg_attr(feature = "cli", arg(short = 't', long, help_heading = "Display"))]
    pub truncate: bool,

    /// Table mode: align attributes in columns
    #[cfg_attr(feature = "cli", arg(short = 'T', long, help_heading = "Display"))]
    pub table: bool,

    /// Display all attributes (cannot be used with -d)
    #[cfg_attr(feature = "cli", arg(short = 'a', long, help_heading = "Display"))]
    pub all: bool,

    //  --- Input/Output ---
    /// Line mode: treat input as plain text lines
    #[cfg_attr(feature = "cli", arg(short = 'l', long, help_heading = "Input/Output"))]
    pub lines: bool,

    /// Output this attribute of the selected object(s) instead of the whole object
    #[cfg_attr(
        feature = "cli",
        arg(short = 'o', long, value_name = "ATTR", help_heading = "Input/Output")
    )]
    #[builder(setter(into, strip_option))]
    pub output: Option<String>,

    //  --- Debug ---
    /// Write logs to this file instead of standard error
    #[cfg_attr(feature = "cli", arg(long, value_name = "PATH", help_heading = "Debug"))]
    #[builder(setter(into, strip_option))]
    pub log_file: Option<String>,
}

impl Default for QjpOptions {
    fn default() -> Self {
        Self {
            file: Default::default(),
            display: Default::default(),
            separator: String::from(DEFAULT_SEPARATOR),
            truncate: Default::default(),
            table: Default::default(),
            all: Default::default(),
            lines: Default::default(),
            output: Default::default(),
            log_file: Default::default(),
        }
    }
}

impl QjpOptions {
    /// Rejects conflicting options
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.all && !self.display.is_empty() {
            return Err(OptionsError::AllWithDisplay);
        }
        if self.lines {
            let conflicts = [
                (!self.display.is_empty(), "-d"),
                (self.all, "-a"),
                (self.output.is_some(), "-o"),
                (self.separator != DEFAULT_SEPARATOR, "-s"),
                (self.truncate, "-t"),
                (self.table, "-T"),
            ];
            if let Some((_, flag)) = conflicts.into_iter().find(|(set, _)| *set) {
                return Err(OptionsError::NotInLineMode(flag));
            }
        }
        Ok(())
    }

    /// How records are turned into display values.
    ///
    /// Line mode shows the line itself; `--all` shows every attribute found in `records`.
    pub fn display_spec(&self, records: &[Record]) -> DisplaySpec {
        let fields = if self.lines {
            vec![LINE_FIELD.to_string()]
        } else if self.all {
            all_fields(records)
        } else {
            self.display.clone()
        };
        DisplaySpec {
            fields,
            separator: self.separator.clone(),
            table: self.table,
            truncate: self.truncate,
        }
    }

    /// Attribute printed for each selected record, if any
    pub fn output_field(&self) -> Option<&str> {
        if self.lines {
            Some(LINE_FIELD)
        } else {
            self.output.as_deref()
        }
    }
}
