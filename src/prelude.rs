//! Convenience re-exports of commonly used types.
//!
//! This module provides a convenient way to import all the commonly used
//! qjp types with a single `use qjp::prelude::*;` statement.

pub use crate::display::{DisplayPool, DisplaySpec, DisplaySpecBuilder};
pub use crate::filter::FilterState;
pub use crate::helper::record_reader::{ReadError, RecordSource, parse_records, read_records};
pub use crate::options::{OptionsError, QjpOptions, QjpOptionsBuilder};
pub use crate::output::{OutputError, QjpOutput, format_selection};
pub use crate::theme::ColorTheme;
pub use crate::tui::{Action, App, Geometry, Step, Tui};
pub use crate::*;
