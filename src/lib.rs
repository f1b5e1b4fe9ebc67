//! qjp is an interactive terminal picker for JSON records and plain lines.
//!
//! Records are shown as one display string each, narrowed with a case-insensitive substring
//! filter, and picked with the cursor or with multi-selection marks. qjp can be used as a library
//! or as a command-line tool.
//!
//! # Examples
//!
//! ```no_run
//! use qjp::prelude::*;
//!
//! let options = QjpOptionsBuilder::default()
//!     .display(vec!["name".to_string()])
//!     .build()
//!     .unwrap();
//!
//! let records = parse_records(br#"[{"name": "Alpha"}, {"name": "Beta"}]"#, false).unwrap();
//! let output = Qjp::run_with(&options, &records).unwrap();
//! for line in format_selection(&records, &output.selected, None).unwrap() {
//!     println!("{line}");
//! }
//! ```

#![warn(missing_docs)]

#[macro_use]
extern crate log;

pub use crate::options::QjpOptions;
pub use crate::output::QjpOutput;
pub use crate::picker::Qjp;
pub use crate::record::{Record, Value};

pub mod display;
pub mod filter;
pub mod helper;
pub mod options;
pub mod output;
mod picker;
pub mod prelude;
pub mod record;
pub mod theme;
pub mod tui;
