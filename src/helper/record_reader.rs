//! Reading records from a file or piped standard input.

use std::fs;
use std::io::{self, BufRead, IsTerminal, Read};
use std::path::PathBuf;

use thiserror::Error;

use crate::options::LINE_FIELD;
use crate::record::{Record, Value};

/// Error while obtaining records
#[derive(Error, Debug)]
pub enum ReadError {
    /// Neither a file nor piped input
    #[error("no input provided")]
    NoInput,
    /// A file was named while input was also piped in
    #[error("cannot use both stdin and filename input")]
    BothInputs,
    /// Reading the file or the stream failed
    #[error("error reading {source_name}: {error}")]
    Io {
        /// What was being read
        source_name: String,
        /// The underlying failure
        error: io::Error,
    },
    /// The input is not a JSON array of objects
    #[error("error parsing JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Line mode input could not be split into lines
    #[error("error reading lines: {0}")]
    Lines(io::Error),
    /// Parsing produced nothing to pick from
    #[error("no objects found in input")]
    Empty,
}

/// Where records come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// A file on disk
    File(PathBuf),
    /// Standard input, which must not be a terminal
    Stdin,
}

impl RecordSource {
    /// Picks the source from the optional file argument and whether stdin carries piped data
    pub fn resolve(file: Option<&str>, stdin_piped: bool) -> Result<Self, ReadError> {
        match (file, stdin_piped) {
            (Some(_), true) => Err(ReadError::BothInputs),
            (Some(path), false) => Ok(Self::File(PathBuf::from(path))),
            (None, true) => Ok(Self::Stdin),
            (None, false) => Err(ReadError::NoInput),
        }
    }

    /// Like [`RecordSource::resolve`], checking the process's real standard input
    pub fn detect(file: Option<&str>) -> Result<Self, ReadError> {
        Self::resolve(file, !io::stdin().is_terminal())
    }

    /// Reads the whole source into memory
    pub fn read_all(&self) -> Result<Vec<u8>, ReadError> {
        match self {
            Self::File(path) => fs::read(path).map_err(|error| ReadError::Io {
                source_name: path.display().to_string(),
                error,
            }),
            Self::Stdin => {
                let mut buf = Vec::new();
                io::stdin()
                    .lock()
                    .read_to_end(&mut buf)
                    .map_err(|error| ReadError::Io {
                        source_name: String::from("stdin"),
                        error,
                    })?;
                Ok(buf)
            }
        }
    }
}

/// Parses raw input into records.
///
/// In line mode every line, empty ones included, becomes a record with a single `line` text
/// field. Otherwise the input must be a JSON array of objects; `null` counts as an empty array.
pub fn parse_records(input: &[u8], lines: bool) -> Result<Vec<Record>, ReadError> {
    let records: Vec<Record> = if lines {
        input
            .lines()
            .map(|line| {
                line.map(|text| Record::from([(LINE_FIELD.to_string(), Value::Text(text))]))
                    .map_err(ReadError::Lines)
            })
            .collect::<Result<_, _>>()?
    } else {
        serde_json::from_slice::<Option<Vec<Record>>>(input)?.unwrap_or_default()
    };
    if records.is_empty() {
        return Err(ReadError::Empty);
    }
    debug!("parsed {} records", records.len());
    Ok(records)
}

/// Reads and parses records from `source`
pub fn read_records(source: &RecordSource, lines: bool) -> Result<Vec<Record>, ReadError> {
    debug!("reading records from {source:?}");
    parse_records(&source.read_all()?, lines)
}
