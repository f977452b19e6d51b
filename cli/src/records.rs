use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Separates the name from the time on each line.
pub const DELIMITER: &str = " :: ";

#[derive(Error, Debug)]
pub enum RecordError {
    #[error("Could not access record file {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed record on line {line}: {text:?}")]
    Malformed { line: usize, text: String },
    #[error("Name {0:?} cannot be stored in a record")]
    InvalidName(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    pub name: String,
    pub time: String,
}

impl Record {
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            time: time.into(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.name, DELIMITER, self.time)
    }
}

/// Append-only list of winners, one record per line.
#[derive(Clone, Debug)]
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add(&self, record: &Record) -> Result<(), RecordError> {
        if record.name.contains(['\n', '\r']) || record.name.contains(DELIMITER) {
            return Err(RecordError::InvalidName(record.name.clone()));
        }

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .map_err(|source| self.io_error(source))?;
        writeln!(file, "{record}").map_err(|source| self.io_error(source))?;

        log::info!("Recorded {} in {}", record, self.path.display());
        Ok(())
    }

    /// All records in the order they were added, nothing recorded yet reads as empty.
    pub fn read(&self) -> Result<Vec<Record>, RecordError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(self.io_error(source)),
        };

        text.lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| match line.split_once(DELIMITER) {
                Some((name, time)) => Ok(Record::new(name, time.trim())),
                None => Err(RecordError::Malformed {
                    line: i + 1,
                    text: line.to_owned(),
                }),
            })
            .collect()
    }

    fn io_error(&self, source: io::Error) -> RecordError {
        RecordError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
