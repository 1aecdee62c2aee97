//! Struct archiving functionality
//!
//! To add archiving functionality to a struct implement the `Archived` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use std::path::Path;
use std::fs::{File, OpenOptions};
use csv::WriterBuilder;
pub use csv::Writer;
use serde::Serialize;
use thiserror::Error;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
///
/// Records must be flat structs (no nested structs or sequences), as each
/// field becomes one CSV column.
pub struct Archiver {
    writer: Writer<File>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors which can occur while archiving.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Could not create the archive file: {0}")]
    CreateError(std::io::Error),

    #[error("Could not serialise the record: {0}")]
    SerialiseError(csv::Error),

    #[error("Could not flush the archive: {0}")]
    FlushError(std::io::Error),
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A trait which enables a struct to be archived as a csv.
///
/// Implementors hold one `Archiver` per archived item, set up in the struct's `init` function.
pub trait Archived {
    /// Write the archives for this struct
    fn write(&mut self) -> Result<(), ArchiveError>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a paricular path relative to the session's
    /// archive root.
    ///
    /// Parent directories are created as needed, and any existing file is truncated.
    pub fn from_path<P: AsRef<Path>>(
        session: &Session, path: P
    ) -> Result<Self, ArchiveError> {
        let session_path = session.arch_root.join(path);

        if let Some(parent) = session_path.parent() {
            std::fs::create_dir_all(parent).map_err(ArchiveError::CreateError)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(session_path)
            .map_err(ArchiveError::CreateError)?;

        Ok(Self::from_file(file))
    }

    /// Create a new archiver writing into an already open file.
    pub fn from_file(file: File) -> Self {
        let writer = WriterBuilder::new()
            .has_headers(true)
            .from_writer(file);

        Self { writer }
    }

    /// Serialise a record into the archive.
    pub fn serialise<T: Serialize>(&mut self, record: T) -> Result<(), ArchiveError> {
        self.writer.serialize(record).map_err(ArchiveError::SerialiseError)?;
        self.writer.flush().map_err(ArchiveError::FlushError)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        time_s: f64,
        mode: i16,
        flag: bool,
    }

    #[test]
    fn test_archiver_writes_header_and_rows() {
        let path = std::env::temp_dir().join(format!("util_archive_test_{}.csv", std::process::id()));
        let file = File::create(&path).unwrap();

        let mut arch = Archiver::from_file(file);
        arch.serialise(Row { time_s: 0.0, mode: 1, flag: false }).unwrap();
        arch.serialise(Row { time_s: 0.01, mode: 2, flag: true }).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines, vec!["time_s,mode,flag", "0.0,1,false", "0.01,2,true"]);

        std::fs::remove_file(path).ok();
    }
}
