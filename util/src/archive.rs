//! Struct archiving functionality
//!
//! To add archiving functionality to a struct implement the `Archived` trait.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use csv::WriterBuilder;
pub use csv::Writer;
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::Path;
use thiserror::Error;

// Internal imports
use crate::session::Session;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// An object used to write CSV archive files.
#[derive(Default)]
pub struct Archiver {
    writer: Option<Writer<File>>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors raised while archiving.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("Cannot create the archive file: {0}")]
    CannotCreateFile(std::io::Error),

    #[error("Cannot serialise a record into the archive: {0}")]
    SerialiseError(#[from] csv::Error),

    #[error("The archiver has no initialised writer")]
    NotInitialised,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A trait which enables a struct to be archived as a timestamped csv.
///
/// To implement this trait, the struct shall have an `Archiver` member which
/// shall be ignored by Serde using `#[serde(skip_serializing)]`. The archiver
/// member shall be setup in the struct's `init` or `new` functions.
pub trait Archived {
    /// Write the archives for this struct
    fn write(&mut self) -> Result<(), ArchiveError>;
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Archiver {
    /// Create a new archiver from a particular path relative to the session's
    /// archive root.
    ///
    /// Parent directories of the path are created if not already present.
    pub fn from_path<P: AsRef<Path>>(
        session: &Session, path: P
    ) -> Result<Self, ArchiveError> {
        let mut session_path = session.arch_root.clone();
        session_path.push(path);

        // Create the parent directory if needed
        if let Some(parent) = session_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(ArchiveError::CannotCreateFile)?;
        }

        // Create the file if it does not exist
        std::fs::File::create(session_path.clone())
            .map_err(ArchiveError::CannotCreateFile)?;

        // Open the file in append mode
        let file = OpenOptions::new()
            .append(true)
            .open(session_path)
            .map_err(ArchiveError::CannotCreateFile)?;

        let w = WriterBuilder::new()
            .has_headers(true)
            .from_writer(file);

        Ok(Self {
            writer: Some(w)
        })
    }

    /// Serialise a record into the archive.
    pub fn serialise<T: Serialize>(
        &mut self, record: T
    ) -> Result<(), ArchiveError> {
        match self.writer {
            Some(ref mut w) => {
                w.serialize(record)?;
                w.flush().map_err(|e| ArchiveError::SerialiseError(e.into()))?;

                Ok(())
            },
            None => Err(ArchiveError::NotInitialised)
        }
    }
}
