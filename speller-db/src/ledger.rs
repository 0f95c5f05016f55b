//! ranked, bounded ledger.
//! supports full read and full overwrite.

use crate::Attributes;
use speller_error::{Error, ErrorType, PersistenceError};
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    marker::PhantomData,
    path::{Path, PathBuf},
};
#[cfg(feature = "logging")]
use tracing::{trace, warn};

/// Structure representing one ledger on disk.
#[derive(Debug)]
pub struct Instance<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Attributes,
{
    /// File holding the serialized records.
    path: PathBuf,
    /// Maximum number of records kept after each submission.
    capacity: usize,
    phantom: PhantomData<T>,
}

impl<T> Instance<T>
where
    T: serde::Serialize + serde::de::DeserializeOwned + Attributes,
{
    pub(crate) fn new(path: PathBuf, capacity: usize) -> Self {
        Self {
            path,
            capacity,
            phantom: PhantomData,
        }
    }

    /// Path of the ledger file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Maximum number of records kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the persisted records, best first.
    ///
    /// A missing or unreadable file means no score was recorded yet.
    pub fn list(&self) -> Vec<T> {
        match self.load() {
            Ok(entries) => entries,
            Err(_error) => {
                #[cfg(feature = "logging")]
                warn!(
                    path = %self.path.display(),
                    "Ledger unreadable, starting empty: {}",
                    _error
                );
                Vec::new()
            },
        }
    }

    /// Adds a record, keeps the best `capacity` ones and rewrites the file.
    ///
    /// Sorting is stable: a record tying existing ones ranks after them.
    pub fn submit(&mut self, data: T) -> Result<(), Error> {
        let mut entries = self.list();
        entries.push(data);
        entries.sort_by_key(|entry| std::cmp::Reverse(entry.score()));
        entries.truncate(self.capacity);

        self.save(&entries)?;

        #[cfg(feature = "logging")]
        trace!(
            path = %self.path.display(),
            entries = entries.len(),
            "Ledger rewritten."
        );

        Ok(())
    }

    /// Reads the whole file.
    fn load(&self) -> Result<Vec<T>, Error> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new())
            },
            Err(error) => {
                return Err(Error::new(
                    ErrorType::Persistence(PersistenceError::ReadingError),
                    Some(Box::new(error)),
                    Some("cannot open ledger".to_string()),
                ))
            },
        };

        serde_json::from_reader(BufReader::new(file)).map_err(|error| {
            Error::new(
                ErrorType::Persistence(PersistenceError::ReadingError),
                Some(Box::new(error)),
                Some("cannot deserialize ledger".to_string()),
            )
        })
    }

    /// Overwrites the file with `entries`.
    ///
    /// Data goes to a sibling temporary file first, then replaces the ledger
    /// with a rename. The previous ledger stays intact on failure.
    fn save(&self, entries: &[T]) -> Result<(), Error> {
        let temporary = self.path.with_file_name(format!(
            ".{}.{}.tmp",
            self.path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            uuid::Uuid::new_v4()
        ));

        let result = write_file(&temporary, entries).and_then(|_| {
            fs::rename(&temporary, &self.path).map_err(|error| {
                Error::new(
                    ErrorType::Persistence(PersistenceError::WritingError),
                    Some(Box::new(error)),
                    Some("cannot replace ledger".to_string()),
                )
            })
        });

        if result.is_err() {
            let _ = fs::remove_file(&temporary);
        }

        result
    }
}

fn write_file<T: serde::Serialize>(path: &Path, entries: &[T]) -> Result<(), Error> {
    let file = File::create(path).map_err(|error| {
        Error::new(
            ErrorType::Persistence(PersistenceError::WritingError),
            Some(Box::new(error)),
            Some("cannot create temporary ledger".to_string()),
        )
    })?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, entries).map_err(|error| {
        Error::new(
            ErrorType::Persistence(PersistenceError::SerializationError),
            Some(Box::new(error)),
            Some("during `serde_json` serialization of ledger".to_string()),
        )
    })?;

    writer
        .into_inner()
        .map_err(|error| error.into_error())
        .and_then(|mut file| {
            file.flush()?;
            file.sync_all()
        })
        .map_err(|error| {
            Error::new(
                ErrorType::Persistence(PersistenceError::WritingError),
                Some(Box::new(error)),
                Some("cannot flush temporary ledger".to_string()),
            )
        })
}
