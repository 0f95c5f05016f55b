//! # speller-db
//!
//! internal database used by Speller to keep the high-score ledger.
//!
//! The ledger is a single flat JSON file holding a ranked, bounded array of
//! records. Every submission rewrites the file in full.

#![forbid(unsafe_code)]
#![deny(dead_code, unused_imports, unused_mut, missing_docs)]

mod ledger;

pub use ledger::Instance;

use std::path::PathBuf;

/// Default location of the ledger file.
pub const SOURCE_FILE: &str = "./highscores.json";
/// Default number of records kept in the ledger.
pub const MAX_ENTRIES: usize = 10;

/// Trait representing the attributes a record needs to be ranked.
pub trait Attributes {
    /// Value the ledger is sorted on, highest first.
    fn score(&self) -> i64;
}

/// Builder to set up an [`Instance`].
///
/// # Examples
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use speller_db::{Attributes, Builder, Instance};
///
/// #[derive(Serialize, Deserialize, Clone)]
/// struct Entry {
///     name: String,
///     points: i64,
/// }
///
/// impl Attributes for Entry {
///     fn score(&self) -> i64 {
///         self.points
///     }
/// }
///
/// let path = std::env::temp_dir().join("speller-doc-ledger.json");
/// let ledger: Instance<Entry> = Builder::default().path(&path).capacity(3).build();
/// assert_eq!(ledger.capacity(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Builder {
    path: PathBuf,
    capacity: usize,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            path: PathBuf::from(SOURCE_FILE),
            capacity: MAX_ENTRIES,
        }
    }
}

impl Builder {
    /// Sets the ledger file.
    pub fn path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.path = path.into();
        self
    }

    /// Sets how many records are kept.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Creates the [`Instance`]. Nothing is read until the first access.
    pub fn build<T>(self) -> Instance<T>
    where
        T: serde::Serialize + serde::de::DeserializeOwned + Attributes,
    {
        Instance::new(self.path, self.capacity)
    }
}
