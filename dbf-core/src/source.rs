// dbf_core/src/source.rs
use std::path::PathBuf;

use crate::error::{DbfError, Result};

/// One candidate table as handed out by a source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceEntry {
    /// Identity used in output (`FROM_FILE`) and in error context.
    pub name: String,
    pub path: PathBuf,
}

/// Where table bytes come from. Listing order is the order tables are
/// processed in; callers do not re-sort.
pub trait TableSource: Send + Sync {
    fn list_tables(&self) -> Result<Vec<SourceEntry>>;

    fn read_table(&self, entry: &SourceEntry) -> Result<Vec<u8>>;
}

/// Tables held in memory, listed in insertion order.
#[derive(Clone, Debug, Default)]
pub struct InMemSource {
    tables: Vec<(String, Vec<u8>)>,
}

impl InMemSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) {
        self.tables.push((name.into(), bytes));
    }
}

impl TableSource for InMemSource {
    fn list_tables(&self) -> Result<Vec<SourceEntry>> {
        Ok(self
            .tables
            .iter()
            .map(|(name, _)| SourceEntry {
                name: name.clone(),
                path: PathBuf::from(name),
            })
            .collect())
    }

    fn read_table(&self, entry: &SourceEntry) -> Result<Vec<u8>> {
        self.tables
            .iter()
            .find(|(name, _)| *name == entry.name)
            .map(|(_, bytes)| bytes.clone())
            .ok_or_else(|| {
                DbfError::from(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no table named {}", entry.name),
                ))
            })
    }
}
