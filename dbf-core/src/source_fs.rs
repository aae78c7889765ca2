use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::convert::OUTPUT_EXTENSION;
use crate::error::Result;
use crate::source::{SourceEntry, TableSource};

/// Regular files directly inside one directory, ordered by file name.
///
/// Without an extension filter every file is listed except converted
/// output (`.csv`), so reruns over the same directory see the same tables.
pub struct FsTableSource {
    dir: PathBuf,
    extension: Option<String>,
    exclude: Option<PathBuf>,
}

impl FsTableSource {
    pub fn new(dir: &Path) -> Result<Self> {
        if !dir.is_dir() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("not a directory: {}", dir.display()),
            )
            .into());
        }
        Ok(Self {
            dir: dir.to_path_buf(),
            extension: None,
            exclude: None,
        })
    }

    /// Only list files with this extension (ASCII case-insensitive).
    pub fn with_extension(mut self, ext: Option<String>) -> Self {
        self.extension = ext.map(|e| e.trim_start_matches('.').to_string());
        self
    }

    /// Never list `path`, even when it matches the filter.
    pub fn excluding(mut self, path: &Path) -> Self {
        self.exclude = Some(canonical(path));
        self
    }

    fn accepts(&self, p: &Path) -> bool {
        let ext = p.extension().and_then(|e| e.to_str());
        let by_ext = match &self.extension {
            None => !ext.is_some_and(|e| e.eq_ignore_ascii_case(OUTPUT_EXTENSION)),
            Some(want) => ext.is_some_and(|e| e.eq_ignore_ascii_case(want)),
        };
        by_ext && self.exclude.as_deref().is_none_or(|x| canonical(p).as_path() != x)
    }
}

// Falls back to the path as given when it does not exist yet.
fn canonical(p: &Path) -> PathBuf {
    std::fs::canonicalize(p).unwrap_or_else(|_| p.to_path_buf())
}

impl TableSource for FsTableSource {
    fn list_tables(&self) -> Result<Vec<SourceEntry>> {
        let mut out = Vec::new();
        for entry in WalkDir::new(&self.dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() || !self.accepts(entry.path()) {
                continue;
            }
            out.push(SourceEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.into_path(),
            });
        }
        tracing::debug!(dir = %self.dir.display(), tables = out.len(), "listed tables");
        Ok(out)
    }

    fn read_table(&self, entry: &SourceEntry) -> Result<Vec<u8>> {
        Ok(std::fs::read(&entry.path)?)
    }
}
