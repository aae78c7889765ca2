use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::source::TableSource;
use crate::source_fs::FsTableSource;

pub enum Backend {
    Fs {
        extension: Option<String>,
        /// A file never listed, typically the merge target.
        exclude: Option<PathBuf>,
    },
}

pub fn open_source(backend: Backend, location: &Path) -> Result<Box<dyn TableSource>> {
    match backend {
        Backend::Fs { extension, exclude } => {
            let mut src = FsTableSource::new(location)?.with_extension(extension);
            if let Some(p) = exclude {
                src = src.excluding(&p);
            }
            Ok(Box::new(src))
        }
    }
}
