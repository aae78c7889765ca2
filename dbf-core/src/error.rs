use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbfError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("truncated input: {section} needs {needed} bytes, only {available} available")]
    TruncatedInput {
        section: &'static str,
        needed: u64,
        available: u64,
    },

    #[error("unsupported table version {0:#04x} (dBASE level 7)")]
    UnsupportedVersion(u8),

    #[error("records out of bounds: declared geometry needs {needed} bytes, file has {available}")]
    RecordOutOfBounds { needed: u64, available: u64 },

    /// Field lengths plus the deletion flag do not fit in one record.
    #[error("field layout needs {fields_len} bytes per record, record length is {record_len}")]
    FieldLayout { fields_len: u64, record_len: u64 },

    #[error("{file}: {source}")]
    InFile {
        file: String,
        #[source]
        source: Box<DbfError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DbfError {
    /// Attach the identity of the file being decoded.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            e @ DbfError::InFile { .. } => e,
            e => DbfError::InFile {
                file: file.into(),
                source: Box::new(e),
            },
        }
    }

    /// The underlying error with any file context stripped.
    pub fn root(&self) -> &DbfError {
        match self {
            DbfError::InFile { source, .. } => source.root(),
            e => e,
        }
    }
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, DbfError>;
