use crate::error::{DbfError, Result};
use time::{Date, Month};

pub const HEADER_LEN: usize = 32;
/// Header block plus the single terminator byte that follows the descriptors.
pub const HEADER_OVERHEAD: u16 = HEADER_LEN as u16 + 1;

pub const VERSION_LEVEL5: u8 = 3;
pub const VERSION_LEVEL7: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Version byte 3.
    Level5,
    /// Version byte 4; field metadata is laid out differently and is not decoded.
    Level7,
    /// Anything else is read with the common level 3/4 layout.
    Legacy(u8),
}

impl Dialect {
    pub fn from_version(v: u8) -> Self {
        match v {
            VERSION_LEVEL5 => Dialect::Level5,
            VERSION_LEVEL7 => Dialect::Level7,
            other => Dialect::Legacy(other),
        }
    }

    pub fn is_supported(self) -> bool {
        !matches!(self, Dialect::Level7)
    }

    pub fn label(self) -> &'static str {
        match self {
            Dialect::Level5 => "dBASE level 5",
            Dialect::Level7 => "dBASE level 7",
            Dialect::Legacy(_) => "dBASE level 3 / 4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableHeader {
    pub version: u8,
    /// 1900 + stored year byte
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub record_count: u32,
    /// Byte length of header + descriptors + terminator; records start here.
    pub header_len: u16,
    /// Byte length of one record, deletion flag included.
    pub record_len: u16,
    pub field_count: usize,
}

impl TableHeader {
    /// Decode the fixed 32-byte preamble. Rejects the level 7 dialect before
    /// anything else is derived from the buffer.
    pub fn read_from_slice(buf: &[u8]) -> Result<Self> {
        if buf.len() < HEADER_LEN {
            return Err(DbfError::TruncatedInput {
                section: "table header",
                needed: HEADER_LEN as u64,
                available: buf.len() as u64,
            });
        }
        let version = buf[0];
        if !Dialect::from_version(version).is_supported() {
            return Err(DbfError::UnsupportedVersion(version));
        }

        let record_count = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        let header_len = u16::from_le_bytes([buf[8], buf[9]]);
        let record_len = u16::from_le_bytes([buf[10], buf[11]]);
        // Truncating division; a header too short to hold the terminator has no fields.
        let field_count = (header_len.saturating_sub(HEADER_OVERHEAD) / 32) as usize;

        Ok(Self {
            version,
            year: 1900 + buf[1] as u16,
            month: buf[2],
            day: buf[3],
            record_count,
            header_len,
            record_len,
            field_count,
        })
    }

    pub fn dialect(&self) -> Dialect {
        Dialect::from_version(self.version)
    }

    /// Last update as a calendar date, when the stored bytes form one.
    pub fn last_update(&self) -> Option<Date> {
        let month = Month::try_from(self.month).ok()?;
        Date::from_calendar_date(self.year as i32, month, self.day).ok()
    }

    /// End offset of the record area implied by the declared geometry.
    pub fn records_end(&self) -> u64 {
        self.header_len as u64 + self.record_count as u64 * self.record_len as u64
    }
}
