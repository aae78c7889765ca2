use std::fmt;

use serde::Serialize;

use crate::container::descriptor::FieldDescriptor;
use crate::container::header::TableHeader;
use crate::error::Result;

const RULE: &str = "-----------------------------------------------------------";

/// Table metadata report, renderable as text or JSON.
#[derive(Debug, Clone, Serialize)]
pub struct TableInfo {
    pub file: String,
    pub version: u8,
    pub dialect: &'static str,
    /// `YYYY-M-D` as stored, even when it is not a valid calendar date.
    pub last_update: String,
    pub header_len: u16,
    pub record_count: u32,
    pub record_len: u16,
    pub fields: Vec<FieldDescriptor>,
    pub unknown_field_types: Vec<String>,
}

impl TableInfo {
    pub fn from_parts(
        file: impl Into<String>,
        h: &TableHeader,
        fields: Vec<FieldDescriptor>,
    ) -> Self {
        let unknown_field_types = fields
            .iter()
            .filter(|f| !f.field_type.is_known())
            .map(|f| f.name.clone())
            .collect();
        Self {
            file: file.into(),
            version: h.version,
            dialect: h.dialect().label(),
            last_update: format!("{}-{}-{}", h.year, h.month, h.day),
            header_len: h.header_len,
            record_count: h.record_count,
            record_len: h.record_len,
            fields,
            unknown_field_types,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{RULE}")?;
        writeln!(f, "{}: table information", self.file)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "Format: {} (version {:#04x})", self.dialect, self.version)?;
        writeln!(f, "Date of last update: {}", self.last_update)?;
        writeln!(f, "Number of bytes in header: {}", self.header_len)?;
        writeln!(f, "Number of records: {}", self.record_count)?;
        writeln!(f, "Number of bytes in a record: {}", self.record_len)?;
        writeln!(f, "{RULE}")?;
        writeln!(f, "List of fields:")?;
        writeln!(f, "ID | NAME | FORMAT")?;
        for (i, fd) in self.fields.iter().enumerate() {
            writeln!(
                f,
                "{} | {} | {}({}, {})",
                i + 1,
                fd.name,
                fd.field_type,
                fd.length,
                fd.decimals
            )?;
        }
        Ok(())
    }
}
