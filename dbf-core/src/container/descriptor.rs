use crate::container::header::HEADER_LEN;
use crate::error::{DbfError, Result};
use serde::Serialize;
use std::fmt;

pub const DESCRIPTOR_LEN: usize = 32;
pub const NAME_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldType {
    Text,
    Numeric,
    Float,
    Logical,
    Date,
    Memo,
    /// Tag outside the known alphabet. Bytes are still extracted as text.
    Unknown(char),
}

impl FieldType {
    pub fn from_tag(tag: u8) -> Self {
        match tag {
            b'C' => FieldType::Text,
            b'N' => FieldType::Numeric,
            b'F' => FieldType::Float,
            b'L' => FieldType::Logical,
            b'D' => FieldType::Date,
            b'M' => FieldType::Memo,
            other => FieldType::Unknown(other as char),
        }
    }

    pub fn tag(self) -> char {
        match self {
            FieldType::Text => 'C',
            FieldType::Numeric => 'N',
            FieldType::Float => 'F',
            FieldType::Logical => 'L',
            FieldType::Date => 'D',
            FieldType::Memo => 'M',
            FieldType::Unknown(c) => c,
        }
    }

    pub fn is_known(self) -> bool {
        !matches!(self, FieldType::Unknown(_))
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Text => f.write_str("text"),
            FieldType::Numeric => f.write_str("numeric"),
            FieldType::Float => f.write_str("float"),
            FieldType::Logical => f.write_str("logical"),
            FieldType::Date => f.write_str("date"),
            FieldType::Memo => f.write_str("memo"),
            FieldType::Unknown(c) => write!(f, "UnknownFieldType({})", c.escape_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub field_type: FieldType,
    pub length: u8,
    pub decimals: u8,
}

/// Read `count` descriptor blocks starting right after the table header.
///
/// Layout of one block: `[0..10]` name (NUL padded), `[11]` type tag,
/// `[16]` length, `[17]` decimal count. Other bytes are reserved.
pub fn read_descriptors(buf: &[u8], count: usize) -> Result<Vec<FieldDescriptor>> {
    let need = HEADER_LEN as u64 + count as u64 * DESCRIPTOR_LEN as u64;
    if (buf.len() as u64) < need {
        return Err(DbfError::TruncatedInput {
            section: "field descriptors",
            needed: need,
            available: buf.len() as u64,
        });
    }

    let mut out = Vec::with_capacity(count);
    let mut off = HEADER_LEN;
    for i in 0..count {
        let d = &buf[off..off + DESCRIPTOR_LEN];
        let field = FieldDescriptor {
            name: field_name(&d[..NAME_LEN]),
            field_type: FieldType::from_tag(d[11]),
            length: d[16],
            decimals: d[17],
        };
        tracing::trace!(
            index = i,
            name = %field.name,
            tag = %field.field_type.tag(),
            len = field.length,
            dec = field.decimals,
            "field descriptor"
        );
        out.push(field);
        off += DESCRIPTOR_LEN;
    }
    Ok(out)
}

fn field_name(raw: &[u8]) -> String {
    String::from_utf8_lossy(raw)
        .trim_matches(|c: char| c == '\0' || c.is_whitespace())
        .to_string()
}
