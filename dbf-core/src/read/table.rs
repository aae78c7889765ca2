use std::ops::Range;

use crate::container::descriptor::{FieldDescriptor, read_descriptors};
use crate::container::header::TableHeader;
use crate::error::{DbfError, Result};
use crate::read::records::{DELETION_FLAG_LEN, Record, Records};

/// Header and field descriptors only; the record area is not looked at.
pub fn read_meta(buf: &[u8]) -> Result<(TableHeader, Vec<FieldDescriptor>)> {
    let header = TableHeader::read_from_slice(buf)?;
    tracing::debug!(
        version = header.version,
        records = header.record_count,
        header_len = header.header_len,
        record_len = header.record_len,
        fields = header.field_count,
        "table header"
    );

    let fields = read_descriptors(buf, header.field_count)?;
    for f in fields.iter().filter(|f| !f.field_type.is_known()) {
        tracing::warn!(field = %f.name, tag = %f.field_type.tag(), "unknown field type");
    }
    Ok((header, fields))
}

/// One decode session over a fully buffered table file.
///
/// Construction validates header, descriptors and record geometry in that
/// order, so a `Table` that exists can be walked without further checks.
/// Every session owns its own metadata; nothing is shared between files.
#[derive(Debug, Clone)]
pub struct Table<'a> {
    buf: &'a [u8],
    header: TableHeader,
    fields: Vec<FieldDescriptor>,
    spans: Vec<Range<usize>>,
}

impl<'a> Table<'a> {
    pub fn parse(buf: &'a [u8]) -> Result<Self> {
        let (header, fields) = read_meta(buf)?;

        let mut spans = Vec::with_capacity(fields.len());
        let mut off = DELETION_FLAG_LEN;
        for f in &fields {
            let end = off + f.length as usize;
            spans.push(off..end);
            off = end;
        }
        if off > header.record_len as usize {
            return Err(DbfError::FieldLayout {
                fields_len: off as u64,
                record_len: header.record_len as u64,
            });
        }

        let needed = header.records_end();
        if needed > buf.len() as u64 {
            return Err(DbfError::RecordOutOfBounds {
                needed,
                available: buf.len() as u64,
            });
        }

        Ok(Self {
            buf,
            header,
            fields,
            spans,
        })
    }

    pub fn header(&self) -> &TableHeader {
        &self.header
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Fields whose type tag is outside the known alphabet.
    pub fn unknown_field_types(&self) -> impl Iterator<Item = &FieldDescriptor> + '_ {
        self.fields.iter().filter(|f| !f.field_type.is_known())
    }

    /// Byte range of each field inside a record.
    pub fn field_spans(&self) -> &[Range<usize>] {
        &self.spans
    }

    pub fn record_count(&self) -> usize {
        self.header.record_count as usize
    }

    /// A fresh pass over all records, deleted ones included.
    pub fn records(&self) -> Records<'_> {
        Records::new(
            &self.buf[self.header.header_len as usize..],
            self.header.record_len as usize,
            &self.spans,
            self.record_count(),
        )
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        self.records().nth(index)
    }
}
