//! In-memory table fixtures for tests.

use crate::container::descriptor::DESCRIPTOR_LEN;
use crate::container::header::HEADER_LEN;

pub const EOF_MARKER: u8 = 0x1a;
const TERMINATOR: u8 = 0x0d;

#[derive(Default)]
pub struct TableBuilder {
    version: u8,
    fields: Vec<(String, u8, u8, u8)>,
    records: Vec<(u8, Vec<Vec<u8>>)>,
    record_len: Option<u16>,
    declared_records: Option<u32>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self {
            version: 3,
            ..Default::default()
        }
    }

    pub fn version(mut self, v: u8) -> Self {
        self.version = v;
        self
    }

    pub fn field(self, name: &str, tag: char, len: u8) -> Self {
        self.field_dec(name, tag, len, 0)
    }

    pub fn field_dec(mut self, name: &str, tag: char, len: u8, dec: u8) -> Self {
        self.fields.push((name.to_string(), tag as u8, len, dec));
        self
    }

    pub fn record_len(mut self, len: u16) -> Self {
        self.record_len = Some(len);
        self
    }

    pub fn declared_records(mut self, n: u32) -> Self {
        self.declared_records = Some(n);
        self
    }

    pub fn record(self, cells: &[&str]) -> Self {
        self.push(b' ', cells.iter().map(|c| c.as_bytes().to_vec()).collect())
    }

    pub fn deleted_record(self, cells: &[&str]) -> Self {
        self.push(b'*', cells.iter().map(|c| c.as_bytes().to_vec()).collect())
    }

    /// Cells given as exact bytes; short cells are still blank padded.
    pub fn raw_record(self, cells: &[&[u8]]) -> Self {
        self.push(b' ', cells.iter().map(|c| c.to_vec()).collect())
    }

    fn push(mut self, marker: u8, cells: Vec<Vec<u8>>) -> Self {
        self.records.push((marker, cells));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let header_len = (HEADER_LEN + self.fields.len() * DESCRIPTOR_LEN + 1) as u16;
        let natural: usize = 1 + self.fields.iter().map(|f| f.2 as usize).sum::<usize>();
        let record_len = self.record_len.unwrap_or(natural as u16);
        let count = self
            .declared_records
            .unwrap_or(self.records.len() as u32);

        let mut buf = vec![0u8; HEADER_LEN];
        buf[0] = self.version;
        buf[1] = 124;
        buf[2] = 1;
        buf[3] = 1;
        buf[4..8].copy_from_slice(&count.to_le_bytes());
        buf[8..10].copy_from_slice(&header_len.to_le_bytes());
        buf[10..12].copy_from_slice(&record_len.to_le_bytes());

        for (name, tag, len, dec) in &self.fields {
            let mut d = [0u8; DESCRIPTOR_LEN];
            let n = name.len().min(10);
            d[..n].copy_from_slice(&name.as_bytes()[..n]);
            d[11] = *tag;
            d[16] = *len;
            d[17] = *dec;
            buf.extend_from_slice(&d);
        }
        buf.push(TERMINATOR);

        for (marker, cells) in &self.records {
            let start = buf.len();
            buf.push(*marker);
            for (i, (_, _, len, _)) in self.fields.iter().enumerate() {
                let len = *len as usize;
                let mut cell = cells.get(i).cloned().unwrap_or_default();
                cell.resize(len, b' ');
                buf.extend_from_slice(&cell);
            }
            buf.resize(start + record_len as usize, b' ');
        }
        buf.push(EOF_MARKER);
        buf
    }
}
