use std::borrow::Cow;
use std::iter::FusedIterator;
use std::ops::Range;

pub const DELETION_FLAG_LEN: usize = 1;

/// Lazy pass over the record area. Cloning yields an independent cursor.
#[derive(Debug, Clone)]
pub struct Records<'t> {
    area: &'t [u8],
    record_len: usize,
    spans: &'t [Range<usize>],
    next: usize,
    end: usize,
}

impl<'t> Records<'t> {
    // `area` must hold at least `count * record_len` bytes and every span
    // must end within `record_len`; `Table::parse` checks both.
    pub(crate) fn new(
        area: &'t [u8],
        record_len: usize,
        spans: &'t [Range<usize>],
        count: usize,
    ) -> Self {
        Self {
            area,
            record_len,
            spans,
            next: 0,
            end: count,
        }
    }
}

impl<'t> Iterator for Records<'t> {
    type Item = Record<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let index = self.next;
        self.next += 1;
        let start = index * self.record_len;
        Some(Record {
            index,
            bytes: &self.area[start..start + self.record_len],
            spans: self.spans,
        })
    }

    fn nth(&mut self, n: usize) -> Option<Self::Item> {
        self.next = self.next.saturating_add(n).min(self.end);
        self.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl ExactSizeIterator for Records<'_> {}
impl FusedIterator for Records<'_> {}

/// One fixed-length record window.
#[derive(Debug, Clone, Copy)]
pub struct Record<'t> {
    index: usize,
    bytes: &'t [u8],
    spans: &'t [Range<usize>],
}

impl<'t> Record<'t> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn raw(&self) -> &'t [u8] {
        self.bytes
    }

    /// Deletion marker is anything other than a blank. Records are never
    /// filtered on it.
    pub fn is_deleted(&self) -> bool {
        self.bytes[0] != b' '
    }

    pub fn cell(&self, field: usize) -> Option<Cow<'t, str>> {
        let span = self.spans.get(field)?;
        Some(decode_cell(&self.bytes[span.clone()]))
    }

    /// Cells in field-declaration order, one per field.
    pub fn cells(&self) -> Cells<'t> {
        Cells {
            bytes: self.bytes,
            spans: self.spans.iter(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Cells<'t> {
    bytes: &'t [u8],
    spans: std::slice::Iter<'t, Range<usize>>,
}

impl<'t> Iterator for Cells<'t> {
    type Item = Cow<'t, str>;

    fn next(&mut self) -> Option<Self::Item> {
        let span = self.spans.next()?;
        Some(decode_cell(&self.bytes[span.clone()]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.spans.size_hint()
    }
}

impl ExactSizeIterator for Cells<'_> {}

/// Bytes pass through as text; NUL padding counts as whitespace.
pub fn decode_cell(raw: &[u8]) -> Cow<'_, str> {
    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(s) => Cow::Borrowed(trim_cell(s)),
        Cow::Owned(s) => Cow::Owned(trim_cell(&s).to_owned()),
    }
}

fn trim_cell(s: &str) -> &str {
    s.trim_matches(|c: char| c == '\0' || c.is_whitespace())
}
