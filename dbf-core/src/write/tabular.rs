use std::io::Write;

use crate::error::Result;
use crate::read::records::Record;

pub const DELIMITER: char = ';';
pub const LINE_END: char = '\n';

/// Delimiter-joined line writer. Cell text is written as is: a delimiter
/// inside a value is not quoted or escaped.
pub struct TabularWriter<W: Write> {
    w: W,
    rows: u64,
}

impl<W: Write> TabularWriter<W> {
    pub fn new(w: W) -> Self {
        Self { w, rows: 0 }
    }

    pub fn write_header<I, S>(&mut self, names: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.write_line(names)
    }

    /// Write one record, optionally led by an extra cell (the source name in
    /// a merge).
    pub fn write_record(&mut self, lead: Option<&str>, record: &Record<'_>) -> Result<()> {
        let cells = record.cells();
        match lead {
            Some(l) => self.write_line(std::iter::once(l.into()).chain(cells))?,
            None => self.write_line(cells)?,
        }
        self.rows += 1;
        Ok(())
    }

    pub fn write_line<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut d = [0u8; 4];
        let delim = DELIMITER.encode_utf8(&mut d).as_bytes();
        for (i, c) in cells.into_iter().enumerate() {
            if i > 0 {
                self.w.write_all(delim)?;
            }
            self.w.write_all(c.as_ref().as_bytes())?;
        }
        self.w.write_all(&[LINE_END as u8])?;
        Ok(())
    }

    /// Record lines written so far (header lines excluded).
    pub fn rows(&self) -> u64 {
        self.rows
    }

    pub fn flush(&mut self) -> Result<()> {
        self.w.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}

/// Join cells into one line, terminator included.
pub fn encode_line<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for (i, c) in cells.into_iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        out.push_str(c.as_ref());
    }
    out.push(LINE_END);
    out
}

/// Split one line back into cells. Only exact for cells without delimiters.
pub fn split_line(line: &str) -> Vec<&str> {
    line.strip_suffix(LINE_END)
        .unwrap_or(line)
        .split(DELIMITER)
        .collect()
}
