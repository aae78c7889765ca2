use std::io::Write;

use crate::error::Result;
use crate::read::table::Table;
use crate::source::TableSource;
use crate::write::tabular::TabularWriter;

/// Header name of the leading source-name column.
pub const SOURCE_COLUMN: &str = "FROM_FILE";

#[derive(Clone, Debug)]
pub struct MergeOptions {
    /// Lead every row with the name of the table it came from.
    pub include_source_name: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self {
            include_source_name: true,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub tables: usize,
    pub records: u64,
}

/// Every table of a source, read and decoded up front.
///
/// Building a plan is the only step that can fail on table content, so a
/// merge either writes every table or writes nothing.
#[derive(Debug, Default)]
pub struct MergePlan {
    tables: Vec<(String, Vec<u8>)>,
}

impl MergePlan {
    /// Read and validate every table of `source`, in listing order. The
    /// first table that fails to read or decode aborts with its name.
    pub fn collect<S>(source: &S) -> Result<Self>
    where
        S: TableSource + ?Sized,
    {
        let mut tables = Vec::new();
        for entry in source.list_tables()? {
            let bytes = source
                .read_table(&entry)
                .map_err(|e| e.in_file(&entry.name))?;
            let table = Table::parse(&bytes).map_err(|e| e.in_file(&entry.name))?;
            tracing::debug!(table = %entry.name, records = table.record_count(), "validated");
            tables.push((entry.name, bytes));
        }
        Ok(Self { tables })
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.tables.iter().map(|(n, _)| n.as_str())
    }

    /// Concatenate the planned tables under the first table's header.
    ///
    /// Field lists of later tables are not compared against the first one.
    pub fn write<W: Write>(
        &self,
        out: &mut TabularWriter<W>,
        opts: &MergeOptions,
    ) -> Result<MergeSummary> {
        let mut summary = MergeSummary::default();
        for (name, bytes) in &self.tables {
            // Metadata lives and dies with this iteration.
            let table = Table::parse(bytes).map_err(|e| e.in_file(name))?;

            if summary.tables == 0 {
                let lead = opts.include_source_name.then_some(SOURCE_COLUMN);
                out.write_header(lead.into_iter().chain(table.field_names()))?;
            }

            let lead = opts.include_source_name.then_some(name.as_str());
            let before = out.rows();
            for rec in table.records() {
                out.write_record(lead, &rec)?;
            }
            let written = out.rows() - before;
            tracing::info!(table = %name, records = written, "merged");

            summary.tables += 1;
            summary.records += written;
        }
        out.flush()?;
        Ok(summary)
    }
}

/// Concatenate every table of `source`, in listing order, under the first
/// table's header. Nothing is written unless every table decodes.
pub fn merge<S, W>(
    source: &S,
    out: &mut TabularWriter<W>,
    opts: &MergeOptions,
) -> Result<MergeSummary>
where
    S: TableSource + ?Sized,
    W: Write,
{
    MergePlan::collect(source)?.write(out, opts)
}
