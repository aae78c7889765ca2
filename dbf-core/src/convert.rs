use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{DbfError, Result};
use crate::info::TableInfo;
use crate::merge::{MergeOptions, MergePlan, MergeSummary};
use crate::read::table::{Table, read_meta};
use crate::source_factory::{Backend, open_source};
use crate::write::tabular::TabularWriter;

pub const OUTPUT_EXTENSION: &str = "csv";

#[derive(Clone, Debug, Default)]
pub struct ConvertOptions {
    /// Write `<stem>.csv` beside the input instead of to the given writer.
    pub to_file: bool,
}

#[derive(Debug, Default)]
pub struct DirSummary {
    pub converted: Vec<PathBuf>,
    pub failed: Vec<(String, DbfError)>,
}

/// Output path for a converted table: same location, `csv` extension.
pub fn output_path(input: &Path) -> PathBuf {
    input.with_extension(OUTPUT_EXTENSION)
}

/// Header line then one line per record. Returns the record count.
pub fn write_table<W: Write>(table: &Table<'_>, out: &mut TabularWriter<W>) -> Result<u64> {
    out.write_header(table.field_names())?;
    let before = out.rows();
    for rec in table.records() {
        out.write_record(None, &rec)?;
    }
    out.flush()?;
    Ok(out.rows() - before)
}

fn display_name(p: &Path) -> String {
    p.display().to_string()
}

/// Decode one file. With `to_file` the result goes to [`output_path`] and
/// that path is returned; otherwise it goes to `stdout`.
///
/// Nothing is written, and no output file is created, unless the whole
/// table decodes.
pub fn convert_file<W: Write>(
    input: &Path,
    opts: &ConvertOptions,
    stdout: W,
) -> Result<Option<PathBuf>> {
    let name = display_name(input);
    let bytes = std::fs::read(input).map_err(|e| DbfError::from(e).in_file(&name))?;
    let table = Table::parse(&bytes).map_err(|e| e.in_file(&name))?;

    if opts.to_file {
        let outp = output_path(input);
        tracing::info!(input = %name, output = %outp.display(), "writing");
        let f = File::create(&outp)
            .map_err(|e| DbfError::from(e).in_file(display_name(&outp)))?;
        let n = write_table(&table, &mut TabularWriter::new(BufWriter::new(f)))?;
        tracing::debug!(records = n, "converted");
        Ok(Some(outp))
    } else {
        let n = write_table(&table, &mut TabularWriter::new(stdout))?;
        tracing::debug!(input = %name, records = n, "converted");
        Ok(None)
    }
}

/// Convert every table in `dir` to its own output file. A table that fails
/// is recorded and the batch moves on.
pub fn convert_dir(dir: &Path, extension: Option<String>) -> Result<DirSummary> {
    let source = open_source(
        Backend::Fs {
            extension,
            exclude: None,
        },
        dir,
    )?;
    let opts = ConvertOptions { to_file: true };
    let mut summary = DirSummary::default();
    for entry in source.list_tables()? {
        tracing::info!(table = %entry.name, "converting");
        match convert_file(&entry.path, &opts, std::io::sink()) {
            Ok(Some(outp)) => summary.converted.push(outp),
            Ok(None) => {}
            Err(e) => {
                tracing::error!(table = %entry.name, error = %e, "conversion failed");
                summary.failed.push((entry.name, e));
            }
        }
    }
    tracing::info!(
        converted = summary.converted.len(),
        failed = summary.failed.len(),
        "directory done"
    );
    Ok(summary)
}

/// Read and validate every table of `dir` without writing anything.
/// `exclude` is left out of the listing.
pub fn plan_dir(
    dir: &Path,
    extension: Option<String>,
    exclude: Option<PathBuf>,
) -> Result<MergePlan> {
    let source = open_source(Backend::Fs { extension, exclude }, dir)?;
    MergePlan::collect(source.as_ref())
}

/// Concatenate all tables of `dir` into `out`. Nothing reaches `out` unless
/// every table decodes.
pub fn merge_dir<W: Write>(
    dir: &Path,
    extension: Option<String>,
    opts: &MergeOptions,
    out: W,
) -> Result<MergeSummary> {
    plan_dir(dir, extension, None)?.write(&mut TabularWriter::new(out), opts)
}

/// Header and field metadata only; a short record area does not fail it.
pub fn info_file(input: &Path) -> Result<TableInfo> {
    let name = display_name(input);
    let bytes = std::fs::read(input).map_err(|e| DbfError::from(e).in_file(&name))?;
    let (header, fields) = read_meta(&bytes).map_err(|e| e.in_file(&name))?;
    Ok(TableInfo::from_parts(name, &header, fields))
}
