use std::io::BufWriter;
use std::path::{Path, PathBuf};

use dbf_core::error::{DbfError, Result};
use dbf_core::{
    ConvertOptions, MergeOptions, TabularWriter, convert_dir, convert_file, info_file, plan_dir,
};
use tempfile::NamedTempFile;

pub fn handle_convert(input: PathBuf, to_file: bool) -> Result<()> {
    let opts = ConvertOptions { to_file };
    let stdout = BufWriter::new(std::io::stdout().lock());
    if let Some(out) = convert_file(&input, &opts, stdout)? {
        eprintln!("convert: {} -> {}", input.display(), out.display());
    }
    Ok(())
}

pub fn handle_convert_dir(dir: PathBuf, ext: Option<String>) -> Result<()> {
    let summary = convert_dir(&dir, ext)?;
    for (name, err) in &summary.failed {
        eprintln!("convert-dir: {name} failed: {err}");
    }
    eprintln!("convert-dir: {} files converted", summary.converted.len());
    if !summary.failed.is_empty() {
        return Err(std::io::Error::other(format!(
            "{} of {} files failed",
            summary.failed.len(),
            summary.failed.len() + summary.converted.len()
        ))
        .into());
    }
    Ok(())
}

pub fn handle_merge(
    dir: PathBuf,
    no_source_name: bool,
    out: Option<PathBuf>,
    ext: Option<String>,
) -> Result<()> {
    let opts = MergeOptions {
        include_source_name: !no_source_name,
    };
    // The target is never listed, and is only created once every table has decoded.
    let plan = plan_dir(&dir, ext, out.clone())?;
    let Some(p) = out else {
        let mut w = TabularWriter::new(BufWriter::new(std::io::stdout().lock()));
        plan.write(&mut w, &opts)?;
        return Ok(());
    };

    let parent = p
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let mut w = TabularWriter::new(BufWriter::new(NamedTempFile::new_in(parent)?));
    let summary = plan.write(&mut w, &opts)?;
    let tmp = w.into_inner().into_inner().map_err(|e| e.into_error())?;
    tmp.persist(&p).map_err(|e| DbfError::from(e.error))?;
    eprintln!(
        "merge: {} tables, {} records -> {}",
        summary.tables,
        summary.records,
        p.display()
    );
    Ok(())
}

pub fn handle_info(input: PathBuf, json: bool) -> Result<()> {
    let info = info_file(&input)?;
    if json {
        println!("{}", info.to_json()?);
    } else {
        print!("{info}");
    }
    Ok(())
}
