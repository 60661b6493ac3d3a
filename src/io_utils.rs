//! I/O helpers for CSV readers/writers and atomic file replacement.
//!
//! Every file the pipeline produces is written through [`write_atomic`]:
//! content is staged in a temporary file next to the destination and then
//! persisted over it, so a failed run never leaves a half-written snapshot
//! or report behind.

use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::Path,
};

use csv::QuoteStyle;
use tempfile::NamedTempFile;

use crate::error::{ExoplanetError, Result};

pub fn is_dash(path: &Path) -> bool {
    path == Path::new("-")
}

pub fn open_csv_reader<R>(reader: R) -> csv::Reader<R>
where
    R: Read,
{
    let mut builder = csv::ReaderBuilder::new();
    builder
        .has_headers(true)
        .double_quote(true)
        .flexible(false);
    builder.from_reader(reader)
}

pub fn csv_writer<W>(writer: W) -> csv::Writer<W>
where
    W: Write,
{
    let mut builder = csv::WriterBuilder::new();
    builder
        .quote_style(QuoteStyle::Necessary)
        .double_quote(true);
    builder.from_writer(writer)
}

pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Writes the output of `fill` to `path`, replacing any previous file only
/// once `fill` has succeeded and the buffer is flushed.
pub fn write_atomic<F>(path: &Path, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    ensure_parent_dir(path)?;
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => parent.to_path_buf(),
        None => std::env::current_dir()?,
    };
    let staged = NamedTempFile::new_in(&dir)?;
    {
        let mut writer = BufWriter::new(staged.as_file());
        fill(&mut writer)?;
        writer.flush()?;
    }
    staged
        .persist(path)
        .map_err(|err| ExoplanetError::Persist {
            path: path.display().to_string(),
            source: err.error,
        })?;
    Ok(())
}

/// Writes to stdout when `path` is `None` or `-`, otherwise atomically to
/// the file.
pub fn write_to_path_or_stdout<F>(path: Option<&Path>, fill: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> Result<()>,
{
    match path {
        Some(p) if !is_dash(p) => write_atomic(p, fill),
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            fill(&mut handle)?;
            handle.flush()?;
            Ok(())
        }
    }
}
