//! Record serialization and file output
//!
//! This module contains the CSV, JSON and JSON-lines writers, the CSV fixture
//! reader used by `validate`, and the file handling around them. The
//! generation core never opens files; everything touching the filesystem
//! lives here.

pub mod csv;
pub mod json;

pub use self::csv::{read_csv, read_csv_file, write_csv};
pub use self::json::{write_json, write_json_lines, RecordView};

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;
use tracing::{debug, instrument};

use crate::generation::error::{GeneratorError, GeneratorResult};
use crate::generation::record::VlanRecord;
use crate::types::OutputFormat;

/// Serialize records in the given format
pub fn write_records<W: Write>(
    records: &[VlanRecord],
    format: OutputFormat,
    writer: W,
) -> GeneratorResult<()> {
    match format {
        OutputFormat::Csv => write_csv(records, writer),
        OutputFormat::Json => write_json(records, writer),
        OutputFormat::JsonLines => write_json_lines(records, writer),
    }
}

/// Write records to `path`, creating parent directories.
///
/// An existing file is only replaced when `force` is set.
#[instrument(skip(records, path), fields(record_count = records.len(), path = %path.as_ref().display()))]
pub fn write_to_path<P: AsRef<Path>>(
    records: &[VlanRecord],
    format: OutputFormat,
    path: P,
    force: bool,
) -> GeneratorResult<()> {
    let path = path.as_ref();

    if path.exists() && !force {
        return Err(GeneratorError::config(
            "write output",
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists (use --force to overwrite)", path.display()),
            ),
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| GeneratorError::config("create output directory", e))?;
    }

    let file = File::create(path).map_err(|e| GeneratorError::config("create output file", e))?;
    let mut writer = BufWriter::new(file);
    write_records(records, format, &mut writer)?;
    writer.flush().map_err(|e| GeneratorError::config("flush output file", e))?;

    debug!("Wrote {} records as {}", records.len(), format);
    Ok(())
}
