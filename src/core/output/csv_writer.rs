//! CSV output writer.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::Path;

use super::ReportRecord;
use crate::config::OutputConfig;
use crate::error::Result;

const UTF8_BOM: &[u8] = "\u{FEFF}".as_bytes();

/// Writes records to a CSV file.
///
/// # Format
/// - Delimiter: `,`
/// - Columns: [`ReportRecord::csv_header`] of the record kind
/// - Encoding: UTF-8, with a BOM if [`OutputConfig::bom`] is set
///
/// Parent directories are created as needed. With no records nothing is
/// written and `Ok(0)` is returned.
///
/// Returns the number of data rows written.
pub fn write_csv<R: ReportRecord>(
    records: &[R],
    path: &Path,
    config: &OutputConfig,
) -> Result<usize> {
    if records.is_empty() {
        log::info!("no {} records; skipping {}", R::KIND.noun(), path.display());
        return Ok(0);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    if config.bom {
        file.write_all(UTF8_BOM)?;
    }
    write_records(file, records)?;

    log::info!("wrote {} rows to {}", records.len(), path.display());
    Ok(records.len())
}

/// Renders records as a CSV string.
///
/// Unlike [`write_csv`], an empty slice still yields the header row.
pub fn to_csv<R: ReportRecord>(records: &[R], config: &OutputConfig) -> Result<String> {
    let mut buffer = Vec::new();
    if config.bom {
        buffer.extend_from_slice(UTF8_BOM);
    }
    buffer = write_records(buffer, records)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

fn write_records<W: Write, R: ReportRecord>(sink: W, records: &[R]) -> Result<W> {
    let mut writer = csv::WriterBuilder::new().from_writer(sink);

    writer.write_record(R::csv_header())?;
    for record in records {
        writer.write_record(record.csv_row())?;
    }

    writer.flush()?;
    let sink = writer.into_inner().map_err(|e| e.into_error())?;
    Ok(sink)
}
