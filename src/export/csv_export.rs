use crate::export::error::ExportError;
use crate::transform::flatten::{flat_headers, flatten_columns, FlatRecord};
use crate::transform::header_config::{derive_header_config, visible_columns};
use crate::types::filters::WeatherFilters;
use crate::types::row::NormalizedRow;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Byte order mark written ahead of the CSV so spreadsheet tools detect UTF-8.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Writes flattened records as semicolon-delimited CSV.
///
/// The header row is taken from the first record. A record missing one of those
/// keys gets an empty cell. Fields containing `;`, quotes or line breaks are
/// double-quoted with inner quotes doubled; everything else is written bare.
///
/// # Arguments
/// * `records` - Flattened rows, see [`flatten`]
/// * `writer` - Destination; receives the BOM first
///
/// # Errors
/// Returns [`ExportError::EmptyDataset`] for an empty slice, and I/O or encoding
/// errors from the destination.
pub fn write_csv<W: Write>(records: &[FlatRecord], mut writer: W) -> Result<(), ExportError> {
    if records.is_empty() {
        return Err(ExportError::EmptyDataset);
    }
    let headers = flat_headers(records);

    writer.write_all(UTF8_BOM)?;
    let mut csv_writer = WriterBuilder::new()
        .delimiter(b';')
        .terminator(Terminator::Any(b'\n'))
        .quote_style(QuoteStyle::Necessary)
        .from_writer(writer);

    csv_writer.write_record(&headers)?;
    for record in records {
        csv_writer.write_record(headers.iter().map(|h| {
            record
                .get(h)
                .map(ToString::to_string)
                .unwrap_or_default()
        }))?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Flattens `rows` and writes them to `dir/INMET_{station}_{start}_{end}.csv`.
///
/// Only the columns visible for `filters.frequency` are written, so non-hourly
/// exports carry no hour column.
///
/// # Returns
/// The path of the written file.
///
/// # Errors
/// Returns [`ExportError::EmptyDataset`] when `rows` is empty (no file is
/// created), [`ExportError::FileCreate`] when the file cannot be created, or a
/// write error.
pub fn export_csv(
    rows: &[NormalizedRow],
    filters: &WeatherFilters,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::EmptyDataset);
    }

    let path = dir.join(filters.export_file_name("csv"));
    let file = File::create(&path).map_err(|e| ExportError::FileCreate(path.clone(), e))?;
    let columns = visible_columns(&derive_header_config(rows), filters.frequency);
    write_csv(&flatten_columns(rows, &columns), BufWriter::new(file))?;

    info!("Exported {} rows to {}", rows.len(), path.display());
    Ok(path)
}
