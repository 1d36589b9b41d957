//! JSON report: the normalized rows with a small metadata header.

use crate::export::error::ExportError;
use crate::types::filters::WeatherFilters;
use crate::types::frequency::{Frequency, StationType};
use crate::types::row::NormalizedRow;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetadata {
    #[serde(rename = "estacao")]
    pub station: String,
    /// `"{start} a {end}"`, dates as `YYYY-MM-DD`.
    #[serde(rename = "periodo")]
    pub period: String,
    #[serde(rename = "frequencia")]
    pub frequency: Frequency,
    #[serde(rename = "tipoEstacao")]
    pub station_type: StationType,
    #[serde(rename = "geradoEm")]
    pub generated_at: DateTime<Utc>,
}

impl ReportMetadata {
    pub fn new(filters: &WeatherFilters, generated_at: DateTime<Utc>) -> Self {
        Self {
            station: filters.station.clone(),
            period: format!(
                "{} a {}",
                filters.start.format("%Y-%m-%d"),
                filters.end.format("%Y-%m-%d")
            ),
            frequency: filters.frequency,
            station_type: filters.station_type,
            generated_at,
        }
    }
}

/// Serialized as `{"metadata": {...}, "dados": [...]}`; rows keep their
/// category order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonReport<'a> {
    pub metadata: ReportMetadata,
    #[serde(rename = "dados")]
    pub rows: &'a [NormalizedRow],
}

impl<'a> JsonReport<'a> {
    pub fn new(
        rows: &'a [NormalizedRow],
        filters: &WeatherFilters,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: ReportMetadata::new(filters, generated_at),
            rows,
        }
    }
}

/// Writes the report as pretty-printed JSON.
pub fn write_json_report<W: Write>(report: &JsonReport<'_>, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

/// Writes `rows` to `dir/INMET_{station}_relatorio.json`, stamped with the
/// current time.
///
/// # Errors
/// Returns [`ExportError::EmptyDataset`] when `rows` is empty (no file is
/// created), [`ExportError::FileCreate`] when the file cannot be created, or a
/// write error.
pub fn export_json_report(
    rows: &[NormalizedRow],
    filters: &WeatherFilters,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    if rows.is_empty() {
        return Err(ExportError::EmptyDataset);
    }

    let path = dir.join(filters.report_file_name("json"));
    let file = File::create(&path).map_err(|e| ExportError::FileCreate(path.clone(), e))?;
    let mut writer = BufWriter::new(file);
    write_json_report(&JsonReport::new(rows, filters, Utc::now()), &mut writer)?;
    writer.flush()?;

    info!("Exported JSON report of {} rows to {}", rows.len(), path.display());
    Ok(path)
}
