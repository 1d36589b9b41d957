//! Contains the [`WeatherDataset`] structure: the result of one load, with the
//! derived views every consumer (table, charts, cards, exports) reads from.

use crate::export::csv_export::export_csv;
use crate::export::error::ExportError;
use crate::export::json_report::export_json_report;
use crate::export::report::{report_header, ReportHeader};
use crate::export::summary::{compute_quick_metrics, QuickMetrics};
use crate::transform::aggregate::aggregate;
use crate::transform::chart::{to_chart_points, ChartDataPoint};
use crate::transform::flatten::{flatten_columns, FlatRecord};
use crate::transform::header_config::{derive_header_config, visible_columns, HeaderConfig};
use crate::transform::kpi::{compute_kpis, KpiData};
use crate::transform::stats::{compute_stats_with, AgroParams, StatsData};
use crate::types::filters::WeatherFilters;
use crate::types::frequency::Frequency;
use crate::types::row::NormalizedRow;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Normalized rows of one station and date range, together with the filters that
/// produced them and the table layout derived from the first row.
///
/// Instances are typically obtained via [`crate::Inmet::load`]. A dataset is an
/// immutable snapshot: a later load produces a new dataset and leaves this one
/// untouched.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use inmet::{CategoryValue, Frequency, NormalizedRow, StationType, WeatherDataset, WeatherFilters};
///
/// let filters = WeatherFilters::new(
///     StationType::Automatic,
///     "A001",
///     NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
///     Frequency::Daily,
/// );
/// let rows = vec![NormalizedRow::new()
///     .with("Data Medição", "2024-01-01")
///     .with("Chuva", CategoryValue::group([("(mm)", 2.5)]))];
///
/// let dataset = WeatherDataset::new(filters, rows);
/// assert_eq!(dataset.columns, ["Data Medição", "Chuva"]);
/// assert_eq!(dataset.stats().rain_total, 2.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherDataset {
    pub filters: WeatherFilters,
    pub rows: Vec<NormalizedRow>,
    pub header_config: HeaderConfig,
    /// Columns to display, in order. Excludes the hour column for non-hourly queries.
    pub columns: Vec<String>,
}

impl WeatherDataset {
    /// Wraps `rows` and derives the header configuration and visible columns.
    pub fn new(filters: WeatherFilters, rows: Vec<NormalizedRow>) -> Self {
        let header_config = derive_header_config(&rows);
        let columns = visible_columns(&header_config, filters.frequency);
        Self {
            filters,
            rows,
            header_config,
            columns,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Chart series at the requested granularity.
    ///
    /// `Frequency::Hourly` returns one point per row.
    pub fn chart_points(&self, granularity: Frequency) -> Vec<ChartDataPoint> {
        aggregate(&to_chart_points(&self.rows), granularity)
    }

    /// Summary statistics with the default (corn) agronomic thresholds.
    pub fn stats(&self) -> StatsData {
        self.stats_with(&AgroParams::default())
    }

    pub fn stats_with(&self, params: &AgroParams) -> StatsData {
        compute_stats_with(
            &self.rows,
            &self.filters.start.format("%Y-%m-%d").to_string(),
            &self.filters.end.format("%Y-%m-%d").to_string(),
            params,
        )
    }

    pub fn kpis(&self) -> KpiData {
        compute_kpis(&self.rows)
    }

    /// Flat export records over the visible columns.
    pub fn flatten(&self) -> Vec<FlatRecord> {
        flatten_columns(&self.rows, &self.columns)
    }

    /// Writes the dataset as CSV into `dir`.
    ///
    /// # Returns
    ///
    /// The path of the written file, holding the same columns as [`Self::flatten`],
    /// named after the filters
    /// (`INMET_{station}_{start}_{end}.csv`).
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::EmptyDataset`] for an empty dataset, or an I/O error.
    pub fn export_csv(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        export_csv(&self.rows, &self.filters, dir)
    }

    /// Writes the JSON report (`INMET_{station}_relatorio.json`) into `dir`.
    pub fn export_json_report(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        export_json_report(&self.rows, &self.filters, dir)
    }

    /// Summary cards of the printable report.
    pub fn quick_metrics(&self) -> QuickMetrics {
        compute_quick_metrics(&self.rows)
    }

    /// Two-row header of the printable report, over the visible columns.
    pub fn report_header(&self) -> ReportHeader {
        report_header(&self.header_config, &self.columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::normalize::normalize_json;
    use crate::types::frequency::StationType;
    use crate::types::metric::Metric;
    use chrono::NaiveDate;
    use serde_json::json;

    fn dataset(frequency: Frequency) -> WeatherDataset {
        let filters = WeatherFilters::new(
            StationType::Automatic,
            "A001",
            NaiveDate::from_ymd_opt(2024, 1, 30).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 2).unwrap(),
            frequency,
        );
        let rows = [
            ("2024-01-30", "20.0", "1.0"),
            ("2024-01-31", "24.0", "0.0"),
            ("2024-02-01", "26.0", "2.0"),
            ("2024-02-02", "30.0", "0.5"),
        ]
        .into_iter()
        .map(|(date, temp, rain)| {
            normalize_json(
                json!({"DC_NOME": "BRASILIA", "DT_MEDICAO": date, "TEM_INS": temp,
                       "TEM_MAX": temp, "TEM_MIN": temp, "CHUVA": rain}),
                StationType::Automatic,
            )
        })
        .collect();
        WeatherDataset::new(filters, rows)
    }

    #[test]
    fn test_columns_follow_frequency() {
        let daily = dataset(Frequency::Daily);
        assert_eq!(daily.columns.len(), daily.header_config.len() - 1);
        assert!(!daily.columns.iter().any(|c| c == "Hora Medição"));

        let hourly = dataset(Frequency::Hourly);
        assert_eq!(hourly.columns.len(), hourly.header_config.len());
    }

    #[test]
    fn test_derived_views() {
        let ds = dataset(Frequency::Daily);
        assert_eq!(ds.len(), 4);

        let monthly = ds.chart_points(Frequency::Monthly);
        assert_eq!(monthly.len(), 2);
        assert_eq!(monthly[0].get(Metric::Rain), Some(1.0));
        assert_eq!(monthly[1].get(Metric::Rain), Some(2.5));
        assert_eq!(ds.chart_points(Frequency::Hourly).len(), 4);

        let stats = ds.stats();
        assert_eq!(stats.record_count, 4);
        assert_eq!(stats.date_range, "30/01/2024 - 02/02/2024");
        assert_eq!(stats.rain_days, 3);

        let kpis = ds.kpis();
        assert_eq!(kpis.temp_avg, Some(25.0));
        assert_eq!(kpis.temp_max, Some(30.0));

        assert_eq!(ds.flatten().len(), 4);
        assert!(!ds.report_header().categories.iter().any(|c| c.label == "Hora Medição"));
    }

    #[test]
    fn test_export_csv_uses_filters_for_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dataset(Frequency::Daily).export_csv(dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "INMET_A001_20240130_20240202.csv"
        );
    }

    #[test]
    fn test_daily_exports_match_visible_columns() {
        let ds = dataset(Frequency::Daily);
        let flat = ds.flatten();
        assert!(!flat[0].headers().iter().any(|h| h.starts_with("Hora Medição")));
        assert_eq!(flat[0].headers()[..2], ["Nome", "UF"]);

        let dir = tempfile::tempdir().unwrap();
        let path = ds.export_csv(dir.path()).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        let header = text.trim_start_matches('\u{feff}').lines().next().unwrap();
        assert_eq!(header.split(';').collect::<Vec<_>>(), flat[0].headers());

        let hourly = dataset(Frequency::Hourly).flatten();
        assert_eq!(hourly[0].headers()[2], "Hora Medição - UTC");
    }

    #[test]
    fn test_report_views() {
        let ds = dataset(Frequency::Daily);
        let metrics = ds.quick_metrics();
        assert_eq!(metrics.temp_avg, Some(25.0));
        assert_eq!(metrics.rain_total, 3.5);
        assert_eq!(metrics.record_count, 4);

        let dir = tempfile::tempdir().unwrap();
        let path = ds.export_json_report(dir.path()).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "INMET_A001_relatorio.json"
        );
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(value["metadata"]["periodo"], "2024-01-30 a 2024-02-02");
        assert_eq!(value["dados"].as_array().map(Vec::len), Some(4));
    }

    #[test]
    fn test_empty_dataset() {
        let ds = WeatherDataset::new(dataset(Frequency::Daily).filters, Vec::new());
        assert!(ds.is_empty());
        assert!(ds.header_config.is_empty());
        assert!(ds.columns.is_empty());
        assert!(ds.chart_points(Frequency::Weekly).is_empty());
        assert!(matches!(
            ds.export_csv(Path::new(".")),
            Err(ExportError::EmptyDataset)
        ));
    }
}
