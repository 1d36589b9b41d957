mod api;
mod dataset;
mod error;
mod export;
mod inmet;
mod transform;
mod types;
mod utils;

pub use error::InmetError;
pub use inmet::*;
pub use dataset::WeatherDataset;

pub use api::client::{parse_base_url, ApiClient};
pub use api::error::ApiError;
pub use utils::{resolve_base_url, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

pub use types::filters::*;
pub use types::frequency::*;
pub use types::metric::{Metric, MetricCategory};
pub use types::raw_record::*;
pub use types::row::*;
pub use types::station::*;

pub use transform::aggregate::{aggregate, bucket_key, week_start};
pub use transform::chart::{format_date_label, to_chart_points, ChartDataPoint};
pub use transform::extract::{extract_numeric_value, metric_value};
pub use transform::flatten::{
    flat_headers, flatten, flatten_columns, format_date, FlatRecord, KEY_SEPARATOR,
};
pub use transform::header_config::{derive_header_config, visible_columns, HeaderConfig};
pub use transform::kpi::{compass_point, compute_kpis, KpiData, TempGradient};
pub use transform::normalize::{normalize, normalize_json};
pub use transform::stats::{
    calculate_gdd, compute_stats, compute_stats_with, daily_gdd, evapotranspiration_estimate,
    std_dev, AgroParams, DayExtremes, StatsData,
};

/// Category names of normalized rows.
pub mod categories {
    pub use crate::transform::normalize::{
        CLOUDINESS, DATE, DEW_POINT, HOUR, HUMIDITY, INSOLATION, LATITUDE, LONGITUDE, NAME,
        PRESSURE, RADIATION, RAIN, STATE, TEMPERATURE, WIND,
    };
}

pub use export::csv_export::{export_csv, write_csv, UTF8_BOM};
pub use export::error::ExportError;
pub use export::json_report::{export_json_report, write_json_report, JsonReport, ReportMetadata};
pub use export::report::{report_header, HeaderCell, ReportHeader};
pub use export::summary::{compute_quick_metrics, QuickMetric, QuickMetrics};
