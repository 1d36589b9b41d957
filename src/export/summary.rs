//! Summary cards printed beside the report charts.

use crate::transform::extract::extract_numeric_value;
use crate::transform::normalize::{HUMIDITY, PRESSURE, RAIN, TEMPERATURE, WIND};
use crate::transform::stats::mean;
use crate::types::row::{NormalizedRow, MISSING_CELL};
use serde::Serialize;

const TEMPERATURE_ALIASES: [&str; 3] = ["Inst.", "Med.", "Med"];
const HUMIDITY_ALIASES: [&str; 3] = ["Inst.", "Med.", "Med"];
const RAIN_ALIASES: [&str; 2] = ["(mm)", "mm"];
const WIND_ALIASES: [&str; 3] = ["Vel. (m/s)", "Vel.", "Vel"];
// Manual stations label their single pressure reading "hPa".
const PRESSURE_ALIASES: [&str; 3] = ["Inst.", "Med.", "hPa"];

/// Period means of the report summary. Each mean is `None` when no row carries
/// the reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickMetrics {
    pub temp_avg: Option<f64>,
    pub humidity_avg: Option<f64>,
    pub rain_total: f64,
    pub wind_avg: Option<f64>,
    pub pressure_avg: Option<f64>,
    pub record_count: usize,
}

/// One labelled, formatted summary card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickMetric {
    pub label: &'static str,
    pub value: String,
}

impl QuickMetrics {
    /// The six report cards in display order. Empty for an empty dataset.
    pub fn cards(&self) -> Vec<QuickMetric> {
        if self.record_count == 0 {
            return Vec::new();
        }
        let card = |label, value| QuickMetric { label, value };
        vec![
            card("Temperatura Média", or_missing(self.temp_avg, |t| format!("{t:.1}°C"))),
            card("Umidade Média", or_missing(self.humidity_avg, |h| format!("{h:.0}%"))),
            card("Precipitação Total", format!("{:.1} mm", self.rain_total)),
            card("Vento Médio", or_missing(self.wind_avg, |w| format!("{w:.1} m/s"))),
            card("Pressão Média", or_missing(self.pressure_avg, |p| format!("{p:.1} hPa"))),
            card("Total de Registros", self.record_count.to_string()),
        ]
    }
}

fn or_missing(value: Option<f64>, format: impl Fn(f64) -> String) -> String {
    value.map(format).unwrap_or_else(|| MISSING_CELL.to_string())
}

/// Computes the report summary over all rows.
///
/// # Examples
///
/// ```
/// use inmet::{compute_quick_metrics, CategoryValue, NormalizedRow};
///
/// let rows = vec![
///     NormalizedRow::new().with("Pressão", CategoryValue::group([("Inst.", 886.0)])),
///     NormalizedRow::new().with("Pressão", CategoryValue::group([("Inst.", 888.0)])),
/// ];
/// let metrics = compute_quick_metrics(&rows);
/// assert_eq!(metrics.pressure_avg, Some(887.0));
/// assert_eq!(metrics.temp_avg, None);
/// ```
pub fn compute_quick_metrics(rows: &[NormalizedRow]) -> QuickMetrics {
    let collect = |category: &str, aliases: &[&str]| -> Vec<f64> {
        rows.iter()
            .filter_map(|row| extract_numeric_value(row.get(category), aliases))
            .collect()
    };

    QuickMetrics {
        temp_avg: mean(&collect(TEMPERATURE, &TEMPERATURE_ALIASES)),
        humidity_avg: mean(&collect(HUMIDITY, &HUMIDITY_ALIASES)),
        rain_total: collect(RAIN, &RAIN_ALIASES).iter().fold(0.0, |acc, r| acc + r),
        wind_avg: mean(&collect(WIND, &WIND_ALIASES)),
        pressure_avg: mean(&collect(PRESSURE, &PRESSURE_ALIASES)),
        record_count: rows.len(),
    }
}
