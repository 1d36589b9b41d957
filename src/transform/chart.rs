//! Projection of normalized rows into chart data points.

use crate::transform::extract::metric_value;
use crate::transform::normalize::DATE;
use crate::types::metric::Metric;
use crate::types::row::NormalizedRow;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Fev", "Mar", "Abr", "Mai", "Jun", "Jul", "Ago", "Set", "Out", "Nov", "Dez",
];

/// One point of a chart series: a date key plus one optional value per [`Metric`].
///
/// `None` means "no data", which is distinct from a measured zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartDataPoint {
    /// Display label, e.g. `"05/03"` or `"Mar/24"`.
    pub date: String,
    /// Sortable key the label was built from, e.g. `"2024-03-05"` or `"2024-03"`.
    pub date_raw: String,
    values: [Option<f64>; Metric::COUNT],
}

impl ChartDataPoint {
    /// A point with every metric absent. The label is derived from `date_raw`.
    pub fn new(date_raw: impl Into<String>) -> Self {
        let date_raw = date_raw.into();
        Self {
            date: format_date_label(&date_raw),
            date_raw,
            values: [None; Metric::COUNT],
        }
    }

    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values[metric.index()]
    }

    pub fn set(&mut self, metric: Metric, value: Option<f64>) {
        self.values[metric.index()] = value;
    }

    /// Builder-style variant of [`ChartDataPoint::set`].
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }
}

/// Serializes as `{date, dateRaw, tempMax, ...}` with `null` for absent metrics.
impl Serialize for ChartDataPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2 + Metric::COUNT))?;
        map.serialize_entry("date", &self.date)?;
        map.serialize_entry("dateRaw", &self.date_raw)?;
        for metric in Metric::ALL {
            map.serialize_entry(metric.key(), &self.get(metric))?;
        }
        map.end()
    }
}

/// Builds one chart point per row.
///
/// The raw date is the measurement date up to the first space, so
/// `"2024-03-05 12:00"` keys as `"2024-03-05"`.
pub fn to_chart_points(rows: &[NormalizedRow]) -> Vec<ChartDataPoint> {
    rows.iter()
        .map(|row| {
            let date_raw = row
                .text(DATE)
                .and_then(|d| d.split(' ').next())
                .unwrap_or_default();
            let mut point = ChartDataPoint::new(date_raw);
            for metric in Metric::ALL {
                point.set(metric, metric_value(row, metric));
            }
            point
        })
        .collect()
}

/// Short label for a date key.
///
/// * `YYYY-MM` (monthly bucket) → `Mmm/YY` with Portuguese month names
/// * `YYYY-MM-DD[THH:mm]` → `DD/MM`
/// * `DD/MM[/YYYY]` → `DD/MM`
///
/// Anything else is returned unchanged.
///
/// # Examples
///
/// ```
/// use inmet::format_date_label;
///
/// assert_eq!(format_date_label("2024-03-05"), "05/03");
/// assert_eq!(format_date_label("2024-02"), "Fev/24");
/// assert_eq!(format_date_label("05/03/2024"), "05/03");
/// ```
pub fn format_date_label(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }

    if date.contains('-') {
        let day_part = date.split('T').next().unwrap_or(date);
        let parts: Vec<&str> = day_part.split('-').collect();
        match parts.as_slice() {
            [year, month] => {
                let name = month
                    .parse::<usize>()
                    .ok()
                    .and_then(|m| m.checked_sub(1))
                    .and_then(|i| MONTH_ABBREVIATIONS.get(i));
                if let Some(name) = name {
                    let short_year = year.get(2..).unwrap_or(*year);
                    return format!("{}/{}", name, short_year);
                }
            }
            [_, month, day] => return format!("{}/{}", day, month),
            _ => {}
        }
    }

    if date.contains('/') {
        let mut parts = date.split('/');
        if let (Some(day), Some(month)) = (parts.next(), parts.next()) {
            return format!("{}/{}", day, month);
        }
    }

    date.to_string()
}
