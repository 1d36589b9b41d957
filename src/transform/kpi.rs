//! Values shown on the four KPI cards: temperature, precipitation, wind and humidity.

use crate::transform::extract::{extract_numeric_value, metric_value};
use crate::transform::normalize::WIND;
use crate::transform::stats::mean;
use crate::types::metric::Metric;
use crate::types::row::NormalizedRow;
use serde::Serialize;

const WIND_DIRECTION_ALIASES: [&str; 2] = ["Dir.", "Dir"];

const COMPASS_POINTS: [&str; 8] = ["N", "NE", "L", "SE", "S", "SO", "O", "NO"];

/// Temperature tint of the temperature card, decided by the period mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TempGradient {
    /// Mean above 25 °C.
    Hot,
    /// Mean below 15 °C.
    Cold,
    #[default]
    Neutral,
}

impl TempGradient {
    pub fn from_mean(mean: Option<f64>) -> Self {
        match mean {
            Some(t) if t > 25.0 => TempGradient::Hot,
            Some(t) if t < 15.0 => TempGradient::Cold,
            _ => TempGradient::Neutral,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiData {
    pub temp_avg: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_gradient: TempGradient,

    /// `None` only for an empty dataset.
    pub rain_total: Option<f64>,
    /// Records with rain > 0.
    pub rain_days: usize,

    pub wind_avg: Option<f64>,
    /// Largest of all gust and speed readings.
    pub wind_max: Option<f64>,
    /// Arithmetic mean of the numeric directions in degrees, `0` without samples.
    /// This is not a circular mean: 350° and 10° average to 180°.
    pub wind_direction: f64,

    pub humidity_avg: Option<f64>,
    pub humidity_min: Option<f64>,
}

impl KpiData {
    /// Whether the precipitation card should show "dry period".
    pub fn is_dry(&self) -> bool {
        self.rain_total.map_or(true, |total| total == 0.0)
    }
}

fn fold_max(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(v)) => Some(a.max(v)),
        (None, v) => v,
        (a, None) => a,
    }
}

fn fold_min(acc: Option<f64>, value: Option<f64>) -> Option<f64> {
    match (acc, value) {
        (Some(a), Some(v)) => Some(a.min(v)),
        (None, v) => v,
        (a, None) => a,
    }
}

/// Computes the KPI card values of a dataset.
///
/// # Examples
///
/// ```
/// use inmet::{compute_kpis, TempGradient};
///
/// let kpis = compute_kpis(&[]);
/// assert_eq!(kpis.temp_avg, None);
/// assert_eq!(kpis.rain_total, None);
/// assert_eq!(kpis.temp_gradient, TempGradient::Neutral);
/// ```
pub fn compute_kpis(rows: &[NormalizedRow]) -> KpiData {
    if rows.is_empty() {
        return KpiData::default();
    }

    let mut temps = Vec::new();
    let mut temp_max = None;
    let mut temp_min = None;
    let mut rain_total = 0.0;
    let mut rain_days = 0;
    let mut wind_speeds = Vec::new();
    let mut wind_max = None;
    let mut directions = Vec::new();
    let mut humidities = Vec::new();
    let mut humidity_min = None;

    for row in rows {
        if let Some(t) = metric_value(row, Metric::TempInst) {
            temps.push(t);
        }
        temp_max = fold_max(temp_max, metric_value(row, Metric::TempMax));
        temp_min = fold_min(temp_min, metric_value(row, Metric::TempMin));

        if let Some(rain) = metric_value(row, Metric::Rain) {
            rain_total += rain;
            if rain > 0.0 {
                rain_days += 1;
            }
        }

        let speed = metric_value(row, Metric::WindSpeed);
        if let Some(s) = speed {
            wind_speeds.push(s);
        }
        wind_max = fold_max(wind_max, metric_value(row, Metric::WindGust));
        wind_max = fold_max(wind_max, speed);
        if let Some(d) = extract_numeric_value(row.get(WIND), &WIND_DIRECTION_ALIASES) {
            directions.push(d);
        }

        if let Some(h) = metric_value(row, Metric::HumidityInst) {
            humidities.push(h);
        }
        humidity_min = fold_min(humidity_min, metric_value(row, Metric::HumidityMin));
    }

    let temp_avg = mean(&temps);
    KpiData {
        temp_avg,
        temp_max,
        temp_min,
        temp_gradient: TempGradient::from_mean(temp_avg),
        rain_total: Some(rain_total),
        rain_days,
        wind_avg: mean(&wind_speeds),
        wind_max,
        wind_direction: mean(&directions).unwrap_or(0.0),
        humidity_avg: mean(&humidities),
        humidity_min,
    }
}

/// Eight-point compass label (Portuguese) for a direction in degrees.
///
/// ```
/// use inmet::compass_point;
///
/// assert_eq!(compass_point(0.0), "N");
/// assert_eq!(compass_point(90.0), "L");
/// assert_eq!(compass_point(225.0), "SO");
/// ```
pub fn compass_point(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return COMPASS_POINTS[0];
    }
    let normalized = degrees.rem_euclid(360.0);
    let sector = ((normalized + 22.5) / 45.0).floor() as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[sector]
}
