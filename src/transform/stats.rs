//! Summary statistics and agronomic indices over a full dataset.
//!
//! Everything here is a single pass over the rows plus a per-day bucketing step for
//! growing degree days. Empty input yields `None`/zero fields, never a panic.

use crate::transform::extract::metric_value;
use crate::transform::flatten::format_date;
use crate::transform::normalize::DATE;
use crate::types::metric::Metric;
use crate::types::row::NormalizedRow;
use bon::Builder;
use serde::Serialize;
use std::collections::HashMap;

/// Agronomic thresholds. The defaults describe a corn crop.
///
/// # Examples
///
/// ```
/// use inmet::AgroParams;
///
/// let defaults = AgroParams::default();
/// assert_eq!(defaults.base_temp, 10.0);
///
/// let wheat = AgroParams::builder().base_temp(5.0).cutoff_temp(25.0).build();
/// assert_eq!(wheat.chill_threshold, 7.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Builder, Serialize)]
pub struct AgroParams {
    /// Temperature below which no development happens (°C).
    #[builder(default = 10.0)]
    pub base_temp: f64,
    /// Temperature above which development stops increasing (°C).
    #[builder(default = 30.0)]
    pub cutoff_temp: f64,
    /// Readings strictly below this count as chill hours (°C).
    #[builder(default = 7.0)]
    pub chill_threshold: f64,
    /// Degree days needed to complete the crop cycle.
    #[builder(default = 2700.0)]
    pub gdd_target: f64,
}

impl Default for AgroParams {
    fn default() -> Self {
        AgroParams::builder().build()
    }
}

/// Statistics shown in the summary panel and the report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsData {
    pub record_count: usize,
    /// `"DD/MM/YYYY - DD/MM/YYYY"`.
    pub date_range: String,

    pub temp_avg: Option<f64>,
    pub temp_max: Option<f64>,
    pub temp_min: Option<f64>,
    /// Population standard deviation of the instantaneous readings.
    pub temp_std_dev: Option<f64>,

    pub rain_total: f64,
    /// Largest single-record precipitation.
    pub rain_max: Option<f64>,
    /// Number of *records* with rain > 0. For hourly data this counts rainy hours,
    /// not calendar days.
    pub rain_days: usize,

    /// Growing degree days, accumulated per calendar day.
    pub gdd: f64,
    /// Instantaneous readings below the chill threshold.
    pub chill_hours: usize,
    /// Simplified evapotranspiration estimate (mm/day), when radiation, wind and
    /// temperature samples are all available.
    pub evapotranspiration: Option<f64>,
}

impl StatsData {
    /// Accumulated GDD as a percentage of the crop cycle target.
    pub fn gdd_progress(&self, params: &AgroParams) -> f64 {
        if params.gdd_target <= 0.0 {
            return 0.0;
        }
        self.gdd / params.gdd_target * 100.0
    }
}

/// Extremes of one calendar day, merged from every record of that day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayExtremes {
    pub max: f64,
    pub min: f64,
}

impl DayExtremes {
    fn merge(&mut self, max: f64, min: f64) {
        self.max = self.max.max(max);
        self.min = self.min.min(min);
    }
}

/// Contribution of a single day to the GDD sum.
///
/// The minimum is raised to the base temperature and the maximum capped at the
/// cutoff before averaging; negative contributions count as zero.
pub fn daily_gdd(day: DayExtremes, params: &AgroParams) -> f64 {
    let adjusted_min = day.min.max(params.base_temp);
    let adjusted_max = day.max.min(params.cutoff_temp);
    let mean = (adjusted_max + adjusted_min) / 2.0;
    (mean - params.base_temp).max(0.0)
}

/// Sums [`daily_gdd`] over already-bucketed days.
pub fn calculate_gdd<'a>(days: impl IntoIterator<Item = &'a DayExtremes>, params: &AgroParams) -> f64 {
    days.into_iter().map(|day| daily_gdd(*day, params)).sum()
}

/// Population standard deviation (two-pass). Empty input yields `0.0`.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    variance.sqrt()
}

pub(crate) fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Day part of a measurement date (`"2024-03-05 13:00"` → `"2024-03-05"`).
pub(crate) fn day_of(row: &NormalizedRow) -> Option<&str> {
    let date = row.text(DATE)?;
    let day = date.split(' ').next()?.split('T').next()?;
    (!day.is_empty()).then_some(day)
}

/// [`compute_stats_with`] using the default corn thresholds.
pub fn compute_stats(rows: &[NormalizedRow], date_start: &str, date_end: &str) -> StatsData {
    compute_stats_with(rows, date_start, date_end, &AgroParams::default())
}

/// Computes the summary statistics of a dataset.
///
/// `date_start` and `date_end` are the queried range as `YYYY-MM-DD`; they only
/// feed the `date_range` label.
pub fn compute_stats_with(
    rows: &[NormalizedRow],
    date_start: &str,
    date_end: &str,
    params: &AgroParams,
) -> StatsData {
    let mut temps = Vec::new();
    let mut temp_max: Option<f64> = None;
    let mut temp_min: Option<f64> = None;
    let mut rain_total = 0.0;
    let mut rain_max: Option<f64> = None;
    let mut rain_days = 0;
    let mut chill_hours = 0;
    let mut radiation = Vec::new();
    let mut wind = Vec::new();

    let mut day_order: Vec<String> = Vec::new();
    let mut days: HashMap<String, DayExtremes> = HashMap::new();

    for row in rows {
        let t_inst = metric_value(row, Metric::TempInst);
        let t_max = metric_value(row, Metric::TempMax);
        let t_min = metric_value(row, Metric::TempMin);

        if let Some(t) = t_inst {
            temps.push(t);
            if t < params.chill_threshold {
                chill_hours += 1;
            }
        }
        if let Some(t) = t_max {
            temp_max = Some(temp_max.map_or(t, |m| m.max(t)));
        }
        if let Some(t) = t_min {
            temp_min = Some(temp_min.map_or(t, |m| m.min(t)));
        }

        if let (Some(day), Some(max), Some(min)) = (day_of(row), t_max, t_min) {
            match days.get_mut(day) {
                Some(extremes) => extremes.merge(max, min),
                None => {
                    day_order.push(day.to_string());
                    days.insert(day.to_string(), DayExtremes { max, min });
                }
            }
        }

        if let Some(rain) = metric_value(row, Metric::Rain) {
            rain_total += rain;
            rain_max = Some(rain_max.map_or(rain, |m| m.max(rain)));
            if rain > 0.0 {
                rain_days += 1;
            }
        }

        if let Some(r) = metric_value(row, Metric::Radiation) {
            radiation.push(r);
        }
        if let Some(w) = metric_value(row, Metric::WindSpeed) {
            wind.push(w);
        }
    }

    let gdd = calculate_gdd(day_order.iter().filter_map(|d| days.get(d)), params);
    let temp_avg = mean(&temps);

    let evapotranspiration = match (temp_avg, mean(&radiation), mean(&wind)) {
        (Some(t), Some(r), Some(w)) => Some(evapotranspiration_estimate(t, r, w)),
        _ => None,
    };

    StatsData {
        record_count: rows.len(),
        date_range: format!("{} - {}", format_date(date_start), format_date(date_end)),
        temp_avg,
        temp_max,
        temp_min,
        temp_std_dev: (!temps.is_empty()).then(|| std_dev(&temps)),
        rain_total,
        rain_max,
        rain_days,
        gdd,
        chill_hours,
        evapotranspiration,
    }
}

/// Simplified radiation/wind/temperature evapotranspiration estimate (mm/day).
pub fn evapotranspiration_estimate(mean_temp: f64, mean_radiation: f64, mean_wind: f64) -> f64 {
    0.0023 * (mean_temp + 17.8) * mean_radiation * 0.0864 * (1.0 + 0.1 * mean_wind)
}
