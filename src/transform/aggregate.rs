//! Groups chart points into daily, weekly or monthly buckets.

use crate::transform::chart::ChartDataPoint;
use crate::types::frequency::Frequency;
use crate::types::metric::{Metric, MetricCategory};
use chrono::{Datelike, Days, NaiveDate};
use log::debug;
use std::collections::HashMap;

/// Bucket key of a point for the given granularity.
///
/// * daily: the raw date at day resolution (`YYYY-MM-DD`)
/// * weekly: the Sunday that starts the point's week
/// * monthly: the `YYYY-MM` prefix
///
/// Dates that cannot be parsed for weekly grouping keep their raw key, so they
/// form their own bucket instead of being dropped.
pub fn bucket_key(date_raw: &str, granularity: Frequency) -> String {
    let day = date_raw.split('T').next().unwrap_or(date_raw);
    match granularity {
        Frequency::Hourly => date_raw.to_string(),
        Frequency::Daily => day.to_string(),
        Frequency::Weekly => match NaiveDate::parse_from_str(day, "%Y-%m-%d") {
            Ok(date) => week_start(date).format("%Y-%m-%d").to_string(),
            Err(e) => {
                debug!("Cannot place '{}' in a week ({}), keeping raw key", date_raw, e);
                date_raw.to_string()
            }
        },
        Frequency::Monthly => date_raw.get(..7).unwrap_or(date_raw).to_string(),
    }
}

/// The Sunday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Aggregates points by `granularity`.
///
/// Hourly granularity and empty input are returned unchanged. Otherwise points are
/// grouped by [`bucket_key`] and each metric is reduced over the non-null values of
/// its bucket: precipitation by sum, everything else by arithmetic mean. A metric
/// with no values in a bucket stays `None`.
///
/// Buckets are returned in ascending key order, which for ISO date keys is
/// chronological order.
pub fn aggregate(points: &[ChartDataPoint], granularity: Frequency) -> Vec<ChartDataPoint> {
    if granularity == Frequency::Hourly || points.is_empty() {
        return points.to_vec();
    }

    let mut index: HashMap<String, usize> = HashMap::new();
    let mut buckets: Vec<(String, Vec<&ChartDataPoint>)> = Vec::new();
    for point in points {
        let key = bucket_key(&point.date_raw, granularity);
        match index.get(&key) {
            Some(&i) => buckets[i].1.push(point),
            None => {
                index.insert(key.clone(), buckets.len());
                buckets.push((key, vec![point]));
            }
        }
    }

    let mut aggregated: Vec<ChartDataPoint> = buckets
        .into_iter()
        .map(|(key, members)| reduce_bucket(key, &members))
        .collect();
    aggregated.sort_by(|a, b| a.date_raw.cmp(&b.date_raw));

    debug!(
        "Aggregated {} points into {} {} buckets",
        points.len(),
        aggregated.len(),
        granularity
    );
    aggregated
}

fn reduce_bucket(key: String, members: &[&ChartDataPoint]) -> ChartDataPoint {
    let mut out = ChartDataPoint::new(key);
    for metric in Metric::ALL {
        let values: Vec<f64> = members.iter().filter_map(|p| p.get(metric)).collect();
        if values.is_empty() {
            continue;
        }
        let sum: f64 = values.iter().sum();
        let reduced = match metric.category() {
            MetricCategory::Precipitation => sum,
            _ => sum / values.len() as f64,
        };
        out.set(metric, Some(reduced));
    }
    out
}
