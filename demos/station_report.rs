use chrono::NaiveDate;
use inmet::{
    compass_point, AgroParams, Frequency, Inmet, InmetError, StationType, WeatherFilters,
};
use std::env;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), InmetError> {
    env_logger::init();

    let station = env::args().nth(1).unwrap_or_else(|| "A001".to_string());
    let client = Inmet::new()?;
    let filters = WeatherFilters::new(
        StationType::Automatic,
        station,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        Frequency::Daily,
    );

    let dataset = client.load().filters(&filters).call().await?;
    if dataset.is_empty() {
        println!("No records for {}", filters.station);
        return Ok(());
    }

    let params = AgroParams::default();
    let stats = dataset.stats_with(&params);
    let kpis = dataset.kpis();

    println!("Station {} | {}", filters.station, stats.date_range);
    println!("Records: {}", stats.record_count);
    if let (Some(avg), Some(max), Some(min)) = (stats.temp_avg, stats.temp_max, stats.temp_min) {
        println!("Temperature: avg {:.1} °C, max {:.1} °C, min {:.1} °C", avg, max, min);
    }
    println!(
        "Rain: {:.1} mm over {} records (max {:.1} mm)",
        stats.rain_total,
        stats.rain_days,
        stats.rain_max.unwrap_or(0.0)
    );
    println!(
        "GDD: {:.0} ({:.1}% of {:.0}), chill hours: {}",
        stats.gdd,
        stats.gdd_progress(&params),
        params.gdd_target,
        stats.chill_hours
    );
    if let Some(et) = stats.evapotranspiration {
        println!("Evapotranspiration: {:.2} mm/day", et);
    }
    println!(
        "Wind: avg {:.1} m/s from {} ({:?} period)",
        kpis.wind_avg.unwrap_or(0.0),
        compass_point(kpis.wind_direction),
        kpis.temp_gradient
    );

    let header = dataset.report_header();
    println!(
        "Report layout: {} categories over {} columns",
        header.categories.len(),
        header.width()
    );

    for card in dataset.quick_metrics().cards() {
        println!("  {:<20} {}", card.label, card.value);
    }

    let out_dir = env::var("INMET_EXPORT_DIR").map(PathBuf::from).unwrap_or_else(|_| env::temp_dir());
    let path = dataset.export_csv(&out_dir)?;
    println!("CSV written to {}", path.display());
    let path = dataset.export_json_report(&out_dir)?;
    println!("JSON report written to {}", path.display());

    Ok(())
}
