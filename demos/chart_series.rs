use chrono::NaiveDate;
use inmet::{Frequency, Inmet, InmetError, Metric, StationType, WeatherFilters};
use std::env;

#[tokio::main]
async fn main() -> Result<(), InmetError> {
    env_logger::init();

    let granularity = env::args()
        .nth(1)
        .and_then(|g| g.parse::<Frequency>().ok())
        .unwrap_or(Frequency::Weekly);

    let client = Inmet::new()?;
    let filters = WeatherFilters::new(
        StationType::Automatic,
        "A001",
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        Frequency::Daily,
    );
    let dataset = client.load().filters(&filters).call().await?;

    let metrics = [Metric::TempMax, Metric::TempMin, Metric::Rain];
    print!("{:>8}", "date");
    for metric in metrics {
        print!(" {:>12}", format!("{} ({})", metric.key(), metric.unit()));
    }
    println!();

    for point in dataset.chart_points(granularity) {
        print!("{:>8}", point.date);
        for metric in metrics {
            match point.get(metric) {
                Some(v) => print!(" {:>12.1}", v),
                None => print!(" {:>12}", "—"),
            }
        }
        println!();
    }

    Ok(())
}
