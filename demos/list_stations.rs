use inmet::{filter_by_state, state_name, Inmet, InmetError, StationType};
use std::env;

#[tokio::main]
async fn main() -> Result<(), InmetError> {
    // Set RUST_LOG=info to see request logs.
    env_logger::init();

    let state = env::args().nth(1).unwrap_or_else(|| "DF".to_string());
    let client = Inmet::new()?;

    for station_type in [StationType::Automatic, StationType::Manual] {
        let stations = client.stations(station_type).await?;
        let in_state = filter_by_state(&stations, &state);
        println!(
            "{} {} stations in {} ({} total)",
            in_state.len(),
            station_type,
            state_name(&state).unwrap_or(state.as_str()),
            stations.len()
        );
        for station in in_state {
            match (station.latitude_deg(), station.longitude_deg()) {
                (Some(lat), Some(lon)) => println!("  {} @ {:.4}, {:.4}", station.label(), lat, lon),
                _ => println!("  {}", station.label()),
            }
        }
    }

    Ok(())
}
