//! demos/station_report.rs
//!
//! Prints the recent climate table, its summary and the forecast for a DWD station.
//!
//! To run this example:
//! cargo run --example station_report -- 02667 30 7

use dwd_climate::{resolve_days_back, resolve_forecast_days, BuildInfo, DailyRecord, Dwd};
use std::env;
use std::error::Error;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let build = BuildInfo::detect(Path::new(env!("CARGO_MANIFEST_DIR")));

    let client = Dwd::new()?;
    println!("Stations:");
    for station in client.stations().iter() {
        println!("  {}  {}", station.id, station.name);
    }

    let station = client
        .stations()
        .resolve(args.first().map(String::as_str).unwrap_or_default())
        .ok_or("station table is empty")?
        .clone();
    let days_back = resolve_days_back(args.get(1).map(String::as_str));
    let days_ahead = resolve_forecast_days(args.get(2).map(String::as_str));

    println!(
        "{} ({}) - last {} days, next {} days [v{} {}]",
        station.name, station.id, days_back, days_ahead, build.version, build.git_hash
    );

    let overview = client
        .overview()
        .station(&station.id)
        .days_back(days_back)
        .days_ahead(days_ahead)
        .call()
        .await;

    let header = format!(
        "{:<12}{:>8}{:>8}{:>8}{:>8}  {}",
        "date", "temp", "rain", "sun", "wind", "source"
    );
    let print_row = |record: &DailyRecord| {
        let row = record.display();
        println!(
            "{:<12}{:>8}{:>8}{:>8}{:>8}  {}",
            row.date, row.temperature, row.precipitation, row.sunshine, row.wind, record.origin
        );
    };

    let chart = overview.chart;
    match overview.historical {
        Ok(series) => {
            let (records, summary) = series.into_parts();
            println!("{}", header);
            records.iter().for_each(&print_row);
            println!(
                "Average {:.2} °C, rain {:.2} mm, sun {:.2} h",
                summary.average_temperature, summary.total_precipitation, summary.total_sunshine
            );
        }
        Err(e) => println!("Error: {}", e),
    }

    println!("\nForecast:\n{}", header);
    overview.forecast.iter().for_each(&print_row);

    if let Some(chart) = &chart {
        println!("\nChart with {} traces ({} bytes of JSON)", chart.data.len(), chart.to_json()?.len());
    }

    Ok(())
}
