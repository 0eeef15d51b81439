//! End-to-end tests of the fetch pipeline against a local fixture server that
//! stands in for the DWD archive directory and the forecast service.
//!
//! Run with: cargo test --test pipeline

use chrono::NaiveDate;
use dwd_climate::{
    Dwd, DwdConfig, ForecastError, ForecastFetcher, HistoricalError, LatLon, Origin, Station,
    StationRegistry, TransportError,
};
use std::io::{Cursor, Write};
use std::thread;
use std::time::{Duration, Instant};
use tiny_http::{Header, Response, Server};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const LISTING: &str = r#"<html><body><pre>
<a href="../">../</a>
<a href="/data/tageswerte_KL_02667_akt.zip">tageswerte_KL_02667_akt.zip</a>      27-Feb-2025 08:53   64381
<a href="/data/tageswerte_KL_03623_akt.zip">tageswerte_KL_03623_akt.zip</a>      27-Feb-2025 08:53   62817
<a href="/data/tageswerte_KL_04711_akt.zip">tageswerte_KL_04711_akt.zip</a>      27-Feb-2025 08:53   62817
<p>tageswerte_KL_15000_akt.zip is being regenerated</p>
</pre></body></html>"#;

const PRODUCT_02667: &str = "STATIONS_ID;MESS_DATUM;QN_3;  FX;  FM;QN_4; RSK;RSKF; SDK;SHK_TAG;  NM; VPM;  PM; TMK; UPM; TXK; TNK; TGK;eor
       2667;20250110;   10;  40.0;   4.3;    3;   2.0;   6;  3.250;   0;   7.2;  10.1; 1003.20;  15.5;  82.00;   7.2;   1.9;   -0.5;eor
       2667;20250301;   10;  12.0;   4.3;    3;   0.0;   6;  5.000;   0;   7.2;  10.1; 1003.20;  10.0;  82.00;   7.2;   1.9;   -0.5;eor
       2667;202a0302;   10;  99.0;   4.3;    3;  99.0;   6; 99.000;   0;   7.2;  10.1; 1003.20;  99.0;  82.00;   7.2;   1.9;   -0.5;eor
       2667;20250302;   10;  -999;   4.3;    3;   5.5;   6;   -999;   0;   7.2;  10.1; 1003.20;  -999;  82.00;   7.2;   1.9;   -0.5;eor
       2667;20250303;   10;  22.0;   4.3;    3;  -999;   6;  1.500;   0;   7.2;  10.1; 1003.20;  20.0;  82.00;   7.2;   1.9;   -0.5;eor
";

const FORECAST: &str = r#"{
    "daily": {
        "time": ["2025-03-04", "2025-03-05", "2025-03-06", "2025-03-07"],
        "temperature_2m_max": [12.0, 10.0, 9.0, 8.0],
        "temperature_2m_min": [4.0, 2.0, 3.0, 1.0],
        "precipitation_sum": [0.0, 2.5, 1.0, 1.0],
        "sunshine_duration": [36000.0, null, 9000.0, 0.0],
        "wind_gusts_10m_max": [30.2, 45.0, 20.0, 15.0]
    }
}"#;

const STALL: Duration = Duration::from_secs(5);
const SHORT_TIMEOUT: Duration = Duration::from_millis(300);

fn zip_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Serves the listing, the archives and the forecast on an ephemeral port and
/// returns the base URL. The server thread lives until the test process exits.
fn start_fixture_server() -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();

    let good = zip_archive(&[
        ("Metadaten_Geographie_02667.txt", "Stations_id;Stationshoehe\n"),
        ("produkt_klima_tag_20230801_20250303_02667.txt", PRODUCT_02667),
    ]);
    let no_product = zip_archive(&[("Metadaten_Geographie_03623.txt", "meta")]);
    let bad_schema = zip_archive(&[(
        "produkt_klima_tag_20230801_20250303_04711.txt",
        "STATIONS_ID;DATUM; TMK;eor\n4711;20250301;  3.0;eor\n",
    )]);

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let url = request.url().to_string();
            // Everything below /slow/ except the listing hangs past the client timeouts.
            if url.starts_with("/slow/") && url != "/slow/" {
                thread::spawn(move || {
                    thread::sleep(STALL);
                    let _ = request.respond(Response::from_string("too late"));
                });
                continue;
            }
            let response = if url == "/kl/" || url == "/slow/" {
                Response::from_string(LISTING)
            } else if url == "/kl/tageswerte_KL_02667_akt.zip" {
                Response::from_data(good.clone())
            } else if url == "/kl/tageswerte_KL_03623_akt.zip" {
                Response::from_data(no_product.clone())
            } else if url == "/kl/tageswerte_KL_04711_akt.zip" {
                Response::from_data(bad_schema.clone())
            } else if url.starts_with("/v1/forecast?") {
                Response::from_string(FORECAST).with_header(
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
                )
            } else {
                Response::from_string("not found").with_status_code(404)
            };
            let _ = request.respond(response);
        }
    });

    format!("http://127.0.0.1:{}", port)
}

fn stations() -> StationRegistry {
    StationRegistry::new(
        [
            Station::new("02667", "Köln/Bonn", Some(LatLon(50.8659, 7.1427))),
            Station::new("03623", "Nörvenich-Niederbolheim", Some(LatLon(50.8167, 6.65))),
            Station::new("04711", "Testhausen", None),
        ],
        "02667",
    )
}

fn client(base: &str) -> Dwd {
    let config = DwdConfig::builder()
        .archive_base_url(format!("{}/kl/", base))
        .forecast_url(format!("{}/v1/forecast", base))
        .listing_timeout(Duration::from_secs(5))
        .archive_timeout(Duration::from_secs(5))
        .forecast_timeout(Duration::from_secs(5))
        .build();
    Dwd::with_config(config, stations()).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
}

// ---------------------------------------------------------------------------
// Historical pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_historical_end_to_end() {
    let dwd = client(&start_fixture_server());

    let series = dwd
        .historical()
        .station("02667")
        .days_back(30)
        .today(today())
        .call()
        .await
        .unwrap();

    // 2025-01-10 is outside the window, the 202a0302 row is skipped.
    let dates: Vec<String> = series.records.iter().map(|r| r.date.to_string()).collect();
    assert_eq!(dates, vec!["2025-03-03", "2025-03-02", "2025-03-01"]);

    let newest = &series.records[0];
    assert_eq!(newest.mean_temperature, Some(20.0));
    assert_eq!(newest.precipitation, None);
    assert_eq!(newest.sunshine_hours, Some(1.5));
    assert_eq!(newest.max_wind_gust, Some(22.0));
    assert_eq!(newest.origin, Origin::Historical);

    let sentinel_day = &series.records[1];
    assert_eq!(sentinel_day.mean_temperature, None);
    assert_eq!(sentinel_day.precipitation, Some(5.5));

    assert_eq!(series.summary.average_temperature, 15.0);
    assert_eq!(series.summary.total_precipitation, 5.5);
    assert_eq!(series.summary.total_sunshine, 6.5);
}

#[tokio::test]
async fn test_historical_row_values_match_archive() {
    let dwd = client(&start_fixture_server());

    let series = dwd
        .historical()
        .station("02667")
        .days_back(60)
        .today(today())
        .call()
        .await
        .unwrap();

    let january = series.records.last().unwrap();
    assert_eq!(january.date, NaiveDate::from_ymd_opt(2025, 1, 10).unwrap());
    assert_eq!(january.mean_temperature, Some(15.5));
    assert_eq!(january.precipitation, Some(2.0));
    assert_eq!(january.sunshine_hours, Some(3.25));
    assert_eq!(january.max_wind_gust, Some(40.0));

    let ascending = series.chronological();
    assert!(ascending.windows(2).all(|pair| pair[0].date < pair[1].date));
}

#[tokio::test]
async fn test_unlisted_station_is_not_found() {
    let dwd = client(&start_fixture_server());

    // 15000 appears in the listing text, but not as a link.
    let err = dwd
        .historical()
        .station("15000")
        .today(today())
        .call()
        .await
        .unwrap_err();

    assert!(matches!(err, HistoricalError::StationFileNotFound { ref station } if station == "15000"));
    assert_eq!(err.to_string(), "File for station 15000 not found on server.");
}

#[tokio::test]
async fn test_archive_without_product_file_is_malformed() {
    let dwd = client(&start_fixture_server());

    let err = dwd
        .historical()
        .station("03623")
        .today(today())
        .call()
        .await
        .unwrap_err();

    assert!(matches!(err, HistoricalError::MalformedArchive { .. }));
}

#[tokio::test]
async fn test_unknown_date_column_is_unrecognized_schema() {
    let dwd = client(&start_fixture_server());

    let err = dwd
        .historical()
        .station("04711")
        .today(today())
        .call()
        .await
        .unwrap_err();

    assert!(matches!(err, HistoricalError::UnrecognizedSchema { .. }));
}

#[tokio::test]
async fn test_http_error_is_transport_failure() {
    let base = start_fixture_server();
    let config = DwdConfig::builder()
        .archive_base_url(format!("{}/missing/", base))
        .build();
    let dwd = Dwd::with_config(config, stations()).unwrap();

    let err = dwd
        .historical()
        .station("02667")
        .call()
        .await
        .unwrap_err();

    match err {
        HistoricalError::TransportFailure(TransportError::HttpStatus { status, .. }) => {
            assert_eq!(status.as_u16(), 404)
        }
        other => panic!("expected HTTP status failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_stalled_archive_download_times_out() {
    let base = start_fixture_server();
    let config = DwdConfig::builder()
        .archive_base_url(format!("{}/slow/", base))
        .archive_timeout(SHORT_TIMEOUT)
        .build();
    let dwd = Dwd::with_config(config, stations()).unwrap();

    let started = Instant::now();
    let err = dwd
        .historical()
        .station("02667")
        .today(today())
        .call()
        .await
        .unwrap_err();

    assert!(started.elapsed() < STALL);
    match err {
        HistoricalError::TransportFailure(e) => assert!(e.is_timeout(), "{:?}", e),
        other => panic!("expected a timeout, got {:?}", other),
    }
}

// ---------------------------------------------------------------------------
// Forecast and overview
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_forecast_is_truncated_and_normalized() {
    let dwd = client(&start_fixture_server());

    let forecast = dwd.forecast().station("02667").days_ahead(3).call().await;

    assert_eq!(forecast.len(), 3);
    assert_eq!(forecast[0].date, NaiveDate::from_ymd_opt(2025, 3, 4).unwrap());
    assert_eq!(forecast[0].mean_temperature, Some(8.0));
    assert_eq!(forecast[0].sunshine_hours, Some(10.0));
    assert_eq!(forecast[1].sunshine_hours, Some(0.0));
    assert!(forecast.iter().all(|r| r.origin == Origin::Forecast));
}

#[tokio::test]
async fn test_forecast_without_coordinates_is_empty() {
    let dwd = client(&start_fixture_server());

    assert!(dwd.forecast().station("04711").call().await.is_empty());
    assert!(dwd.forecast().station("99999").call().await.is_empty());
}

#[tokio::test]
async fn test_stalled_forecast_service_degrades_to_empty() {
    let base = start_fixture_server();
    let config = DwdConfig::builder()
        .forecast_url(format!("{}/slow/v1/forecast", base))
        .forecast_timeout(SHORT_TIMEOUT)
        .build();
    let stations = stations();
    let location = stations.coordinates("02667").unwrap();
    let fetcher = ForecastFetcher::new(reqwest::Client::new(), config.clone(), stations.clone());

    let started = Instant::now();
    assert!(fetcher.fetch("02667", 7).await.is_empty());
    assert!(started.elapsed() < STALL);

    match fetcher.query(location, 7).await {
        Err(ForecastError::Transport(e)) => assert!(e.is_timeout(), "{:?}", e),
        other => panic!("expected a timeout, got {:?}", other),
    }

    let dwd = Dwd::with_config(config, stations).unwrap();
    assert!(dwd.forecast().station("02667").call().await.is_empty());
}

#[tokio::test]
async fn test_overview_combines_both_series() {
    let dwd = client(&start_fixture_server());

    let overview = dwd
        .overview()
        .station("02667")
        .days_back(30)
        .days_ahead(7)
        .today(today())
        .call()
        .await;

    assert_eq!(overview.station_name.as_deref(), Some("Köln/Bonn"));
    assert!(overview.error_message().is_none());
    assert_eq!(overview.forecast.len(), 4);

    let chart = overview.chart.expect("chart for non-empty history");
    let first = &chart.data[0];
    assert_eq!(first.name, Some("Temp (Hist)"));
    assert_eq!(first.x.first(), Some(&NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()));
    assert_eq!(first.x.last(), Some(&NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()));
}

#[tokio::test]
async fn test_overview_keeps_forecast_when_history_fails() {
    let dwd = client(&start_fixture_server());

    let overview = dwd
        .overview()
        .station("03623")
        .today(today())
        .call()
        .await;

    assert!(overview.historical.is_err());
    assert!(overview.error_message().is_some());
    assert!(overview.chart.is_none());
    assert_eq!(overview.forecast.len(), 4);
}
