//! Parsing of the `produkt_klima_tag_*.txt` file inside a station archive.
//!
//! The file is semicolon separated with a header row. Header names are padded
//! with spaces, values too, and every line ends in an `eor` marker column.

use crate::historical::archive::ProductFile;
use crate::historical::error::ProductError;
use crate::types::daily_record::{DailyRecord, Origin};
use crate::types::date_window::DateWindow;
use crate::values::parse_observed_value;
use chrono::NaiveDate;
use log::debug;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::io::Cursor;

const SEPARATOR: u8 = b';';
const DATE_FORMAT: &str = "%Y%m%d";

/// Date column names, in order of preference. Older archive variants use the
/// second one.
pub const DATE_COLUMNS: [&str; 2] = ["MESS_DATUM", "MESS_DATUM_BEGINN"];

pub const MEAN_TEMPERATURE_COLUMN: &str = "TMK";
pub const PRECIPITATION_COLUMN: &str = "RSK";
pub const SUNSHINE_COLUMN: &str = "SDK";
pub const MAX_WIND_GUST_COLUMN: &str = "FX";

impl ProductFile {
    /// Parses this file into records dated within `window`.
    pub fn parse(&self, window: &DateWindow) -> Result<Vec<DailyRecord>, ProductError> {
        parse_product(&self.bytes, window)
    }
}

/// Parses product file contents into ascending [`DailyRecord`]s within `window`.
///
/// Rows whose date does not parse as `YYYYMMDD` are skipped. A missing value
/// column makes that measurement absent on every row. Should a date occur twice,
/// the later row wins.
pub fn parse_product(bytes: &[u8], window: &DateWindow) -> Result<Vec<DailyRecord>, ProductError> {
    let frame = read_frame(bytes)?;

    let date_column = DATE_COLUMNS
        .into_iter()
        .find(|name| frame.column(name).is_ok())
        .ok_or(ProductError::MissingDateColumn)?;
    debug!(
        "Product file has {} rows, date column '{}'",
        frame.height(),
        date_column
    );

    let dates = frame.column(date_column)?.str()?;
    let temperature = optional_column(&frame, MEAN_TEMPERATURE_COLUMN)?;
    let precipitation = optional_column(&frame, PRECIPITATION_COLUMN)?;
    let sunshine = optional_column(&frame, SUNSHINE_COLUMN)?;
    let wind_gust = optional_column(&frame, MAX_WIND_GUST_COLUMN)?;

    let mut by_date = BTreeMap::new();
    let mut skipped = 0usize;
    for idx in 0..frame.height() {
        let Some(date) = dates.get(idx).and_then(parse_archive_date) else {
            skipped += 1;
            continue;
        };
        if !window.contains(date) {
            continue;
        }
        by_date.insert(
            date,
            DailyRecord {
                date,
                mean_temperature: value_at(temperature, idx),
                precipitation: value_at(precipitation, idx),
                sunshine_hours: value_at(sunshine, idx),
                max_wind_gust: value_at(wind_gust, idx),
                origin: Origin::Historical,
            },
        );
    }
    if skipped > 0 {
        debug!("Skipped {} rows with unparseable dates", skipped);
    }

    Ok(by_date.into_values().collect())
}

/// Parses an archive date such as `20240131`.
pub fn parse_archive_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

/// Reads every column as text so sentinel and padding handling stays in one place.
fn read_frame(bytes: &[u8]) -> PolarsResult<DataFrame> {
    let mut frame = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|options| {
            options
                .with_separator(SEPARATOR)
                .with_quote_char(None)
                .with_encoding(CsvEncoding::LossyUtf8)
                .with_truncate_ragged_lines(true)
        })
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()?;

    let trimmed: Vec<PlSmallStr> = frame
        .get_column_names()
        .into_iter()
        .map(|name| PlSmallStr::from(name.trim()))
        .collect();
    frame.set_column_names(trimmed)?;
    Ok(frame)
}

fn optional_column<'a>(
    frame: &'a DataFrame,
    name: &str,
) -> PolarsResult<Option<&'a StringChunked>> {
    match frame.column(name) {
        Ok(column) => column.str().map(Some),
        Err(_) => Ok(None),
    }
}

fn value_at(column: Option<&StringChunked>, idx: usize) -> Option<f64> {
    parse_observed_value(column.and_then(|values| values.get(idx)))
}
