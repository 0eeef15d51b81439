//! Static station metadata: display names and coordinates of the DWD stations the
//! dashboard offers.

use serde::Serialize;
use std::collections::BTreeMap;

/// Station id used when a request names no station or an unknown one.
pub const DEFAULT_STATION_ID: &str = "02667";

/// A geographical coordinate. Latitude first, longitude second, decimal degrees.
///
/// ```
/// use dwd_climate::LatLon;
///
/// let cologne_bonn = LatLon(50.8659, 7.1427);
/// assert_eq!(cologne_bonn.0, 50.8659);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLon(pub f64, pub f64);

/// A DWD climate station.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Station {
    /// Five-digit DWD station id, zero padded (e.g. "02667").
    pub id: String,
    /// Human readable name shown in the dashboard.
    pub name: String,
    /// Location used for forecast queries. `None` disables the forecast.
    pub location: Option<LatLon>,
}

impl Station {
    pub fn new(id: impl Into<String>, name: impl Into<String>, location: Option<LatLon>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            location,
        }
    }
}

/// Lookup table from station id to [`Station`].
#[derive(Debug, Clone, PartialEq)]
pub struct StationRegistry {
    stations: BTreeMap<String, Station>,
    default_id: String,
}

impl StationRegistry {
    /// Creates a registry from `stations`. `default_id` should name one of them.
    pub fn new(stations: impl IntoIterator<Item = Station>, default_id: impl Into<String>) -> Self {
        Self {
            stations: stations
                .into_iter()
                .map(|station| (station.id.clone(), station))
                .collect(),
            default_id: default_id.into(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&Station> {
        self.stations.get(id)
    }

    pub fn coordinates(&self, id: &str) -> Option<LatLon> {
        self.get(id).and_then(|station| station.location)
    }

    /// Returns the station for `id`, or the default station when `id` is unknown.
    pub fn resolve(&self, id: &str) -> Option<&Station> {
        self.get(id).or_else(|| self.default_station())
    }

    pub fn default_station(&self) -> Option<&Station> {
        self.get(&self.default_id)
    }

    /// Stations ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.values()
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationRegistry {
    /// The three stations around Cologne and Aachen the dashboard ships with.
    fn default() -> Self {
        Self::new(
            [
                Station::new("02667", "Köln/Bonn", Some(LatLon(50.8659, 7.1427))),
                Station::new(
                    "03623",
                    "Nörvenich-Niederbolheim",
                    Some(LatLon(50.8167, 6.6500)),
                ),
                Station::new("15000", "Aachen-Orsbach", Some(LatLon(50.7983, 6.0244))),
            ],
            DEFAULT_STATION_ID,
        )
    }
}
