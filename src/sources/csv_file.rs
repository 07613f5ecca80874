//! CSV file source integration

use std::io::Read;

use csv::{Reader, StringRecord};

use super::RouteSource;
use crate::error::{Result, WalkerError};
use crate::Waypoint;

const LATITUDE_HEADERS: [&str; 2] = ["lat", "latitude"];
const LONGITUDE_HEADERS: [&str; 3] = ["lng", "lon", "longitude"];

/// CSV route source, one waypoint per row
pub struct CsvSource<T>
where
    T: Read,
{
    rdr: Reader<T>,
}

impl<T> CsvSource<T>
where
    T: Read,
{
    pub fn new(rdr: Reader<T>) -> Self {
        Self { rdr }
    }
}

impl<T> RouteSource for CsvSource<T>
where
    T: Read,
{
    fn fetch(&mut self) -> Result<Vec<Waypoint>> {
        let mut route = vec![];

        let mut header = self
            .rdr
            .headers()
            .map_err(|e| WalkerError::Track(format!("Failed on read the header: {}", e)))?
            .clone();
        let header_idx = parse_header(&mut header)?;

        for row in self.rdr.records() {
            let mut rec =
                row.map_err(|e| WalkerError::Track(format!("Failed on read some row: {}", e)))?;

            let waypoint = parse_row(&header_idx, &mut rec)
                .map_err(|e| WalkerError::Track(format!("Error with row {:?}: {}", rec, e)))?;

            if let Some(wp) = waypoint {
                route.push(wp);
            }
        }

        Ok(route)
    }
}

/// Field to index map
#[derive(Debug)]
struct FieldsIndex {
    latitude: usize,
    longitude: usize,
}

fn parse_header(header: &mut StringRecord) -> Result<FieldsIndex> {
    header.trim();

    let find = |names: &[&str]| {
        header
            .iter()
            .position(|h| names.contains(&h.to_lowercase().as_str()))
    };

    let latitude = find(&LATITUDE_HEADERS)
        .ok_or_else(|| WalkerError::Track("Latitude header not found".to_string()))?;
    let longitude = find(&LONGITUDE_HEADERS)
        .ok_or_else(|| WalkerError::Track("Longitude header not found".to_string()))?;

    Ok(FieldsIndex {
        latitude,
        longitude,
    })
}

fn parse_row(
    header: &FieldsIndex,
    row: &mut StringRecord,
) -> std::result::Result<Option<Waypoint>, String> {
    row.trim();

    let raw_lat = row.get(header.latitude).unwrap_or_default();
    let raw_lng = row.get(header.longitude).unwrap_or_default();

    // Gaps in the recording
    if raw_lat.is_empty() || raw_lng.is_empty() {
        return Ok(None);
    }

    let lat = raw_lat
        .parse::<f64>()
        .map_err(|e| format!("Invalid latitude format: {}", e))?;
    let lng = raw_lng
        .parse::<f64>()
        .map_err(|e| format!("Invalid longitude format: {}", e))?;

    let waypoint = Waypoint::new(lat, lng);
    if !waypoint.is_valid() {
        return Err(format!("Coordinates out of range: {},{}", lat, lng));
    }

    Ok(Some(waypoint))
}
