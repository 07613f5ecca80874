//! Timezone lookup by position

use std::time::Duration;

use geo::geometry::Point;
use reqwest::blocking::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ZoneReply {
    #[serde(rename = "zoneName")]
    zone_name: Option<String>,
}

/// Client of a timezonedb compatible lookup service
pub struct TimezoneLookup {
    url: String,
    key: Option<String>,
    http: Option<Client>,
}

impl TimezoneLookup {
    pub fn new(url: &str, key: Option<String>, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| log::warn!("timezone lookup disabled: {}", e))
            .ok();

        Self {
            url: url.to_string(),
            key,
            http,
        }
    }

    /// IANA zone name at `coordinates`, `None` whenever it can't be found.
    ///
    /// The zone only decorates the printed timestamps, so no failure here is
    /// ever reported to the caller.
    pub fn resolve(&self, coordinates: Point) -> Option<String> {
        let (Some(http), Some(key)) = (&self.http, &self.key) else {
            log::debug!("no timezone api key, using the system timezone");
            return None;
        };

        let lat = coordinates.y().to_string();
        let lng = coordinates.x().to_string();

        let reply = http
            .get(&self.url)
            .query(&[
                ("key", key.as_str()),
                ("format", "json"),
                ("by", "position"),
                ("lat", lat.as_str()),
                ("lng", lng.as_str()),
            ])
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.json::<ZoneReply>());

        match reply {
            Ok(ZoneReply {
                zone_name: Some(zone),
            }) if !zone.trim().is_empty() => Some(zone.trim().to_string()),
            Ok(_) => {
                log::warn!("timezone lookup answered without a zone");
                None
            }
            Err(e) => {
                log::warn!("timezone lookup failed: {}", e);
                None
            }
        }
    }
}
