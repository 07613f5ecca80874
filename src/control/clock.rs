//! Wall clock used to stamp the printed steps

use jiff::tz::TimeZone;
use jiff::Timestamp;

/// Day, month, year, time and zone abbreviation, e.g. `15 Jan 24 21:00 JST`
const STAMP_FORMAT: &str = "%d %b %y %H:%M %Z";

/// Formats timestamps in the route's timezone, or the system one when the
/// route's zone is unknown
pub struct LocalClock {
    zone: Option<(String, TimeZone)>,
}

impl LocalClock {
    pub fn new(zone_name: Option<&str>) -> Self {
        let zone = zone_name.and_then(|name| match TimeZone::get(name) {
            Ok(tz) => Some((name.to_string(), tz)),
            Err(e) => {
                log::warn!("unknown timezone `{}`, using the system one: {}", name, e);
                None
            }
        });

        Self { zone }
    }

    /// Resolved zone name, `None` when falling back to the system timezone
    pub fn zone_name(&self) -> Option<&str> {
        self.zone.as_ref().map(|(name, _)| name.as_str())
    }

    pub fn now(&self) -> String {
        self.stamp(Timestamp::now())
    }

    pub fn stamp(&self, at: Timestamp) -> String {
        let tz = match &self.zone {
            Some((_, tz)) => tz.clone(),
            None => TimeZone::system(),
        };

        at.to_zoned(tz).strftime(STAMP_FORMAT).to_string()
    }
}
