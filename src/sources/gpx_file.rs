//! GPX file source integration

use std::io::Read;

use super::RouteSource;
use crate::error::{Result, WalkerError};
use crate::Waypoint;

/// GPX document route source
///
/// Reads the first segment of the first track. Documents without tracks
/// fall back to their first `<rte>`.
pub struct GpxSource<T>
where
    T: Read,
{
    rdr: Option<T>,
}

impl<T> GpxSource<T>
where
    T: Read,
{
    pub fn new(rdr: T) -> Self {
        Self { rdr: Some(rdr) }
    }
}

impl<T> RouteSource for GpxSource<T>
where
    T: Read,
{
    fn fetch(&mut self) -> Result<Vec<Waypoint>> {
        let rdr = self
            .rdr
            .take()
            .ok_or_else(|| WalkerError::Track("GPX document already consumed".to_string()))?;

        let doc = gpx::read(rdr)
            .map_err(|e| WalkerError::Track(format!("Failed on parse the GPX: {}", e)))?;

        let points = match doc.tracks.first() {
            Some(track) => track
                .segments
                .first()
                .map(|seg| &seg.points)
                .ok_or_else(|| WalkerError::Track("Track without segments".to_string()))?,
            None => doc
                .routes
                .first()
                .map(|rte| &rte.points)
                .ok_or_else(|| WalkerError::Track("No track or route found".to_string()))?,
        };

        if points.is_empty() {
            return Err(WalkerError::Track("Route without points".to_string()));
        }

        let route: Vec<Waypoint> = points.iter().map(|p| Waypoint::from(p.point())).collect();

        if let Some(wp) = route.iter().find(|wp| !wp.is_valid()) {
            return Err(WalkerError::Track(format!(
                "Coordinates out of range: {},{}",
                wp.latitude(),
                wp.longitude()
            )));
        }

        Ok(route)
    }
}

#[cfg(test)]
pub mod tests {
    use geo::geometry::Point;

    use super::GpxSource;
    use crate::sources::tests::TRACK;
    use crate::sources::RouteSource;
    use crate::WalkerError;

    #[test]
    fn first_track_segment() -> Result<(), String> {
        let mut source = GpxSource::new(TRACK.as_bytes());

        let route = source.fetch().map_err(|e| e.to_string())?;
        assert_eq!(3, route.len());
        assert_eq!(Point::new(-48.8702222, -26.31832), route[0].coordinates);
        assert_eq!(Point::new(-48.8619871, -26.3185861), route[2].coordinates);

        Ok(())
    }

    #[test]
    fn route_fallback() -> Result<(), String> {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="gpxwalker tests" xmlns="http://www.topografix.com/GPX/1/1">
  <rte>
    <rtept lat="10.5" lon="20.25"></rtept>
    <rtept lat="10.6" lon="20.35"></rtept>
  </rte>
</gpx>
"#;
        let route = GpxSource::new(doc.as_bytes())
            .fetch()
            .map_err(|e| e.to_string())?;
        assert_eq!(2, route.len());
        assert_eq!(10.5, route[0].latitude());
        assert_eq!(20.35, route[1].longitude());

        Ok(())
    }

    #[test]
    fn out_of_range_point() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="gpxwalker tests" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="0" lon="0"></trkpt>
      <trkpt lat="0" lon="200"></trkpt>
    </trkseg>
  </trk>
</gpx>
"#;
        let result = GpxSource::new(doc.as_bytes()).fetch();

        assert!(matches!(result, Err(WalkerError::Track(_))));
    }

    #[test]
    fn malformed_document() {
        let mut source = GpxSource::new("<gpx><trk>".as_bytes());

        assert!(matches!(source.fetch(), Err(WalkerError::Track(_))));
    }

    #[test]
    fn empty_document() {
        let doc = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="gpxwalker tests" xmlns="http://www.topografix.com/GPX/1/1">
</gpx>
"#;
        let mut source = GpxSource::new(doc.as_bytes());

        assert!(matches!(source.fetch(), Err(WalkerError::Track(_))));
    }
}
