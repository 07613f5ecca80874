//! Route sources API

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::error::{Result, WalkerError};
use crate::Waypoint;

/// Route source
pub trait RouteSource {
    /// Fetch the ordered waypoints of the route
    fn fetch(&mut self) -> Result<Vec<Waypoint>>;
}

mod gpx_file;

pub use gpx_file::GpxSource;

#[cfg(feature = "csv")]
mod csv_file;

#[cfg(feature = "csv")]
pub use csv_file::CsvSource;

/// Named routes stored as files inside a directory
pub struct RouteLibrary {
    pub dir: PathBuf,
}

impl RouteLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Resolve `name` to `<dir>/<name>.xml`, `.gpx` or `.csv` and read it
    pub fn load(&self, name: &str) -> Result<Vec<Waypoint>> {
        for ext in ["xml", "gpx"] {
            let path = self.dir.join(format!("{}.{}", name, ext));
            if path.is_file() {
                log::debug!("reading route from {}", path.display());
                let file = File::open(&path)?;
                return GpxSource::new(BufReader::new(file)).fetch();
            }
        }

        #[cfg(feature = "csv")]
        {
            let path = self.dir.join(format!("{}.csv", name));
            if path.is_file() {
                log::debug!("reading route from {}", path.display());
                let rdr = csv::ReaderBuilder::new()
                    .flexible(true)
                    .trim(csv::Trim::All)
                    .from_path(&path)
                    .map_err(|e| WalkerError::Track(e.to_string()))?;
                return CsvSource::new(rdr).fetch();
            }
        }

        Err(WalkerError::RouteNotFound(format!(
            "{} in {}",
            name,
            self.dir.display()
        )))
    }
}

#[cfg(test)]
pub mod tests {
    use std::fs;

    use super::RouteLibrary;
    use crate::WalkerError;

    pub const TRACK: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="gpxwalker tests" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <name>running in joinville</name>
    <trkseg>
      <trkpt lat="-26.31832" lon="-48.8702222"></trkpt>
      <trkpt lat="-26.3185919" lon="-48.8619776"></trkpt>
      <trkpt lat="-26.3185861" lon="-48.8619871"></trkpt>
    </trkseg>
  </trk>
</gpx>
"#;

    #[test]
    fn library_reads_xml_route() -> Result<(), String> {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        fs::write(dir.path().join("loop.xml"), TRACK).map_err(|e| e.to_string())?;

        let route = RouteLibrary::new(dir.path())
            .load("loop")
            .map_err(|e| e.to_string())?;
        assert_eq!(3, route.len());
        assert_eq!(-26.31832, route[0].latitude());
        assert_eq!(-48.8702222, route[0].longitude());

        Ok(())
    }

    #[test]
    fn library_reads_gpx_extension() -> Result<(), String> {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        fs::write(dir.path().join("joinville.gpx"), TRACK).map_err(|e| e.to_string())?;

        let route = RouteLibrary::new(dir.path())
            .load("joinville")
            .map_err(|e| e.to_string())?;
        assert_eq!(3, route.len());

        Ok(())
    }

    #[cfg(feature = "csv")]
    #[test]
    fn library_reads_csv_route() -> Result<(), String> {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
        fs::write(
            dir.path().join("block.csv"),
            "lat,lng\n-26.31832,-48.8702222\n-26.3185919,-48.8619776\n",
        )
        .map_err(|e| e.to_string())?;

        let route = RouteLibrary::new(dir.path())
            .load("block")
            .map_err(|e| e.to_string())?;
        assert_eq!(2, route.len());
        assert_eq!(-48.8619776, route[1].longitude());

        Ok(())
    }

    #[test]
    fn missing_route() -> Result<(), String> {
        let dir = tempfile::tempdir().map_err(|e| e.to_string())?;

        assert!(matches!(
            RouteLibrary::new(dir.path()).load("nowhere"),
            Err(WalkerError::RouteNotFound(_))
        ));

        Ok(())
    }
}
