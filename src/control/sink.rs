//! Location sink API

use geo::geometry::Point;

use crate::error::Result;

/// Receiver of simulated positions
pub trait LocationSink {
    /// Command the device `udid` to stand at `coordinates`
    fn set_location(&self, coordinates: Point, udid: &str) -> Result<()>;
}

/// Post a location, logging and dropping any failure.
///
/// The next lap posts the same position again, so a missed update heals by
/// itself. Calls whose failure must stop the walk, like the device lookup,
/// return their error instead.
pub fn fire_and_forget<S>(sink: &S, coordinates: Point, udid: &str)
where
    S: LocationSink + ?Sized,
{
    if let Err(e) = sink.set_location(coordinates, udid) {
        log::warn!(
            "location {},{} not delivered: {}",
            coordinates.y(),
            coordinates.x(),
            e
        );
    }
}
