//! Waypoint and instruction definitions

use geo::geometry::Point;

/// Recorded point of a route
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Waypoint {
    /// x is the longitude, y the latitude
    pub coordinates: Point,
}

impl Waypoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            coordinates: Point::new(longitude, latitude),
        }
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates.y()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.x()
    }

    /// Finite latitude within ±90 and longitude within ±180
    pub fn is_valid(&self) -> bool {
        let (lat, lng) = (self.latitude(), self.longitude());

        lat.is_finite() && lng.is_finite() && lat.abs() <= 90.0 && lng.abs() <= 180.0
    }
}

impl From<Point> for Waypoint {
    fn from(coordinates: Point) -> Self {
        Self { coordinates }
    }
}

/// One step of the walk: stand at `coordinates`, then wait `dwell_seconds`
/// before moving on to the next instruction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MovementInstruction {
    pub coordinates: Point,
    /// Distance to the next waypoint, whole metres
    pub distance_meters: f64,
    /// Whole seconds
    pub dwell_seconds: f64,
}

impl MovementInstruction {
    pub fn latitude(&self) -> f64 {
        self.coordinates.y()
    }

    pub fn longitude(&self) -> f64 {
        self.coordinates.x()
    }
}
