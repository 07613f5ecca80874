//! Route to movement instructions compiler

use std::time::Duration;

use geo::GeodesicDistance;

use super::waypoint::{MovementInstruction, Waypoint};
use crate::error::{Result, WalkerError};

/// Walking speed used when none, or an unusable one, is configured
pub const DEFAULT_SPEED: f64 = 3.0;

pub struct Compiler {
    /// Travel speed in metres per second
    pub speed: f64,
}

impl Compiler {
    /// Start a compiler walking at the default speed
    pub fn new() -> Self {
        Self {
            speed: DEFAULT_SPEED,
        }
    }

    /// Non finite or non positive speeds fall back to [`DEFAULT_SPEED`]
    pub fn speed(&mut self, speed: f64) -> &mut Self {
        self.speed = if speed.is_finite() && speed > 0.0 {
            speed
        } else {
            log::warn!("unusable speed {}, walking at {} m/s", speed, DEFAULT_SPEED);
            DEFAULT_SPEED
        };

        self
    }

    /// Build one instruction per segment of the route.
    ///
    /// Instruction `i` stands on waypoint `i` and carries the distance and
    /// travel time to waypoint `i + 1`, so the last waypoint never shows up
    /// as a step of its own.
    pub fn build(&self, waypoints: &[Waypoint]) -> Result<Vec<MovementInstruction>> {
        if waypoints.len() < 2 {
            return Err(WalkerError::InsufficientWaypoints(waypoints.len()));
        }

        if let Some((idx, wp)) = waypoints.iter().enumerate().find(|(_, wp)| !wp.is_valid()) {
            return Err(WalkerError::Track(format!(
                "waypoint {} has invalid coordinates {},{}",
                idx + 1,
                wp.latitude(),
                wp.longitude()
            )));
        }

        waypoints
            .windows(2)
            .enumerate()
            .map(|(idx, seg)| {
                let distance_meters = seg[0]
                    .coordinates
                    .geodesic_distance(&seg[1].coordinates)
                    .round();

                if !distance_meters.is_finite() {
                    return Err(WalkerError::Track(format!(
                        "no distance between waypoints {} and {}",
                        idx + 1,
                        idx + 2
                    )));
                }

                Ok(MovementInstruction {
                    coordinates: seg[0].coordinates,
                    distance_meters,
                    dwell_seconds: self.travel_time(distance_meters)?,
                })
            })
            .collect()
    }

    /// Whole seconds to cover `distance`, as long as a sleep can last that long
    fn travel_time(&self, distance: f64) -> Result<f64> {
        let dwell = (distance / self.speed).round();

        match Duration::try_from_secs_f64(dwell) {
            Ok(_) => Ok(dwell),
            Err(_) => Err(WalkerError::Config(format!(
                "speed {} m/s is too slow to walk {} m",
                self.speed, distance
            ))),
        }
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Total time of one loop over the instructions, as `minutes:seconds`.
///
/// Seconds are not zero padded: 125 seconds is `2:5`.
pub fn route_duration(instructions: &[MovementInstruction]) -> String {
    let total: f64 = instructions.iter().map(|i| i.dwell_seconds).sum();
    let seconds = total as u64;

    format!("{}:{}", seconds / 60, seconds % 60)
}
