//! gpxwalker - replay a recorded route as live positions of a simulated device

pub mod config;
pub mod control;
mod error;
pub mod playback;
mod route;
pub mod sources;

pub use config::{Properties, Settings};
pub use control::clock::LocalClock;
pub use control::sink::{fire_and_forget, LocationSink};
pub use control::timezone::TimezoneLookup;
pub use control::{DeviceControl, DeviceInfo};
pub use error::{Result, WalkerError};
pub use playback::{Pause, Playback, Session, ThreadSleep};
pub use route::compiler::{route_duration, Compiler, DEFAULT_SPEED};
pub use route::waypoint::{MovementInstruction, Waypoint};
pub use sources::{RouteLibrary, RouteSource};
