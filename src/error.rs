//! Walker errors

use std::io;

/// Errors raised while preparing or driving a walk.
///
/// Everything except [`WalkerError::Transport`] is fatal at startup. A
/// transport failure while posting a location is logged and dropped by the
/// playback loop instead.
#[derive(Debug, thiserror::Error)]
pub enum WalkerError {
    #[error("a route needs at least 2 waypoints, got {0}")]
    InsufficientWaypoints(usize),

    #[error("no movement instructions to play")]
    NoInstructions,

    #[error("route `{0}` not found")]
    RouteNotFound(String),

    #[error("invalid track data: {0}")]
    Track(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("could not resolve a device: {0}")]
    DeviceResolution(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

pub type Result<T> = core::result::Result<T, WalkerError>;
