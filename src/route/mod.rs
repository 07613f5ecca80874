//! Route model and instruction compiler

pub mod compiler;
pub mod waypoint;
