//! Trajectory module for scurve-planner.
//!
//! Provides planning requests and their builder.

mod builder;
mod request;

pub use builder::CurveRequestBuilder;
pub use request::{CurveRequest, MoveIntent};
