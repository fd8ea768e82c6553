//! Domain types for electric-vehicle trip timing.
//!
//! A [`TripRequest`] carries the raw trip parameters; [`TripTime`] pairs an
//! authoritative total with the breakdown derived locally from the request.

mod error;
mod trip;

pub use error::ValidationError;
pub use trip::{DerivedMetrics, TripRequest, TripTime, TripTimeResult, split_hours};
