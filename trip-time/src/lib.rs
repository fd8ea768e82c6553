//! Electric-vehicle trip-time connector.
//!
//! A SOAP client that asks a remote service for the total duration of an
//! electric-vehicle trip and pairs it with a locally derived breakdown
//! (driving time, recharge stops, recharge time), plus the counterpart
//! service itself.

pub mod domain;
pub mod service;
pub mod soap;
