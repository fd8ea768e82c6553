//! Client for the electric-vehicle trip-time SOAP service.
//!
//! The service exposes a single RPC, `calculerTempsTrajet`, taking the trip
//! distance, average speed, vehicle range and recharge duration, and
//! returning the total trip time in hours.
//!
//! Key characteristics of the protocol:
//! - Requests are SOAP 1.1 envelopes posted to the service root
//! - The response layout is not guaranteed, so extraction tries several
//!   locators in a fixed order
//! - A SOAP fault in the response always wins over any result element

mod client;
mod envelope;
mod error;
mod extract;
mod mock;
pub(crate) mod xml;

pub use client::{
    DEFAULT_ENDPOINT, ENDPOINT_ENV, HttpTransport, SOAP_ACTION_HEADER, SOAP_CONTENT_TYPE,
    SoapConfig, SoapTransport, TripTimeClient,
};
pub use envelope::{OPERATION, PARAMETERS, SERVICE_NS, SOAP_ENV_NS, build_envelope};
pub use error::{ExtractionError, TransportError, TripTimeError};
pub use extract::{DEFAULT_FAULT_MESSAGE, ExtractedTotal, extract};
pub use mock::{MockTransport, RecordedCall};
