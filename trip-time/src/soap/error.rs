//! Trip-time client error types.

use crate::domain::ValidationError;

/// The response carried no usable total.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExtractionError {
    /// No fallback strategy located a result element
    #[error("no result element found")]
    NoResult,

    /// The result element's text is not a finite number
    #[error("result is not a number: {text:?}")]
    NotANumber { text: String },

    /// The service returned a negative duration (its error sentinel)
    #[error("result is negative: {value}")]
    NegativeTotal { value: f64 },
}

/// Errors from the HTTP transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Request failed (connection refused, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("HTTP status {status}: {message}")]
    Status { status: u16, message: String },
}

/// Every way a trip-time computation can fail.
#[derive(Debug, thiserror::Error)]
pub enum TripTimeError {
    /// Request rejected before any network call
    #[error("invalid trip parameters: {0}")]
    Validation(#[from] ValidationError),

    /// Request did not get a successful HTTP answer
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Service reported an error inside the SOAP body
    #[error("SOAP fault: {message}")]
    Fault { message: String },

    /// Response shape matched none of the known layouts
    #[error("cannot parse SOAP response: {0}")]
    Extraction(#[from] ExtractionError),
}
