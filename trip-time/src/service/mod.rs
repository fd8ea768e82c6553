//! Counterpart SOAP service for electric-vehicle trip times.
//!
//! Serves the `calculerTempsTrajet` and `calculerTempsTrajetDetaillee`
//! operations over SOAP 1.1, publishes a WSDL on `GET /?wsdl`, and answers
//! CORS preflights so browser front-ends can call it directly.

mod call;
mod config;
mod error;
mod routes;
mod state;
pub mod templates;

pub use call::{CallOutput, INVALID_SUMMARY, INVALID_TOTAL, Operation, ServiceCall};
pub use config::{HOST_ENV, PORT_ENV, ServiceConfig};
pub use error::ServiceError;
pub use routes::create_router;
pub use state::ServiceState;
