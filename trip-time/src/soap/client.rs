//! Trip-time SOAP client.
//!
//! Validates a trip, sends the `calculerTempsTrajet` envelope, extracts the
//! total from whatever comes back and pairs it with the locally derived
//! breakdown. Failures never escape [`TripTimeClient::compute_trip_time`];
//! they come back as an unsuccessful [`TripTimeResult`].

use std::future::Future;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::{debug, info, warn};

use crate::domain::{TripRequest, TripTime, TripTimeResult};

use super::envelope::{OPERATION, build_envelope};
use super::error::{TransportError, TripTimeError};
use super::extract::{ExtractedTotal, extract};

/// Default endpoint of the electric-vehicle service.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Environment variable overriding the endpoint.
pub const ENDPOINT_ENV: &str = "TRIP_TIME_ENDPOINT";

/// Content type of SOAP 1.1 requests.
pub const SOAP_CONTENT_TYPE: &str = "text/xml;charset=UTF-8";

/// Header naming the invoked operation.
pub const SOAP_ACTION_HEADER: &str = "SOAPAction";

/// Longest slice of an error body kept in a transport error.
const ERROR_BODY_LIMIT: usize = 200;

/// Configuration for the trip-time client.
#[derive(Debug, Clone)]
pub struct SoapConfig {
    /// Service endpoint, without the `?wsdl` suffix
    pub endpoint: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl SoapConfig {
    /// Create a new config for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: 30,
        }
    }

    /// Read the endpoint from `TRIP_TIME_ENDPOINT`, falling back to the default.
    pub fn from_env() -> Self {
        match std::env::var(ENDPOINT_ENV) {
            Ok(endpoint) if !endpoint.trim().is_empty() => Self::new(endpoint.trim()),
            _ => Self::default(),
        }
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl Default for SoapConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

/// Moves envelopes to the service and raw bodies back.
pub trait SoapTransport: Send + Sync {
    /// POST `envelope` to `url`, naming `action` as the invoked operation.
    ///
    /// Returns the response body of a successful (2xx) answer.
    fn post(
        &self,
        url: &str,
        action: &str,
        envelope: String,
    ) -> impl Future<Output = Result<String, TransportError>> + Send;

    /// GET `url`, succeeding on any 2xx status.
    fn get(&self, url: &str) -> impl Future<Output = Result<(), TransportError>> + Send;
}

/// HTTP transport backed by reqwest.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self { http })
    }
}

impl SoapTransport for HttpTransport {
    async fn post(
        &self,
        url: &str,
        action: &str,
        envelope: String,
    ) -> Result<String, TransportError> {
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static(SOAP_CONTENT_TYPE))
            .header(SOAP_ACTION_HEADER, action)
            .body(envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: body.chars().take(ERROR_BODY_LIMIT).collect(),
            });
        }

        Ok(response.text().await?)
    }

    async fn get(&self, url: &str) -> Result<(), TransportError> {
        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }
        Ok(())
    }
}

/// Client for the electric-vehicle trip-time service.
///
/// Holds no mutable state; clones share the underlying connection pool and
/// concurrent calls are independent.
#[derive(Debug, Clone)]
pub struct TripTimeClient<T = HttpTransport> {
    transport: T,
    endpoint: String,
}

impl TripTimeClient<HttpTransport> {
    /// Create a client talking HTTP to the configured endpoint.
    pub fn new(config: SoapConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config.timeout_secs)?;
        Ok(Self::with_transport(config.endpoint, transport))
    }
}

impl<T: SoapTransport> TripTimeClient<T> {
    /// Create a client over an arbitrary transport.
    pub fn with_transport(endpoint: impl Into<String>, transport: T) -> Self {
        Self {
            transport,
            endpoint: endpoint.into(),
        }
    }

    /// The endpoint requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Compute the trip time, reporting any failure inside the result.
    pub async fn compute_trip_time(&self, request: &TripRequest) -> TripTimeResult {
        let outcome = self.try_compute_trip_time(request).await;
        if let Err(e) = &outcome {
            warn!(error = %e, ?request, "trip time computation failed");
        }
        TripTimeResult::from_outcome(outcome)
    }

    /// Compute the trip time, returning failures as typed errors.
    ///
    /// Invalid requests fail before anything is sent. Nothing is retried.
    pub async fn try_compute_trip_time(
        &self,
        request: &TripRequest,
    ) -> Result<TripTime, TripTimeError> {
        request.validate()?;

        let envelope = build_envelope(
            request.distance_km,
            request.speed_kmh,
            request.range_km,
            request.recharge_minutes,
        );
        debug!(endpoint = %self.endpoint, "sending {OPERATION} request");

        let raw = self
            .transport
            .post(&self.endpoint, OPERATION, envelope)
            .await?;

        match extract(&raw)? {
            ExtractedTotal::Fault { message } => Err(TripTimeError::Fault { message }),
            ExtractedTotal::Total(total_hours) => {
                let trip = TripTime::new(*request, total_hours);
                info!(
                    total_hours,
                    recharge_stops = trip.breakdown.recharge_stops,
                    "trip time computed"
                );
                Ok(trip)
            }
        }
    }

    /// Probe `<endpoint>/?wsdl` to see whether the service is reachable.
    pub async fn check_service(&self) -> bool {
        let url = format!("{}/?wsdl", self.endpoint.trim_end_matches('/'));
        match self.transport.get(&url).await {
            Ok(()) => true,
            Err(e) => {
                debug!(error = %e, %url, "service unreachable");
                false
            }
        }
    }
}
