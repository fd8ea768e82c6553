//! Incoming SOAP calls: parsing and evaluation.

use tracing::{error, info};

use crate::domain::{TripRequest, TripTime};
use crate::soap::xml::{Document, NameMatch, NodeId};
use crate::soap::{OPERATION, PARAMETERS};

use super::error::ServiceError;

/// Returned by `calculerTempsTrajet` for parameters it cannot compute with.
pub const INVALID_TOTAL: f64 = -1.0;

/// Returned by `calculerTempsTrajetDetaillee` for invalid parameters.
pub const INVALID_SUMMARY: &str = "Erreur: Paramètres invalides";

/// Operations offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Total trip time in hours
    TripTime,
    /// Text summary of the trip
    DetailedTripTime,
}

impl Operation {
    pub const ALL: [Operation; 2] = [Operation::TripTime, Operation::DetailedTripTime];

    /// Name used on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::TripTime => OPERATION,
            Operation::DetailedTripTime => "calculerTempsTrajetDetaillee",
        }
    }

    /// XML Schema type of the operation's result.
    pub fn result_type(&self) -> &'static str {
        match self {
            Operation::TripTime => "xs:float",
            Operation::DetailedTripTime => "xs:string",
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.name() == name)
    }
}

/// A parsed call: which operation, with which trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ServiceCall {
    pub operation: Operation,
    pub request: TripRequest,
}

/// Result value of an evaluated call.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutput {
    Total(f64),
    Summary(String),
}

impl CallOutput {
    /// Text placed inside the result element.
    pub fn to_xml_text(&self) -> String {
        match self {
            // Debug keeps a trailing ".0", the usual xs:float lexical form.
            CallOutput::Total(value) => format!("{value:?}"),
            CallOutput::Summary(text) => text.clone(),
        }
    }
}

impl ServiceCall {
    /// Parse a request envelope.
    ///
    /// The operation is the first element inside `Body`; parameters are
    /// looked up by local name, so any namespace prefix is accepted.
    pub fn parse(body: &str) -> Result<Self, ServiceError> {
        let doc = Document::parse(body);
        if !doc.is_well_formed() {
            let reason = doc.error().unwrap_or("incomplete document");
            return Err(ServiceError::MalformedEnvelope(reason.to_string()));
        }

        let soap_body = doc
            .find("Body", NameMatch::AnyNamespace)
            .ok_or_else(|| ServiceError::MalformedEnvelope("no Body element".to_string()))?;
        let op_node = doc
            .first_child(soap_body)
            .ok_or_else(|| ServiceError::MalformedEnvelope("empty Body".to_string()))?;

        let op_name = doc.local_name(op_node);
        let operation = Operation::from_name(op_name)
            .ok_or_else(|| ServiceError::UnknownOperation(op_name.to_string()))?;

        let [distance, speed, range, recharge] = PARAMETERS;
        let request = TripRequest::new(
            parameter(&doc, op_node, distance)?,
            parameter(&doc, op_node, speed)?,
            parameter(&doc, op_node, range)?,
            parameter(&doc, op_node, recharge)?,
        );

        Ok(Self { operation, request })
    }

    /// Evaluate the call.
    ///
    /// Invalid trips are answered in-band (sentinel value or error text),
    /// not with a fault.
    pub fn evaluate(&self) -> CallOutput {
        let request = &self.request;
        if let Err(e) = request.validate() {
            error!(?request, error = %e, "invalid parameters");
            return match self.operation {
                Operation::TripTime => CallOutput::Total(INVALID_TOTAL),
                Operation::DetailedTripTime => CallOutput::Summary(INVALID_SUMMARY.to_string()),
            };
        }

        let trip = TripTime::new(*request, request.total_hours());
        info!(
            distance_km = request.distance_km,
            speed_kmh = request.speed_kmh,
            range_km = request.range_km,
            recharge_stops = trip.breakdown.recharge_stops,
            total_hours = trip.total_hours,
            "computed trip time"
        );

        match self.operation {
            Operation::TripTime => CallOutput::Total(trip.total_hours),
            Operation::DetailedTripTime => CallOutput::Summary(trip.summary()),
        }
    }
}

fn parameter(doc: &Document, scope: NodeId, name: &'static str) -> Result<f64, ServiceError> {
    let node = doc
        .find_within(scope, name, NameMatch::AnyNamespace)
        .ok_or(ServiceError::MissingParameter(name))?;
    let text = doc.text(node).trim();
    text.parse().map_err(|_| ServiceError::InvalidParameter {
        name,
        value: text.to_string(),
    })
}
