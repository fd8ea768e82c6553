//! HTTP route handlers.

use std::time::Duration;

use askama::Template;
use axum::{
    Router,
    extract::State,
    http::{HeaderMap, HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, warn};

use super::call::ServiceCall;
use super::error::ServiceError;
use super::state::ServiceState;
use super::templates::{FaultEnvelope, ResponseEnvelope, WsdlTemplate};

/// Content type of every XML document the service returns.
const XML_CONTENT_TYPE: &str = "text/xml; charset=utf-8";

/// How long browsers may cache a preflight answer (24 hours).
const PREFLIGHT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// Create the service router.
///
/// `GET /` (usually `/?wsdl`) returns the WSDL, `POST /` takes SOAP calls.
pub fn create_router(state: ServiceState) -> Router {
    Router::new()
        .route("/", get(wsdl).post(dispatch))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("soapaction")])
        .max_age(PREFLIGHT_MAX_AGE)
}

/// Service description.
async fn wsdl(State(state): State<ServiceState>) -> Response {
    match WsdlTemplate::new(state.config.location()).render() {
        Ok(xml) => xml_response(StatusCode::OK, xml),
        Err(e) => {
            warn!(error = %e, "failed to render WSDL");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {e}"),
            )
                .into_response()
        }
    }
}

/// SOAP call entry point.
///
/// The operation is taken from the envelope body; `SOAPAction` is only logged.
async fn dispatch(headers: HeaderMap, body: String) -> Response {
    let action = headers
        .get("soapaction")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    debug!(action, "received SOAP call");

    match respond(&body) {
        Ok(xml) => xml_response(StatusCode::OK, xml),
        Err(e) => fault_response(&e),
    }
}

fn respond(body: &str) -> Result<String, ServiceError> {
    let call = ServiceCall::parse(body)?;
    let output = call.evaluate();
    Ok(ResponseEnvelope::new(call.operation, output.to_xml_text()).render()?)
}

fn fault_response(err: &ServiceError) -> Response {
    warn!(error = %err, "rejecting SOAP call");
    match FaultEnvelope::new(err.fault_code(), err.to_string()).render() {
        Ok(xml) => xml_response(StatusCode::INTERNAL_SERVER_ERROR, xml),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Template error: {e}"),
        )
            .into_response(),
    }
}

fn xml_response(status: StatusCode, xml: String) -> Response {
    (status, [(header::CONTENT_TYPE, XML_CONTENT_TYPE)], xml).into_response()
}
