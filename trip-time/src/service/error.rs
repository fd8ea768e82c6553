//! Service-side error types.

/// Reasons an incoming call is rejected with a SOAP fault.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ServiceError {
    /// Body is not a well-formed SOAP envelope
    #[error("malformed SOAP envelope: {0}")]
    MalformedEnvelope(String),

    /// Body names an operation the service does not provide
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A parameter element is absent
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),

    /// A parameter is not a number
    #[error("invalid value for {name}: {value:?}")]
    InvalidParameter { name: &'static str, value: String },

    /// Response could not be rendered
    #[error("failed to render response: {0}")]
    Render(String),
}

impl ServiceError {
    /// SOAP fault code: the caller's mistake or ours.
    pub fn fault_code(&self) -> &'static str {
        match self {
            ServiceError::Render(_) => "Server",
            _ => "Client",
        }
    }
}

impl From<askama::Error> for ServiceError {
    fn from(err: askama::Error) -> Self {
        ServiceError::Render(err.to_string())
    }
}
