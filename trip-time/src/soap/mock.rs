//! Mock transport for exercising the client without a live service.
//!
//! Serves one canned answer to every request and records what was sent.

use std::sync::Arc;

use tokio::sync::Mutex;

use super::client::SoapTransport;
use super::error::TransportError;

/// A request captured by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub url: String,
    pub action: String,
    pub envelope: String,
}

#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Status { status: u16, message: String },
}

/// Transport that answers from memory.
#[derive(Debug, Clone)]
pub struct MockTransport {
    reply: Reply,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    probes: Arc<Mutex<Vec<String>>>,
}

impl MockTransport {
    /// Answer every request with `body` and a 200 status.
    pub fn responding(body: impl Into<String>) -> Self {
        Self::with_reply(Reply::Body(body.into()))
    }

    /// Answer every request with the given non-success status.
    pub fn failing(status: u16, message: impl Into<String>) -> Self {
        Self::with_reply(Reply::Status {
            status,
            message: message.into(),
        })
    }

    fn with_reply(reply: Reply) -> Self {
        Self {
            reply,
            calls: Arc::new(Mutex::new(Vec::new())),
            probes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Envelopes posted so far, oldest first.
    pub async fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().await.clone()
    }

    /// URLs probed with GET so far, oldest first.
    pub async fn probes(&self) -> Vec<String> {
        self.probes.lock().await.clone()
    }

    fn answer(&self) -> Result<String, TransportError> {
        match &self.reply {
            Reply::Body(body) => Ok(body.clone()),
            Reply::Status { status, message } => Err(TransportError::Status {
                status: *status,
                message: message.clone(),
            }),
        }
    }
}

impl SoapTransport for MockTransport {
    async fn post(
        &self,
        url: &str,
        action: &str,
        envelope: String,
    ) -> Result<String, TransportError> {
        self.calls.lock().await.push(RecordedCall {
            url: url.to_string(),
            action: action.to_string(),
            envelope,
        });
        self.answer()
    }

    async fn get(&self, url: &str) -> Result<(), TransportError> {
        self.probes.lock().await.push(url.to_string());
        self.answer().map(|_| ())
    }
}
