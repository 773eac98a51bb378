//! Outbound HTTP for a single attempt.
//!
//! # Responsibilities
//! - Send a `RequestSpec` as a JSON POST
//! - Attach the credential header at send time
//! - Classify what went wrong into an `AttemptFailure`
//!
//! The executor owns retry decisions; a transport only reports one attempt.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde_json::Value;

use crate::resilience::timeouts::with_deadline;
use crate::resilience::types::{AttemptFailure, RequestSpec};

/// Longest response body kept in a failure message.
const MAX_BODY_EXCERPT: usize = 512;

/// Performs one attempt of a request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &RequestSpec) -> Result<Value, AttemptFailure>;
}

/// Transport backed by a shared `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(reqwest::Client::new())
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &RequestSpec) -> Result<Value, AttemptFailure> {
        let mut builder = self
            .client
            .post(&request.endpoint)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        if let Some(credential) = &request.credential {
            if let Some(secret) = credential.secret() {
                builder = builder.header(credential.header(), secret.expose_secret());
            }
        }

        let builder = builder.json(&request.body);

        with_deadline(request.timeout, async move {
            let response = builder.send().await.map_err(classify_reqwest_error)?;
            let status = response.status();

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(AttemptFailure::Status {
                    status: status.as_u16(),
                    body: excerpt(&body),
                });
            }

            let text = response.text().await.map_err(classify_reqwest_error)?;
            serde_json::from_str::<Value>(&text).map_err(|e| {
                AttemptFailure::Unexpected(format!("response body is not JSON: {}", e))
            })
        })
        .await
    }
}

fn classify_reqwest_error(err: reqwest::Error) -> AttemptFailure {
    if err.is_builder() {
        AttemptFailure::InvalidRequest(err.to_string())
    } else if err.is_timeout() {
        AttemptFailure::Transport(format!("timed out: {}", err))
    } else if err.is_connect() || err.is_request() || err.is_body() || err.is_status() {
        AttemptFailure::Transport(err.to_string())
    } else {
        AttemptFailure::Unexpected(err.to_string())
    }
}

/// Single-line, length-capped copy of an error body. Error payloads are often
/// pretty-printed JSON.
fn excerpt(body: &str) -> String {
    let flat = body.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(MAX_BODY_EXCERPT) {
        Some((idx, _)) => format!("{}...", &flat[..idx]),
        None => flat,
    }
}
