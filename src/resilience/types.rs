//! Request and outcome types for the retrying executor.

use std::time::Duration;

use chrono::{DateTime, Local};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

/// Identity of the item a call is made for, carried into logs and failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub name: String,
    pub domain: String,
}

impl Subject {
    pub fn new(name: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
        }
    }
}

/// A secret that must be attached to every attempt under `header`.
#[derive(Debug, Clone)]
pub struct Credential {
    header: String,
    secret: Option<SecretString>,
}

impl Credential {
    /// A credential the request cannot be sent without.
    pub fn required(header: impl Into<String>, secret: Option<SecretString>) -> Self {
        Self {
            header: header.into(),
            secret,
        }
    }

    pub fn header(&self) -> &str {
        &self.header
    }

    /// The secret, if one was supplied and is not blank.
    pub fn secret(&self) -> Option<&SecretString> {
        self.secret
            .as_ref()
            .filter(|s| !s.expose_secret().trim().is_empty())
    }
}

/// A fully-formed request. Built once per call, reused for every attempt.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub endpoint: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
    pub timeout: Duration,
    pub credential: Option<Credential>,
}

impl RequestSpec {
    pub fn post_json(endpoint: impl Into<String>, body: Value, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            headers: vec![("Content-Type".to_string(), "application/json".to_string())],
            body,
            timeout,
            credential: None,
        }
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    /// Checks that must pass before any attempt is made.
    pub fn check_preconditions(&self) -> Result<(), String> {
        match &self.credential {
            Some(credential) if credential.secret().is_none() => Err(format!(
                "credential for header '{}' is missing",
                credential.header()
            )),
            _ => Ok(()),
        }
    }
}

/// Why a single attempt did not produce a usable payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttemptFailure {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected error: {0}")]
    Unexpected(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl AttemptFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            AttemptFailure::Transport(_)
            | AttemptFailure::Status { .. }
            | AttemptFailure::Timeout(_) => FailureKind::Transport,
            AttemptFailure::Unexpected(_) => FailureKind::Unexpected,
            AttemptFailure::InvalidRequest(_) => FailureKind::Terminal,
        }
    }
}

/// Failure taxonomy used for retry decisions, logs and metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Required setup missing; no attempt was made.
    Precondition,
    /// Network or HTTP status failure; retried.
    Transport,
    /// Anything else that went wrong during send/parse; retried.
    Unexpected,
    /// The request can never succeed as built; not retried.
    Terminal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Precondition => "precondition",
            FailureKind::Transport => "transport",
            FailureKind::Unexpected => "unexpected",
            FailureKind::Terminal => "terminal",
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, FailureKind::Transport | FailureKind::Unexpected)
    }
}

/// Result of one attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum AttemptResult {
    Success(Value),
    RetryableFailure(AttemptFailure),
    TerminalFailure(AttemptFailure),
}

impl From<Result<Value, AttemptFailure>> for AttemptResult {
    fn from(result: Result<Value, AttemptFailure>) -> Self {
        match result {
            Ok(payload) => AttemptResult::Success(payload),
            Err(failure) if failure.kind().is_retryable() => {
                AttemptResult::RetryableFailure(failure)
            }
            Err(failure) => AttemptResult::TerminalFailure(failure),
        }
    }
}

/// The expected field was absent from an otherwise successful response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractionError {
    #[error("response is missing {0}")]
    MissingField(String),
}

/// Context attached to a failed call.
#[derive(Debug, Clone, PartialEq)]
pub struct FailureMetadata {
    pub subject: Subject,
    pub at: DateTime<Local>,
    pub attempts: u32,
    pub kind: FailureKind,
}

/// What the executor hands back. Every exit path produces one of these.
#[derive(Debug, Clone, PartialEq)]
pub enum CallOutcome {
    Extracted {
        text: String,
        attempts: u32,
        /// The response lacked the expected field and `text` is the fallback.
        fallback: bool,
    },
    Failed {
        reason: String,
        metadata: FailureMetadata,
    },
}

impl CallOutcome {
    pub fn attempts(&self) -> u32 {
        match self {
            CallOutcome::Extracted { attempts, .. } => *attempts,
            CallOutcome::Failed { metadata, .. } => metadata.attempts,
        }
    }

    pub fn is_extracted(&self) -> bool {
        matches!(self, CallOutcome::Extracted { .. })
    }
}
