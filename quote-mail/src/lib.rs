//! Proposal email dispatch.
//!
//! Sending is delegated to an HTTP endpoint that accepts a JSON body of
//! `{ recipientEmail, subject, proposalHtml }`. Every outcome, including
//! transport failures, is collapsed into a [`SendOutcome`] for the caller to
//! show. Nothing is retried.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Default environment variable holding the bearer key for the endpoint.
pub const MAIL_API_KEY_ENV: &str = "QUOTE_MAIL_API_KEY";

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailError {
    #[error("{0}")]
    Rejected(String),

    #[error("email service returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("request failed: {0}")]
    Transport(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailRequest {
    pub recipient_email: String,
    pub subject: String,
    pub proposal_html: String,
}

impl EmailRequest {
    pub fn new(
        recipient_email: impl Into<String>,
        subject: impl Into<String>,
        proposal_html: impl Into<String>,
    ) -> Self {
        Self {
            recipient_email: recipient_email.into(),
            subject: subject.into(),
            proposal_html: proposal_html.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Sent,
    Failed { message: String },
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, SendOutcome::Sent)
    }
}

#[async_trait]
pub trait EmailTransport: Send + Sync {
    async fn send(&self, request: &EmailRequest) -> Result<(), MailError>;
}

/// Posts requests as JSON to a fixed endpoint.
#[derive(Clone)]
pub struct HttpEmailTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpEmailTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key: None,
        }
    }

    pub fn with_api_key(
        mut self,
        api_key: impl Into<String>,
    ) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Transport whose bearer key, if any, comes from the environment
    /// variable `api_key_env`. A missing variable means no key.
    pub fn from_env(
        endpoint: impl Into<String>,
        api_key_env: &str,
    ) -> Self {
        let transport = Self::new(endpoint);
        match std::env::var(api_key_env) {
            Ok(key) if !key.trim().is_empty() => transport.with_api_key(key),
            _ => {
                debug!("{} is not set; sending without an API key", api_key_env);
                transport
            }
        }
    }
}

#[async_trait]
impl EmailTransport for HttpEmailTransport {
    async fn send(&self, request: &EmailRequest) -> Result<(), MailError> {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        interpret_response(status.as_u16(), &body)
    }
}

/// Classifies an endpoint response. A 2xx body is a success unless it is a
/// JSON object with a non-null `error` field.
pub fn interpret_response(
    status: u16,
    body: &str,
) -> Result<(), MailError> {
    if !(200..300).contains(&status) {
        return Err(MailError::Http {
            status,
            body: body.trim().to_string(),
        });
    }

    let Ok(serde_json::Value::Object(fields)) = serde_json::from_str(body) else {
        return Ok(());
    };
    match fields.get("error") {
        None | Some(serde_json::Value::Null) => Ok(()),
        Some(serde_json::Value::String(message)) => Err(MailError::Rejected(message.clone())),
        Some(other) => Err(MailError::Rejected(other.to_string())),
    }
}

/// Sends one email at a time. A dispatch started while another is pending
/// fails immediately.
pub struct EmailDispatcher<T> {
    transport: T,
    in_flight: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<T: EmailTransport> EmailDispatcher<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_sending(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    pub async fn dispatch(
        &self,
        request: &EmailRequest,
    ) -> SendOutcome {
        if request.recipient_email.trim().is_empty() {
            return SendOutcome::Failed {
                message: "A recipient email address is required".to_string(),
            };
        }

        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return SendOutcome::Failed {
                message: "Another email is already being sent".to_string(),
            };
        }
        let _guard = InFlight(&self.in_flight);

        match self.transport.send(request).await {
            Ok(()) => {
                info!(recipient = %request.recipient_email, "proposal email sent");
                SendOutcome::Sent
            }
            Err(e) => {
                warn!(recipient = %request.recipient_email, "proposal email failed: {}", e);
                SendOutcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }
}
