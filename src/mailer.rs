// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Outbound mail delivery.
//!
//! [`Mailer`] is the seam between the pipeline and the transactional email
//! provider. [`ResendMailer`] talks to a Resend-compatible HTTP API.

use crate::config::MailConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use thiserror::Error;
use tracing::{debug, error};

/// Mail delivery errors.
#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email service not configured: missing API key")]
    NotConfigured,

    #[error("Email transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Email API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Email send timed out after {0}s")]
    Timeout(u64),
}

/// Identifier assigned by the provider to an accepted message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageId(pub String);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A fully addressed email.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// Something that can deliver an [`OutboundEmail`].
pub trait Mailer: Send + Sync + 'static {
    fn send(&self, email: OutboundEmail) -> impl Future<Output = Result<MessageId, MailError>> + Send;
}

#[derive(Debug, Deserialize)]
struct SendResponse {
    id: String,
}

/// Resend API client.
pub struct ResendMailer {
    api_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ResendMailer {
    /// Create a client from mail configuration.
    ///
    /// A missing API key is not an error here; it surfaces on the first send.
    pub fn new(config: &MailConfig) -> Self {
        Self {
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Mailer for ResendMailer {
    async fn send(&self, email: OutboundEmail) -> Result<MessageId, MailError> {
        let Some(api_key) = self.api_key.as_deref() else {
            error!("RESEND_API_KEY is not set");
            return Err(MailError::NotConfigured);
        };

        debug!(to = %email.to, subject = %email.subject, "Sending email");

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&email)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MailError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let sent: SendResponse = response.json().await?;
        Ok(MessageId(sent.id))
    }
}
