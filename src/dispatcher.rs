// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead notification dispatch.
//!
//! The operator notification is the lead itself: it is awaited and its
//! failure fails the request. The client confirmation is a courtesy: it is
//! spawned once the notification is out and its failure is only logged.

use crate::config::{BrandingConfig, MailConfig};
use crate::mailer::{MailError, Mailer, MessageId, OutboundEmail};
use crate::submission::Submission;
use crate::templates::{self, RenderedEmail};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Outcome of a successful dispatch.
#[derive(Debug)]
pub struct Dispatched {
    /// Provider id of the operator notification
    pub notification_id: MessageId,
    /// Background confirmation send; resolves to its message id on success
    pub confirmation: JoinHandle<Option<MessageId>>,
}

/// Sends the two emails for an accepted submission.
pub struct NotificationDispatcher<M> {
    mailer: Arc<M>,
    from: String,
    operator: String,
    timeout: Duration,
    branding: BrandingConfig,
}

impl<M: Mailer> NotificationDispatcher<M> {
    pub fn new(mailer: Arc<M>, mail: &MailConfig, branding: BrandingConfig) -> Self {
        Self {
            mailer,
            from: mail.from.clone(),
            operator: mail.to.clone(),
            timeout: mail.timeout(),
            branding,
        }
    }

    /// Notify the operator, then queue the client confirmation.
    ///
    /// Returns an error only when the operator notification fails, in which
    /// case no confirmation is sent.
    pub async fn dispatch(
        &self,
        submission: &Submission,
        client_ip: &str,
    ) -> Result<Dispatched, MailError> {
        let rendered =
            templates::lead_notification(submission, client_ip, Utc::now(), &self.branding);
        let notification = self.address(rendered, self.operator.clone(), Some(submission.email.clone()));

        let notification_id = match send_with_timeout(&*self.mailer, notification, self.timeout).await {
            Ok(id) => {
                info!(ip = %client_ip, message_id = %id, "Lead notification sent");
                id
            }
            Err(e) => {
                error!(ip = %client_ip, error = %e, "Lead notification failed");
                return Err(e);
            }
        };

        let rendered = templates::client_confirmation(submission, &self.branding);
        let confirmation = self.address(rendered, submission.email.clone(), None);
        let mailer = Arc::clone(&self.mailer);
        let timeout = self.timeout;
        let recipient = submission.email.clone();

        let confirmation = tokio::spawn(async move {
            match send_with_timeout(&*mailer, confirmation, timeout).await {
                Ok(id) => {
                    info!(to = %recipient, message_id = %id, "Client confirmation sent");
                    Some(id)
                }
                Err(e) => {
                    warn!(to = %recipient, error = %e, "Client confirmation failed");
                    None
                }
            }
        });

        Ok(Dispatched {
            notification_id,
            confirmation,
        })
    }

    fn address(&self, rendered: RenderedEmail, to: String, reply_to: Option<String>) -> OutboundEmail {
        OutboundEmail {
            from: self.from.clone(),
            to,
            reply_to,
            subject: rendered.subject,
            html: rendered.html,
            text: rendered.text,
        }
    }
}

async fn send_with_timeout<M: Mailer>(
    mailer: &M,
    email: OutboundEmail,
    timeout: Duration,
) -> Result<MessageId, MailError> {
    match tokio::time::timeout(timeout, mailer.send(email)).await {
        Ok(result) => result,
        Err(_) => Err(MailError::Timeout(timeout.as_secs())),
    }
}
