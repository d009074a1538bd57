// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! In-memory mailer that records every send.

use contact_form_pipeline::mailer::{MailError, Mailer, MessageId, OutboundEmail};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    /// Recipient whose sends fail
    fail_to: Option<String>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that rejects every email addressed to `recipient`.
    pub fn failing_for(recipient: &str) -> Self {
        Self {
            fail_to: Some(recipient.to_string()),
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, recipient: &str) -> Vec<OutboundEmail> {
        self.sent()
            .into_iter()
            .filter(|email| email.to == recipient)
            .collect()
    }

    /// Wait for background sends to land.
    pub async fn wait_for(&self, count: usize) -> Vec<OutboundEmail> {
        for _ in 0..100 {
            if self.sent.lock().unwrap().len() >= count {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        self.sent()
    }
}

impl Mailer for RecordingMailer {
    async fn send(&self, email: OutboundEmail) -> Result<MessageId, MailError> {
        let failing = self.fail_to.as_deref() == Some(email.to.as_str());
        let mut sent = self.sent.lock().unwrap();
        sent.push(email);
        if failing {
            return Err(MailError::Api {
                status: 503,
                body: "unavailable".to_string(),
            });
        }
        Ok(MessageId(format!("test-{}", sent.len())))
    }
}
