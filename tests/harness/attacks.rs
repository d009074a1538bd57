// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Abuse simulation patterns for security testing.

use super::generators;
use contact_form_pipeline::Submission;

/// Kind of payload a simulated client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payload {
    /// Well-formed human submission
    Legitimate,
    /// Hidden field filled in
    Honeypot,
    /// Denylisted keyword in the message
    KeywordSpam,
    /// Link stuffing, shouting or filler
    Suspicious,
    /// Posted right after the form rendered
    InstantSubmit,
}

/// Attack pattern configuration.
#[derive(Debug, Clone)]
pub struct AttackConfig {
    /// Total number of requests to send
    pub total_requests: usize,
    /// Number of unique IPs to simulate
    pub unique_ips: usize,
    /// What every request carries
    pub payload: Payload,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            total_requests: 50,
            unique_ips: 1,
            payload: Payload::Legitimate,
        }
    }
}

/// Predefined attack patterns.
impl AttackConfig {
    /// Single IP flood - one client resubmitting as fast as it can.
    pub fn single_ip_flood() -> Self {
        Self {
            total_requests: 100,
            unique_ips: 1,
            ..Default::default()
        }
    }

    /// Distributed visitors - many IPs, one submission each.
    pub fn distributed_visitors() -> Self {
        Self {
            total_requests: 50,
            unique_ips: 50,
            ..Default::default()
        }
    }

    /// Form-filling bots that also fill the honeypot.
    pub fn honeypot_bots() -> Self {
        Self {
            total_requests: 40,
            unique_ips: 40,
            payload: Payload::Honeypot,
        }
    }

    /// Keyword spam from a botnet.
    pub fn keyword_spam() -> Self {
        Self {
            total_requests: 35,
            unique_ips: 35,
            payload: Payload::KeywordSpam,
        }
    }

    /// Pattern spam from a botnet.
    pub fn pattern_spam() -> Self {
        Self {
            total_requests: 25,
            unique_ips: 25,
            payload: Payload::Suspicious,
        }
    }

    /// Scripted instant submits.
    pub fn instant_submit() -> Self {
        Self {
            total_requests: 20,
            unique_ips: 20,
            payload: Payload::InstantSubmit,
        }
    }

    /// Build the submission for request `index`.
    pub fn submission(&self, index: usize) -> Submission {
        let base = generators::legit_submission();
        match self.payload {
            Payload::Legitimate => base,
            Payload::Honeypot => {
                let values = generators::honeypot_values();
                Submission {
                    website: values[index % values.len()].trim().to_string(),
                    ..base
                }
            }
            Payload::KeywordSpam => {
                let messages = generators::keyword_spam_messages();
                Submission {
                    message: messages[index % messages.len()].to_string(),
                    ..base
                }
            }
            Payload::Suspicious => {
                let messages = generators::suspicious_messages();
                Submission {
                    message: messages[index % messages.len()].to_string(),
                    ..base
                }
            }
            Payload::InstantSubmit => Submission {
                form_opened_at: Some(generators::opened_ago(200)),
                ..base
            },
        }
    }
}
