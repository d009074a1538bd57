// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Contact submission validator.
//!
//! Runs the anti-abuse chain in a fixed order and stops at the first
//! failing check:
//! 1. Timing honeypot (form submitted too soon after render)
//! 2. Field honeypot (hidden `website` field filled in)
//! 3. Required fields and consent
//! 4. Email shape
//! 5. Spam keyword denylist
//! 6. Suspicious message patterns
//! 7. Message length bounds
//!
//! Checks a real person can trip produce a visible [`ValidationError`].
//! Bot and spam signals produce a [`SilentReason`], which callers answer
//! exactly like a success.

use crate::config::ValidationConfig;
use crate::spam::{self, SuspiciousPattern};
use crate::submission::Submission;
use axum::http::StatusCode;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::debug;

/// Rejections reported back to the submitter.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Request body is not a readable form: {0}")]
    MalformedBody(String),

    #[error("Form submitted {elapsed_ms}ms after render")]
    SubmittedTooFast { elapsed_ms: i64 },

    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Message length {len} outside {min}..={max}")]
    MessageLength { len: usize, min: usize, max: usize },
}

impl ValidationError {
    /// HTTP status for this rejection.
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Text shown to the submitter.
    pub fn public_message(&self) -> String {
        match self {
            Self::MalformedBody(_) => "Formulario inválido".to_string(),
            Self::SubmittedTooFast { .. } => "Formulario enviado demasiado rápido".to_string(),
            Self::MissingFields => "Campos requeridos faltantes".to_string(),
            Self::InvalidEmail => "Email inválido".to_string(),
            Self::MessageLength { min, max, .. } => {
                format!("El mensaje debe tener entre {min} y {max} caracteres")
            }
        }
    }
}

/// Reason for a silent rejection. Only ever logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SilentReason {
    /// Honeypot field was filled in
    Honeypot,
    /// Denylisted keyword found
    SpamKeyword(String),
    /// Message shape looks automated
    SuspiciousContent(SuspiciousPattern),
}

impl std::fmt::Display for SilentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Honeypot => write!(f, "honeypot field filled"),
            Self::SpamKeyword(kw) => write!(f, "spam keyword '{kw}'"),
            Self::SuspiciousContent(p) => write!(f, "suspicious content: {p}"),
        }
    }
}

/// Result of running the validation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Submission passed every check
    Accepted,
    /// Submission rejected with feedback
    RejectedVisible(ValidationError),
    /// Submission rejected, caller must answer as if accepted
    RejectedSilent(SilentReason),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted)
    }
}

impl From<ValidationError> for ValidationOutcome {
    fn from(err: ValidationError) -> Self {
        ValidationOutcome::RejectedVisible(err)
    }
}

impl From<SilentReason> for ValidationOutcome {
    fn from(reason: SilentReason) -> Self {
        ValidationOutcome::RejectedSilent(reason)
    }
}

/// Contact submission validator.
pub struct SubmissionValidator {
    config: ValidationConfig,
}

impl SubmissionValidator {
    /// Create a new validator with the given configuration.
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Reject forms posted faster than a person could fill them in.
    ///
    /// `now_ms` and the submission's timestamp are epoch milliseconds. A
    /// missing timestamp passes.
    pub fn check_timing(&self, submission: &Submission, now_ms: i64) -> Result<(), ValidationError> {
        let Some(opened_at) = submission.form_opened_at else {
            return Ok(());
        };
        let elapsed_ms = now_ms.saturating_sub(opened_at);
        if elapsed_ms < self.config.min_fill_time_ms {
            debug!(elapsed_ms, "Form submitted too fast");
            return Err(ValidationError::SubmittedTooFast { elapsed_ms });
        }
        Ok(())
    }

    /// Reject submissions that filled the hidden `website` field.
    pub fn check_honeypot(&self, submission: &Submission) -> Result<(), SilentReason> {
        if submission.website.is_empty() {
            Ok(())
        } else {
            debug!("Honeypot field filled");
            Err(SilentReason::Honeypot)
        }
    }

    /// Name, email, message and consent are mandatory.
    pub fn check_required(&self, submission: &Submission) -> Result<(), ValidationError> {
        if submission.name.is_empty()
            || submission.email.is_empty()
            || submission.message.is_empty()
            || !submission.consent
        {
            debug!(
                has_name = !submission.name.is_empty(),
                has_email = !submission.email.is_empty(),
                has_message = !submission.message.is_empty(),
                consent = submission.consent,
                "Missing required fields"
            );
            return Err(ValidationError::MissingFields);
        }
        Ok(())
    }

    /// Email must look like `local@domain.tld`.
    pub fn check_email(&self, submission: &Submission) -> Result<(), ValidationError> {
        if is_plausible_email(&submission.email) {
            Ok(())
        } else {
            debug!(email = %submission.email, "Invalid email format");
            Err(ValidationError::InvalidEmail)
        }
    }

    /// Scan name, message and company for denylisted keywords.
    pub fn scan_keywords(&self, submission: &Submission) -> Result<(), SilentReason> {
        let text = format!(
            "{} {} {}",
            submission.name, submission.message, submission.company
        );
        match spam::find_spam_keyword(&text, &self.config.spam_keywords) {
            Some(kw) => Err(SilentReason::SpamKeyword(kw.to_string())),
            None => Ok(()),
        }
    }

    /// Scan the message for link stuffing, shouting and filler.
    pub fn scan_patterns(&self, submission: &Submission) -> Result<(), SilentReason> {
        match spam::detect_suspicious(
            &submission.message,
            self.config.max_urls,
            self.config.min_repeats,
        ) {
            Some(pattern) => Err(SilentReason::SuspiciousContent(pattern)),
            None => Ok(()),
        }
    }

    /// Message length, in characters, must lie within the configured bounds.
    pub fn check_length(&self, submission: &Submission) -> Result<(), ValidationError> {
        let len = submission.message.chars().count();
        let (min, max) = (self.config.min_message_len, self.config.max_message_len);
        if len < min || len > max {
            debug!(len, min, max, "Message length out of bounds");
            return Err(ValidationError::MessageLength { len, min, max });
        }
        Ok(())
    }

    /// Run the full chain.
    pub fn validate(&self, submission: &Submission, now_ms: i64) -> ValidationOutcome {
        match self.run_chain(submission, now_ms) {
            Ok(()) => ValidationOutcome::Accepted,
            Err(outcome) => outcome,
        }
    }

    fn run_chain(&self, submission: &Submission, now_ms: i64) -> Result<(), ValidationOutcome> {
        self.check_timing(submission, now_ms)?;
        self.check_honeypot(submission)?;
        self.check_required(submission)?;
        self.check_email(submission)?;
        self.scan_keywords(submission)?;
        self.scan_patterns(submission)?;
        self.check_length(submission)?;
        Ok(())
    }
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Minimal `local@domain.tld` shape check.
///
/// Exactly one `@`, no whitespace, and a dot in the domain with at least
/// one character either side of it.
fn is_plausible_email(email: &str) -> bool {
    email_pattern().is_match(email)
}
