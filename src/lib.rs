// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Form Pipeline
//!
//! This crate provides the server side of a website contact form:
//!
//! - Per-IP rate limiting (one accepted submission per 10s window by default)
//! - Timing and field honeypots
//! - Required field, email shape and message length validation
//! - Spam keyword and suspicious pattern detection with silent rejection
//! - Operator notification and client confirmation emails over a
//!   transactional email API

pub mod config;
pub mod dispatcher;
pub mod handlers;
pub mod limiter;
pub mod mailer;
pub mod spam;
pub mod submission;
pub mod templates;
pub mod validator;

pub use config::Config;
pub use dispatcher::NotificationDispatcher;
pub use limiter::{RateLimitResult, RateLimiter};
pub use mailer::{MailError, Mailer, ResendMailer};
pub use submission::Submission;
pub use validator::{SubmissionValidator, ValidationOutcome};
