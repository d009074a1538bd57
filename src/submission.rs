// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact form submission model.
//!
//! [`SubmissionForm`] is what arrives on the wire; [`Submission`] is the
//! trimmed, typed view every later stage works on. Neither is persisted.

use serde::Serialize;

/// Raw form-encoded body of `POST /api/contact`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub company: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
    /// Honeypot, hidden from humans
    pub website: Option<String>,
    /// Checkbox value, `on` when ticked
    pub consent: Option<String>,
    /// Epoch milliseconds at which the form was rendered, sent as `_ts`
    pub ts: Option<String>,
}

impl SubmissionForm {
    /// Parse an `application/x-www-form-urlencoded` body.
    ///
    /// Never fails: the first value of a repeated field wins, unknown fields
    /// are ignored and invalid percent-encoding is decoded lossily.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        let mut form = Self::default();
        for (key, value) in url::form_urlencoded::parse(body) {
            let slot = match key.as_ref() {
                "name" => &mut form.name,
                "email" => &mut form.email,
                "company" => &mut form.company,
                "budget" => &mut form.budget,
                "message" => &mut form.message,
                "website" => &mut form.website,
                "consent" => &mut form.consent,
                "_ts" => &mut form.ts,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        form
    }
}

/// Normalized submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub name: String,
    pub email: String,
    /// Empty when the submitter left it blank
    pub company: String,
    pub budget: String,
    pub message: String,
    pub website: String,
    pub consent: bool,
    pub form_opened_at: Option<i64>,
}

impl Submission {
    /// Company name, if one was given.
    pub fn company(&self) -> Option<&str> {
        Some(self.company.as_str()).filter(|c| !c.is_empty())
    }
}

impl From<SubmissionForm> for Submission {
    fn from(form: SubmissionForm) -> Self {
        Self {
            name: trimmed(form.name),
            email: trimmed(form.email),
            company: trimmed(form.company),
            budget: trimmed(form.budget),
            message: trimmed(form.message),
            website: trimmed(form.website),
            consent: matches!(
                form.consent.as_deref().map(str::trim),
                Some("on") | Some("true")
            ),
            form_opened_at: form.ts.as_deref().and_then(parse_timestamp),
        }
    }
}

fn trimmed(value: Option<String>) -> String {
    value.map(|v| v.trim().to_string()).unwrap_or_default()
}

/// Parse a client-supplied millisecond timestamp.
///
/// Leading digits are honoured and the rest ignored, so `1700000000000.5`
/// and `1700000000000abc` both parse. Anything without leading digits is
/// treated as absent. Values beyond `i64` saturate, so an absurd future
/// timestamp still reads as far in the future.
fn parse_timestamp(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    let (negative, digits) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let digits = &digits[..end];
    if digits.is_empty() {
        return None;
    }
    // Only overflow can fail once the input is all digits.
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}
