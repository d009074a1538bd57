// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Configuration for the contact form pipeline.
//!
//! Every section has serde defaults so a partial config file or an empty
//! environment still yields a working service. Mail credentials are the
//! exception: without `RESEND_API_KEY` the service starts, but every send
//! fails with [`crate::mailer::MailError::NotConfigured`].

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Top-level configuration for the contact form service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server bind address (default: 0.0.0.0:8080)
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Deployment name reported by the health endpoint (default: development)
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Take the client address from `X-Forwarded-For` (default: false)
    #[serde(default)]
    pub trust_forwarded_for: bool,

    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    #[serde(default)]
    pub validation: ValidationConfig,

    #[serde(default)]
    pub mail: MailConfig,

    #[serde(default)]
    pub branding: BrandingConfig,

    #[serde(default)]
    pub response: ResponseConfig,
}

/// Per-address submission throttling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Minimum spacing between admitted submissions from one address (default: 10)
    #[serde(default = "default_window_secs")]
    pub window_secs: u64,

    /// How often stale entries are evicted (default: 60)
    #[serde(default = "default_cleanup_interval_secs")]
    pub cleanup_interval_secs: u64,
}

/// Thresholds for the anti-abuse validation chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Minimum time between form render and submit, in milliseconds (default: 3000)
    #[serde(default = "default_min_fill_time_ms")]
    pub min_fill_time_ms: i64,

    /// Shortest accepted message, in characters (default: 10)
    #[serde(default = "default_min_message_len")]
    pub min_message_len: usize,

    /// Longest accepted message, in characters (default: 2000)
    #[serde(default = "default_max_message_len")]
    pub max_message_len: usize,

    /// Most URLs a message may contain (default: 2)
    #[serde(default = "default_max_urls")]
    pub max_urls: usize,

    /// Consecutive repeats of a short chunk that mark filler (default: 5)
    #[serde(default = "default_min_repeats")]
    pub min_repeats: usize,

    /// Lowercase denylist matched as substrings of name, message and company
    #[serde(default = "default_spam_keywords")]
    pub spam_keywords: Vec<String>,
}

/// Transactional email API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// API key for the mail provider; sends fail when absent
    #[serde(default)]
    pub api_key: Option<String>,

    /// Message creation endpoint (default: https://api.resend.com/emails)
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Sender address for both emails
    #[serde(default = "default_from")]
    pub from: String,

    /// Operator address that receives new leads
    #[serde(default = "default_to")]
    pub to: String,

    /// Upper bound on a single send, in seconds (default: 10)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Names rendered into email templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandingConfig {
    #[serde(default = "default_site_name")]
    pub site_name: String,

    #[serde(default = "default_site_url")]
    pub site_url: String,

    #[serde(default = "default_tagline")]
    pub tagline: String,
}

/// How pipeline outcomes are rendered to the browser.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseConfig {
    #[serde(default)]
    pub mode: ResponseMode,

    /// Redirect target for success and silent rejections (default: /gracias)
    #[serde(default = "default_success_path")]
    pub success_path: String,

    /// Redirect target for visible rejections (default: /error)
    #[serde(default = "default_error_path")]
    pub error_path: String,
}

/// Response shape for the contact endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// `302 Found` to the thank-you or error page
    #[default]
    Redirect,
    /// `{ "ok": bool, "message": string }` with a matching status
    Json,
}

impl FromStr for ResponseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "redirect" => Ok(Self::Redirect),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown response mode: {other}")),
        }
    }
}

// Default value functions
fn default_bind_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_window_secs() -> u64 {
    10
}

fn default_cleanup_interval_secs() -> u64 {
    60
}

fn default_min_fill_time_ms() -> i64 {
    3000
}

fn default_min_message_len() -> usize {
    10
}

fn default_max_message_len() -> usize {
    2000
}

fn default_max_urls() -> usize {
    2
}

fn default_min_repeats() -> usize {
    5
}

fn default_spam_keywords() -> Vec<String> {
    [
        "viagra",
        "casino",
        "porn",
        "sex",
        "loan",
        "bitcoin",
        "cryptocurrency",
        "pharmacy",
        "pills",
        "weight loss",
        "make money",
        "click here",
        "congratulations",
        "winner",
        "free money",
        "inheritance",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_api_url() -> String {
    "https://api.resend.com/emails".to_string()
}

fn default_from() -> String {
    "noreply@aperturecore.com".to_string()
}

fn default_to() -> String {
    "info@aperturecore.com".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_site_name() -> String {
    "Aperture Core".to_string()
}

fn default_site_url() -> String {
    "https://aperturecore.com".to_string()
}

fn default_tagline() -> String {
    "Software Development Agency".to_string()
}

fn default_success_path() -> String {
    "/gracias".to_string()
}

fn default_error_path() -> String {
    "/error".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            environment: default_environment(),
            trust_forwarded_for: false,
            rate_limit: RateLimitConfig::default(),
            validation: ValidationConfig::default(),
            mail: MailConfig::default(),
            branding: BrandingConfig::default(),
            response: ResponseConfig::default(),
        }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: default_window_secs(),
            cleanup_interval_secs: default_cleanup_interval_secs(),
        }
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_fill_time_ms: default_min_fill_time_ms(),
            min_message_len: default_min_message_len(),
            max_message_len: default_max_message_len(),
            max_urls: default_max_urls(),
            min_repeats: default_min_repeats(),
            spam_keywords: default_spam_keywords(),
        }
    }
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: default_api_url(),
            from: default_from(),
            to: default_to(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            site_name: default_site_name(),
            site_url: default_site_url(),
            tagline: default_tagline(),
        }
    }
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            mode: ResponseMode::default(),
            success_path: default_success_path(),
            error_path: default_error_path(),
        }
    }
}

impl RateLimitConfig {
    /// Get the admission window
    pub fn window(&self) -> Duration {
        Duration::from_secs(self.window_secs)
    }

    /// Get the eviction interval
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}

impl MailConfig {
    /// Get the per-send timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Missing or unparseable values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let text = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let rate_limit = RateLimitConfig::default();
        let validation = ValidationConfig::default();
        let mail = MailConfig::default();
        let branding = BrandingConfig::default();
        let response = ResponseConfig::default();

        Self {
            bind_addr: text("BIND_ADDR").unwrap_or_else(default_bind_addr),
            environment: text("ENVIRONMENT").unwrap_or_else(default_environment),
            trust_forwarded_for: parse_var(&lookup, "TRUST_FORWARDED_FOR").unwrap_or(false),
            rate_limit: RateLimitConfig {
                window_secs: parse_var(&lookup, "RATE_LIMIT_WINDOW_SECS").unwrap_or(rate_limit.window_secs),
                cleanup_interval_secs: parse_var(&lookup, "RATE_LIMIT_CLEANUP_SECS")
                    .unwrap_or(rate_limit.cleanup_interval_secs),
            },
            validation: ValidationConfig {
                min_fill_time_ms: parse_var(&lookup, "MIN_FILL_TIME_MS").unwrap_or(validation.min_fill_time_ms),
                min_message_len: parse_var(&lookup, "MIN_MESSAGE_LEN").unwrap_or(validation.min_message_len),
                max_message_len: parse_var(&lookup, "MAX_MESSAGE_LEN").unwrap_or(validation.max_message_len),
                ..validation
            },
            mail: MailConfig {
                api_key: text("RESEND_API_KEY"),
                api_url: text("MAIL_API_URL").unwrap_or(mail.api_url),
                from: text("CONTACT_FROM").unwrap_or(mail.from),
                to: text("CONTACT_TO").unwrap_or(mail.to),
                timeout_secs: parse_var(&lookup, "MAIL_TIMEOUT_SECS").unwrap_or(mail.timeout_secs),
            },
            branding: BrandingConfig {
                site_name: text("SITE_NAME").unwrap_or(branding.site_name),
                site_url: text("SITE_URL").unwrap_or(branding.site_url),
                ..branding
            },
            response: ResponseConfig {
                mode: parse_var(&lookup, "RESPONSE_MODE").unwrap_or(response.mode),
                success_path: text("SUCCESS_PATH").unwrap_or(response.success_path),
                error_path: text("ERROR_PATH").unwrap_or(response.error_path),
            },
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}
