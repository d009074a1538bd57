// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! HTTP handlers for the contact form service.
//!
//! One handler drives the whole pipeline; [`Reply`] is the only place that
//! knows how outcomes look on the wire.

use crate::config::{Config, ResponseConfig, ResponseMode};
use crate::dispatcher::NotificationDispatcher;
use crate::limiter::{RateLimitResult, RateLimiter};
use crate::mailer::Mailer;
use crate::submission::{Submission, SubmissionForm};
use crate::validator::{SubmissionValidator, ValidationError, ValidationOutcome};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, ConnectInfo, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

const SUCCESS_MESSAGE: &str = "Mensaje enviado correctamente";
const RATE_LIMITED_MESSAGE: &str = "Demasiadas solicitudes, intenta en unos segundos";
const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";

/// Shared application state.
pub struct AppState<M> {
    pub limiter: RateLimiter,
    pub validator: SubmissionValidator,
    pub dispatcher: NotificationDispatcher<M>,
    pub config: Config,
    pub started_at: Instant,
}

impl<M: Mailer> AppState<M> {
    /// Wire up every pipeline stage from configuration.
    pub fn new(config: Config, mailer: Arc<M>) -> Self {
        Self {
            limiter: RateLimiter::new(config.rate_limit.clone()),
            validator: SubmissionValidator::new(config.validation.clone()),
            dispatcher: NotificationDispatcher::new(mailer, &config.mail, config.branding.clone()),
            config,
            started_at: Instant::now(),
        }
    }
}

/// Build the service router.
pub fn router<M: Mailer>(state: Arc<AppState<M>>) -> Router {
    Router::new()
        .route("/api/contact", post(submit::<M>))
        .route("/api/health", get(health::<M>))
        .route("/health", get(health::<M>))
        .route("/healthz", get(health::<M>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// JSON body for `json` response mode.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub ok: bool,
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub timestamp: String,
    pub uptime_secs: u64,
    pub rate_limit_entries: usize,
}

/// What the submitter gets back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Accepted, or silently rejected
    Success,
    /// Visible rejection or internal failure
    Failure {
        status: StatusCode,
        message: String,
        retry_after: Option<Duration>,
    },
}

impl Reply {
    fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Reply::Failure {
            status,
            message: message.into(),
            retry_after: None,
        }
    }

    /// Render according to the configured response strategy.
    pub fn render(self, config: &ResponseConfig) -> Response {
        match (config.mode, self) {
            (ResponseMode::Redirect, Reply::Success) => found(&config.success_path),
            (ResponseMode::Json, Reply::Success) => (
                StatusCode::OK,
                Json(ContactResponse {
                    ok: true,
                    message: SUCCESS_MESSAGE.to_string(),
                }),
            )
                .into_response(),
            (mode, Reply::Failure { status, message, retry_after }) => {
                let mut response = match mode {
                    ResponseMode::Redirect => {
                        let query = url::form_urlencoded::Serializer::new(String::new())
                            .append_pair("message", &message)
                            .append_pair("status", status.as_str())
                            .finish();
                        found(&format!("{}?{}", config.error_path, query))
                    }
                    ResponseMode::Json => {
                        (status, Json(ContactResponse { ok: false, message })).into_response()
                    }
                };
                if let Some(retry_after) = retry_after {
                    let secs = retry_after.as_secs_f64().ceil() as u64;
                    response
                        .headers_mut()
                        .insert(header::RETRY_AFTER, HeaderValue::from(secs));
                }
                response
            }
        }
    }
}

fn found(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (StatusCode::FOUND, [(header::LOCATION, value)]).into_response(),
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}

/// Health check endpoint.
pub async fn health<M: Mailer>(State(state): State<Arc<AppState<M>>>) -> impl IntoResponse {
    (
        [(header::CACHE_CONTROL, "no-cache, no-store, must-revalidate")],
        Json(HealthResponse {
            status: "healthy",
            service: env!("CARGO_PKG_NAME"),
            version: env!("CARGO_PKG_VERSION"),
            environment: state.config.environment.clone(),
            timestamp: Utc::now().to_rfc3339(),
            uptime_secs: state.started_at.elapsed().as_secs(),
            rate_limit_entries: state.limiter.tracked_clients().await,
        }),
    )
}

/// Contact form endpoint.
///
/// The body is read raw so that every request, however malformed, goes
/// through the rate limiter and comes back in the configured response shape.
pub async fn submit<M: Mailer>(
    State(state): State<Arc<AppState<M>>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let ip = client_ip(&headers, addr, state.config.trust_forwarded_for);
    process(&state, ip, parse_submission(&headers, body))
        .await
        .render(&state.config.response)
}

/// Decode the request body into a [`Submission`].
pub fn parse_submission(
    headers: &HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> Result<Submission, ValidationError> {
    if !is_form_encoded(headers) {
        let content_type = headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("none");
        return Err(ValidationError::MalformedBody(format!(
            "unsupported content type {content_type}"
        )));
    }
    let body = body.map_err(|rejection| ValidationError::MalformedBody(rejection.body_text()))?;
    Ok(Submission::from(SubmissionForm::from_urlencoded(&body)))
}

fn is_form_encoded(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}

/// Run one submission through the pipeline.
///
/// `parsed` carries the decoded submission, or the reason the body could not
/// be decoded. Either way the rate limiter sees the request first.
pub async fn process<M: Mailer>(
    state: &AppState<M>,
    ip: IpAddr,
    parsed: Result<Submission, ValidationError>,
) -> Reply {
    if let RateLimitResult::Limited { retry_after } = state.limiter.check(ip).await {
        info!(
            ip = %ip,
            retry_after_secs = retry_after.as_secs(),
            "Submission rate limited"
        );
        return Reply::Failure {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: RATE_LIMITED_MESSAGE.to_string(),
            retry_after: Some(retry_after),
        };
    }

    let submission = match parsed {
        Ok(submission) => submission,
        Err(err) => {
            info!(ip = %ip, error = %err, "Unreadable submission rejected");
            return Reply::failure(err.status(), err.public_message());
        }
    };

    match state.validator.validate(&submission, Utc::now().timestamp_millis()) {
        ValidationOutcome::Accepted => {}
        ValidationOutcome::RejectedVisible(err) => {
            info!(ip = %ip, error = %err, "Submission rejected");
            return Reply::failure(err.status(), err.public_message());
        }
        ValidationOutcome::RejectedSilent(reason) => {
            warn!(ip = %ip, reason = %reason, "Spam submission silently dropped");
            return Reply::Success;
        }
    }

    info!(ip = %ip, email = %submission.email, "Legitimate contact");

    match state.dispatcher.dispatch(&submission, &ip.to_string()).await {
        // The confirmation keeps running in the background.
        Ok(_dispatched) => Reply::Success,
        Err(_) => Reply::failure(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE),
    }
}

/// Resolve the submitter's address.
///
/// With `trust_forwarded_for`, the first parseable entry of
/// `X-Forwarded-For` wins; otherwise, or when the header is unusable, the
/// peer address is used.
pub fn client_ip(headers: &HeaderMap, peer: SocketAddr, trust_forwarded_for: bool) -> IpAddr {
    if trust_forwarded_for {
        let forwarded = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .and_then(|v| v.trim().parse::<IpAddr>().ok());
        if let Some(ip) = forwarded {
            return ip;
        }
    }
    peer.ip()
}
