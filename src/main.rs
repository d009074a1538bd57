// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Contact Form Service
//!
//! Accepts contact form posts, filters spam and abuse, and forwards
//! legitimate leads by email.
//!
//! ## Endpoints
//!
//! - `POST /api/contact`: form-encoded submission
//! - `GET /api/health`, `/health`, `/healthz`: liveness report
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables (and `.env` if present):
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `RESEND_API_KEY`: Mail API key (required for delivery)
//! - `CONTACT_TO` / `CONTACT_FROM`: Lead recipient and sender addresses
//! - `RATE_LIMIT_WINDOW_SECS`: Per-IP submission window (default: 10)
//! - `RESPONSE_MODE`: `redirect` (default) or `json`
//! - `TRUST_FORWARDED_FOR`: Use `X-Forwarded-For` for the client address
//! - `ENVIRONMENT`: Deployment name shown by the health endpoint

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use contact_form_pipeline::{config::Config, handlers, handlers::AppState, mailer::ResendMailer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        environment = %config.environment,
        window_secs = config.rate_limit.window_secs,
        response_mode = ?config.response.mode,
        trust_forwarded_for = config.trust_forwarded_for,
        "Starting contact form service"
    );

    let mailer = ResendMailer::new(&config.mail);
    if !mailer.is_configured() {
        warn!("RESEND_API_KEY is not set, accepted submissions will fail");
    }

    let state = Arc::new(AppState::new(config.clone(), Arc::new(mailer)));

    // Spawn cleanup task
    let cleanup_state = state.clone();
    let cleanup_interval = config.rate_limit.cleanup_interval();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(cleanup_interval);
        loop {
            interval.tick().await;
            cleanup_state.limiter.cleanup().await;
        }
    });

    let app = handlers::router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
