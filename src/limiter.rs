// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Per-address submission rate limiter.
//!
//! Each client address may have at most one submission admitted per window.
//! A rejected attempt does not move the window, so a client hammering the
//! endpoint is admitted again as soon as the window since its last
//! *admitted* submission has passed.

use crate::config::RateLimitConfig;
use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::debug;

/// Result of a rate limit check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RateLimitResult {
    /// Submission may proceed
    Allowed,
    /// Submission arrived inside the window
    Limited {
        /// Time until the address is admitted again
        retry_after: Duration,
    },
}

impl RateLimitResult {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateLimitResult::Allowed)
    }
}

/// Thread-safe rate limiter.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    /// Last admitted submission per address
    last_seen: Arc<RwLock<HashMap<IpAddr, Instant>>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the given configuration.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            last_seen: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Check and record a submission from `ip` happening now.
    pub async fn check(&self, ip: IpAddr) -> RateLimitResult {
        self.check_at(ip, Instant::now()).await
    }

    /// Check and record a submission from `ip` at `now`.
    ///
    /// The lookup and the update happen under one write guard, so two
    /// concurrent submissions from the same address cannot both pass.
    pub async fn check_at(&self, ip: IpAddr, now: Instant) -> RateLimitResult {
        let window = self.config.window();
        let mut last_seen = self.last_seen.write().await;

        if let Some(&last) = last_seen.get(&ip) {
            let elapsed = now.saturating_duration_since(last);
            if elapsed < window {
                let retry_after = window - elapsed;
                debug!(%ip, ?retry_after, "Submission inside rate limit window");
                return RateLimitResult::Limited { retry_after };
            }
        }

        last_seen.insert(ip, now);
        RateLimitResult::Allowed
    }

    /// Evict addresses whose window has elapsed (should be called periodically).
    pub async fn cleanup(&self) -> usize {
        self.cleanup_at(Instant::now()).await
    }

    /// Evict addresses whose window had elapsed at `now`.
    ///
    /// An evicted address would be admitted anyway, so eviction never
    /// changes a decision. Returns the number of evicted entries.
    pub async fn cleanup_at(&self, now: Instant) -> usize {
        let window = self.config.window();
        let mut last_seen = self.last_seen.write().await;
        let before = last_seen.len();
        last_seen.retain(|_, last| now.saturating_duration_since(*last) < window);
        let evicted = before - last_seen.len();
        if evicted > 0 {
            debug!(evicted, remaining = last_seen.len(), "Evicted stale rate limit entries");
        }
        evicted
    }

    /// Number of addresses currently tracked.
    pub async fn tracked_clients(&self) -> usize {
        self.last_seen.read().await.len()
    }
}
