// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: Apache-2.0

//! Test harness for contact form abuse simulation.
//!
//! This module provides a recording mailer, payload generators and outcome
//! metrics for driving the pipeline the way bots and people would.

#![allow(dead_code)]

pub mod attacks;
pub mod generators;
pub mod mailer;
pub mod metrics;
