// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! psem-core: safe handles over operating-system named semaphores
//!
//! This crate provides:
//! - `NamedSemaphore`, a stateful handle with an explicit open/close lifecycle
//! - The two-shot `timed_wait` built on top of a non-blocking try-decrement
//! - `Permit`, a scoped guard that posts when dropped
//! - The `SemaphoreBackend` trait that real OS bindings implement
//! - TOML-backed `SemaphoreConfig`

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod permit;
pub mod semaphore;

pub use backend::SemaphoreBackend;
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, SemaphoreConfig};
pub use error::{Result, SemaphoreError};
pub use permit::Permit;
pub use semaphore::{NamedSemaphore, State};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use backend::{FakeBackend, FakeCall, FakeHandle, FakeOp};
