// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Semaphore backends for the host operating system

#[cfg(unix)]
pub mod posix;
pub mod traced;

#[cfg(unix)]
pub use posix::{PosixBackend, PosixHandle};
pub use traced::TracedBackend;

/// Named semaphore over the POSIX facility, with tracing
#[cfg(unix)]
pub type PosixSemaphore = psem_core::NamedSemaphore<TracedBackend<PosixBackend>>;

/// Create an uninitialized [`PosixSemaphore`]
#[cfg(unix)]
pub fn posix_semaphore() -> PosixSemaphore {
    psem_core::NamedSemaphore::new(TracedBackend::new(PosixBackend::new()))
}
