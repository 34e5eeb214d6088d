// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Backend trait for the OS named-semaphore facility
//!
//! A backend addresses semaphores by name in a system-wide namespace and
//! owns all counting semantics. Handles never see backend internals.

#[cfg(any(test, feature = "test-support"))]
mod fake;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeBackend, FakeCall, FakeHandle, FakeOp};

use std::io;

/// Operations a named-semaphore implementation must provide
///
/// Errors are returned as `io::Error` so OS error codes survive untouched.
/// `try_wait` must report an unavailable semaphore as
/// `io::ErrorKind::WouldBlock`.
pub trait SemaphoreBackend: Send + Sync {
    /// Reference to an open semaphore object
    type Handle: Send + Sync;

    /// Create `name` with `mode` and `value`, or attach to it if it exists
    fn open(&self, name: &str, mode: u32, value: u32) -> io::Result<Self::Handle>;

    /// Release this process's reference to the object
    fn close(&self, handle: &Self::Handle) -> io::Result<()>;

    fn post(&self, handle: &Self::Handle) -> io::Result<()>;

    fn wait(&self, handle: &Self::Handle) -> io::Result<()>;

    fn try_wait(&self, handle: &Self::Handle) -> io::Result<()>;

    /// Current counter value (advisory)
    fn value(&self, handle: &Self::Handle) -> io::Result<i32>;

    /// Remove `name` from the namespace
    fn unlink(&self, name: &str) -> io::Result<()>;
}
