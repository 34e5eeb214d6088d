// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named semaphore handle
//!
//! A `NamedSemaphore` is either uninitialized or open. Every operation other
//! than `open` fails with [`SemaphoreError::NotInitialized`] on an
//! uninitialized handle without touching the backend.
//!
//! ```text
//!   Uninitialized --open--> Open --close--> Uninitialized
//!                           Open --post/wait/try_wait/timed_wait/value/unlink--> Open
//! ```

use crate::backend::SemaphoreBackend;
use crate::clock::{Clock, SystemClock};
use crate::config::SemaphoreConfig;
use crate::error::{Result, SemaphoreError};
use crate::permit::Permit;
use std::fmt;
use std::io;
use std::time::Duration;

/// Lifecycle state of a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Uninitialized,
    Open,
}

/// Handle to an OS named semaphore
///
/// `open` and `close` take `&mut self`; counter operations take `&self`, so a
/// handle can be shared behind an `Arc` once it is open.
pub struct NamedSemaphore<B: SemaphoreBackend, C: Clock = SystemClock> {
    backend: B,
    clock: C,
    handle: Option<B::Handle>,
    /// Set by a successful open and kept after close for `unlink`
    name: Option<String>,
}

impl<B: SemaphoreBackend> NamedSemaphore<B, SystemClock> {
    /// Create an uninitialized handle using the system clock
    pub fn new(backend: B) -> Self {
        Self::with_clock(backend, SystemClock)
    }
}

impl<B: SemaphoreBackend, C: Clock> NamedSemaphore<B, C> {
    pub fn with_clock(backend: B, clock: C) -> Self {
        Self {
            backend,
            clock,
            handle: None,
            name: None,
        }
    }

    pub fn state(&self) -> State {
        if self.handle.is_some() {
            State::Open
        } else {
            State::Uninitialized
        }
    }

    pub fn is_open(&self) -> bool {
        self.handle.is_some()
    }

    /// Name given to the last successful `open`
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Create the named semaphore or attach to an existing one.
    ///
    /// `mode` and `initial_value` only apply when the semaphore is created;
    /// they are ignored when `name` already exists. On failure the handle is
    /// left exactly as it was.
    pub fn open(&mut self, name: &str, mode: u32, initial_value: u32) -> Result<()> {
        if let Some(current) = self.open_name() {
            return Err(SemaphoreError::AlreadyOpen {
                name: current.to_string(),
            });
        }

        let handle = self
            .backend
            .open(name, mode, initial_value)
            .map_err(|source| SemaphoreError::Open {
                name: name.to_string(),
                source,
            })?;

        tracing::debug!(name, mode, initial_value, "semaphore opened");
        self.handle = Some(handle);
        self.name = Some(name.to_string());
        Ok(())
    }

    /// Open using the settings in `config`
    pub fn open_with(&mut self, config: &SemaphoreConfig) -> Result<()> {
        self.open(&config.name, config.mode, config.initial_value)
    }

    /// Release this handle's reference to the semaphore.
    ///
    /// The object itself persists while other handles or processes hold it.
    /// On failure the handle stays open.
    pub fn close(&mut self) -> Result<()> {
        let handle = self.handle.as_ref().ok_or(SemaphoreError::NotInitialized)?;
        self.backend
            .close(handle)
            .map_err(|source| SemaphoreError::Close {
                name: self.display_name(),
                source,
            })?;

        self.handle = None;
        tracing::debug!(name = self.name(), "semaphore closed");
        Ok(())
    }

    /// Remove the name from the system namespace.
    ///
    /// Does not require `close` first and does not invalidate an open handle;
    /// the object is destroyed once every holder has closed it. A later `open`
    /// of the same name creates a fresh semaphore.
    pub fn unlink(&self) -> Result<()> {
        let name = self.name.as_deref().ok_or(SemaphoreError::NotInitialized)?;
        self.backend
            .unlink(name)
            .map_err(|source| SemaphoreError::Unlink {
                name: name.to_string(),
                source,
            })?;

        tracing::debug!(name, "semaphore unlinked");
        Ok(())
    }

    /// Current counter value.
    ///
    /// Advisory only: it can change before the caller acts on it.
    pub fn value(&self) -> Result<i32> {
        let handle = self.open_handle()?;
        self.backend
            .value(handle)
            .map_err(|source| SemaphoreError::GetValue {
                name: self.display_name(),
                source,
            })
    }

    /// Increment the counter, releasing one blocked waiter if there is one
    pub fn post(&self) -> Result<()> {
        let handle = self.open_handle()?;
        self.backend
            .post(handle)
            .map_err(|source| SemaphoreError::Post {
                name: self.display_name(),
                source,
            })?;
        tracing::trace!(name = self.name(), "posted");
        Ok(())
    }

    /// Decrement the counter, blocking until that is possible.
    ///
    /// A signal interrupting the wait is returned as [`SemaphoreError::Wait`]
    /// with `io::ErrorKind::Interrupted`; it is not retried.
    pub fn wait(&self) -> Result<()> {
        let handle = self.open_handle()?;
        tracing::trace!(name = self.name(), "waiting");
        self.backend
            .wait(handle)
            .map_err(|source| SemaphoreError::Wait {
                name: self.display_name(),
                source,
            })
    }

    /// Decrement the counter if it is positive, otherwise fail with
    /// [`SemaphoreError::WouldBlock`] without blocking.
    pub fn try_wait(&self) -> Result<()> {
        let handle = self.open_handle()?;
        match self.backend.try_wait(handle) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => Err(SemaphoreError::WouldBlock {
                name: self.display_name(),
            }),
            Err(source) => Err(SemaphoreError::Wait {
                name: self.display_name(),
                source,
            }),
        }
    }

    /// Decrement the counter within `timeout`, else fail with
    /// [`SemaphoreError::Timeout`].
    ///
    /// This is a two-shot poll: one `try_wait`, then a single sleep for the
    /// whole `timeout`, then exactly one more `try_wait`. An available
    /// semaphore is taken immediately with no sleep.
    ///
    /// Limitations of the two-shot poll:
    /// - a post that arrives during the sleep does not wake the caller early;
    ///   it is only observed by the final check at about `timeout`
    /// - a post that another actor consumes again before the final check is
    ///   missed, and the call times out
    /// - the sleep cannot be cancelled once it has started
    pub fn timed_wait(&self, timeout: Duration) -> Result<()> {
        match self.try_wait() {
            Err(SemaphoreError::WouldBlock { .. }) => {}
            other => return other,
        }

        tracing::trace!(name = self.name(), ?timeout, "semaphore busy, sleeping before retry");
        self.clock.sleep(timeout);

        match self.try_wait() {
            Err(SemaphoreError::WouldBlock { name }) => {
                tracing::debug!(name = %name, ?timeout, "timed out");
                Err(SemaphoreError::Timeout { name, timeout })
            }
            other => other,
        }
    }

    /// `wait`, returning a permit that posts when dropped
    pub fn acquire(&self) -> Result<Permit<'_, B, C>> {
        self.wait()?;
        Ok(Permit::new(self))
    }

    /// `try_wait`, returning a permit that posts when dropped
    pub fn try_acquire(&self) -> Result<Permit<'_, B, C>> {
        self.try_wait()?;
        Ok(Permit::new(self))
    }

    /// `timed_wait`, returning a permit that posts when dropped
    pub fn acquire_timeout(&self, timeout: Duration) -> Result<Permit<'_, B, C>> {
        self.timed_wait(timeout)?;
        Ok(Permit::new(self))
    }

    fn open_handle(&self) -> Result<&B::Handle> {
        self.handle.as_ref().ok_or(SemaphoreError::NotInitialized)
    }

    fn open_name(&self) -> Option<&str> {
        self.handle.as_ref().map(|_| self.name.as_deref().unwrap_or_default())
    }

    fn display_name(&self) -> String {
        self.name.clone().unwrap_or_default()
    }
}

impl<B: SemaphoreBackend, C: Clock> Drop for NamedSemaphore<B, C> {
    fn drop(&mut self) {
        if self.handle.is_none() {
            return;
        }
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to close semaphore on drop");
        }
    }
}

impl<B: SemaphoreBackend, C: Clock> fmt::Debug for NamedSemaphore<B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedSemaphore")
            .field("name", &self.name)
            .field("state", &self.state())
            .finish()
    }
}

#[cfg(test)]
#[path = "semaphore_tests.rs"]
mod tests;
