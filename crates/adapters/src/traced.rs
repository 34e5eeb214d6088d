// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced backend wrapper for consistent observability

use psem_core::SemaphoreBackend;
use std::io;
use std::time::Instant;

/// Wrapper that adds tracing to any SemaphoreBackend
///
/// Handles carry their name so spans can be labelled without asking the OS.
#[derive(Clone, Debug, Default)]
pub struct TracedBackend<B> {
    inner: B,
}

/// Inner handle plus the name it was opened with
#[derive(Debug)]
pub struct TracedHandle<H> {
    inner: H,
    name: String,
}

impl<H> TracedHandle<H> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inner(&self) -> &H {
        &self.inner
    }
}

impl<B> TracedBackend<B> {
    pub fn new(inner: B) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &B {
        &self.inner
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

impl<B: SemaphoreBackend> SemaphoreBackend for TracedBackend<B> {
    type Handle = TracedHandle<B::Handle>;

    fn open(&self, name: &str, mode: u32, value: u32) -> io::Result<Self::Handle> {
        let span = tracing::info_span!("semaphore.open", name);
        let _guard = span.enter();

        tracing::debug!(mode, value, "opening");
        match self.inner.open(name, mode, value) {
            Ok(inner) => {
                tracing::info!("opened");
                Ok(TracedHandle {
                    inner,
                    name: name.to_string(),
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "open failed");
                Err(e)
            }
        }
    }

    fn close(&self, handle: &Self::Handle) -> io::Result<()> {
        let span = tracing::info_span!("semaphore.close", name = handle.name());
        let _guard = span.enter();

        let result = self.inner.close(&handle.inner);
        match &result {
            Ok(()) => tracing::info!("closed"),
            Err(e) => tracing::error!(error = %e, "close failed"),
        }
        result
    }

    fn post(&self, handle: &Self::Handle) -> io::Result<()> {
        let result = self.inner.post(&handle.inner);
        match &result {
            Ok(()) => tracing::trace!(name = handle.name(), "posted"),
            Err(e) => tracing::error!(name = handle.name(), error = %e, "post failed"),
        }
        result
    }

    fn wait(&self, handle: &Self::Handle) -> io::Result<()> {
        let span = tracing::debug_span!("semaphore.wait", name = handle.name());
        let _guard = span.enter();

        let start = Instant::now();
        let result = self.inner.wait(&handle.inner);
        match &result {
            Ok(()) => tracing::debug!(elapsed_ms = elapsed_ms(start), "acquired"),
            // EINTR is expected when a signal arrives
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {
                tracing::warn!(elapsed_ms = elapsed_ms(start), "wait interrupted")
            }
            Err(e) => tracing::error!(error = %e, "wait failed"),
        }
        result
    }

    fn try_wait(&self, handle: &Self::Handle) -> io::Result<()> {
        let result = self.inner.try_wait(&handle.inner);
        match &result {
            Ok(()) => tracing::trace!(name = handle.name(), "acquired"),
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                tracing::trace!(name = handle.name(), "unavailable")
            }
            Err(e) => tracing::error!(name = handle.name(), error = %e, "try_wait failed"),
        }
        result
    }

    fn value(&self, handle: &Self::Handle) -> io::Result<i32> {
        let result = self.inner.value(&handle.inner);
        tracing::trace!(name = handle.name(), value = ?result.as_ref().ok(), "read value");
        result
    }

    fn unlink(&self, name: &str) -> io::Result<()> {
        let span = tracing::info_span!("semaphore.unlink", name);
        let _guard = span.enter();

        let result = self.inner.unlink(name);
        // NotFound is common when cleaning up after another process
        match &result {
            Ok(()) => tracing::info!("unlinked"),
            Err(e) => tracing::warn!(error = %e, "unlink failed"),
        }
        result
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
