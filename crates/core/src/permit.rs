// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped semaphore permits

use crate::backend::SemaphoreBackend;
use crate::clock::Clock;
use crate::semaphore::NamedSemaphore;
use std::fmt;

/// A decrement taken on a [`NamedSemaphore`], posted back when dropped
///
/// A failed post on drop is logged and otherwise ignored.
#[must_use = "dropping a permit posts the semaphore immediately"]
pub struct Permit<'a, B: SemaphoreBackend, C: Clock> {
    semaphore: &'a NamedSemaphore<B, C>,
    released: bool,
}

impl<'a, B: SemaphoreBackend, C: Clock> Permit<'a, B, C> {
    pub(crate) fn new(semaphore: &'a NamedSemaphore<B, C>) -> Self {
        Self {
            semaphore,
            released: false,
        }
    }

    /// Post now and report the result instead of logging it
    pub fn release(mut self) -> crate::Result<()> {
        self.released = true;
        self.semaphore.post()
    }

    /// Keep the decrement; nothing is posted
    pub fn forget(mut self) {
        self.released = true;
    }
}

impl<B: SemaphoreBackend, C: Clock> Drop for Permit<'_, B, C> {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        if let Err(e) = self.semaphore.post() {
            tracing::warn!(error = %e, "failed to release semaphore permit");
        }
    }
}

impl<B: SemaphoreBackend, C: Clock> fmt::Debug for Permit<'_, B, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Permit")
            .field("semaphore", &self.semaphore.name())
            .finish()
    }
}
