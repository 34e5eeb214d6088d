// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for named semaphore handles

use std::io;
use std::time::Duration;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SemaphoreError>;

/// Errors returned by [`NamedSemaphore`](crate::NamedSemaphore) operations
///
/// OS failures carry the semaphore name and the underlying `io::Error`
/// unchanged. `WouldBlock` and `Timeout` are expected outcomes, not faults.
#[derive(Debug, Error)]
pub enum SemaphoreError {
    #[error("semaphore is not initialized")]
    NotInitialized,

    #[error("semaphore {name} is already open")]
    AlreadyOpen { name: String },

    #[error("failed to open semaphore {name}: {source}")]
    Open {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to close semaphore {name}: {source}")]
    Close {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to post semaphore {name}: {source}")]
    Post {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait on semaphore {name}: {source}")]
    Wait {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to read value of semaphore {name}: {source}")]
    GetValue {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to unlink semaphore {name}: {source}")]
    Unlink {
        name: String,
        #[source]
        source: io::Error,
    },

    #[error("semaphore {name} is not available")]
    WouldBlock { name: String },

    #[error("timed out after {timeout:?} waiting for semaphore {name}")]
    Timeout { name: String, timeout: Duration },
}

impl SemaphoreError {
    pub fn is_would_block(&self) -> bool {
        matches!(self, SemaphoreError::WouldBlock { .. })
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, SemaphoreError::Timeout { .. })
    }

    /// The OS error code behind this error, if it came from the OS
    pub fn raw_os_error(&self) -> Option<i32> {
        self.io_error().and_then(io::Error::raw_os_error)
    }

    /// The underlying I/O error, if any
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            SemaphoreError::Open { source, .. }
            | SemaphoreError::Close { source, .. }
            | SemaphoreError::Post { source, .. }
            | SemaphoreError::Wait { source, .. }
            | SemaphoreError::GetValue { source, .. }
            | SemaphoreError::Unlink { source, .. } => Some(source),
            SemaphoreError::NotInitialized
            | SemaphoreError::AlreadyOpen { .. }
            | SemaphoreError::WouldBlock { .. }
            | SemaphoreError::Timeout { .. } => None,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
