// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake semaphore backend for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::SemaphoreBackend;
use std::collections::HashMap;
use std::io;
use std::sync::{Arc, Condvar, Mutex};

/// Longest name accepted after the leading slash (Linux `NAME_MAX - 4`)
const NAME_MAX: usize = 251;

/// Largest counter value (`SEM_VALUE_MAX` on Linux)
const VALUE_MAX: u32 = i32::MAX as u32;

/// Operation selector for failure injection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FakeOp {
    Open,
    Close,
    Post,
    Wait,
    TryWait,
    Value,
    Unlink,
}

/// Recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
    Open { name: String, mode: u32, value: u32 },
    Close { name: String },
    Post { name: String },
    Wait { name: String },
    TryWait { name: String },
    Value { name: String },
    Unlink { name: String },
}

#[derive(Debug)]
struct FakeObject {
    name: String,
    mode: u32,
    count: Mutex<u32>,
    available: Condvar,
}

/// Handle to an object in a [`FakeBackend`]
///
/// Keeps the object alive after its name is unlinked, like an open
/// descriptor does for a real named semaphore.
#[derive(Debug, Clone)]
pub struct FakeHandle {
    object: Arc<FakeObject>,
}

impl FakeHandle {
    pub fn name(&self) -> &str {
        &self.object.name
    }

    /// Permission bits the object was created with
    pub fn mode(&self) -> u32 {
        self.object.mode
    }
}

#[derive(Debug, Default)]
struct FakeState {
    registry: HashMap<String, Arc<FakeObject>>,
    calls: Vec<FakeCall>,
    failures: HashMap<FakeOp, io::ErrorKind>,
    open_handles: usize,
}

/// In-memory named semaphore namespace
///
/// Clones share the same namespace, so two handles opened through clones of
/// one backend behave like two processes attaching to the same name.
#[derive(Debug, Clone, Default)]
pub struct FakeBackend {
    state: Arc<Mutex<FakeState>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<FakeCall> {
        self.lock().calls.clone()
    }

    /// Make the next call to `op` fail with `kind`
    pub fn fail_next(&self, op: FakeOp, kind: io::ErrorKind) {
        self.lock().failures.insert(op, kind);
    }

    /// Whether `name` is currently linked in the namespace
    pub fn exists(&self, name: &str) -> bool {
        self.lock().registry.contains_key(bare_name(name))
    }

    /// Number of handles opened and not yet closed
    pub fn open_handles(&self) -> usize {
        self.lock().open_handles
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Record the call and consume any injected failure for `op`
    fn record(&self, op: FakeOp, call: FakeCall) -> io::Result<()> {
        let mut state = self.lock();
        state.calls.push(call);
        match state.failures.remove(&op) {
            Some(kind) => Err(io::Error::new(kind, format!("injected {:?} failure", op))),
            None => Ok(()),
        }
    }
}

fn bare_name(name: &str) -> &str {
    name.strip_prefix('/').unwrap_or(name)
}

fn validate_name(name: &str) -> io::Result<&str> {
    let bare = bare_name(name);
    if bare.is_empty() || bare.contains('/') || bare.contains('\0') {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("invalid semaphore name: {:?}", name),
        ));
    }
    if bare.len() > NAME_MAX {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "semaphore name too long",
        ));
    }
    Ok(bare)
}

fn lock_count(object: &FakeObject) -> std::sync::MutexGuard<'_, u32> {
    object.count.lock().unwrap_or_else(|e| e.into_inner())
}

impl SemaphoreBackend for FakeBackend {
    type Handle = FakeHandle;

    fn open(&self, name: &str, mode: u32, value: u32) -> io::Result<FakeHandle> {
        self.record(
            FakeOp::Open,
            FakeCall::Open {
                name: name.to_string(),
                mode,
                value,
            },
        )?;
        let bare = validate_name(name)?;

        let mut state = self.lock();
        let object = match state.registry.get(bare).cloned() {
            Some(existing) => existing,
            None => {
                if value > VALUE_MAX {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "initial value exceeds maximum",
                    ));
                }
                let object = Arc::new(FakeObject {
                    name: name.to_string(),
                    mode,
                    count: Mutex::new(value),
                    available: Condvar::new(),
                });
                state.registry.insert(bare.to_string(), Arc::clone(&object));
                object
            }
        };
        state.open_handles += 1;
        Ok(FakeHandle { object })
    }

    fn close(&self, handle: &FakeHandle) -> io::Result<()> {
        self.record(
            FakeOp::Close,
            FakeCall::Close {
                name: handle.name().to_string(),
            },
        )?;
        let mut state = self.lock();
        state.open_handles = state.open_handles.saturating_sub(1);
        Ok(())
    }

    fn post(&self, handle: &FakeHandle) -> io::Result<()> {
        self.record(
            FakeOp::Post,
            FakeCall::Post {
                name: handle.name().to_string(),
            },
        )?;
        let mut count = lock_count(&handle.object);
        if *count >= VALUE_MAX {
            return Err(io::Error::other("semaphore value would overflow"));
        }
        *count += 1;
        handle.object.available.notify_one();
        Ok(())
    }

    fn wait(&self, handle: &FakeHandle) -> io::Result<()> {
        self.record(
            FakeOp::Wait,
            FakeCall::Wait {
                name: handle.name().to_string(),
            },
        )?;
        let mut count = lock_count(&handle.object);
        while *count == 0 {
            count = handle
                .object
                .available
                .wait(count)
                .unwrap_or_else(|e| e.into_inner());
        }
        *count -= 1;
        Ok(())
    }

    fn try_wait(&self, handle: &FakeHandle) -> io::Result<()> {
        self.record(
            FakeOp::TryWait,
            FakeCall::TryWait {
                name: handle.name().to_string(),
            },
        )?;
        let mut count = lock_count(&handle.object);
        if *count == 0 {
            return Err(io::ErrorKind::WouldBlock.into());
        }
        *count -= 1;
        Ok(())
    }

    fn value(&self, handle: &FakeHandle) -> io::Result<i32> {
        self.record(
            FakeOp::Value,
            FakeCall::Value {
                name: handle.name().to_string(),
            },
        )?;
        let count = *lock_count(&handle.object);
        i32::try_from(count).map_err(io::Error::other)
    }

    fn unlink(&self, name: &str) -> io::Result<()> {
        self.record(
            FakeOp::Unlink,
            FakeCall::Unlink {
                name: name.to_string(),
            },
        )?;
        let bare = validate_name(name)?;
        match self.lock().registry.remove(bare) {
            Some(_) => Ok(()),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no semaphore named {}", name),
            )),
        }
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
