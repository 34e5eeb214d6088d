// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! POSIX named semaphore backend (`sem_open(3)` family)
#![allow(unsafe_code)]

use psem_core::SemaphoreBackend;
use std::ffi::CString;
use std::io;
use std::ptr::NonNull;

/// Pointer returned by `sem_open`
#[derive(Debug)]
pub struct PosixHandle(NonNull<libc::sem_t>);

impl PosixHandle {
    fn as_ptr(&self) -> *mut libc::sem_t {
        self.0.as_ptr()
    }
}

// SAFETY: POSIX semaphore operations are thread-safe; the pointer refers to a
// process-wide mapping that stays valid until `sem_close`, which only the
// owning `NamedSemaphore` calls through `&mut self`.
unsafe impl Send for PosixHandle {}
unsafe impl Sync for PosixHandle {}

/// Backend over the host's named semaphores
#[derive(Clone, Debug, Default)]
pub struct PosixBackend;

impl PosixBackend {
    pub fn new() -> Self {
        Self
    }
}

fn c_name(name: &str) -> io::Result<CString> {
    CString::new(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "semaphore name contains a NUL byte",
        )
    })
}

/// Map a `0`/`-1` libc return into an `io::Result`
fn check(ret: libc::c_int) -> io::Result<()> {
    if ret == 0 {
        Ok(())
    } else {
        Err(io::Error::last_os_error())
    }
}

impl SemaphoreBackend for PosixBackend {
    type Handle = PosixHandle;

    fn open(&self, name: &str, mode: u32, value: u32) -> io::Result<PosixHandle> {
        let name = c_name(name)?;
        // SAFETY: `name` is a valid NUL-terminated string that outlives the
        // call. With O_CREAT, sem_open reads exactly two variadic arguments,
        // which are promoted to unsigned int.
        let sem = unsafe {
            libc::sem_open(
                name.as_ptr(),
                libc::O_CREAT,
                mode as libc::c_uint,
                value as libc::c_uint,
            )
        };
        if sem == libc::SEM_FAILED {
            return Err(io::Error::last_os_error());
        }
        NonNull::new(sem)
            .map(PosixHandle)
            .ok_or_else(io::Error::last_os_error)
    }

    fn close(&self, handle: &PosixHandle) -> io::Result<()> {
        // SAFETY: the handle came from a successful sem_open and has not
        // been closed; the caller drops it after a successful close.
        check(unsafe { libc::sem_close(handle.as_ptr()) })
    }

    fn post(&self, handle: &PosixHandle) -> io::Result<()> {
        // SAFETY: the handle is open for the lifetime of the borrow.
        check(unsafe { libc::sem_post(handle.as_ptr()) })
    }

    fn wait(&self, handle: &PosixHandle) -> io::Result<()> {
        // SAFETY: the handle is open for the lifetime of the borrow.
        check(unsafe { libc::sem_wait(handle.as_ptr()) })
    }

    fn try_wait(&self, handle: &PosixHandle) -> io::Result<()> {
        // SAFETY: the handle is open for the lifetime of the borrow.
        // EAGAIN surfaces as io::ErrorKind::WouldBlock.
        check(unsafe { libc::sem_trywait(handle.as_ptr()) })
    }

    #[cfg(not(target_vendor = "apple"))]
    fn value(&self, handle: &PosixHandle) -> io::Result<i32> {
        let mut value: libc::c_int = 0;
        // SAFETY: the handle is open and `value` is a valid out-pointer.
        check(unsafe { libc::sem_getvalue(handle.as_ptr(), &mut value) })?;
        Ok(value)
    }

    #[cfg(target_vendor = "apple")]
    fn value(&self, _handle: &PosixHandle) -> io::Result<i32> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "sem_getvalue is not supported on this platform",
        ))
    }

    fn unlink(&self, name: &str) -> io::Result<()> {
        let name = c_name(name)?;
        // SAFETY: `name` is a valid NUL-terminated string.
        check(unsafe { libc::sem_unlink(name.as_ptr()) })
    }
}
