// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::thread;
use std::time::Duration;

#[test]
fn clones_share_the_namespace() {
    let backend = FakeBackend::new();
    let other = backend.clone();

    let a = backend.open("/shared", 0o644, 2).unwrap();
    let b = other.open("/shared", 0o600, 9).unwrap();

    // Second open attaches: mode and value are ignored
    assert_eq!(b.mode(), 0o644);
    assert_eq!(other.value(&b).unwrap(), 2);

    backend.try_wait(&a).unwrap();
    assert_eq!(other.value(&b).unwrap(), 1);
    assert_eq!(backend.open_handles(), 2);
}

#[test]
fn leading_slash_is_optional() {
    let backend = FakeBackend::new();
    backend.open("/jobs", 0o644, 1).unwrap();
    assert!(backend.exists("jobs"));
    backend.unlink("jobs").unwrap();
    assert!(!backend.exists("/jobs"));
}

#[test]
fn unlinked_object_survives_for_open_handles() {
    let backend = FakeBackend::new();
    let old = backend.open("/gone", 0o644, 3).unwrap();

    backend.unlink("/gone").unwrap();
    assert!(!backend.exists("/gone"));
    assert_eq!(backend.value(&old).unwrap(), 3);

    let fresh = backend.open("/gone", 0o644, 0).unwrap();
    assert_eq!(backend.value(&fresh).unwrap(), 0);
    assert_eq!(backend.value(&old).unwrap(), 3);
}

#[test]
fn unlink_missing_name_is_not_found() {
    let backend = FakeBackend::new();
    let err = backend.unlink("/missing").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::NotFound);
}

#[test]
fn rejects_invalid_names() {
    let backend = FakeBackend::new();
    let long = format!("/{}", "x".repeat(NAME_MAX + 1));

    for name in ["/", "", "/a/b", long.as_str()] {
        let err = backend.open(name, 0o644, 1).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "name {:?}", name);
    }
    assert_eq!(backend.open_handles(), 0);
}

#[test]
fn rejects_value_above_maximum() {
    let backend = FakeBackend::new();
    let err = backend.open("/big", 0o644, VALUE_MAX + 1).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    assert!(!backend.exists("/big"));
}

#[test]
fn post_at_maximum_overflows() {
    let backend = FakeBackend::new();
    let handle = backend.open("/full", 0o644, VALUE_MAX).unwrap();
    assert!(backend.post(&handle).is_err());
    assert_eq!(backend.value(&handle).unwrap(), i32::MAX);
}

#[test]
fn try_wait_on_zero_would_block() {
    let backend = FakeBackend::new();
    let handle = backend.open("/empty", 0o644, 0).unwrap();
    let err = backend.try_wait(&handle).unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
    assert_eq!(backend.value(&handle).unwrap(), 0);
}

#[test]
fn wait_blocks_until_post() {
    let backend = FakeBackend::new();
    let handle = backend.open("/blocking", 0o644, 0).unwrap();

    let poster = backend.clone();
    let poster_handle = handle.clone();
    let join = thread::spawn(move || {
        thread::sleep(Duration::from_millis(50));
        poster.post(&poster_handle).unwrap();
    });

    backend.wait(&handle).unwrap();
    join.join().unwrap();
    assert_eq!(backend.value(&handle).unwrap(), 0);
}

#[test]
fn injected_failure_applies_once() {
    let backend = FakeBackend::new();
    let handle = backend.open("/flaky", 0o644, 1).unwrap();

    backend.fail_next(FakeOp::Post, io::ErrorKind::Other);
    assert!(backend.post(&handle).is_err());
    assert_eq!(backend.value(&handle).unwrap(), 1);
    backend.post(&handle).unwrap();
    assert_eq!(backend.value(&handle).unwrap(), 2);
}

#[test]
fn records_calls_in_order() {
    let backend = FakeBackend::new();
    let handle = backend.open("/calls", 0o600, 1).unwrap();
    backend.try_wait(&handle).unwrap();
    backend.close(&handle).unwrap();

    assert_eq!(
        backend.calls(),
        vec![
            FakeCall::Open {
                name: "/calls".to_string(),
                mode: 0o600,
                value: 1,
            },
            FakeCall::TryWait {
                name: "/calls".to_string(),
            },
            FakeCall::Close {
                name: "/calls".to_string(),
            },
        ]
    );
    assert_eq!(backend.open_handles(), 0);
}
