// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn system_clock_returns_increasing_time() {
    let clock = SystemClock;
    let t1 = clock.now();
    std::thread::sleep(Duration::from_millis(1));
    let t2 = clock.now();
    assert!(t2 > t1);
}

#[test]
fn system_clock_sleep_blocks_for_duration() {
    let clock = SystemClock;
    let start = Instant::now();
    clock.sleep(Duration::from_millis(20));
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn fake_clock_can_be_advanced() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    clock.advance(Duration::from_secs(60));
    let t2 = clock.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(60));
    assert_eq!(clock.slept(), Duration::ZERO);
}

#[test]
fn fake_clock_sleep_advances_without_blocking() {
    let clock = FakeClock::new();
    let t1 = clock.now();
    let wall = Instant::now();

    clock.sleep(Duration::from_secs(3600));

    assert!(wall.elapsed() < Duration::from_secs(1));
    assert_eq!(clock.now().duration_since(t1), Duration::from_secs(3600));
    assert_eq!(clock.slept(), Duration::from_secs(3600));
    assert_eq!(clock.sleep_count(), 1);
}

#[test]
fn fake_clock_is_cloneable_and_shared() {
    let clock1 = FakeClock::new();
    let clock2 = clock1.clone();
    let t1 = clock1.now();
    clock2.advance(Duration::from_secs(30));
    clock2.sleep(Duration::from_secs(5));
    let t2 = clock1.now();
    assert!(t2.duration_since(t1) >= Duration::from_secs(35));
    assert_eq!(clock1.sleep_count(), 1);
}
