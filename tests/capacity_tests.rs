// Host-side tests for instance-buffer sizing.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod config {
    include!("../src/config.rs");
}
mod core {
    pub mod capacity {
        include!("../src/core/capacity.rs");
    }
}

use crate::config::MIN_INSTANCE_CAPACITY;
use crate::core::capacity::{max_instance_slots, next_instance_capacity};

// Model matrix plus colour, 20 f32s
const STRIDE: u64 = 80;
// WebGPU's default maxBufferSize, 256 MiB
const DEFAULT_MAX_BUFFER: u64 = 268_435_456;

fn unlimited() -> usize {
    usize::MAX
}

#[test]
fn stays_put_while_contents_fit() {
    assert_eq!(next_instance_capacity(MIN_INSTANCE_CAPACITY, 0, unlimited()), None);
    assert_eq!(next_instance_capacity(MIN_INSTANCE_CAPACITY, 500, unlimited()), None);
    assert_eq!(next_instance_capacity(4096, 4096, unlimited()), None);
    assert_eq!(next_instance_capacity(4096, 3005, unlimited()), None);
}

#[test]
fn grows_to_next_power_of_two() {
    assert_eq!(next_instance_capacity(1024, 1025, unlimited()), Some(2048));
    assert_eq!(next_instance_capacity(1024, 3005, unlimited()), Some(4096));
    assert_eq!(next_instance_capacity(4096, 4097, unlimited()), Some(8192));
}

#[test]
fn shrinks_below_a_quarter() {
    assert_eq!(next_instance_capacity(8192, 2047, unlimited()), Some(2048));
    // exactly a quarter is still kept
    assert_eq!(next_instance_capacity(8192, 2048, unlimited()), None);
}

#[test]
fn never_drops_below_minimum() {
    assert_eq!(
        next_instance_capacity(4096, 0, unlimited()),
        Some(MIN_INSTANCE_CAPACITY)
    );
    assert_eq!(
        next_instance_capacity(4096, 10, unlimited()),
        Some(MIN_INSTANCE_CAPACITY)
    );
}

#[test]
fn growth_stops_at_device_limit() {
    assert_eq!(next_instance_capacity(2048, 5000, 3000), Some(3000));
    assert_eq!(next_instance_capacity(3000, 5000, 3000), None);
    // a limit below the floor leaves the floor in place
    assert_eq!(next_instance_capacity(MIN_INSTANCE_CAPACITY, 5000, 10), None);
}

#[test]
fn two_million_objects_stay_within_default_buffer_size() {
    let max_slots = max_instance_slots(DEFAULT_MAX_BUFFER, STRIDE);
    assert_eq!(max_slots, 3_355_443);

    let needed = 2_097_157;
    let cap = next_instance_capacity(1 << 21, needed, max_slots).unwrap_or(1 << 21);
    assert_eq!(cap, max_slots);
    assert!(cap as u64 * STRIDE <= DEFAULT_MAX_BUFFER);
}

#[test]
fn zero_stride_is_unbounded() {
    assert_eq!(max_instance_slots(DEFAULT_MAX_BUFFER, 0), usize::MAX);
}
