// Host-side tests for the shared state and the control dispatch table:
// the same paths the page's buttons and sliders drive.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod config {
    include!("../src/config.rs");
}
mod core {
    pub mod camera {
        include!("../src/core/camera.rs");
    }
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod dispatch {
        include!("../src/core/dispatch.rs");
    }
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
    pub mod lights {
        include!("../src/core/lights.rs");
    }
    pub mod orbit {
        include!("../src/core/orbit.rs");
    }
    pub mod pool {
        include!("../src/core/pool.rs");
    }
    pub mod state {
        include!("../src/core/state.rs");
    }
    pub mod stats {
        include!("../src/core/stats.rs");
    }
}

use crate::core::dispatch::*;
use crate::core::lights::orbit_position;
use crate::core::state::StressState;
use crate::core::stats::{RenderInfo, StatsSource};

const SEED: u64 = 0xC0FFEE;

fn state() -> StressState {
    StressState::bootstrap(SEED, 16.0 / 9.0)
}

fn text_for(updates: &[DisplayUpdate], want: &str) -> Option<String> {
    updates.iter().find_map(|u| match u {
        DisplayUpdate::Text { id, text } if *id == want => Some(text.clone()),
        _ => None,
    })
}

fn active_for(updates: &[DisplayUpdate], want: &str) -> Option<bool> {
    updates.iter().find_map(|u| match u {
        DisplayUpdate::Active { id, active } if *id == want => Some(*active),
        _ => None,
    })
}

#[test]
fn bootstrap_defaults() {
    let s = state();
    assert_eq!(s.object_count(), 3000);
    assert_eq!(s.lights.len(), 5);
    assert!(s.lights.iter().all(|l| l.intensity == 1000.0));
    assert!(s.toggles.lights_dynamic);
    assert!(s.toggles.objects_rotating);
    assert!(!s.toggles.wireframe);
    assert!(!s.toggles.bloom_enabled);
    assert!(!s.toggles.camera_auto_rotate);
    assert!(!s.orbit.auto_rotate);
    assert!((s.camera.distance() - 50.0).abs() < 1e-5);
}

#[test]
fn every_binding_is_unique_and_dispatchable() {
    let table = DispatchTable::new();
    assert_eq!(table.bindings().count(), BINDINGS.len());
    for b in BINDINGS {
        assert!(table.get(b.element_id).is_some());
    }
    let mut s = state();
    assert!(table.dispatch(&mut s, "noSuchControl", 0.0).is_none());
}

#[test]
fn batch_buttons_scenario() {
    let table = DispatchTable::new();
    let mut s = state();

    let out = table.dispatch(&mut s, ids::ADD_BATCH, 0.0).unwrap_or_default();
    assert_eq!(s.object_count(), 4000);
    assert_eq!(text_for(&out, ids::COUNT).as_deref(), Some("4000"));

    let out = table.dispatch(&mut s, ids::REMOVE_BATCH, 0.0).unwrap_or_default();
    assert_eq!(s.object_count(), 3000);
    assert_eq!(text_for(&out, ids::COUNT).as_deref(), Some("3000"));

    for _ in 0..5 {
        table.dispatch(&mut s, ids::REMOVE_BATCH, 0.0);
    }
    assert_eq!(s.object_count(), 0);
    let out = table.dispatch(&mut s, ids::REMOVE_BATCH, 0.0).unwrap_or_default();
    assert_eq!(text_for(&out, ids::COUNT).as_deref(), Some("0"));
}

#[test]
fn intensity_slider_scenario() {
    let table = DispatchTable::new();
    let mut s = state();
    let value = parse_slider_value("250");
    let out = table.dispatch(&mut s, ids::LIGHT_INTENSITY, value).unwrap_or_default();
    assert!(s.lights.iter().all(|l| l.intensity == 250.0));
    assert_eq!(s.lights.len(), 5);
    assert_eq!(text_for(&out, ids::INTENSITY_VALUE).as_deref(), Some("250"));
}

#[test]
fn toggles_flip_and_report_state() {
    let table = DispatchTable::new();
    let mut s = state();
    let cases = [
        (ids::TOGGLE_LIGHTS, true),
        (ids::TOGGLE_BLOOM, false),
        (ids::TOGGLE_WIREFRAME, false),
        (ids::TOGGLE_ROTATE, false),
        (ids::TOGGLE_OBJECT_ROTATION, true),
    ];
    for (id, initial) in cases {
        let out = table.dispatch(&mut s, id, 0.0).unwrap_or_default();
        assert_eq!(active_for(&out, id), Some(!initial), "{id}");
        let out = table.dispatch(&mut s, id, 0.0).unwrap_or_default();
        assert_eq!(active_for(&out, id), Some(initial), "{id}");
    }
}

#[test]
fn wireframe_toggle_reaches_pool() {
    let mut s = state();
    assert!(s.toggle_wireframe());
    assert!(s.pool.wireframe());
    s.add_batch(10);
    assert!(s.pool.wireframe());
    assert!(!s.toggle_wireframe());
    assert!(!s.pool.wireframe());
}

#[test]
fn camera_sliders() {
    let table = DispatchTable::new();
    let mut s = state();
    let out = table.dispatch(&mut s, ids::CAMERA_DISTANCE, 80.0).unwrap_or_default();
    assert!((s.camera.distance() - 80.0).abs() < 1e-4);
    assert_eq!(text_for(&out, ids::CAMERA_DISTANCE_VALUE).as_deref(), Some("80"));

    let out = table.dispatch(&mut s, ids::CAMERA_SPEED, 0.5).unwrap_or_default();
    assert!((s.orbit.auto_rotate_speed - 5.0).abs() < 1e-6);
    assert_eq!(text_for(&out, ids::CAMERA_SPEED_VALUE).as_deref(), Some("0.5"));
}

#[test]
fn object_rotation_slider_rerolls_speeds() {
    let table = DispatchTable::new();
    let mut s = state();
    let out = table
        .dispatch(&mut s, ids::OBJECT_ROTATION_SPEED, 0.0)
        .unwrap_or_default();
    assert_eq!(s.pool.speed_scale(), 0.0);
    assert_eq!(text_for(&out, ids::OBJECT_ROTATION_SPEED_VALUE).as_deref(), Some("0"));
    assert!(s.pool.iter().all(|o| o.rotation_speed == glam::Vec3::ZERO));
}

#[test]
fn slider_values_coerce_like_number() {
    assert_eq!(parse_slider_value("250"), 250.0);
    assert_eq!(parse_slider_value(" 0.5 "), 0.5);
    assert_eq!(parse_slider_value(""), 0.0);
    assert!(parse_slider_value("abc").is_nan());
    assert_eq!(parse_slider_value("Infinity"), f32::INFINITY);
    assert_eq!(parse_slider_value("-Infinity"), f32::NEG_INFINITY);
    assert_eq!(parse_slider_value("1e3"), 1000.0);
    assert_eq!(parse_slider_value(".5"), 0.5);
}

#[test]
fn slider_values_reject_rust_only_spellings() {
    for text in ["inf", "INF", "infinity", "INFINITY", "nan", "NaN", "-inf"] {
        assert!(parse_slider_value(text).is_nan(), "{text}");
    }
}

#[test]
fn slider_values_accept_radix_prefixes() {
    assert_eq!(parse_slider_value("0x10"), 16.0);
    assert_eq!(parse_slider_value("0XfF"), 255.0);
    assert_eq!(parse_slider_value("0o17"), 15.0);
    assert_eq!(parse_slider_value("0b101"), 5.0);
    assert!(parse_slider_value("0x").is_nan());
    assert!(parse_slider_value("0x1g").is_nan());
    assert!(parse_slider_value("-0x10").is_nan());
    assert!(parse_slider_value("0b102").is_nan());
}

#[test]
fn numbers_format_without_trailing_zeros() {
    assert_eq!(format_number(250.0), "250");
    assert_eq!(format_number(0.02), "0.02");
    assert_eq!(format_number(-3.5), "-3.5");
    assert_eq!(format_number(f32::NEG_INFINITY), "-Infinity");
    assert_eq!(format_number(f32::NAN), "NaN");
}

#[test]
fn numbers_format_extremes_like_js() {
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(format_number(0.0), "0");
    assert_eq!(format_number(1e21), "1e+21");
    assert_eq!(format_number(-2.5e22), "-2.5e+22");
    assert_eq!(format_number(1.5e-7), "1.5e-7");
    assert_eq!(format_number(1e20), "100000000000000000000");
    assert_eq!(format_number(0.000001), "0.000001");
}

#[test]
fn rotation_follows_toggle() {
    let mut s = state();
    s.toggle_object_rotation();
    let frozen: Vec<_> = s.pool.iter().map(|o| o.rotation).collect();
    for i in 0..5 {
        s.advance(i as f64 * 16.0, 0.0);
    }
    assert!(s.pool.iter().zip(&frozen).all(|(o, r)| o.rotation == *r));

    s.toggle_object_rotation();
    s.advance(100.0, 0.0);
    for (o, r) in s.pool.iter().zip(&frozen) {
        assert_eq!(o.rotation, *r + o.rotation_speed);
    }
}

#[test]
fn dynamic_lights_follow_wall_clock() {
    let mut s = state();
    let t = 1_712_345_678.5;
    s.advance(0.0, t);
    for (i, light) in s.lights.iter().enumerate() {
        assert_eq!(light.position, orbit_position(i, t));
    }

    s.toggle_lights_dynamic();
    let parked: Vec<_> = s.lights.iter().map(|l| l.position).collect();
    s.advance(16.0, t + 10.0);
    assert!(s.lights.iter().zip(parked).all(|(l, p)| l.position == p));
}

#[test]
fn bloom_switches_stat_accounting() {
    let mut s = state();
    let native = RenderInfo {
        calls: 6,
        triangles: 777,
        lines: 0,
    };

    let off = s.record_frame_stats(&native, 12);
    assert_eq!(off.source, StatsSource::Native);
    assert_eq!(off.draw_calls, 6);
    assert_eq!(off.triangles, 777);

    s.toggle_bloom();
    let on = s.record_frame_stats(&native, 12);
    assert_eq!(on.source, StatsSource::PostProcessing);
    assert_eq!(on.draw_calls, 3000 + 5);
    assert_eq!(on.triangles, s.pool.vertex_total());

    s.toggle_bloom();
    let back = s.record_frame_stats(&native, 12);
    assert_eq!(back, off);
}

#[test]
fn stats_readouts() {
    let mut s = state();
    let stats = s.record_frame_stats(&RenderInfo::default(), 64);
    let out = stats_display(&stats);
    assert_eq!(text_for(&out, ids::FPS).as_deref(), Some("0"));
    assert_eq!(text_for(&out, ids::DRAW_CALLS).as_deref(), Some("0"));
    assert_eq!(text_for(&out, ids::MEMORY).as_deref(), Some("64 MB"));
}

#[test]
fn initial_display_reflects_defaults() {
    let s = state();
    let out = initial_display(&s);
    assert_eq!(text_for(&out, ids::COUNT).as_deref(), Some("3000"));
    assert_eq!(text_for(&out, ids::INTENSITY_VALUE).as_deref(), Some("1000"));
    assert_eq!(text_for(&out, ids::CAMERA_DISTANCE_VALUE).as_deref(), Some("50"));
    assert_eq!(text_for(&out, ids::CAMERA_SPEED_VALUE).as_deref(), Some("0.2"));
    assert_eq!(active_for(&out, ids::TOGGLE_LIGHTS), Some(true));
    assert_eq!(active_for(&out, ids::TOGGLE_BLOOM), Some(false));
}

#[test]
fn fps_sampled_after_one_second() {
    let mut s = state();
    s.start_clock(0.0);
    let mut sampled = None;
    // 20 ms frames: the window closes on the 50th
    for i in 1..=60 {
        if let Some(fps) = s.advance(i as f64 * 20.0, 0.0) {
            sampled.get_or_insert(fps);
        }
    }
    assert_eq!(sampled, Some(50));
    assert_eq!(s.record_frame_stats(&RenderInfo::default(), 0).fps, 50);
}
