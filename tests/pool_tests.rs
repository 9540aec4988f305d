// Host-side tests for the object pool and light rig.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod config {
    include!("../src/config.rs");
}
mod core {
    pub mod color {
        include!("../src/core/color.rs");
    }
    pub mod geometry {
        include!("../src/core/geometry.rs");
    }
    pub mod lights {
        include!("../src/core/lights.rs");
    }
    pub mod pool {
        include!("../src/core/pool.rs");
    }
}

use crate::config::*;
use crate::core::geometry::GeometryKind;
use crate::core::lights::{orbit_position, LightRig};
use crate::core::pool::ObjectPool;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn add_then_remove_restores_size() {
    let mut pool = ObjectPool::new(7);
    pool.add_batch(INITIAL_OBJECTS);
    assert_eq!(pool.add_batch(BATCH_SIZE), INITIAL_OBJECTS + BATCH_SIZE);
    assert_eq!(pool.remove_batch(BATCH_SIZE), BATCH_SIZE);
    assert_eq!(pool.len(), INITIAL_OBJECTS);
}

#[test]
fn remove_more_than_present_empties_pool() {
    let mut pool = ObjectPool::new(7);
    pool.add_batch(250);
    assert_eq!(pool.remove_batch(BATCH_SIZE), 250);
    assert!(pool.is_empty());
    assert_eq!(pool.remove_batch(BATCH_SIZE), 0);
    assert!(pool.is_empty());
}

#[test]
fn removal_is_lifo() {
    let mut pool = ObjectPool::new(11);
    pool.add_batch(10);
    let head: Vec<_> = pool.as_slice()[..4].to_vec();
    pool.remove_batch(6);
    assert_eq!(pool.as_slice(), head.as_slice());
}

#[test]
fn spawned_objects_stay_in_bounds() {
    let mut pool = ObjectPool::new(3);
    pool.add_batch(2000);
    for obj in pool.iter() {
        for c in obj.position.to_array() {
            assert!((-SPAWN_HALF_EXTENT..SPAWN_HALF_EXTENT).contains(&c));
        }
        for r in obj.rotation.to_array() {
            assert!((0.0..=std::f32::consts::PI).contains(&r));
        }
        let half = OBJECT_ROTATION_SPEED * 0.5;
        for s in obj.rotation_speed.to_array() {
            assert!(s >= -half && s <= half);
        }
        for c in obj.color {
            assert!((0.0..=1.0).contains(&c));
        }
    }
}

#[test]
fn every_kind_eventually_spawns() {
    let mut pool = ObjectPool::new(5);
    pool.add_batch(500);
    assert!(pool.count_by_kind().iter().all(|&n| n > 0));
    assert_eq!(pool.count_by_kind().iter().sum::<usize>(), 500);
}

#[test]
fn same_seed_same_pool() {
    let mut a = ObjectPool::new(99);
    let mut b = ObjectPool::new(99);
    a.add_batch(100);
    b.add_batch(100);
    assert_eq!(a.as_slice(), b.as_slice());
}

#[test]
fn advance_adds_stored_speed_exactly() {
    let mut pool = ObjectPool::new(1);
    pool.add_batch(50);
    let before: Vec<_> = pool.iter().map(|o| (o.rotation, o.rotation_speed)).collect();
    pool.advance_rotations();
    for (obj, (rot, speed)) in pool.iter().zip(before) {
        assert_eq!(obj.rotation, rot + speed);
    }
}

#[test]
fn rotation_speed_rescale_keeps_orientation() {
    let mut pool = ObjectPool::new(2);
    pool.add_batch(100);
    let rotations: Vec<_> = pool.iter().map(|o| o.rotation).collect();
    pool.set_rotation_speed_scale(0.2);
    assert_eq!(pool.speed_scale(), 0.2);
    for (obj, rot) in pool.iter().zip(rotations) {
        assert_eq!(obj.rotation, rot);
        for s in obj.rotation_speed.to_array() {
            assert!(s.abs() <= 0.1);
        }
    }
    // New objects pick up the new scale too
    pool.add_batch(100);
    assert!(pool.iter().skip(100).all(|o| o.rotation_speed.abs().max_element() <= 0.1));
}

#[test]
fn zero_speed_scale_freezes_objects() {
    let mut pool = ObjectPool::new(4);
    pool.add_batch(20);
    pool.set_rotation_speed_scale(0.0);
    let before: Vec<_> = pool.iter().map(|o| o.rotation).collect();
    pool.advance_rotations();
    assert!(pool.iter().zip(before).all(|(o, r)| o.rotation == r));
}

#[test]
fn vertex_total_sums_per_kind_counts() {
    let mut pool = ObjectPool::new(8);
    pool.add_batch(300);
    let expected: u64 = pool
        .count_by_kind()
        .iter()
        .zip(GeometryKind::ALL)
        .map(|(&n, kind)| n as u64 * kind.vertex_count() as u64)
        .sum();
    assert_eq!(pool.vertex_total(), expected);
    pool.remove_batch(300);
    assert_eq!(pool.vertex_total(), 0);
}

#[test]
fn wireframe_flag_is_pool_wide() {
    let mut pool = ObjectPool::new(6);
    assert!(!pool.wireframe());
    pool.set_wireframe(true);
    pool.add_batch(10);
    assert!(pool.wireframe());
}

#[test]
fn light_rig_starts_inside_spawn_box() {
    let mut rng = StdRng::seed_from_u64(12);
    let rig = LightRig::new(LIGHTS_COUNT, INITIAL_LIGHT_INTENSITY, &mut rng);
    assert_eq!(rig.len(), 5);
    for light in rig.iter() {
        assert_eq!(light.intensity, INITIAL_LIGHT_INTENSITY);
        assert_eq!(light.distance, LIGHT_DISTANCE);
        for c in light.position.to_array() {
            assert!((-LIGHT_SPAWN_HALF_EXTENT..LIGHT_SPAWN_HALF_EXTENT).contains(&c));
        }
    }
}

#[test]
fn light_colors_follow_palette() {
    let mut rng = StdRng::seed_from_u64(0);
    let rig = LightRig::new(LIGHTS_COUNT, 1.0, &mut rng);
    // Red, green, blue, yellow, magenta
    let expected = [
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
        [1.0, 1.0, 0.0],
        [1.0, 0.0, 1.0],
    ];
    for (light, want) in rig.iter().zip(expected) {
        for (a, b) in light.color.iter().zip(want) {
            assert!((a - b).abs() < 1e-5);
        }
    }
}

#[test]
fn set_intensity_reaches_every_light() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut rig = LightRig::new(LIGHTS_COUNT, INITIAL_LIGHT_INTENSITY, &mut rng);
    rig.set_intensity(250.0);
    assert!(rig.iter().all(|l| l.intensity == 250.0));
    rig.set_intensity(0.0);
    assert!(rig.iter().all(|l| l.intensity == 0.0));
}

#[test]
fn animated_lights_follow_closed_form() {
    let mut rng = StdRng::seed_from_u64(0);
    let mut rig = LightRig::new(LIGHTS_COUNT, 1.0, &mut rng);
    let t = 1_700_000_000.25_f64;
    rig.animate(t);
    for (i, light) in rig.iter().enumerate() {
        let i_f = i as f64;
        let want = glam::Vec3::new(
            ((t * 0.7 + i_f * 2.0).sin() * 30.0) as f32,
            ((t * 0.5 + i_f * 1.5).cos() * 30.0) as f32,
            ((t * 0.3 + i_f * 1.2).sin() * 30.0) as f32,
        );
        assert!((light.position - want).length() < 1e-4, "light {i}");
        assert_eq!(light.position, orbit_position(i, t));
    }
}

#[test]
fn orbit_at_time_zero() {
    let p = orbit_position(0, 0.0);
    assert!(p.x.abs() < 1e-6);
    assert!((p.y - 30.0).abs() < 1e-5);
    assert!(p.z.abs() < 1e-6);
    assert!(orbit_position(3, 123.4).abs().max_element() <= 30.0 + 1e-4);
}
