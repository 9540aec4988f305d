use super::color::hex_to_linear_rgb;
use crate::config::{
    LIGHT_COLORS, LIGHT_DISTANCE, LIGHT_MARKER_RADIUS, LIGHT_ORBIT_FREQ, LIGHT_ORBIT_PHASE,
    LIGHT_ORBIT_RADIUS, LIGHT_SPAWN_HALF_EXTENT,
};
use glam::Vec3;
use rand::Rng;
use smallvec::SmallVec;

#[derive(Clone, Debug, PartialEq)]
pub struct PointLight {
    /// Linear RGB; the marker sphere is drawn unlit in this colour.
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    /// Distance at which the light's contribution reaches zero.
    pub distance: f32,
    pub marker_radius: f32,
}

/// Fixed set of point lights, sized once at startup.
pub struct LightRig {
    lights: SmallVec<[PointLight; 8]>,
}

impl LightRig {
    pub fn new(count: usize, intensity: f32, rng: &mut impl Rng) -> Self {
        let lights = (0..count)
            .map(|i| {
                let mut coord =
                    || rng.gen::<f32>() * 2.0 * LIGHT_SPAWN_HALF_EXTENT - LIGHT_SPAWN_HALF_EXTENT;
                let position = Vec3::new(coord(), coord(), coord());
                PointLight {
                    color: hex_to_linear_rgb(LIGHT_COLORS[i % LIGHT_COLORS.len()]),
                    intensity,
                    position,
                    distance: LIGHT_DISTANCE,
                    marker_radius: LIGHT_MARKER_RADIUS,
                }
            })
            .collect();
        Self { lights }
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointLight> {
        self.lights.iter()
    }

    /// Every light shares one intensity scalar.
    pub fn set_intensity(&mut self, intensity: f32) {
        for light in &mut self.lights {
            light.intensity = intensity;
        }
    }

    pub fn animate(&mut self, wall_clock_secs: f64) {
        for (i, light) in self.lights.iter_mut().enumerate() {
            light.position = orbit_position(i, wall_clock_secs);
        }
    }
}

/// Closed-form orbit of light `index` at wall-clock time `t` (seconds).
///
/// Evaluated in f64: `t` is seconds since the Unix epoch and would lose all
/// sub-second resolution as f32.
pub fn orbit_position(index: usize, t: f64) -> Vec3 {
    let i = index as f64;
    let [wx, wy, wz] = LIGHT_ORBIT_FREQ;
    let [px, py, pz] = LIGHT_ORBIT_PHASE;
    Vec3::new(
        ((t * wx + i * px).sin() * LIGHT_ORBIT_RADIUS) as f32,
        ((t * wy + i * py).cos() * LIGHT_ORBIT_RADIUS) as f32,
        ((t * wz + i * pz).sin() * LIGHT_ORBIT_RADIUS) as f32,
    )
}
