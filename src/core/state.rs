use super::camera::Camera;
use super::lights::LightRig;
use super::orbit::OrbitControls;
use super::pool::ObjectPool;
use super::stats::{FpsCounter, FrameStats, RenderInfo};
use crate::config::{
    AUTO_ROTATE_SLIDER_SCALE, INITIAL_AUTO_ROTATE_SPEED, INITIAL_CAMERA_DISTANCE,
    INITIAL_LIGHT_INTENSITY, INITIAL_OBJECTS, LIGHTS_COUNT, OBJECT_ROTATION_SPEED,
};
use rand::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuntimeToggles {
    pub wireframe: bool,
    pub lights_dynamic: bool,
    pub objects_rotating: bool,
    pub bloom_enabled: bool,
    pub camera_auto_rotate: bool,
}

impl Default for RuntimeToggles {
    fn default() -> Self {
        Self {
            wireframe: false,
            lights_dynamic: true,
            objects_rotating: true,
            bloom_enabled: false,
            camera_auto_rotate: false,
        }
    }
}

/// Last value received from each slider, as entered (no range checks).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sliders {
    pub light_intensity: f32,
    pub camera_distance: f32,
    /// Raw slider value; the controls spin at this times `AUTO_ROTATE_SLIDER_SCALE`.
    pub camera_auto_rotate_speed: f32,
    pub object_rotation_speed_scale: f32,
}

impl Default for Sliders {
    fn default() -> Self {
        Self {
            light_intensity: INITIAL_LIGHT_INTENSITY,
            camera_distance: INITIAL_CAMERA_DISTANCE,
            camera_auto_rotate_speed: INITIAL_AUTO_ROTATE_SPEED / AUTO_ROTATE_SLIDER_SCALE,
            object_rotation_speed_scale: OBJECT_ROTATION_SPEED,
        }
    }
}

/// Everything the frame loop and the UI handlers share.
pub struct StressState {
    pub pool: ObjectPool,
    pub lights: LightRig,
    pub camera: Camera,
    pub orbit: OrbitControls,
    pub toggles: RuntimeToggles,
    pub sliders: Sliders,
    pub stats: FrameStats,
    fps: FpsCounter,
}

impl StressState {
    /// Empty pool, lights at random spots. `seed` drives every random choice.
    pub fn new(seed: u64, aspect: f32) -> Self {
        // Derive per-subsystem RNGs from the base seed
        let light_seed = seed ^ 0x9E37_79B9_7F4A_7C15;
        let mut light_rng = StdRng::seed_from_u64(light_seed);
        Self {
            pool: ObjectPool::new(seed),
            lights: LightRig::new(LIGHTS_COUNT, INITIAL_LIGHT_INTENSITY, &mut light_rng),
            camera: Camera::new(aspect),
            orbit: OrbitControls::default(),
            toggles: RuntimeToggles::default(),
            sliders: Sliders::default(),
            stats: FrameStats::default(),
            fps: FpsCounter::new(0.0),
        }
    }

    /// `new` plus the initial object batch.
    pub fn bootstrap(seed: u64, aspect: f32) -> Self {
        let mut state = Self::new(seed, aspect);
        state.pool.add_batch(INITIAL_OBJECTS);
        state
    }

    pub fn object_count(&self) -> usize {
        self.pool.len()
    }

    pub fn add_batch(&mut self, n: usize) -> usize {
        self.pool.add_batch(n)
    }

    pub fn remove_batch(&mut self, n: usize) -> usize {
        self.pool.remove_batch(n)
    }

    pub fn toggle_lights_dynamic(&mut self) -> bool {
        self.toggles.lights_dynamic = !self.toggles.lights_dynamic;
        self.toggles.lights_dynamic
    }

    pub fn toggle_bloom(&mut self) -> bool {
        self.toggles.bloom_enabled = !self.toggles.bloom_enabled;
        self.toggles.bloom_enabled
    }

    pub fn toggle_wireframe(&mut self) -> bool {
        self.toggles.wireframe = !self.toggles.wireframe;
        self.pool.set_wireframe(self.toggles.wireframe);
        self.toggles.wireframe
    }

    pub fn toggle_object_rotation(&mut self) -> bool {
        self.toggles.objects_rotating = !self.toggles.objects_rotating;
        self.toggles.objects_rotating
    }

    pub fn toggle_camera_auto_rotate(&mut self) -> bool {
        self.toggles.camera_auto_rotate = !self.toggles.camera_auto_rotate;
        self.orbit.auto_rotate = self.toggles.camera_auto_rotate;
        self.toggles.camera_auto_rotate
    }

    pub fn set_light_intensity(&mut self, value: f32) {
        self.sliders.light_intensity = value;
        self.lights.set_intensity(value);
    }

    pub fn set_camera_distance(&mut self, distance: f32) {
        self.sliders.camera_distance = distance;
        self.camera.set_distance(distance);
    }

    pub fn set_camera_auto_rotate_speed(&mut self, value: f32) {
        self.sliders.camera_auto_rotate_speed = value;
        self.orbit.auto_rotate_speed = value * AUTO_ROTATE_SLIDER_SCALE;
    }

    pub fn set_object_rotation_speed(&mut self, scale: f32) {
        self.sliders.object_rotation_speed_scale = scale;
        self.pool.set_rotation_speed_scale(scale);
    }

    /// Open the first FPS window at `now_ms`.
    pub fn start_clock(&mut self, now_ms: f64) {
        self.fps = FpsCounter::new(now_ms);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }

    /// Simulation half of a frame: FPS window, object spin, light orbit and
    /// camera controls. Returns the FPS when a sample window closed.
    ///
    /// `now_ms` is a monotonic clock for FPS; `wall_clock_secs` drives the
    /// light orbit.
    pub fn advance(&mut self, now_ms: f64, wall_clock_secs: f64) -> Option<u32> {
        let sampled = self.fps.tick(now_ms);
        if self.toggles.objects_rotating {
            self.pool.advance_rotations();
        }
        if self.toggles.lights_dynamic {
            self.lights.animate(wall_clock_secs);
        }
        // Always step the controls so damping can ease out a manual drag.
        self.orbit.update(&mut self.camera);
        sampled
    }

    /// Publish this frame's numbers. With bloom on, the post chain hides the
    /// renderer's counters, so draw calls and triangles come from the scene.
    pub fn record_frame_stats(&mut self, native: &RenderInfo, memory_mb: u32) -> FrameStats {
        let fps = self.fps.fps();
        self.stats = if self.toggles.bloom_enabled {
            // O(objects) scan every frame
            FrameStats::from_post_processing(
                self.pool.len(),
                self.lights.len(),
                self.pool.vertex_total(),
                memory_mb,
                fps,
            )
        } else {
            FrameStats::from_native(native, memory_mb, fps)
        };
        self.stats
    }
}
