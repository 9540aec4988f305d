// Run configuration for the stress test. Read at startup, never mutated.

// Object pool
pub const INITIAL_OBJECTS: usize = 3000;
pub const BATCH_SIZE: usize = 1000;
pub const OBJECT_ROTATION_SPEED: f32 = 0.02; // default speed scale (rad/frame span)
pub const SPAWN_HALF_EXTENT: f32 = 50.0; // objects spawn in [-50, 50) on every axis

// Phong material shared by all objects
pub const MATERIAL_SHININESS: f32 = 100.0;
pub const MATERIAL_SPECULAR_HEX: u32 = 0x444444;

// Lights
pub const LIGHTS_COUNT: usize = 5;
pub const INITIAL_LIGHT_INTENSITY: f32 = 1000.0;
pub const LIGHT_DISTANCE: f32 = 50.0; // falloff cutoff
pub const LIGHT_SPAWN_HALF_EXTENT: f32 = 20.0;
pub const LIGHT_MARKER_RADIUS: f32 = 0.5;
pub const LIGHT_COLORS: [u32; LIGHTS_COUNT] = [0xff0000, 0x00ff00, 0x0000ff, 0xffff00, 0xff00ff];

// Light orbit: position_k = trig(t * FREQ[k] + i * PHASE[k]) * RADIUS
pub const LIGHT_ORBIT_RADIUS: f64 = 30.0;
pub const LIGHT_ORBIT_FREQ: [f64; 3] = [0.7, 0.5, 0.3];
pub const LIGHT_ORBIT_PHASE: [f64; 3] = [2.0, 1.5, 1.2];

// Camera
pub const CAMERA_FOV_DEG: f32 = 75.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 1000.0;
pub const INITIAL_CAMERA_DISTANCE: f32 = 50.0;

// Orbit controls
pub const DAMPING_FACTOR: f32 = 0.05;
pub const INITIAL_AUTO_ROTATE_SPEED: f32 = 2.0;
pub const AUTO_ROTATE_SLIDER_SCALE: f32 = 10.0; // cameraSpeed slider value -> auto-rotate speed
pub const ORBIT_ROTATE_SPEED: f32 = 1.0;
pub const ORBIT_ZOOM_SPEED: f32 = 1.0;
pub const ORBIT_MIN_DISTANCE: f32 = 0.0;
pub const ORBIT_MAX_DISTANCE: f32 = f32::INFINITY;

// Post-processing
pub const BLOOM_STRENGTH: f32 = 0.5;
pub const BLOOM_RADIUS: f32 = 2.0;
pub const BLOOM_THRESHOLD: f32 = 0.35;
pub const TONE_MAPPING_EXPOSURE: f32 = 1.0;

// Stats
pub const FPS_SAMPLE_MS: f64 = 1000.0;
pub const BYTES_PER_MB: f64 = 1_048_576.0;

// GPU instance storage never shrinks below this many slots
pub const MIN_INSTANCE_CAPACITY: usize = 1024;
