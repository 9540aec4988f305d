use super::color::hex_to_linear_rgb;
use super::geometry::GeometryKind;
use crate::config::{OBJECT_ROTATION_SPEED, SPAWN_HALF_EXTENT};
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::prelude::*;
use std::f32::consts::PI;

/// One mesh instance in the stress scene.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderableObject {
    pub kind: GeometryKind,
    /// Linear RGB diffuse colour.
    pub color: [f32; 3],
    pub position: Vec3,
    /// Euler angles (radians), applied in X, Y, Z order.
    pub rotation: Vec3,
    /// Added to `rotation` once per animated frame.
    pub rotation_speed: Vec3,
}

impl RenderableObject {
    pub fn random(rng: &mut impl Rng, speed_scale: f32) -> Self {
        let kind = GeometryKind::ALL[rng.gen_range(0..GeometryKind::COUNT)];
        let color = hex_to_linear_rgb(rng.gen_range(0..0xff_ffff));
        let position = Vec3::new(spawn_coord(rng), spawn_coord(rng), spawn_coord(rng));
        let rotation = Vec3::new(rng.gen::<f32>() * PI, rng.gen::<f32>() * PI, rng.gen::<f32>() * PI);
        Self {
            kind,
            color,
            position,
            rotation,
            rotation_speed: random_speed(rng, speed_scale),
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        let q = Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z);
        Mat4::from_rotation_translation(q, self.position)
    }
}

#[inline]
fn spawn_coord(rng: &mut impl Rng) -> f32 {
    rng.gen::<f32>() * 2.0 * SPAWN_HALF_EXTENT - SPAWN_HALF_EXTENT
}

#[inline]
fn random_speed(rng: &mut impl Rng, scale: f32) -> Vec3 {
    Vec3::new(
        (rng.gen::<f32>() - 0.5) * scale,
        (rng.gen::<f32>() - 0.5) * scale,
        (rng.gen::<f32>() - 0.5) * scale,
    )
}

/// Growable, shrinkable set of stress objects.
///
/// Objects are appended and removed at the tail (LIFO). The pool has no upper
/// bound; growing it until the frame rate collapses is the point of the test.
pub struct ObjectPool {
    objects: Vec<RenderableObject>,
    rng: StdRng,
    speed_scale: f32,
    wireframe: bool,
}

impl ObjectPool {
    pub fn new(seed: u64) -> Self {
        Self {
            objects: Vec::new(),
            rng: StdRng::seed_from_u64(seed),
            speed_scale: OBJECT_ROTATION_SPEED,
            wireframe: false,
        }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderableObject> {
        self.objects.iter()
    }

    pub fn as_slice(&self) -> &[RenderableObject] {
        &self.objects
    }

    pub fn speed_scale(&self) -> f32 {
        self.speed_scale
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    /// Append `n` random objects. Returns the new pool size.
    pub fn add_batch(&mut self, n: usize) -> usize {
        self.objects.reserve(n);
        for _ in 0..n {
            let obj = RenderableObject::random(&mut self.rng, self.speed_scale);
            self.objects.push(obj);
        }
        self.objects.len()
    }

    /// Drop up to `n` objects from the tail. Returns how many were removed.
    pub fn remove_batch(&mut self, n: usize) -> usize {
        let remove = n.min(self.objects.len());
        self.objects.truncate(self.objects.len() - remove);
        remove
    }

    /// Re-roll every speed vector with the new scale. Orientation is kept.
    pub fn set_rotation_speed_scale(&mut self, scale: f32) {
        self.speed_scale = scale;
        for obj in &mut self.objects {
            obj.rotation_speed = random_speed(&mut self.rng, scale);
        }
    }

    pub fn set_wireframe(&mut self, wireframe: bool) {
        self.wireframe = wireframe;
    }

    pub fn advance_rotations(&mut self) {
        for obj in &mut self.objects {
            obj.rotation += obj.rotation_speed;
        }
    }

    /// Sum of the vertex counts of every object's geometry.
    pub fn vertex_total(&self) -> u64 {
        self.objects
            .iter()
            .map(|o| o.kind.vertex_count() as u64)
            .sum()
    }

    pub fn count_by_kind(&self) -> [usize; GeometryKind::COUNT] {
        let mut counts = [0; GeometryKind::COUNT];
        for obj in &self.objects {
            counts[obj.kind.index()] += 1;
        }
        counts
    }
}
