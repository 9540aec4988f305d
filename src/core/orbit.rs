use super::camera::Camera;
use crate::config::{
    DAMPING_FACTOR, INITIAL_AUTO_ROTATE_SPEED, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE,
    ORBIT_ROTATE_SPEED, ORBIT_ZOOM_SPEED,
};
use glam::{Vec2, Vec3};
use std::f32::consts::PI;

// Keeps the polar angle off the poles so look_at never degenerates.
const POLE_EPS: f32 = 1e-6;

/// Orbit camera controller: pointer drag rotates around the target, the wheel
/// dollies, and optional auto-rotation spins around the vertical axis.
///
/// Input only accumulates deltas; `update` applies them to the camera once per
/// frame. With damping on, the deltas decay geometrically so motion eases out
/// after the pointer is released.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    /// 2.0 completes one revolution every 30 s at 60 fps.
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    delta_theta: f32,
    delta_phi: f32,
    scale: f32,
    drag_last: Option<Vec2>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: DAMPING_FACTOR,
            auto_rotate: false,
            auto_rotate_speed: INITIAL_AUTO_ROTATE_SPEED,
            rotate_speed: ORBIT_ROTATE_SPEED,
            zoom_speed: ORBIT_ZOOM_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            delta_theta: 0.0,
            delta_phi: 0.0,
            scale: 1.0,
            drag_last: None,
        }
    }
}

impl OrbitControls {
    /// Azimuth step applied per frame while auto-rotating.
    pub fn auto_rotation_angle(&self) -> f32 {
        2.0 * PI / 60.0 / 60.0 * self.auto_rotate_speed
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.delta_theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.delta_phi -= angle;
    }

    pub fn is_dragging(&self) -> bool {
        self.drag_last.is_some()
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag_last = Some(Vec2::new(x, y));
    }

    /// A full viewport-height drag turns the camera by one revolution.
    pub fn pointer_move(&mut self, x: f32, y: f32, viewport_height: f32) {
        let Some(last) = self.drag_last else {
            return;
        };
        let now = Vec2::new(x, y);
        let d = now - last;
        let h = viewport_height.max(1.0);
        self.rotate_left(2.0 * PI * d.x / h * self.rotate_speed);
        self.rotate_up(2.0 * PI * d.y / h * self.rotate_speed);
        self.drag_last = Some(now);
    }

    pub fn pointer_up(&mut self) {
        self.drag_last = None;
    }

    /// Negative `delta_y` (wheel up) moves the camera in.
    pub fn wheel(&mut self, delta_y: f32) {
        let step = 0.95_f32.powf(self.zoom_speed);
        if delta_y < 0.0 {
            self.scale *= step;
        } else if delta_y > 0.0 {
            self.scale /= step;
        }
    }

    /// Apply pending rotation/zoom to `camera`. Returns whether the eye moved.
    pub fn update(&mut self, camera: &mut Camera) -> bool {
        let offset = camera.eye - camera.target;
        let radius = offset.length();
        let (mut theta, mut phi) = if radius > 0.0 {
            (offset.x.atan2(offset.z), (offset.y / radius).clamp(-1.0, 1.0).acos())
        } else {
            (0.0, PI * 0.5)
        };

        if self.auto_rotate && !self.is_dragging() {
            self.rotate_left(self.auto_rotation_angle());
        }

        if self.enable_damping {
            theta += self.delta_theta * self.damping_factor;
            phi += self.delta_phi * self.damping_factor;
        } else {
            theta += self.delta_theta;
            phi += self.delta_phi;
        }
        phi = phi.clamp(POLE_EPS, PI - POLE_EPS);
        let radius = (radius * self.scale).clamp(self.min_distance, self.max_distance);

        let sin_phi = phi.sin();
        let new_offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.eye = camera.target + new_offset;

        if self.enable_damping {
            self.delta_theta *= 1.0 - self.damping_factor;
            self.delta_phi *= 1.0 - self.damping_factor;
        } else {
            self.delta_theta = 0.0;
            self.delta_phi = 0.0;
        }
        self.scale = 1.0;

        (new_offset - offset).length_squared() > 1e-8
    }
}
