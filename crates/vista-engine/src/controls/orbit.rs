use std::f32::consts::PI;

use glam::Vec3;

use crate::camera::PerspectiveCamera;
use crate::input::{ButtonState, InputEvent, MouseButton};

/// Left-drag rotates the camera around its target; the wheel dollies in and out.
///
/// Holds no spherical state of its own: every event recomputes the offset from
/// `camera.target` to `camera.position`, so the camera stays the source of truth.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    /// Radians per logical pixel of drag.
    pub rotate_speed: f32,
    /// Fraction of the current distance per wheel line.
    pub zoom_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,

    dragging: bool,
    last_pointer: Option<(f32, f32)>,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self {
            rotate_speed: 0.005 * PI,
            zoom_speed: 0.1,
            min_distance: 0.1,
            max_distance: 1000.0,
            dragging: false,
            last_pointer: None,
        }
    }
}

impl OrbitControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Applies one input event to `camera`. Returns `true` when the camera moved.
    pub fn handle(&mut self, event: &InputEvent, camera: &mut PerspectiveCamera) -> bool {
        match *event {
            InputEvent::PointerButton { button: MouseButton::Left, state } => {
                self.dragging = state == ButtonState::Pressed;
                false
            }
            InputEvent::PointerMoved { x, y } => {
                let prev = self.last_pointer.replace((x, y));
                match prev {
                    Some((px, py)) if self.dragging => {
                        self.rotate(camera, -(x - px) * self.rotate_speed, -(y - py) * self.rotate_speed);
                        true
                    }
                    _ => false,
                }
            }
            InputEvent::MouseWheel(delta) => {
                let lines = delta.lines_y();
                if lines == 0.0 {
                    return false;
                }
                self.dolly(camera, (1.0 - self.zoom_speed).powf(lines));
                true
            }
            InputEvent::PointerLeft | InputEvent::Focused(false) => {
                self.dragging = false;
                self.last_pointer = None;
                false
            }
            _ => false,
        }
    }

    fn rotate(&self, camera: &mut PerspectiveCamera, d_theta: f32, d_phi: f32) {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }

        // theta around +Y from +Z, phi down from +Y.
        let theta = offset.x.atan2(offset.z) + d_theta;
        let phi = ((offset.y / radius).clamp(-1.0, 1.0).acos() + d_phi).clamp(1e-4, PI - 1e-4);

        camera.position = camera.target + spherical(radius, phi, theta);
    }

    fn dolly(&self, camera: &mut PerspectiveCamera, scale: f32) {
        let offset = camera.position - camera.target;
        let radius = offset.length();
        if radius <= f32::EPSILON {
            return;
        }
        let new_radius = (radius * scale).clamp(self.min_distance, self.max_distance);
        camera.position = camera.target + offset * (new_radius / radius);
    }
}

fn spherical(radius: f32, phi: f32, theta: f32) -> Vec3 {
    let sin_phi = phi.sin();
    Vec3::new(radius * sin_phi * theta.sin(), radius * phi.cos(), radius * sin_phi * theta.cos())
}
