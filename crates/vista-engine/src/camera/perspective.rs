use glam::{Mat4, Vec3};

use crate::error::{ensure_positive, StageError};

/// Perspective camera looking at `target`.
///
/// `aspect` is only folded into the projection by
/// [`update_projection_matrix`](Self::update_projection_matrix); callers change
/// both together so a frame never sees one without the other.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,

    projection: Mat4,
}

impl PerspectiveCamera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Result<Self, StageError> {
        let fov = ensure_positive("fov", fov)?;
        if fov >= 180.0 {
            return Err(StageError::invalid("fov", format!("must be below 180 degrees, got {fov}")));
        }
        let aspect = ensure_positive("aspect", aspect)?;
        let near = ensure_positive("near", near)?;
        let far = ensure_positive("far", far)?;
        if far <= near {
            return Err(StageError::invalid("far", format!("must exceed near ({near}), got {far}")));
        }

        let mut camera = Self {
            fov,
            aspect,
            near,
            far,
            position: Vec3::ZERO,
            target: Vec3::ZERO,
            up: Vec3::Y,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection_matrix();
        Ok(camera)
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    /// Sets the aspect ratio and recomputes the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Recomputes the cached projection from `fov`, `aspect`, `near`, `far`.
    pub fn update_projection_matrix(&mut self) {
        self.projection = Mat4::perspective_rh(self.fov.to_radians(), self.aspect, self.near, self.far);
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_matrix(&self) -> Mat4 {
        // Degenerate look direction (position == target) falls back to looking down -Z.
        let target = if self.position.distance_squared(self.target) > f32::EPSILON {
            self.target
        } else {
            self.position + Vec3::NEG_Z
        };
        Mat4::look_at_rh(self.position, target, self.up)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn projection_tracks_aspect() {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 100.0).unwrap();
        let before = cam.projection_matrix();
        cam.set_aspect(2.0);
        let after = cam.projection_matrix();
        assert_relative_eq!(after.x_axis.x * 2.0, before.x_axis.x, epsilon = 1e-6);
        assert_eq!(after.y_axis.y, before.y_axis.y);
    }

    #[test]
    fn target_projects_to_screen_center() {
        let cam = PerspectiveCamera::new(75.0, 1.5, 0.1, 100.0)
            .unwrap()
            .with_position(Vec3::new(-15.0, 0.0, 15.0));
        let clip = cam.view_projection_matrix() * Vec3::ZERO.extend(1.0);
        assert_relative_eq!(clip.x / clip.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(clip.y / clip.w, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn rejects_inverted_clip_planes() {
        assert!(PerspectiveCamera::new(75.0, 1.0, 10.0, 1.0).is_err());
        assert!(PerspectiveCamera::new(190.0, 1.0, 0.1, 1.0).is_err());
    }
}
