//! Perspective camera with reverse-Z depth.

use crate::pipeline::CameraUniform;
use glam::{Mat3, Mat4, Quat, Vec3};

/// A camera that produces view and projection matrices.
///
/// Depth is reversed: the near plane maps to z = 1 and the far plane to
/// z = 0, which keeps precision across the very large near/far ratio a sky
/// dome needs.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Vec3,
    /// Rotation as a unit quaternion; identity looks down -Z.
    pub rotation: Quat,
    pub projection: Projection,
    /// Near clip plane distance (always positive).
    pub near: f32,
    /// Far clip plane distance (always positive, > near).
    pub far: f32,
}

#[derive(Debug, Clone)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        /// Width / height.
        aspect_ratio: f32,
    },
}

impl Camera {
    /// Build a perspective camera from a vertical field of view in degrees.
    pub fn perspective(fov_y_degrees: f32, aspect_ratio: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            projection: Projection::Perspective {
                fov_y: fov_y_degrees.to_radians(),
                aspect_ratio,
            },
            near,
            far,
        }
    }

    /// World-to-view transform.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        match &self.projection {
            Projection::Perspective {
                fov_y,
                aspect_ratio,
            } => {
                // near and far swapped for reverse-Z
                Mat4::perspective_rh(*fov_y, *aspect_ratio, self.far, self.near)
            }
        }
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// The forward direction vector (-Z in camera space).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    /// Rotate the camera to face `target` with world +Y as up.
    ///
    /// Does nothing when the target coincides with the camera position. When
    /// looking straight up or down, world +Z is used as the reference instead.
    pub fn look_at(&mut self, target: Vec3) {
        let Some(forward) = (target - self.position).try_normalize() else {
            return;
        };
        let reference = if forward.cross(Vec3::Y).length_squared() < 1e-8 {
            Vec3::Z
        } else {
            Vec3::Y
        };
        let right = forward.cross(reference).normalize();
        let up = right.cross(forward);
        self.rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize();
    }

    /// Update the aspect ratio for perspective projection.
    pub fn set_aspect_ratio(&mut self, width: f32, height: f32) {
        let Projection::Perspective { aspect_ratio, .. } = &mut self.projection;
        *aspect_ratio = width / height.max(1.0);
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform::from_matrix(self.view_projection_matrix())
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(60.0, 16.0 / 9.0, 100.0, 2_000_000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn clip(camera: &Camera, point: Vec3) -> Vec4 {
        camera.view_projection_matrix() * point.extend(1.0)
    }

    #[test]
    fn test_identity_camera_looks_down_neg_z() {
        let camera = Camera::default();
        let forward = camera.forward();
        assert!(forward.x.abs() < 1e-6);
        assert!(forward.y.abs() < 1e-6);
        assert!((forward.z + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_perspective_converts_degrees() {
        let camera = Camera::perspective(60.0, 1.0, 1.0, 10.0);
        let Projection::Perspective { fov_y, .. } = camera.projection;
        assert!((fov_y - std::f32::consts::FRAC_PI_3).abs() < 1e-6);
    }

    #[test]
    fn test_set_aspect_ratio() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(1920.0, 1080.0);
        let Projection::Perspective { aspect_ratio, .. } = camera.projection;
        assert!((aspect_ratio - 16.0 / 9.0).abs() < 1e-6);
    }

    #[test]
    fn test_set_aspect_ratio_zero_height_is_finite() {
        let mut camera = Camera::default();
        camera.set_aspect_ratio(800.0, 0.0);
        let Projection::Perspective { aspect_ratio, .. } = camera.projection;
        assert!(aspect_ratio.is_finite());
    }

    #[test]
    fn test_reverse_z_near_maps_to_one_far_to_zero() {
        let camera = Camera::perspective(60.0, 1.0, 100.0, 2_000_000.0);
        let near = clip(&camera, Vec3::new(0.0, 0.0, -100.0));
        let far = clip(&camera, Vec3::new(0.0, 0.0, -2_000_000.0));
        assert!((near.z / near.w - 1.0).abs() < 1e-4);
        assert!((far.z / far.w).abs() < 1e-4);
    }

    #[test]
    fn test_dome_radius_is_inside_frustum() {
        let mut camera = Camera::perspective(60.0, 16.0 / 9.0, 100.0, 2_000_000.0);
        camera.position = Vec3::new(0.0, 100.0, 2000.0);
        camera.look_at(Vec3::ZERO);
        let point = clip(&camera, camera.position + camera.forward() * 450_000.0);
        let depth = point.z / point.w;
        assert!(depth > 0.0 && depth < 1.0);
    }

    #[test]
    fn test_view_matrix_inverse_is_camera_transform() {
        let camera = Camera {
            position: Vec3::new(10.0, 20.0, 30.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
            ..Camera::default()
        };
        let inv_view = camera.view_matrix().inverse();
        let reconstructed = inv_view.col(3).truncate();
        assert!((reconstructed - camera.position).length() < 1e-4);
    }

    #[test]
    fn test_look_at_faces_target() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 100.0, 2000.0),
            ..Camera::default()
        };
        camera.look_at(Vec3::ZERO);
        let expected = (Vec3::ZERO - camera.position).normalize();
        assert!((camera.forward() - expected).length() < 1e-5);
        // no roll: right stays horizontal
        assert!(camera.right().y.abs() < 1e-5);
        assert!(camera.up().y > 0.0);
    }

    #[test]
    fn test_look_at_straight_down_is_stable() {
        let mut camera = Camera {
            position: Vec3::new(0.0, 500.0, 0.0),
            ..Camera::default()
        };
        camera.look_at(Vec3::ZERO);
        assert!((camera.forward() - Vec3::NEG_Y).length() < 1e-5);
        assert!(camera.rotation.is_normalized());
    }

    #[test]
    fn test_look_at_own_position_keeps_rotation() {
        let mut camera = Camera::default();
        let before = camera.rotation;
        camera.look_at(camera.position);
        assert_eq!(camera.rotation, before);
    }

    #[test]
    fn test_up_right_forward_orthonormal() {
        let mut camera = Camera {
            position: Vec3::new(300.0, 40.0, -900.0),
            ..Camera::default()
        };
        camera.look_at(Vec3::new(5.0, 0.0, 5.0));
        let (f, u, r) = (camera.forward(), camera.up(), camera.right());
        for v in [f, u, r] {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
        assert!(f.dot(u).abs() < 1e-5);
        assert!(f.dot(r).abs() < 1e-5);
        assert!(u.dot(r).abs() < 1e-5);
    }

    #[test]
    fn test_to_uniform_matches_view_projection() {
        let camera = Camera::default();
        let uniform = camera.to_uniform();
        assert_eq!(
            uniform.view_proj,
            camera.view_projection_matrix().to_cols_array_2d()
        );
    }
}
