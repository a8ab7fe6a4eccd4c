use glam::{Mat4, Vec2, Vec3};

/// Fixed orthographic camera looking at the scene origin.
///
/// The frustum height stays constant; resizes only change the aspect, so the
/// cube keeps its on-screen size when the window gets wider.
pub struct OrthoCamera {
    pub eye: Vec3,
    pub target: Vec3,
    /// World-space height of the view volume.
    pub frustum_height: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for OrthoCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 2.0, 20.0),
            target: Vec3::ZERO,
            frustum_height: 8.0,
            aspect: 16.0 / 9.0,
            near: 1.0,
            far: 1000.0,
        }
    }
}

impl OrthoCamera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let half_height = self.frustum_height * 0.5;
        let half_width = half_height * self.aspect;
        Mat4::orthographic_rh(
            -half_width,
            half_width,
            -half_height,
            half_height,
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

/// Cube orientation in radians, driven by the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubeRotation {
    pub pitch: f32,
    pub yaw: f32,
}

impl Default for CubeRotation {
    fn default() -> Self {
        // Resting pose before the pointer first moves.
        Self {
            pitch: 0.0,
            yaw: 30.0_f32.to_radians(),
        }
    }
}

/// Map a pointer position to a cube rotation.
///
/// Yaw sweeps +-30 degrees across the window width. Pitch sweeps +-30
/// degrees down the height with a -10 degree bias, so the resting center
/// tilts the cube slightly upward.
pub fn pointer_rotation(cursor: Vec2, window: Vec2) -> CubeRotation {
    let half = window * 0.5;
    let yaw_deg = (cursor.x - half.x) / half.x * 30.0;
    let pitch_deg = (cursor.y - half.y) / half.y * 30.0 - 10.0;
    CubeRotation {
        pitch: pitch_deg.to_radians(),
        yaw: yaw_deg.to_radians(),
    }
}
