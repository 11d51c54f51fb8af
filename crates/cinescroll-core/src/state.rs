//! Camera description handed to the renderer.
//!
//! The choreography works in f64; the camera is converted to f32 here because
//! that is what GPU uniforms take.

use glam::{DVec3, Mat4, Vec3};

/// Where the camera rig sits this frame.
///
/// `position` is the scroll-driven camera; `parallax` is the offset of the
/// parent group the camera hangs from. The eye is their sum.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraPose {
    pub position: DVec3,
    pub parallax: DVec3,
}

impl CameraPose {
    #[inline]
    pub fn eye(&self) -> DVec3 {
        self.position + self.parallax
    }
}

/// Simple right-handed camera description with perspective projection.
#[derive(Clone, Debug)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    /// Camera at the pose's eye looking down -Z.
    pub fn from_pose(pose: &CameraPose, aspect: f64, fov_y_degrees: f64) -> Self {
        let eye = pose.eye().as_vec3();
        Self {
            eye,
            target: eye - Vec3::Z,
            up: Vec3::Y,
            aspect: aspect as f32,
            fovy_radians: (fov_y_degrees as f32).to_radians(),
            znear: 0.1,
            zfar: 100.0,
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
