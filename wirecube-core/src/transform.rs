/// Point rotations and the animated rotation angle
use std::f32::consts::{PI, TAU};

use nalgebra::Point3;

use crate::geometry::Point3D;

/// Angle advanced per tick by the cube animation (a full turn every 128 ticks)
pub const DEFAULT_ANGLE_STEP: f32 = PI / 64.0;

/// Distance below a full turn that still counts as a full turn when wrapping
const WRAP_EPSILON: f32 = 1e-4;

/// Rotate a point by `angle` radians, leaving `x` fixed
pub fn rotate_y(p: &Point3D, angle: f32) -> Point3D {
    let (sin, cos) = angle.sin_cos();
    Point3::new(p.x, cos * p.y - sin * p.z, sin * p.y + cos * p.z)
}

/// Rotate a point by `angle` radians, leaving `y` fixed
pub fn rotate_x(p: &Point3D, angle: f32) -> Point3D {
    let (sin, cos) = angle.sin_cos();
    Point3::new(cos * p.x - sin * p.z, p.y, sin * p.x + cos * p.z)
}

/// Rotation applied to the cube every frame: `rotate_y` then `rotate_x`,
/// both by the same angle
pub fn rotate_model(p: &Point3D, angle: f32) -> Point3D {
    rotate_x(&rotate_y(p, angle), angle)
}

/// Single animated rotation angle, kept in `[0, 2π)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    angle: f32,
}

impl RotationState {
    pub fn new(angle: f32) -> Self {
        Self {
            angle: wrap_angle(angle),
        }
    }

    pub fn zero() -> Self {
        Self { angle: 0.0 }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Advance by `step` radians and wrap back into `[0, 2π)`
    pub fn advance(&mut self, step: f32) {
        self.angle = wrap_angle(self.angle + step);
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Wrap an angle into `[0, 2π)`
///
/// Accumulated f32 steps can stop just short of a full turn; anything within
/// `WRAP_EPSILON` of `2π` is treated as having completed it.
pub fn wrap_angle(angle: f32) -> f32 {
    let mut wrapped = angle.rem_euclid(TAU);
    if TAU - wrapped < WRAP_EPSILON {
        wrapped -= TAU;
    }
    wrapped.max(0.0)
}
