/// Camera, pinhole projection and screen mapping
use nalgebra::{Point2, Point3, Vector3};

use crate::geometry::{Point3D, ScreenPoint};
use crate::transform::{rotate_x, rotate_y};

/// Default distance from the camera to the focal plane
pub const DEFAULT_FOCAL_LENGTH: f32 = 4.0;

/// Normalized focal-plane coordinates, before pixel mapping
pub type FocalPoint = Point2<f32>;

/// Fixed pinhole camera
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Point3D,
    /// Per-axis rotation in radians. Only `x` and `y` are applied.
    pub rotation: Vector3<f32>,
    pub focal_length: f32,
}

impl Camera {
    pub fn new(position: Point3D, rotation: Vector3<f32>, focal_length: f32) -> Self {
        Self {
            position,
            rotation,
            focal_length,
        }
    }

    /// Move a world-space point into camera space
    ///
    /// Translates by the camera position, then applies `rotate_x` with
    /// `rotation.x` and `rotate_y` with `rotation.y`. The z component of the
    /// rotation is never applied.
    pub fn to_camera_space(&self, point: &Point3D) -> Point3D {
        let translated = Point3::from(point - self.position);
        if self.rotation == Vector3::zeros() {
            return translated;
        }

        let rotated = rotate_x(&translated, self.rotation.x);
        rotate_y(&rotated, self.rotation.y)
    }

    /// Project a camera-space point onto the focal plane
    ///
    /// Points closer than the focal length (or behind the camera) collapse to
    /// the origin instead of dividing by a tiny or negative depth.
    pub fn project(&self, point: &Point3D) -> FocalPoint {
        if point.z < self.focal_length {
            return Point2::origin();
        }

        Point2::new(
            self.focal_length * point.x / point.z,
            self.focal_length * point.y / point.z,
        )
    }

    /// World space to pixel coordinates in one go
    pub fn project_to_screen(&self, point: &Point3D, viewport: &Viewport) -> ScreenPoint {
        viewport.to_screen(&self.project(&self.to_camera_space(point)))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(
            Point3::new(0.0, 0.0, -24.0),
            Vector3::zeros(),
            DEFAULT_FOCAL_LENGTH,
        )
    }
}

/// Pixel dimensions of the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Map focal-plane coordinates to pixels centered in the viewport
    ///
    /// Scaled values are truncated toward zero. Results are not clamped, so
    /// they may fall outside the viewport.
    pub fn to_screen(&self, point: &FocalPoint) -> ScreenPoint {
        Point2::new(
            to_pixel(point.x, self.width),
            to_pixel(point.y, self.height),
        )
    }

    pub fn center(&self) -> ScreenPoint {
        Point2::new(self.width / 2, self.height / 2)
    }
}

/// Scale a focal coordinate by `extent` and shift it to the centre.
/// Truncates toward zero; far off-screen values saturate at the i32 range.
fn to_pixel(value: f32, extent: i32) -> i32 {
    ((value * extent as f32) as i32).saturating_add(extent / 2)
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(640, 640)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_camera_defaults() {
        let camera = Camera::default();
        assert_eq!(camera.position, Point3::new(0.0, 0.0, -24.0));
        assert_eq!(camera.rotation, Vector3::zeros());
        assert_eq!(camera.focal_length, 4.0);
    }

    #[test]
    fn test_translation_only_without_rotation() {
        let camera = Camera::default();
        let p = camera.to_camera_space(&Point3::new(-1.0, -1.0, -1.0));
        assert_eq!(p, Point3::new(-1.0, -1.0, 23.0));
    }

    #[test]
    fn test_camera_rotation_applies_x_then_y() {
        let rotation = Vector3::new(0.3, -0.7, 1.5);
        let camera = Camera::new(Point3::new(1.0, 2.0, 3.0), rotation, 4.0);
        let world = Point3::new(2.0, 0.0, 9.0);

        let translated = Point3::new(1.0, -2.0, 6.0);
        let expected = rotate_y(&rotate_x(&translated, 0.3), -0.7);
        let actual = camera.to_camera_space(&world);
        assert!((actual - expected).norm() < 1e-6);
    }

    #[test]
    fn test_camera_rotation_ignores_z() {
        let world = Point3::new(0.5, 0.5, 10.0);
        let a = Camera::new(Point3::origin(), Vector3::new(0.2, 0.4, 0.0), 4.0);
        let b = Camera::new(Point3::origin(), Vector3::new(0.2, 0.4, 2.0), 4.0);
        assert_eq!(a.to_camera_space(&world), b.to_camera_space(&world));
    }

    #[test]
    fn test_projection_recovers_proportions() {
        let camera = Camera::default();
        for &(x, y, z) in &[(1.0, 2.0, 4.0), (-3.0, 0.5, 10.0), (7.0, -7.0, 100.0)] {
            let uv = camera.project(&Point3::new(x, y, z));
            let scale = z / camera.focal_length;
            assert!((uv.x * scale - x).abs() < 1e-4);
            assert!((uv.y * scale - y).abs() < 1e-4);
        }
    }

    #[test]
    fn test_projection_clamps_near_points() {
        let camera = Camera::default();
        for &z in &[3.999, 0.0, -1.0, -100.0] {
            let uv = camera.project(&Point3::new(5.0, -5.0, z));
            assert_eq!(uv, Point2::new(0.0, 0.0));
        }
    }

    #[test]
    fn test_screen_mapping_truncates_toward_zero() {
        let viewport = Viewport::new(640, 640);
        assert_eq!(viewport.to_screen(&Point2::new(0.0, 0.0)), Point2::new(320, 320));
        // -0.9 px truncates to 0, not -1
        assert_eq!(
            viewport.to_screen(&Point2::new(-0.9 / 640.0, 0.9 / 640.0)),
            Point2::new(320, 320)
        );
    }

    #[test]
    fn test_screen_mapping_is_unclamped() {
        let viewport = Viewport::new(100, 50);
        assert_eq!(viewport.to_screen(&Point2::new(2.0, -3.0)), Point2::new(250, -125));
    }

    #[test]
    fn test_screen_mapping_saturates_far_points() {
        let viewport = Viewport::new(640, 640);
        let far = viewport.to_screen(&Point2::new(1e9, -1e9));
        assert_eq!(far, Point2::new(i32::MAX, i32::MIN + 320));
    }

    #[test]
    fn test_far_camera_projects_without_overflow() {
        let camera = Camera::new(Point3::new(-1e9, 0.0, -24.0), Vector3::zeros(), 4.0);
        let screen = camera.project_to_screen(&Point3::new(1.0, 1.0, 1.0), &Viewport::default());
        assert_eq!(screen.x, i32::MAX);
    }

    #[test]
    fn test_screen_mapping_is_deterministic() {
        let viewport = Viewport::new(1280, 720);
        let uv = Point2::new(0.1234, -0.0567);
        let first = viewport.to_screen(&uv);
        for _ in 0..100 {
            assert_eq!(viewport.to_screen(&uv), first);
        }
    }

    #[test]
    fn test_end_to_end_corner() {
        let camera = Camera::default();
        let viewport = Viewport::new(640, 640);
        let screen = camera.project_to_screen(&Point3::new(-1.0, -1.0, -1.0), &viewport);
        assert_eq!(screen, Point2::new(209, 209));
    }
}
