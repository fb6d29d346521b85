/// Geometry primitives shared by the projection pipeline and the scenes
use nalgebra::{Point2, Point3};

/// A vertex in world or camera space
pub type Point3D = Point3<f32>;

/// A device/pixel coordinate, produced only by the last pipeline stage
pub type ScreenPoint = Point2<i32>;

/// Number of corners of a cube
pub const CUBE_VERTEX_COUNT: usize = 8;

/// The corners of the axis-aligned unit cube spanning [-1, 1] on every axis
const UNIT_CUBE: [[f32; 3]; CUBE_VERTEX_COUNT] = [
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

/// A fixed, ordered set of 8 cube corners
///
/// The canonical vertices are never mutated. Every frame rotates fresh copies
/// of them, so no transform error accumulates across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Cube {
    vertices: [Point3D; CUBE_VERTEX_COUNT],
}

impl Cube {
    /// The unit cube centered at the origin
    pub fn unit() -> Self {
        Self {
            vertices: UNIT_CUBE.map(|[x, y, z]| Point3::new(x, y, z)),
        }
    }

    pub fn vertices(&self) -> &[Point3D; CUBE_VERTEX_COUNT] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl Default for Cube {
    fn default() -> Self {
        Self::unit()
    }
}

/// Iterate over every unordered index pair `(i, j)` with `i < j < n`
///
/// Yields `n * (n - 1) / 2` pairs: a complete graph on `n` vertices.
pub fn pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n).flat_map(move |i| (i + 1..n).map(move |j| (i, j)))
}

/// Number of unordered pairs among `n` points
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// An axis-aligned integer rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// True when the open interiors of both rectangles overlap
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}
