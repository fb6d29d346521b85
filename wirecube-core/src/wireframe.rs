/// Rotating wireframe cube scene
use crate::config::CubeConfig;
use crate::driver::Scene;
use crate::error::SurfaceError;
use crate::geometry::{pairs, Cube, ScreenPoint, CUBE_VERTEX_COUNT};
use crate::projection::{Camera, Viewport};
use crate::surface::{Color, DrawSurface};
use crate::transform::{rotate_model, RotationState};

/// A line segment between two projected vertices
pub type Segment = (ScreenPoint, ScreenPoint);

/// The unit cube spinning in front of a fixed camera
///
/// Every vertex pair is connected, not only the twelve cube edges, so each
/// frame draws a complete graph of 28 segments.
#[derive(Debug, Clone)]
pub struct WireframeScene {
    cube: Cube,
    camera: Camera,
    viewport: Viewport,
    rotation: RotationState,
    angle_step: f32,
    background: Color,
    foreground: Color,
    screen: [ScreenPoint; CUBE_VERTEX_COUNT],
}

impl WireframeScene {
    pub fn new(config: &CubeConfig) -> Self {
        let cube = Cube::unit();
        let camera = config.camera();
        let rotation = RotationState::zero();
        let screen = project_cube(&cube, &camera, &config.viewport, rotation.angle());

        Self {
            cube,
            camera,
            viewport: config.viewport,
            rotation,
            angle_step: config.angle_step,
            background: config.background,
            foreground: config.foreground,
            screen,
        }
    }

    pub fn angle(&self) -> f32 {
        self.rotation.angle()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Screen positions of the cube corners for the current angle
    pub fn screen_points(&self) -> &[ScreenPoint; CUBE_VERTEX_COUNT] {
        &self.screen
    }

    /// Project the canonical cube at an arbitrary angle
    pub fn project_vertices(&self, angle: f32) -> [ScreenPoint; CUBE_VERTEX_COUNT] {
        project_cube(&self.cube, &self.camera, &self.viewport, angle)
    }

    /// Every unordered pair of the current screen points
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        pairs(self.screen.len()).map(move |(i, j)| (self.screen[i], self.screen[j]))
    }
}

impl Default for WireframeScene {
    fn default() -> Self {
        Self::new(&CubeConfig::default())
    }
}

impl Scene for WireframeScene {
    fn update(&mut self) {
        self.rotation.advance(self.angle_step);
        self.screen = self.project_vertices(self.rotation.angle());
    }

    fn render<S: DrawSurface>(&self, surface: &mut S) -> Result<(), SurfaceError> {
        surface.set_draw_color(self.background)?;
        surface.clear()?;

        surface.set_draw_color(self.foreground)?;
        for (from, to) in self.segments() {
            surface.draw_line(from, to)?;
        }

        surface.present()
    }
}

/// Rotate, move into camera space, project and map every corner to pixels
pub fn project_cube(
    cube: &Cube,
    camera: &Camera,
    viewport: &Viewport,
    angle: f32,
) -> [ScreenPoint; CUBE_VERTEX_COUNT] {
    let vertices = *cube.vertices();
    vertices.map(|vertex| camera.project_to_screen(&rotate_model(&vertex, angle), viewport))
}
