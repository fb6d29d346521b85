/// Wirecube Core Library - projection pipeline, scenes and the frame driver
///
/// This library is free of platform code. Backends implement `DrawSurface`
/// and hand it to a `FrameDriver` together with a `Scene`.

pub mod config;
pub mod driver;
pub mod error;
pub mod geometry;
pub mod pong;
pub mod projection;
pub mod surface;
pub mod transform;
pub mod wireframe;

// Re-export commonly used types
pub use config::{CubeConfig, PongConfig};
pub use driver::{DriverState, FrameDriver, Scene};
pub use error::{ConfigError, SurfaceError};
pub use geometry::{Cube, Point3D, Rect, ScreenPoint};
pub use pong::{Player, PongScene};
pub use projection::{Camera, Viewport};
pub use surface::{Color, DrawSurface, Key, SurfaceEvent};
pub use transform::{rotate_x, rotate_y, RotationState};
pub use wireframe::WireframeScene;
