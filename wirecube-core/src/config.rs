/// Scene configuration and parsers for its textual values
use std::time::Duration;

use nalgebra::{Point3, Vector3};
use nom::{
    character::complete::{char, digit1, multispace0, one_of},
    combinator::{all_consuming, map_res},
    number::complete::float,
    sequence::{delimited, separated_pair, tuple},
    IResult,
};

use crate::error::ConfigError;
use crate::projection::{Camera, Viewport, DEFAULT_FOCAL_LENGTH};
use crate::surface::Color;
use crate::transform::DEFAULT_ANGLE_STEP;

/// Settings for the rotating wireframe cube
#[derive(Debug, Clone, PartialEq)]
pub struct CubeConfig {
    pub viewport: Viewport,
    pub camera_position: Point3<f32>,
    pub camera_rotation: Vector3<f32>,
    pub focal_length: f32,
    /// Radians added to the rotation angle every tick
    pub angle_step: f32,
    pub frame_delay: Duration,
    pub background: Color,
    pub foreground: Color,
}

impl CubeConfig {
    pub fn camera(&self) -> Camera {
        Camera::new(self.camera_position, self.camera_rotation, self.focal_length)
    }

    /// Reject values the pipeline cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport.width <= 0 || self.viewport.height <= 0 {
            return Err(ConfigError::new("viewport", "dimensions must be positive"));
        }
        if !(self.focal_length.is_finite() && self.focal_length > 0.0) {
            return Err(ConfigError::new("focal", "focal length must be a positive number"));
        }
        if !self.angle_step.is_finite() {
            return Err(ConfigError::new("step", "angle step must be finite"));
        }
        Ok(())
    }
}

impl Default for CubeConfig {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            viewport: Viewport::default(),
            camera_position: camera.position,
            camera_rotation: camera.rotation,
            focal_length: DEFAULT_FOCAL_LENGTH,
            angle_step: DEFAULT_ANGLE_STEP,
            frame_delay: Duration::from_millis(30),
            background: Color::BLACK,
            foreground: Color::WHITE,
        }
    }
}

/// Settings for the paddle game. The playfield itself is fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct PongConfig {
    pub frame_delay: Duration,
}

impl Default for PongConfig {
    fn default() -> Self {
        Self {
            frame_delay: Duration::from_millis(4),
        }
    }
}

fn ws<'a, O>(
    inner: impl FnMut(&'a str) -> IResult<&'a str, O>,
) -> impl FnMut(&'a str) -> IResult<&'a str, O> {
    delimited(multispace0, inner, multispace0)
}

fn dimension(input: &str) -> IResult<&str, i32> {
    map_res(digit1, str::parse::<i32>)(input)
}

fn viewport(input: &str) -> IResult<&str, Viewport> {
    let (input, (width, height)) =
        separated_pair(ws(dimension), one_of("xX"), ws(dimension))(input)?;
    Ok((input, Viewport::new(width, height)))
}

fn vector3(input: &str) -> IResult<&str, (f32, f32, f32)> {
    let (input, (x, _, y, _, z)) =
        tuple((ws(float), char(','), ws(float), char(','), ws(float)))(input)?;
    Ok((input, (x, y, z)))
}

/// Parse `WIDTHxHEIGHT`, e.g. `640x640`
pub fn parse_viewport(value: &str) -> Result<Viewport, ConfigError> {
    let (_, viewport) = all_consuming(viewport)(value)
        .map_err(|_| ConfigError::new("viewport", format!("expected WIDTHxHEIGHT, got {value:?}")))?;
    if viewport.width == 0 || viewport.height == 0 {
        return Err(ConfigError::new("viewport", "dimensions must be positive"));
    }
    Ok(viewport)
}

/// Parse `X,Y,Z`, e.g. `0,0,-24`
pub fn parse_vector3(value: &str) -> Result<Vector3<f32>, ConfigError> {
    let (_, (x, y, z)) = all_consuming(vector3)(value)
        .map_err(|_| ConfigError::new("vector", format!("expected X,Y,Z, got {value:?}")))?;
    Ok(Vector3::new(x, y, z))
}

/// Parse a single finite float
pub fn parse_f32(value: &str) -> Result<f32, ConfigError> {
    let (_, number) = all_consuming(ws(float))(value)
        .map_err(|_| ConfigError::new("number", format!("expected a number, got {value:?}")))?;
    if !number.is_finite() {
        return Err(ConfigError::new("number", format!("{value:?} is not finite")));
    }
    Ok(number)
}

/// Parse a whole number of milliseconds
pub fn parse_millis(value: &str) -> Result<Duration, ConfigError> {
    let (_, millis) = all_consuming(ws(map_res(digit1, str::parse::<u64>)))(value)
        .map_err(|_| ConfigError::new("delay", format!("expected milliseconds, got {value:?}")))?;
    Ok(Duration::from_millis(millis))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cube_config() {
        let config = CubeConfig::default();
        assert_eq!(config.viewport, Viewport::new(640, 640));
        assert_eq!(config.camera_position, Point3::new(0.0, 0.0, -24.0));
        assert_eq!(config.focal_length, 4.0);
        assert_eq!(config.camera(), Camera::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_viewport() {
        assert_eq!(parse_viewport("640x480").unwrap(), Viewport::new(640, 480));
        assert_eq!(parse_viewport(" 1280 X 720 ").unwrap(), Viewport::new(1280, 720));
        assert!(parse_viewport("640").is_err());
        assert!(parse_viewport("640x480x3").is_err());
        assert!(parse_viewport("0x480").is_err());
        assert!(parse_viewport("-640x480").is_err());
    }

    #[test]
    fn test_parse_vector3() {
        assert_eq!(parse_vector3("0,0,-24").unwrap(), Vector3::new(0.0, 0.0, -24.0));
        assert_eq!(
            parse_vector3("0.5, -1.25 ,3e1").unwrap(),
            Vector3::new(0.5, -1.25, 30.0)
        );
        assert!(parse_vector3("1,2").is_err());
        assert!(parse_vector3("1,2,3,4").is_err());
        assert!(parse_vector3("a,b,c").is_err());
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse_f32("4").unwrap(), 4.0);
        assert_eq!(parse_f32(" 0.049 ").unwrap(), 0.049);
        assert!(parse_f32("four").is_err());
        assert!(parse_f32("4.0px").is_err());

        assert_eq!(parse_millis("30").unwrap(), Duration::from_millis(30));
        assert!(parse_millis("-30").is_err());
        assert!(parse_millis("1.5").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_focal_length() {
        let config = CubeConfig {
            focal_length: 0.0,
            ..CubeConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(err.key, "focal");
    }
}
